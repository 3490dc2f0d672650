//! UI events consumed by the controller.

use crate::FieldValue;

/// Kind of input that produced a change event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text (including email, password, tel, number inputs).
    #[default]
    Text,
    /// A checkbox; its `checked` state is the value.
    Checkbox,
    /// A select box.
    Select,
    /// Multi-line text.
    Textarea,
    /// Any other input type, kept by name.
    Other(String),
}

impl FieldKind {
    /// Map an HTML-style input type name to a kind.
    pub fn from_input_type(input_type: &str) -> Self {
        match input_type.to_ascii_lowercase().as_str() {
            "" | "text" | "email" | "password" | "tel" | "number" | "url" | "search" => Self::Text,
            "checkbox" => Self::Checkbox,
            "select" | "select-one" | "select-multiple" => Self::Select,
            "textarea" => Self::Textarea,
            other => Self::Other(other.to_string()),
        }
    }

    /// Check if this is a checkbox.
    pub fn is_checkbox(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

impl From<&str> for FieldKind {
    fn from(input_type: &str) -> Self {
        Self::from_input_type(input_type)
    }
}

/// A field value changed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// Name of the field.
    pub field: String,
    /// Raw value as reported by the input.
    pub value: String,
    /// Checked state, meaningful for checkboxes only.
    pub checked: bool,
    /// Kind of input.
    pub kind: FieldKind,
}

impl ChangeEvent {
    /// Create a change event.
    pub fn new(
        field: impl Into<String>,
        kind: impl Into<FieldKind>,
        value: impl Into<String>,
        checked: bool,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            checked,
            kind: kind.into(),
        }
    }

    /// A text input changed.
    pub fn text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FieldKind::Text, value, false)
    }

    /// A checkbox was toggled.
    ///
    /// The raw value is set to `"on"`, as a browser reports it; the
    /// controller stores `checked` instead.
    pub fn checkbox(field: impl Into<String>, checked: bool) -> Self {
        Self::new(field, FieldKind::Checkbox, "on", checked)
    }

    /// The value to store for this event: the checked state for checkboxes,
    /// the raw text otherwise.
    pub fn field_value(&self) -> FieldValue {
        if self.kind.is_checkbox() {
            FieldValue::Bool(self.checked)
        } else {
            FieldValue::Text(self.value.clone())
        }
    }
}

/// A field lost focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlurEvent {
    /// Name of the field.
    pub field: String,
}

impl BlurEvent {
    /// Create a blur event.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}
