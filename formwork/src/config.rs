//! Form configuration types.

use log::Level;

use crate::FieldValue;
use crate::error::ConfigError;
use crate::state::Values;

/// Per-form configuration.
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Display name used in log lines.
    pub name: String,

    /// Log level for misconfigured rules (unknown names, bad arguments).
    pub diagnostic_level: Level,

    /// If true, `submit` marks every validated field as touched before
    /// validating, so all errors become visible.
    pub touch_on_submit: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            name: "form".to_string(),
            diagnostic_level: Level::Warn,
            touch_on_submit: true,
        }
    }
}

impl FormConfig {
    /// Create a new config with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the misconfiguration log level.
    pub fn diagnostic_level(mut self, level: Level) -> Self {
        self.diagnostic_level = level;
        self
    }

    /// Leave touched status alone on submit.
    pub fn no_touch_on_submit(mut self) -> Self {
        self.touch_on_submit = false;
        self
    }
}

/// Load a value mapping from a JSON object keyed by field name.
///
/// ```
/// use formwork::FieldValue;
/// use formwork::config::values_from_json;
///
/// let values = values_from_json(r#"{"name": "Ada", "age": 36, "terms": true}"#).unwrap();
/// assert_eq!(values["age"], FieldValue::Number(36.0));
/// ```
pub fn values_from_json(json: &str) -> Result<Values, ConfigError> {
    let raw: serde_json::Value = serde_json::from_str(json)?;
    match raw {
        serde_json::Value::Object(map) => map
            .into_iter()
            .map(|(field, value)| -> Result<(String, FieldValue), ConfigError> {
                Ok((field, serde_json::from_value(value)?))
            })
            .collect(),
        other => Err(ConfigError::not_an_object(json_type_name(&other))),
    }
}

pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
