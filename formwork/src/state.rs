//! Immutable form state snapshots.

use std::collections::{BTreeMap, BTreeSet};

use crate::FieldValue;

/// Current value of every field, keyed by field name.
pub type Values = BTreeMap<String, FieldValue>;

/// Current error of every validated field. `None` means the field passed.
pub type Errors = BTreeMap<String, Option<String>>;

/// One snapshot of a form: values, errors and the touched set.
///
/// Every transition takes `&self` and returns a new snapshot, leaving the
/// original untouched. `FormState` knows nothing about rules; computing
/// errors is the controller's job.
///
/// # Example
///
/// ```
/// use formwork::{FieldValue, FormState, Values};
///
/// let initial = Values::from([("email".to_string(), FieldValue::from(""))]);
/// let state = FormState::new(initial);
///
/// let edited = state
///     .set_value("email", "x")
///     .set_error("email", Some("Please enter a valid email address".into()));
///
/// // The error exists but is not visible until the field is touched.
/// assert_eq!(edited.visible_error("email"), None);
/// let touched = edited.mark_touched("email");
/// assert_eq!(touched.visible_error("email"), Some("Please enter a valid email address"));
///
/// // The original snapshot did not change.
/// assert_eq!(state.value("email"), Some(&FieldValue::from("")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: Values,
    errors: Errors,
    touched: BTreeSet<String>,
}

impl FormState {
    /// Create a snapshot holding `initial` with no errors and nothing touched.
    pub fn new(initial: Values) -> Self {
        Self::reset(initial)
    }

    /// `{ values: initial, errors: {}, touched: {} }`.
    pub fn reset(initial: Values) -> Self {
        Self {
            values: initial,
            errors: Errors::new(),
            touched: BTreeSet::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Replace the value of `field`.
    pub fn set_value(&self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let mut next = self.clone();
        next.values.insert(field.into(), value.into());
        next
    }

    /// Replace the whole value mapping. Errors and touched are kept.
    pub fn set_values(&self, values: Values) -> Self {
        Self {
            values,
            errors: self.errors.clone(),
            touched: self.touched.clone(),
        }
    }

    /// Add `field` to the touched set. Touching twice is a no-op.
    pub fn mark_touched(&self, field: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.touched.insert(field.into());
        next
    }

    /// Replace the error of `field`.
    ///
    /// A field without a value gets a `Null` value, so every field with an
    /// error also appears in [`FormState::values`].
    pub fn set_error(&self, field: impl Into<String>, error: Option<String>) -> Self {
        let mut next = self.clone();
        next.insert_error(field.into(), error);
        next
    }

    /// Replace the errors of several fields in one step.
    pub fn set_errors(&self, errors: impl IntoIterator<Item = (String, Option<String>)>) -> Self {
        let mut next = self.clone();
        for (field, error) in errors {
            next.insert_error(field, error);
        }
        next
    }

    /// Add several fields to the touched set in one step.
    pub fn mark_all_touched<I, S>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.clone();
        next.touched.extend(fields.into_iter().map(Into::into));
        next
    }

    fn insert_error(&mut self, field: String, error: Option<String>) {
        self.values.entry(field.clone()).or_default();
        self.errors.insert(field, error);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// All current values.
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// The value of `field`, if it has one.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// All computed errors, visible or not.
    pub fn errors(&self) -> &Errors {
        &self.errors
    }

    /// The computed error of `field`, regardless of touched status.
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).and_then(|e| e.as_deref())
    }

    /// The touched set.
    pub fn touched(&self) -> &BTreeSet<String> {
        &self.touched
    }

    /// Check if `field` has been touched.
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// The error of `field` if it is touched, otherwise `None`.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    /// Check if no field currently has an error.
    pub fn has_no_errors(&self) -> bool {
        self.errors.values().all(Option::is_none)
    }
}
