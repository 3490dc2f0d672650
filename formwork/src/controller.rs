//! Form controller: event handling over immutable state snapshots.

use std::collections::BTreeSet;
use std::sync::Arc;

use log::{debug, trace};

use crate::config::FormConfig;
use crate::event::{BlurEvent, ChangeEvent};
use crate::result::{FieldError, Submission, ValidationResult};
use crate::rule_set::RuleSet;
use crate::state::{Errors, FormState, Values};
use crate::{FieldValue, Resolver, RuleCatalog};

/// Drives one form.
///
/// Owns the current [`FormState`] snapshot and replaces it after every
/// event. Errors are hidden from [`FormController::visible_error`] until the
/// field is touched (blurred). Once touched, every change re-validates the
/// field immediately, so an error clears as soon as it is fixed.
///
/// # Example
///
/// ```
/// use formwork::{FormController, RuleSet, Values};
///
/// let rules = RuleSet::new().field("email", "email");
/// let mut form = FormController::new(Values::new());
///
/// form.change("email", "x", &rules);
/// assert_eq!(form.visible_error("email"), None);
///
/// form.blur("email", &rules);
/// assert_eq!(form.visible_error("email"), Some("Please enter a valid email address"));
///
/// form.change("email", "ada@example.com", &rules);
/// assert_eq!(form.visible_error("email"), None);
/// ```
#[derive(Debug, Clone)]
pub struct FormController {
    config: FormConfig,
    resolver: Resolver,
    initial: Values,
    state: FormState,
    last_valid: Option<bool>,
}

impl FormController {
    /// Create a controller over the standard rule catalog.
    pub fn new(initial: Values) -> Self {
        Self::with_catalog(initial, Arc::new(RuleCatalog::standard()))
    }

    /// Create a controller over a shared catalog.
    pub fn with_catalog(initial: Values, catalog: Arc<RuleCatalog>) -> Self {
        let config = FormConfig::default();
        Self {
            resolver: Resolver::new(catalog).with_diagnostic_level(config.diagnostic_level),
            config,
            state: FormState::new(initial.clone()),
            initial,
            last_valid: None,
        }
    }

    /// Apply a configuration.
    pub fn with_config(mut self, config: FormConfig) -> Self {
        self.resolver = self.resolver.with_diagnostic_level(config.diagnostic_level);
        self.config = config;
        self
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handle a change event.
    ///
    /// Always stores the new value (the checked state for checkboxes). If
    /// the field is already touched its error is recomputed from the new
    /// value.
    pub fn on_change(&mut self, event: ChangeEvent, rules: &RuleSet) {
        let value = event.field_value();
        debug!(
            "form '{}': change '{}' ({})",
            self.config.name,
            event.field,
            value.type_name()
        );
        self.apply_change(event.field, value, rules);
    }

    /// Set a field value programmatically, with the same re-validation
    /// policy as [`FormController::on_change`].
    pub fn change(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
        rules: &RuleSet,
    ) {
        let field = field.into();
        debug!("form '{}': change '{}'", self.config.name, field);
        self.apply_change(field, value.into(), rules);
    }

    fn apply_change(&mut self, field: String, value: FieldValue, rules: &RuleSet) {
        let mut next = self.state.set_value(field.clone(), value);
        if next.is_touched(&field) {
            let error = self.compute_error(&field, &next, rules);
            next = next.set_error(field, error);
        }
        self.state = next;
    }

    /// Handle a blur event.
    ///
    /// Marks the field touched and recomputes its error from the current
    /// value. This is where an error first becomes visible.
    pub fn on_blur(&mut self, event: BlurEvent, rules: &RuleSet) {
        self.blur(event.field, rules);
    }

    /// Mark a field touched and recompute its error.
    pub fn blur(&mut self, field: impl Into<String>, rules: &RuleSet) {
        let field = field.into();
        debug!("form '{}': blur '{}'", self.config.name, field);
        let next = self.state.mark_touched(field.clone());
        let error = self.compute_error(&field, &next, rules);
        self.state = next.set_error(field, error);
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Validate every field in `rules`, ignoring touched status.
    ///
    /// Returns whether the form is valid. This is the gate a submit action
    /// calls before handing the values off.
    pub fn validate_all(&mut self, rules: &RuleSet) -> bool {
        self.validate(rules).is_valid()
    }

    /// Validate every field in `rules` and return the detailed result.
    pub fn validate(&mut self, rules: &RuleSet) -> ValidationResult {
        let computed: Errors = rules
            .fields()
            .map(|field| (field.to_string(), self.compute_error(field, &self.state, rules)))
            .collect();

        let failures: Vec<FieldError> = computed
            .iter()
            .filter_map(|(field, error)| error.as_ref().map(|msg| FieldError::new(field, msg)))
            .collect();

        self.state = self.state.set_errors(computed);
        let result = ValidationResult::from_errors(failures);
        self.last_valid = Some(result.is_valid());
        debug!(
            "form '{}': validated {} field(s), {} invalid",
            self.config.name,
            rules.len(),
            result.errors().len()
        );
        result
    }

    /// Recompute one field's error without touching it.
    pub fn validate_field(&mut self, field: &str, rules: &RuleSet) -> Option<&str> {
        let error = self.compute_error(field, &self.state, rules);
        self.state = self.state.set_error(field, error);
        self.state.error(field)
    }

    /// Validate and, only if valid, hand the values to `handoff`.
    ///
    /// With `touch_on_submit` enabled (the default) every validated field
    /// is marked touched first, so [`FormController::visible_error`] shows
    /// all errors after a blocked submit.
    pub fn submit<T>(
        &mut self,
        rules: &RuleSet,
        handoff: impl FnOnce(&Values) -> T,
    ) -> Submission<T> {
        if self.config.touch_on_submit {
            self.state = self.state.mark_all_touched(rules.fields());
        }
        match self.validate(rules) {
            ValidationResult::Valid => {
                debug!("form '{}': submitting", self.config.name);
                Submission::Submitted(handoff(self.state.values()))
            }
            ValidationResult::Invalid(errors) => {
                debug!("form '{}': submit blocked", self.config.name);
                Submission::Blocked(errors)
            }
        }
    }

    fn compute_error(&self, field: &str, state: &FormState, rules: &RuleSet) -> Option<String> {
        let spec = rules.get(field)?;
        let value = state.value(field).cloned().unwrap_or_default();
        let error = self.resolver.resolve_in(spec, &value, state.values());
        trace!("form '{}': '{}' -> {:?}", self.config.name, field, error);
        error
    }

    // -------------------------------------------------------------------------
    // Re-initialization
    // -------------------------------------------------------------------------

    /// Recreate the state from the initial values.
    pub fn reset(&mut self) {
        debug!("form '{}': reset", self.config.name);
        self.state = FormState::reset(self.initial.clone());
        self.last_valid = None;
    }

    /// Replace the current values, keeping errors and touched status.
    pub fn set_values(&mut self, values: Values) {
        debug!("form '{}': set {} value(s)", self.config.name, values.len());
        self.state = self.state.set_values(values);
    }

    /// Replace the initial values and reset to them.
    ///
    /// For loading an existing record into an edit form: a later
    /// [`FormController::reset`] returns to this record.
    pub fn reinitialize(&mut self, initial: Values) {
        self.initial = initial;
        self.reset();
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The error to render for `field`: its error if touched, else `None`.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        self.state.visible_error(field)
    }

    /// Every visible error, keyed by field.
    pub fn visible_errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.state
            .touched()
            .iter()
            .filter_map(|field| self.state.error(field).map(|msg| (field.as_str(), msg)))
    }

    /// All current values.
    pub fn values(&self) -> &Values {
        self.state.values()
    }

    /// The value of one field.
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.state.value(field)
    }

    /// All computed errors, including those not yet visible.
    pub fn errors(&self) -> &Errors {
        self.state.errors()
    }

    /// The touched set.
    pub fn touched(&self) -> &BTreeSet<String> {
        self.state.touched()
    }

    /// Check if `field` has been touched.
    pub fn is_touched(&self, field: &str) -> bool {
        self.state.is_touched(field)
    }

    /// Result of the last [`FormController::validate_all`]; `false` if the
    /// form has not been validated since creation or the last reset.
    pub fn is_valid(&self) -> bool {
        self.last_valid.unwrap_or(false)
    }

    /// The current state snapshot.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The values a reset returns to.
    pub fn initial_values(&self) -> &Values {
        &self.initial
    }

    /// The configuration in use.
    pub fn config(&self) -> &FormConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuleSpec;
    use crate::rule_set::RuleArg;

    fn values(pairs: &[(&str, &str)]) -> Values {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), FieldValue::from(*v)))
            .collect()
    }

    #[test]
    fn test_change_before_touch_does_not_validate() {
        let rules = RuleSet::new().field("email", "email");
        let mut form = FormController::new(values(&[("email", "")]));

        form.on_change(ChangeEvent::text("email", "x"), &rules);
        assert_eq!(form.value("email"), Some(&FieldValue::from("x")));
        assert_eq!(form.errors().get("email"), None);
        assert_eq!(form.visible_error("email"), None);
    }

    #[test]
    fn test_blur_then_change_revalidates() {
        let rules = RuleSet::new().field("email", "email");
        let mut form = FormController::new(values(&[("email", "")]));

        form.on_blur(BlurEvent::new("email"), &rules);
        assert_eq!(form.visible_error("email"), Some("Email is required"));

        form.on_change(ChangeEvent::text("email", "ada"), &rules);
        assert_eq!(form.visible_error("email"), Some("Please enter a valid email address"));

        form.on_change(ChangeEvent::text("email", "ada@example.com"), &rules);
        assert_eq!(form.visible_error("email"), None);

        form.on_change(ChangeEvent::text("email", "ada@"), &rules);
        assert_eq!(form.visible_error("email"), Some("Please enter a valid email address"));
    }

    #[test]
    fn test_checkbox_change_stores_checked() {
        let rules = RuleSet::new().field("terms", "checkbox");
        let mut form = FormController::new(Values::new());

        form.on_change(ChangeEvent::checkbox("terms", false), &rules);
        assert_eq!(form.value("terms"), Some(&FieldValue::Bool(false)));
        form.blur("terms", &rules);
        assert_eq!(form.visible_error("terms"), Some("This field must be checked"));

        form.on_change(ChangeEvent::checkbox("terms", true), &rules);
        assert_eq!(form.visible_error("terms"), None);
    }

    #[test]
    fn test_blur_field_without_rules() {
        let mut form = FormController::new(values(&[("nickname", "")]));
        form.blur("nickname", &RuleSet::new());
        assert!(form.is_touched("nickname"));
        assert_eq!(form.visible_error("nickname"), None);
    }

    #[test]
    fn test_validate_all_ignores_touched() {
        let rules = RuleSet::new().field("email", "email").field("age", "number");
        let mut form = FormController::new(values(&[("email", ""), ("age", "x")]));

        assert!(!form.validate_all(&rules));
        assert!(!form.is_valid());
        assert_eq!(form.state().error("email"), Some("Email is required"));
        assert_eq!(form.state().error("age"), Some("This must be a number"));
        assert!(form.touched().is_empty());
        assert_eq!(form.visible_error("email"), None);
    }

    #[test]
    fn test_validate_all_valid_form() {
        let rules = RuleSet::new().field("email", "email");
        let mut form = FormController::new(values(&[("email", "ada@example.com")]));
        assert!(!form.is_valid());
        assert!(form.validate_all(&rules));
        assert!(form.is_valid());
        assert_eq!(form.errors().get("email"), Some(&None));
    }

    #[test]
    fn test_validate_all_missing_value_is_null() {
        let rules = RuleSet::new().field("name", "required");
        let mut form = FormController::new(Values::new());
        assert!(!form.validate_all(&rules));
        assert_eq!(form.value("name"), Some(&FieldValue::Null));
        assert_eq!(form.state().error("name"), Some("This field is required"));
    }

    #[test]
    fn test_field_reference_follows_live_value() {
        let rules = RuleSet::new()
            .field("password", RuleSpec::with_args("password", [8]))
            .field(
                "confirm",
                RuleSpec::with_args("confirmPassword", [RuleArg::field("password")]),
            );
        let mut form = FormController::new(values(&[("password", "hunter22"), ("confirm", "")]));

        form.change("confirm", "hunter22", &rules);
        form.blur("confirm", &rules);
        assert_eq!(form.visible_error("confirm"), None);

        form.change("password", "hunter23", &rules);
        // No cross-field scheduling: the confirm field keeps its last result
        // until it is validated again.
        assert_eq!(form.visible_error("confirm"), None);
        assert_eq!(form.validate_field("confirm", &rules), Some("Passwords do not match"));
    }

    #[test]
    fn test_reset_restores_initial() {
        let rules = RuleSet::new().field("email", "email");
        let initial = values(&[("email", "")]);
        let mut form = FormController::new(initial.clone());

        form.change("email", "x", &rules);
        form.blur("email", &rules);
        form.validate_all(&rules);
        form.reset();

        assert_eq!(form.initial_values(), &initial);
        assert_eq!(form.state(), &FormState::reset(initial));
        assert!(!form.is_valid());
    }

    #[test]
    fn test_set_values_and_reinitialize() {
        let rules = RuleSet::new().field("name", "required");
        let mut form = FormController::new(values(&[("name", "")]));
        form.blur("name", &rules);

        form.set_values(values(&[("name", "Ada")]));
        assert_eq!(form.value("name"), Some(&FieldValue::from("Ada")));
        assert!(form.is_touched("name"));

        form.reinitialize(values(&[("name", "Grace")]));
        assert_eq!(form.initial_values(), &values(&[("name", "Grace")]));
        assert!(form.touched().is_empty());
        form.change("name", "", &rules);
        form.reset();
        assert_eq!(form.value("name"), Some(&FieldValue::from("Grace")));
    }

    #[test]
    fn test_submit_blocked_touches_fields() {
        let rules = RuleSet::new().field("email", "email").field("terms", "checkbox");
        let mut form = FormController::new(values(&[("email", "ada@example.com")]));

        let outcome = form.submit(&rules, |_| "sent");
        assert_eq!(
            outcome,
            Submission::Blocked(vec![FieldError::new("terms", "This field must be checked")])
        );
        assert_eq!(form.visible_error("terms"), Some("This field must be checked"));
        assert_eq!(
            form.visible_errors().collect::<Vec<_>>(),
            vec![("terms", "This field must be checked")]
        );
    }

    #[test]
    fn test_submit_hands_off_values() {
        let rules = RuleSet::new().field("email", "email");
        let mut form = FormController::new(values(&[("email", "ada@example.com")]));

        let outcome = form.submit(&rules, |values| values.len());
        assert_eq!(outcome.submitted(), Some(1));
        assert!(form.is_valid());
    }

    #[test]
    fn test_submit_without_touching() {
        let rules = RuleSet::new().field("email", "email");
        let mut form = FormController::new(Values::new())
            .with_config(FormConfig::new("quiet").no_touch_on_submit());
        assert_eq!(form.config().name, "quiet");
        assert!(!form.config().touch_on_submit);

        assert!(!form.submit(&rules, |_| ()).is_submitted());
        assert!(form.touched().is_empty());
        assert_eq!(form.state().error("email"), Some("Email is required"));
    }

    #[test]
    fn test_misconfigured_rule_does_not_block() {
        let rules = RuleSet::new().field("email", RuleSpec::named("emial"));
        let mut form = FormController::new(values(&[("email", "")]));
        form.blur("email", &rules);
        assert_eq!(form.visible_error("email"), None);
        assert!(form.validate_all(&rules));
    }
}
