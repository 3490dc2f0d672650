//! Named rule registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::FieldValue;
use crate::error::RuleError;
use crate::rules;

/// Signature of a catalog entry.
///
/// Receives the field value and the already-bound arguments. Returns the
/// failure message, `None` when the value passes, or a [`RuleError`] when
/// the arguments are malformed.
pub type RuleFn =
    dyn Fn(&FieldValue, &[FieldValue]) -> Result<Option<String>, RuleError> + Send + Sync;

/// An immutable mapping from rule name to validator.
///
/// A catalog is built once (usually [`RuleCatalog::standard`]) and shared by
/// reference with every [`Resolver`](crate::Resolver) that needs it. Tests
/// and applications can assemble their own with [`RuleCatalog::empty`] and
/// [`RuleCatalog::with_rule`].
///
/// # Example
///
/// ```
/// use formwork::{FieldValue, RuleCatalog};
///
/// let catalog = RuleCatalog::standard().with_rule("even", |value, _args| {
///     let even = value.as_f64().is_some_and(|n| n % 2.0 == 0.0);
///     Ok((!even).then(|| "Must be even".to_string()))
/// });
///
/// let result = catalog.check("even", &FieldValue::from(3), &[]).unwrap();
/// assert_eq!(result.as_deref(), Some("Must be even"));
/// ```
#[derive(Clone)]
pub struct RuleCatalog {
    rules: HashMap<String, Arc<RuleFn>>,
}

impl RuleCatalog {
    /// Create a catalog with no rules.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Create a catalog holding every built-in rule.
    pub fn standard() -> Self {
        Self::empty()
            .with_rule("required", |value, _| Ok(rules::required(value)))
            .with_rule("email", |value, _| Ok(rules::email(value)))
            .with_rule("password", |value, args| {
                let min = usize_arg("password", args, 0, Some(rules::DEFAULT_PASSWORD_MIN_LENGTH))?;
                Ok(rules::password(value, min))
            })
            .with_rule("confirmPassword", |value, args| {
                let original = text_arg("confirmPassword", args, 0)?;
                Ok(rules::confirm_password(value, &original))
            })
            .with_rule("phone", |value, _| Ok(rules::phone(value)))
            .with_rule("pinCode", |value, _| Ok(rules::pin_code(value)))
            .with_rule("zipCode", |value, _| Ok(rules::zip_code(value)))
            .with_rule("minLength", |value, args| {
                let min = usize_arg("minLength", args, 0, None)?;
                Ok(rules::min_length(value, min))
            })
            .with_rule("maxLength", |value, args| {
                let max = usize_arg("maxLength", args, 0, None)?;
                Ok(rules::max_length(value, max))
            })
            .with_rule("number", |value, _| Ok(rules::number(value)))
            .with_rule("url", |value, _| Ok(rules::url(value)))
            .with_rule("select", |value, _| Ok(rules::select(value)))
            .with_rule("checkbox", |value, _| Ok(rules::checkbox(value)))
            .with_rule("textarea", |value, args| {
                let min = usize_arg("textarea", args, 0, Some(rules::DEFAULT_TEXTAREA_MIN_LENGTH))?;
                Ok(rules::textarea(value, min))
            })
    }

    /// Return a catalog with `name` bound to `rule`, replacing any previous
    /// entry of that name.
    pub fn with_rule<F>(mut self, name: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&FieldValue, &[FieldValue]) -> Result<Option<String>, RuleError>
            + Send
            + Sync
            + 'static,
    {
        self.rules.insert(name.into(), Arc::new(rule));
        self
    }

    /// Look up a rule by name.
    pub fn get(&self, name: &str) -> Option<&RuleFn> {
        self.rules.get(name).map(|rule| rule.as_ref())
    }

    /// Check if a rule is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the catalog has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the named rule against `value`.
    pub fn check(
        &self,
        name: &str,
        value: &FieldValue,
        args: &[FieldValue],
    ) -> Result<Option<String>, RuleError> {
        let rule = self.get(name).ok_or_else(|| RuleError::unknown_rule(name))?;
        rule(value, args)
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCatalog")
            .field("rules", &self.names())
            .finish()
    }
}

/// Read a non-negative whole-number argument, falling back to `default`
/// when it is absent.
fn usize_arg(
    rule: &str,
    args: &[FieldValue],
    index: usize,
    default: Option<usize>,
) -> Result<usize, RuleError> {
    const EXPECTED: &str = "non-negative whole number";
    match args.get(index) {
        None | Some(FieldValue::Null) => {
            default.ok_or_else(|| RuleError::missing_argument(rule, index, EXPECTED))
        }
        Some(FieldValue::Number(n)) if *n >= 0.0 && n.fract() == 0.0 && n.is_finite() => {
            Ok(*n as usize)
        }
        Some(other) => Err(RuleError::invalid_argument(
            rule,
            index,
            EXPECTED,
            other.type_name(),
        )),
    }
}

/// Read a textual argument. Any value shape is accepted and rendered as text;
/// a bound `Null` (for example a reference to an empty field) reads as "".
fn text_arg(rule: &str, args: &[FieldValue], index: usize) -> Result<String, RuleError> {
    args.get(index)
        .map(|arg| arg.as_text().into_owned())
        .ok_or_else(|| RuleError::missing_argument(rule, index, "text"))
}
