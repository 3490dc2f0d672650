//! Per-field rule specifications and the per-form rule set.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::FieldValue;
use crate::RuleCatalog;
use crate::config::json_type_name;
use crate::error::{ConfigError, RuleError};

/// An inline validation predicate.
///
/// Wraps `Fn(&FieldValue) -> Option<String>` so it can live inside a
/// [`RuleSpec`] and be cloned cheaply.
#[derive(Clone)]
pub struct CustomRule(Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>);

impl CustomRule {
    /// Wrap a predicate.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Run the predicate.
    pub fn call(&self, value: &FieldValue) -> Option<String> {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRule(..)")
    }
}

/// A parameter bound to a named rule.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RuleArg {
    /// The current value of another field, read when the rule runs.
    Field {
        /// Name of the referenced field.
        field: String,
    },
    /// A literal value.
    Value(FieldValue),
}

impl RuleArg {
    /// Reference another field's current value.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field { field: name.into() }
    }

    /// Resolve this argument against the current form values. A reference
    /// to a field that has no value yet binds to `Null`.
    pub fn bind(&self, values: &BTreeMap<String, FieldValue>) -> FieldValue {
        match self {
            Self::Field { field } => values.get(field).cloned().unwrap_or_default(),
            Self::Value(value) => value.clone(),
        }
    }
}

impl From<FieldValue> for RuleArg {
    fn from(v: FieldValue) -> Self {
        Self::Value(v)
    }
}

macro_rules! rule_arg_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for RuleArg {
                fn from(v: $ty) -> Self {
                    Self::Value(FieldValue::from(v))
                }
            }
        )*
    };
}

rule_arg_from!(bool, i32, u32, i64, usize, f64, String, &str);

/// Validation instruction for one field.
///
/// # Example
///
/// ```
/// use formwork::{RuleArg, RuleSpec};
///
/// let spec = RuleSpec::sequence([
///     RuleSpec::named("required"),
///     RuleSpec::with_args("minLength", [3]),
///     RuleSpec::custom(|value| {
///         (value.as_text() == "admin").then(|| "That name is reserved".to_string())
///     }),
/// ]);
///
/// let confirm = RuleSpec::with_args("confirmPassword", [RuleArg::field("password")]);
/// # let _ = (spec, confirm);
/// ```
#[derive(Debug, Clone)]
pub enum RuleSpec {
    /// Inline predicate.
    Custom(CustomRule),
    /// Catalog rule, optionally bound with parameters.
    Named {
        /// Catalog name.
        name: String,
        /// Bound parameters, in order.
        args: Vec<RuleArg>,
    },
    /// Ordered rules; the first failure wins.
    Sequence(Vec<RuleSpec>),
}

impl RuleSpec {
    /// Catalog rule without parameters.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Catalog rule with parameters.
    pub fn with_args<A: Into<RuleArg>>(
        name: impl Into<String>,
        args: impl IntoIterator<Item = A>,
    ) -> Self {
        Self::Named {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Inline predicate.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        Self::Custom(CustomRule::new(f))
    }

    /// Ordered sequence of rules.
    pub fn sequence<S: Into<RuleSpec>>(specs: impl IntoIterator<Item = S>) -> Self {
        Self::Sequence(specs.into_iter().map(Into::into).collect())
    }

    /// Visit every named rule in evaluation order.
    fn for_each_named<'a>(&'a self, f: &mut impl FnMut(&'a str, &'a [RuleArg])) {
        match self {
            Self::Custom(_) => {}
            Self::Named { name, args } => f(name.as_str(), args.as_slice()),
            Self::Sequence(specs) => {
                for spec in specs {
                    spec.for_each_named(f);
                }
            }
        }
    }
}

impl From<&str> for RuleSpec {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for RuleSpec {
    fn from(name: String) -> Self {
        Self::named(name)
    }
}

impl From<CustomRule> for RuleSpec {
    fn from(rule: CustomRule) -> Self {
        Self::Custom(rule)
    }
}

impl<S: Into<RuleSpec>> From<Vec<S>> for RuleSpec {
    fn from(specs: Vec<S>) -> Self {
        Self::sequence(specs)
    }
}

/// JSON shape of a rule spec.
#[derive(Deserialize)]
#[serde(untagged)]
enum RuleSpecRepr {
    Name(String),
    Named {
        rule: String,
        #[serde(default)]
        args: Vec<RuleArg>,
    },
    Sequence(Vec<RuleSpecRepr>),
}

impl From<RuleSpecRepr> for RuleSpec {
    fn from(repr: RuleSpecRepr) -> Self {
        match repr {
            RuleSpecRepr::Name(name) => Self::named(name),
            RuleSpecRepr::Named { rule, args } => Self::Named { name: rule, args },
            RuleSpecRepr::Sequence(specs) => Self::sequence(specs),
        }
    }
}

/// Rules for every validated field of one form.
///
/// Built once and never mutated: the builder methods consume `self`. To
/// change the rules, build a new set.
///
/// # Example
///
/// ```
/// use formwork::{RuleSet, RuleSpec};
///
/// let rules = RuleSet::new()
///     .field("email", "email")
///     .field("password", RuleSpec::with_args("password", [10]))
///     .field("terms", "checkbox");
///
/// assert_eq!(rules.len(), 3);
/// assert!(rules.get("email").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: BTreeMap<String, RuleSpec>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a rule set with `spec` bound to `field`, replacing any
    /// previous spec for that field.
    pub fn field(mut self, field: impl Into<String>, spec: impl Into<RuleSpec>) -> Self {
        self.fields.insert(field.into(), spec.into());
        self
    }

    /// Load a rule set from JSON.
    ///
    /// The top level is an object keyed by field name. Each spec is a rule
    /// name (`"email"`), a named rule with arguments
    /// (`{"rule": "minLength", "args": [3]}`), or an array of either. An
    /// argument written as `{"field": "password"}` refers to another field.
    ///
    /// ```
    /// use formwork::RuleSet;
    ///
    /// let rules = RuleSet::from_json(r#"{
    ///     "password": ["required", {"rule": "password", "args": [10]}],
    ///     "confirm": {"rule": "confirmPassword", "args": [{"field": "password"}]}
    /// }"#).unwrap();
    ///
    /// assert_eq!(rules.fields().collect::<Vec<_>>(), vec!["confirm", "password"]);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        if !raw.is_object() {
            return Err(ConfigError::not_an_object(json_type_name(&raw)));
        }
        let fields: BTreeMap<String, RuleSpecRepr> = serde_json::from_value(raw)?;
        Ok(fields.into_iter().collect())
    }

    /// Get the spec for a field.
    pub fn get(&self, field: &str) -> Option<&RuleSpec> {
        self.fields.get(field)
    }

    /// Field names with rules, sorted.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over `(field, spec)` pairs, sorted by field.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSpec)> {
        self.fields.iter().map(|(field, spec)| (field.as_str(), spec))
    }

    /// Number of fields with rules.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no field has rules.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Report every misconfigured named rule.
    ///
    /// Checks that each name exists in `catalog` and that its arguments are
    /// well-formed. Field references are bound to `Null` for the check.
    pub fn lint(&self, catalog: &RuleCatalog) -> Vec<(String, RuleError)> {
        let empty = BTreeMap::new();
        let mut problems = Vec::new();
        for (field, spec) in &self.fields {
            spec.for_each_named(&mut |name: &str, args: &[RuleArg]| {
                let bound: Vec<FieldValue> = args.iter().map(|arg| arg.bind(&empty)).collect();
                if let Err(err) = catalog.check(name, &FieldValue::Null, &bound) {
                    problems.push((field.clone(), err));
                }
            });
        }
        problems
    }
}

impl<K: Into<String>, S: Into<RuleSpec>> FromIterator<(K, S)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field, spec)| (field.into(), spec.into()))
                .collect(),
        }
    }
}
