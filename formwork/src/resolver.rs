//! Rule resolution.

use std::collections::BTreeMap;
use std::sync::Arc;

use log::Level;

use crate::FieldValue;
use crate::RuleCatalog;
use crate::error::RuleError;
use crate::rule_set::RuleSpec;

/// Log target used for misconfigured rules.
pub const MISCONFIG_TARGET: &str = "formwork::misconfig";

/// Computes the first failing message of a [`RuleSpec`].
///
/// A misconfigured named rule (unknown name, malformed arguments) never
/// fails a field: it is reported on the [`MISCONFIG_TARGET`] log target and
/// then treated as passing. Use [`Resolver::try_resolve_in`] to get the
/// misconfiguration as an error instead.
#[derive(Debug, Clone)]
pub struct Resolver {
    catalog: Arc<RuleCatalog>,
    diagnostic_level: Level,
}

impl Resolver {
    /// Create a resolver over `catalog`.
    pub fn new(catalog: Arc<RuleCatalog>) -> Self {
        Self {
            catalog,
            diagnostic_level: Level::Warn,
        }
    }

    /// Set the log level used for misconfiguration diagnostics.
    pub fn with_diagnostic_level(mut self, level: Level) -> Self {
        self.diagnostic_level = level;
        self
    }

    /// The catalog named rules are looked up in.
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Resolve `spec` against `value` with no other form values in scope.
    ///
    /// Field-reference arguments bind to `Null`.
    pub fn resolve(&self, spec: &RuleSpec, value: &FieldValue) -> Option<String> {
        self.resolve_in(spec, value, &BTreeMap::new())
    }

    /// Resolve `spec` against `value`, binding field-reference arguments
    /// from `values`.
    pub fn resolve_in(
        &self,
        spec: &RuleSpec,
        value: &FieldValue,
        values: &BTreeMap<String, FieldValue>,
    ) -> Option<String> {
        match spec {
            RuleSpec::Custom(rule) => rule.call(value),
            RuleSpec::Named { name, args } => {
                let bound: Vec<FieldValue> = args.iter().map(|arg| arg.bind(values)).collect();
                match self.catalog.check(name, value, &bound) {
                    Ok(result) => result,
                    Err(err) => {
                        log::log!(
                            target: MISCONFIG_TARGET,
                            self.diagnostic_level,
                            "{err}; treating rule as passing"
                        );
                        None
                    }
                }
            }
            RuleSpec::Sequence(specs) => specs
                .iter()
                .find_map(|spec| self.resolve_in(spec, value, values)),
        }
    }

    /// Strict variant of [`Resolver::resolve_in`].
    ///
    /// Returns the first misconfiguration reached in evaluation order.
    /// Rules after the first failure are not evaluated, so they are not
    /// checked either.
    pub fn try_resolve_in(
        &self,
        spec: &RuleSpec,
        value: &FieldValue,
        values: &BTreeMap<String, FieldValue>,
    ) -> Result<Option<String>, RuleError> {
        match spec {
            RuleSpec::Custom(rule) => Ok(rule.call(value)),
            RuleSpec::Named { name, args } => {
                let bound: Vec<FieldValue> = args.iter().map(|arg| arg.bind(values)).collect();
                self.catalog.check(name, value, &bound)
            }
            RuleSpec::Sequence(specs) => {
                for spec in specs {
                    if let Some(message) = self.try_resolve_in(spec, value, values)? {
                        return Ok(Some(message));
                    }
                }
                Ok(None)
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Arc::new(RuleCatalog::standard()))
    }
}
