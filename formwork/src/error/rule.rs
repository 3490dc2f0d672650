//! Rule misconfiguration errors
//!
//! These describe developer mistakes in a rule set, never user input
//! problems. User-facing failures are plain message strings.

/// A misconfigured rule reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// The rule name is not registered in the catalog.
    #[error("unknown rule '{name}'")]
    UnknownRule { name: String },

    /// A required argument was not bound.
    #[error("rule '{rule}' requires argument #{index} ({expected})")]
    MissingArgument {
        rule: String,
        index: usize,
        expected: &'static str,
    },

    /// An argument was bound with the wrong shape.
    #[error("rule '{rule}' argument #{index}: expected {expected}, got {actual}")]
    InvalidArgument {
        rule: String,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

impl RuleError {
    /// Creates a new unknown rule error.
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    /// Creates a new missing argument error.
    pub fn missing_argument(rule: impl Into<String>, index: usize, expected: &'static str) -> Self {
        Self::MissingArgument {
            rule: rule.into(),
            index,
            expected,
        }
    }

    /// Creates a new invalid argument error.
    pub fn invalid_argument(
        rule: impl Into<String>,
        index: usize,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        Self::InvalidArgument {
            rule: rule.into(),
            index,
            expected,
            actual,
        }
    }

    /// Returns the rule name this error refers to.
    pub fn rule_name(&self) -> &str {
        match self {
            Self::UnknownRule { name } => name,
            Self::MissingArgument { rule, .. } | Self::InvalidArgument { rule, .. } => rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_name() {
        assert_eq!(RuleError::unknown_rule("emial").rule_name(), "emial");
        assert_eq!(
            RuleError::missing_argument("maxLength", 0, "a length").rule_name(),
            "maxLength"
        );
        assert_eq!(
            RuleError::invalid_argument("password", 0, "a length", "text").rule_name(),
            "password"
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(RuleError::unknown_rule("emial").to_string(), "unknown rule 'emial'");
        assert_eq!(
            RuleError::invalid_argument("password", 0, "a length", "text").to_string(),
            "rule 'password' argument #0: expected a length, got text"
        );
    }
}
