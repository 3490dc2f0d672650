//! Configuration loading errors

/// Error returned when a rule set or value mapping cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input is not valid JSON, or does not have the expected shape.
    #[error("invalid form configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value must be an object keyed by field name.
    #[error("expected a JSON object keyed by field name, got {actual}")]
    NotAnObject { actual: &'static str },
}

impl ConfigError {
    /// Creates a new "not an object" error.
    pub fn not_an_object(actual: &'static str) -> Self {
        Self::NotAnObject { actual }
    }
}
