//! Error types for the format crate.

/// Errors produced while parsing, normalizing or serializing JSON text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The input is not valid JSON. Carries the parser's message, including
    /// line and column.
    #[error("Invalid JSON: {message}")]
    Parse { message: String },

    /// The normalizer did not reach a fixed point within its pass budget.
    #[error("Maximum parsing iterations reached ({max}). The input might be too deeply nested.")]
    IterationLimitExceeded { max: usize },

    /// Serializing the result failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::Parse {
            message: err.to_string(),
        }
    }
}

/// Convenience alias for format results.
pub type FormatResult<T> = Result<T, FormatError>;
