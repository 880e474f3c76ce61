//! Error types for the time crate.

use thiserror::Error;

/// Errors produced while reading or converting times.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("no time given")]
    Empty,

    #[error("unrecognized time format: {0}")]
    Unrecognized(String),

    #[error("unknown time zone: {0}")]
    UnknownZone(String),

    /// The wall-clock time falls in a daylight-saving gap.
    #[error("{input} does not exist in {zone}")]
    NonexistentLocalTime { input: String, zone: String },
}

/// Convenience alias for time results.
pub type TimeResult<T> = Result<T, TimeError>;
