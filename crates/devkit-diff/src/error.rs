//! Error types for the diff crate.

use std::fmt;

/// Which of the two compared documents an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// Errors that can occur when comparing JSON texts.
///
/// Path lookups never fail; an unresolved path is reported as `None`.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// One of the input texts is not valid JSON.
    #[error("invalid JSON in document {side}: {message}")]
    InvalidDocument { side: Side, message: String },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
