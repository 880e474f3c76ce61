//! Error types for the codec crate.

use thiserror::Error;

/// Errors produced by encoding, decoding, hashing and generator helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("decoded bytes are not valid UTF-8: {0}")]
    InvalidUtf8(String),

    #[error("unknown digest algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown identity document kind: {0}")]
    UnknownIdKind(String),

    #[error("unknown nationality: {0}")]
    UnknownNationality(String),
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
