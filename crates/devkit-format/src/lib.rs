//! JSON formatting and stringified-JSON normalization.
//!
//! Every operation returns a [`FormatResult`]; parse failures carry the
//! parser's own message so callers can show it verbatim.
//!
//! # Key Types
//!
//! - [`Normalized`] -- Output of [`parse_stringified`]
//! - [`NormalizerConfig`] -- Pass budget for the normalizer
//! - [`FormatReport`] -- Flat success/error record for display
//! - [`FormatError`] -- Parse and iteration-limit failures

pub mod config;
pub mod error;
pub mod format;
pub mod normalize;
pub mod report;

pub use config::{NormalizerConfig, DEFAULT_MAX_ITERATIONS};
pub use error::{FormatError, FormatResult};
pub use format::{escape_json, format_json, minify_json, to_indented_string, MAX_INDENT};
pub use normalize::{
    looks_like_json_container, parse_stringified, parse_stringified_with, unwrap_nested_strings,
    Normalized,
};
pub use report::FormatReport;
