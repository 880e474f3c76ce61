//! Single-pass formatting: pretty print, minify and escape.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::{FormatError, FormatResult};

/// Largest indent honored; wider requests are clamped.
pub const MAX_INDENT: usize = 10;

/// Serialize `value` with `indent` spaces per level.
///
/// An indent of zero produces compact output.
pub fn to_indented_string(value: &Value, indent: usize) -> FormatResult<String> {
    let indent = indent.min(MAX_INDENT);
    if indent == 0 {
        return serde_json::to_string(value).map_err(|e| FormatError::Serialization(e.to_string()));
    }

    let spaces = vec![b' '; indent];
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&spaces));
    value
        .serialize(&mut ser)
        .map_err(|e| FormatError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| FormatError::Serialization(e.to_string()))
}

/// Parse `input` and re-serialize it with `indent` spaces per level.
pub fn format_json(input: &str, indent: usize) -> FormatResult<String> {
    let value: Value = serde_json::from_str(input)?;
    to_indented_string(&value, indent)
}

/// Parse `input` and re-serialize it without insignificant whitespace.
pub fn minify_json(input: &str) -> FormatResult<String> {
    let value: Value = serde_json::from_str(input)?;
    to_indented_string(&value, 0)
}

/// Validate `input` as JSON and encode the raw text as a JSON string
/// literal, ready to embed in another document.
pub fn escape_json(input: &str) -> FormatResult<String> {
    serde_json::from_str::<serde::de::IgnoredAny>(input)?;
    serde_json::to_string(input).map_err(|e| FormatError::Serialization(e.to_string()))
}
