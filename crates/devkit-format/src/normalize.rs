//! Stringified-JSON normalizer.
//!
//! Unwraps text that holds JSON encoded as a JSON string, possibly several
//! times over, until a container or plain value is reached. Parsing runs as
//! a bounded fixed-point loop; each pass either peels one encoding layer or
//! finishes.
//!
//! Once a container is reached, any string leaf that looks like a JSON
//! container is parsed in place. That inner unwrap follows the already
//! parsed data and is not counted against the pass budget.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::NormalizerConfig;
use crate::error::{FormatError, FormatResult};
use crate::format::to_indented_string;

/// Indent used for normalized output.
const OUTPUT_INDENT: usize = 2;

/// A successfully normalized document.
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    /// The fully unwrapped value.
    pub value: Value,
    /// `value` serialized with two-space indentation.
    pub formatted: String,
    /// Number of parse passes used.
    pub iterations: usize,
}

/// Normalize `input` with the default pass budget of 10.
pub fn parse_stringified(input: &str) -> FormatResult<Normalized> {
    parse_stringified_with(input, &NormalizerConfig::default())
}

/// Normalize `input` with an explicit configuration.
pub fn parse_stringified_with(input: &str, config: &NormalizerConfig) -> FormatResult<Normalized> {
    let trimmed = input.trim();
    let (mut current, quote_stripped) = match strip_quote_layer(trimmed) {
        Some(inner) => (inner.to_string(), true),
        None => (trimmed.to_string(), false),
    };

    let mut iterations = 0;
    while iterations < config.max_iterations {
        iterations += 1;

        let err = match serde_json::from_str::<Value>(&current) {
            Ok(Value::String(s)) => {
                let inner = s.trim();
                if looks_like_json_container(inner) || is_string_literal(inner) {
                    debug!(iteration = iterations, "string holds another JSON layer");
                    current = inner.to_string();
                    continue;
                }
                return finish(Value::String(s), iterations);
            }
            Ok(value) => return finish(unwrap_nested_strings(value), iterations),
            Err(err) => err,
        };

        if current.contains('\\') {
            // Read `current` as the body of an escaped string literal.
            let decoded = match serde_json::from_str::<String>(&format!("\"{current}\"")) {
                Ok(decoded) => decoded,
                Err(_) => return Err(err.into()),
            };
            debug!(iteration = iterations, "unescaped one layer");
            current = decoded;
            continue;
        }

        // The quote layer stripped up front wrapped a plain string.
        if quote_stripped && iterations == 1 && !looks_like_json_container(&current) {
            return finish(Value::String(current), iterations);
        }
        return Err(err.into());
    }

    warn!(max = config.max_iterations, "no fixed point within pass budget");
    Err(FormatError::IterationLimitExceeded {
        max: config.max_iterations,
    })
}

fn finish(value: Value, iterations: usize) -> FormatResult<Normalized> {
    let formatted = to_indented_string(&value, OUTPUT_INDENT)?;
    Ok(Normalized {
        value,
        formatted,
        iterations,
    })
}

fn strip_quote_layer(text: &str) -> Option<&str> {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        Some(&text[1..text.len() - 1])
    } else {
        None
    }
}

fn is_string_literal(text: &str) -> bool {
    strip_quote_layer(text).is_some() && serde_json::from_str::<String>(text).is_ok()
}

/// Heuristic container test: `{...}` or `[...]` after trimming.
///
/// Does not validate the content.
pub fn looks_like_json_container(text: &str) -> bool {
    let text = text.trim();
    (text.starts_with('{') && text.ends_with('}')) || (text.starts_with('[') && text.ends_with(']'))
}

/// Replace every container-looking string leaf with its parsed value,
/// recursively. Strings that fail to parse are kept as they are.
pub fn unwrap_nested_strings(value: Value) -> Value {
    match value {
        Value::String(s) if looks_like_json_container(&s) => match serde_json::from_str::<Value>(&s) {
            Ok(parsed) => unwrap_nested_strings(parsed),
            Err(_) => Value::String(s),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(unwrap_nested_strings).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, unwrap_nested_strings(v)))
                .collect(),
        ),
        other => other,
    }
}
