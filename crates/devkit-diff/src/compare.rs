//! Document comparison over key paths.
//!
//! Both documents are flattened into their canonical key paths. Paths are
//! partitioned into those unique to either side and those shared, and every
//! shared path is then judged on the values it resolves to in each document.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Number, Value};
use tracing::debug;

use crate::error::{DiffError, DiffResult, Side};
use crate::path::{enumerate_paths, value_at_path};

/// The result of comparing two documents.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Comparison {
    /// Paths present only in the first document.
    pub paths_only_in_a: Vec<String>,
    /// Paths present only in the second document.
    pub paths_only_in_b: Vec<String>,
    /// Paths present in both, in first-document order.
    pub paths_in_both: Vec<String>,
    /// Shared paths whose values are equal.
    pub paths_with_same_value: Vec<String>,
    /// Shared paths whose values differ.
    pub value_diffs: Vec<ValueDiff>,
    /// Number of paths in the first document.
    pub total_keys_a: usize,
    /// Number of paths in the second document.
    pub total_keys_b: usize,
}

impl Comparison {
    /// Returns `true` when both documents have the same paths and values.
    pub fn is_identical(&self) -> bool {
        self.paths_only_in_a.is_empty()
            && self.paths_only_in_b.is_empty()
            && self.value_diffs.is_empty()
    }

    /// Number of paths added by the second document.
    pub fn added(&self) -> usize {
        self.paths_only_in_b.len()
    }

    /// Number of paths removed by the second document.
    pub fn removed(&self) -> usize {
        self.paths_only_in_a.len()
    }

    /// Number of shared paths with different values.
    pub fn changed(&self) -> usize {
        self.value_diffs.len()
    }

    /// Number of shared paths with equal values.
    pub fn unchanged(&self) -> usize {
        self.paths_with_same_value.len()
    }
}

/// A shared path whose value differs between the two documents.
///
/// `None` means the path did not resolve on that side.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValueDiff {
    pub path: String,
    pub value_a: Option<Value>,
    pub value_b: Option<Value>,
}

/// Compare two documents key path by key path.
///
/// Container-valued paths are judged by full structural equality, so a
/// parent path is reported as a diff whenever anything beneath it differs.
pub fn compare(a: &Value, b: &Value) -> Comparison {
    let paths_a = enumerate_paths(a);
    let paths_b = enumerate_paths(b);

    let set_a: HashSet<&str> = paths_a.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = paths_b.iter().map(String::as_str).collect();

    let paths_only_in_a: Vec<String> = paths_a
        .iter()
        .filter(|p| !set_b.contains(p.as_str()))
        .cloned()
        .collect();
    let paths_only_in_b: Vec<String> = paths_b
        .iter()
        .filter(|p| !set_a.contains(p.as_str()))
        .cloned()
        .collect();
    let paths_in_both: Vec<String> = paths_a
        .iter()
        .filter(|p| set_b.contains(p.as_str()))
        .cloned()
        .collect();

    let mut paths_with_same_value = Vec::new();
    let mut value_diffs = Vec::new();
    for path in &paths_in_both {
        let value_a = value_at_path(a, path);
        let value_b = value_at_path(b, path);
        if values_equal(value_a, value_b) {
            paths_with_same_value.push(path.clone());
        } else {
            value_diffs.push(ValueDiff {
                path: path.clone(),
                value_a: value_a.cloned(),
                value_b: value_b.cloned(),
            });
        }
    }

    debug!(
        keys_a = paths_a.len(),
        keys_b = paths_b.len(),
        only_a = paths_only_in_a.len(),
        only_b = paths_only_in_b.len(),
        diffs = value_diffs.len(),
        "compared documents"
    );

    Comparison {
        total_keys_a: paths_a.len(),
        total_keys_b: paths_b.len(),
        paths_only_in_a,
        paths_only_in_b,
        paths_in_both,
        paths_with_same_value,
        value_diffs,
    }
}

/// Parse two JSON texts and compare them.
pub fn compare_json_texts(a: &str, b: &str) -> DiffResult<Comparison> {
    let doc_a = parse_document(a, Side::A)?;
    let doc_b = parse_document(b, Side::B)?;
    Ok(compare(&doc_a, &doc_b))
}

/// Parse one side of a comparison, labelling any error with `side`.
pub fn parse_document(text: &str, side: Side) -> DiffResult<Value> {
    serde_json::from_str(text).map_err(|e| DiffError::InvalidDocument {
        side,
        message: e.to_string(),
    })
}

/// Equality of two resolved path values.
///
/// Null and missing are distinct: they only match themselves.
pub fn values_equal(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(Value::Null), Some(Value::Null)) => true,
        (None, _) | (_, None) => false,
        (Some(Value::Null), _) | (_, Some(Value::Null)) => false,
        (Some(a), Some(b)) => json_equal(a, b),
    }
}

/// Structural equality with object key order ignored and numbers compared
/// by numeric value.
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| json_equal(x, y)))
        }
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a == b {
        return true;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}
