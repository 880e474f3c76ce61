//! Key paths: canonical path enumeration and lookup by path.
//!
//! A key path is a dot-separated list of object keys, each optionally
//! followed by one or more `[index]` segments: `users[0].address.city`.
//!
//! Enumeration only descends into list elements that are containers. A list of
//! scalars contributes the path of the list itself (through its parent key)
//! and nothing for its elements.

use serde_json::{Map, Value};

/// A single step of a parsed key path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathSegment<'a> {
    /// Object member access.
    Key(&'a str),
    /// List element access.
    Index(usize),
}

/// Enumerate every canonical key path of `doc`, in document order.
///
/// Roots that are not objects (lists and scalars) yield no paths.
pub fn enumerate_paths(doc: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    if let Value::Object(map) = doc {
        collect_object(map, "", &mut paths);
    }
    paths
}

fn collect_object(map: &Map<String, Value>, prefix: &str, out: &mut Vec<String>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        out.push(path.clone());

        match value {
            Value::Object(inner) => collect_object(inner, &path, out),
            Value::Array(items) => collect_array(items, &path, out),
            _ => {}
        }
    }
}

fn collect_array(items: &[Value], prefix: &str, out: &mut Vec<String>) {
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(inner) => collect_object(inner, &format!("{prefix}[{index}]"), out),
            Value::Array(inner) => collect_array(inner, &format!("{prefix}[{index}]"), out),
            _ => {}
        }
    }
}

/// Split one dot-separated part into its key and trailing list indices.
///
/// `"items[2][0]"` becomes `("items", [2, 0])`. A part whose bracket suffix
/// is not a clean run of `[digits]` is treated as a plain key.
pub fn split_segment(part: &str) -> (&str, Vec<usize>) {
    let Some(open) = part.find('[') else {
        return (part, Vec::new());
    };

    let mut indices = Vec::new();
    let mut rest = &part[open..];
    while !rest.is_empty() {
        let parsed = rest
            .strip_prefix('[')
            .and_then(|r| r.split_once(']'))
            .and_then(|(digits, tail)| {
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                digits.parse::<usize>().ok().map(|n| (n, tail))
            });
        match parsed {
            Some((index, tail)) => {
                indices.push(index);
                rest = tail;
            }
            None => return (part, Vec::new()),
        }
    }

    (&part[..open], indices)
}

/// Parse a key path into segments.
pub fn parse_path(path: &str) -> Vec<PathSegment<'_>> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (key, indices) = split_segment(part);
        if !key.is_empty() || indices.is_empty() {
            segments.push(PathSegment::Key(key));
        }
        segments.extend(indices.into_iter().map(PathSegment::Index));
    }
    segments
}

/// Resolve `path` against `doc`.
///
/// Returns `None` when a key is missing, an index is out of bounds, or the
/// value at some step is not the container kind the segment needs.
pub fn value_at_path<'v>(doc: &'v Value, path: &str) -> Option<&'v Value> {
    let mut current = doc;
    for segment in parse_path(path) {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
            (PathSegment::Index(index), Value::Array(items)) => items.get(index)?,
            _ => return None,
        };
    }
    Some(current)
}
