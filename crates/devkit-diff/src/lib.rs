//! Key-path differ for JSON documents.
//!
//! Flattens two documents into canonical key paths, partitions the paths by
//! which side they appear on, compares the values behind shared paths, and
//! rebuilds annotated trees for display.
//!
//! # Key Types
//!
//! - [`Comparison`] / [`ValueDiff`] -- Path partition and per-path value diffs
//! - [`DiffTreeNode`] / [`DiffStatus`] -- Tree view of a path set
//! - [`PathSegment`] -- One step of a parsed key path

pub mod compare;
pub mod error;
pub mod path;
pub mod tree;

pub use compare::{
    compare, compare_json_texts, json_equal, parse_document, values_equal, Comparison, ValueDiff,
};
pub use error::{DiffError, DiffResult, Side};
pub use path::{enumerate_paths, parse_path, split_segment, value_at_path, PathSegment};
pub use tree::{build_diff_tree, merge_trees, merge_trees_by_path, DiffStatus, DiffTreeNode};
