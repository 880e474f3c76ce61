//! Diff trees: hierarchical views of a set of key paths.
//!
//! [`build_diff_tree`] turns a flat path list into a tree rooted at a
//! synthetic `root` node, tagging each terminal node with a [`DiffStatus`].
//! Two such trees (typically "removed" paths from the first document and
//! "added" paths from the second) are combined with [`merge_trees`] or
//! [`merge_trees_by_path`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::{split_segment, value_at_path};

/// Name of the synthetic root node.
pub const ROOT_NAME: &str = "root";

/// How a path relates to the two compared documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    Added,
    Removed,
    Unchanged,
}

/// One node of a diff tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiffTreeNode {
    /// Path segment this node stands for: a key, or `[n]` for a list index.
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<DiffTreeNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DiffStatus>,
}

impl DiffTreeNode {
    /// Create a bare node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create an empty synthetic root.
    pub fn root() -> Self {
        Self::new(ROOT_NAME)
    }

    /// Find a direct child by name.
    pub fn child(&self, name: &str) -> Option<&DiffTreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(DiffTreeNode::node_count).sum::<usize>()
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn child_or_insert(&mut self, name: &str) -> &mut DiffTreeNode {
        let pos = match self.children.iter().position(|c| c.name == name) {
            Some(pos) => pos,
            None => {
                self.children.push(DiffTreeNode::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[pos]
    }

    /// Copy of this node's own fields with no children.
    fn shell(&self) -> DiffTreeNode {
        DiffTreeNode {
            name: self.name.clone(),
            children: Vec::new(),
            value: self.value.clone(),
            path: self.path.clone(),
            status: self.status,
        }
    }

    /// Deep copy with every node marked `status`.
    fn stamped(&self, status: DiffStatus) -> DiffTreeNode {
        DiffTreeNode {
            children: self.children.iter().map(|c| c.stamped(status)).collect(),
            status: Some(status),
            ..self.shell()
        }
    }

    fn fill_missing_from(&mut self, other: &DiffTreeNode) {
        if self.path.is_none() {
            self.path = other.path.clone();
        }
        if self.value.is_none() {
            self.value = other.value.clone();
        }
        if self.status.is_none() {
            self.status = other.status;
        }
    }
}

/// Build a tree from `paths`, resolving terminal values against `source`.
///
/// Each `.`-separated part becomes a key node; each `[n]` suffix becomes a
/// child node named `[n]` under it. Nodes are shared by name, so common
/// prefixes collapse into one branch.
pub fn build_diff_tree<S: AsRef<str>>(
    paths: &[S],
    source: &Value,
    status: DiffStatus,
) -> DiffTreeNode {
    let mut root = DiffTreeNode::root();

    for path in paths {
        let path = path.as_ref();
        let mut node = &mut root;
        let mut prefix = String::new();

        for part in path.split('.') {
            let (key, indices) = split_segment(part);
            if !prefix.is_empty() {
                prefix.push('.');
            }
            if !key.is_empty() || indices.is_empty() {
                prefix.push_str(key);
                node = node.child_or_insert(key);
            }
            for index in indices {
                let label = format!("[{index}]");
                prefix.push_str(&label);
                node = node.child_or_insert(&label);
                node.path.get_or_insert_with(|| prefix.clone());
            }
        }

        node.path = Some(path.to_string());
        node.value = value_at_path(source, path).cloned();
        node.status = Some(status);
    }

    root
}

/// Merge two trees one level deep.
///
/// `a` holds paths found only in the first document and `b` paths found only
/// in the second, so every node taken from `a` is marked
/// [`DiffStatus::Removed`] and every node taken from `b`
/// [`DiffStatus::Added`]. Top-level children are unioned by name; the first
/// node seen under a name keeps its path, value and status. The children of
/// every top-level node are appended under the merged node, so grandchildren
/// sharing a name across the two trees are not combined and may appear
/// twice. Use [`merge_trees_by_path`] for a full recursive merge.
pub fn merge_trees(a: &DiffTreeNode, b: &DiffTreeNode) -> DiffTreeNode {
    let mut merged = DiffTreeNode::root();

    for (side, status) in [(a, DiffStatus::Removed), (b, DiffStatus::Added)] {
        for child in &side.children {
            let pos = match merged.children.iter().position(|n| n.name == child.name) {
                Some(pos) => pos,
                None => {
                    let mut shell = child.shell();
                    shell.status = Some(status);
                    merged.children.push(shell);
                    merged.children.len() - 1
                }
            };
            merged.children[pos]
                .children
                .extend(child.children.iter().map(|c| c.stamped(status)));
        }
    }

    merged
}

/// Merge two trees recursively, unioning children by name at every depth.
///
/// When a name exists on both sides the first node keeps its fields; the
/// second only supplies fields the first lacks. Nodes without a status get
/// the status of the side they came from, as in [`merge_trees`].
pub fn merge_trees_by_path(a: &DiffTreeNode, b: &DiffTreeNode) -> DiffTreeNode {
    let mut merged = DiffTreeNode::root();
    merge_into(&mut merged, a, DiffStatus::Removed);
    merge_into(&mut merged, b, DiffStatus::Added);
    merged
}

fn merge_into(target: &mut DiffTreeNode, source: &DiffTreeNode, status: DiffStatus) {
    for child in &source.children {
        let node = target.child_or_insert(&child.name);
        node.fill_missing_from(child);
        node.status.get_or_insert(status);
        merge_into(node, child, status);
    }
}
