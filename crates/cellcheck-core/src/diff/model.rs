//! Structural diff types.
//!
//! A [`DiffNode`] exists for a subtree iff that subtree is not structurally
//! equal. Nodes keep the values they were produced from (cheap `Rc` clones)
//! and the wrapper frames unwrapped on the actual side, so the renderer never
//! has to dereference a cell the engine already visited.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Value;

/// Key of a child entry inside a composite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiffKey {
    Index(usize),
    Key(String),
}

impl fmt::Display for DiffKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKey::Index(i) => write!(f, "[{}]", i),
            DiffKey::Key(k) => write!(f, ".{}", k),
        }
    }
}

/// A wrapper cell that was unwrapped on the actual side before comparing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFrame {
    /// Display prefix of the recognised variant
    pub prefix: String,
    /// Identity label of the cell, if any
    pub label: Option<String>,
}

/// Shape of a composite that was compared entry by entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Sequence,
    Mapping,
    Object { type_name: String },
}

/// A mismatching subtree
#[derive(Debug, Clone)]
pub struct DiffNode {
    /// Cells unwrapped on the actual side, outermost first
    pub frames: Vec<CellFrame>,
    pub change: Change,
}

#[derive(Debug, Clone)]
pub enum Change {
    /// Leaf mismatch between fully unwrapped values
    Mismatch { actual: Value, expected: Value },
    /// Composite whose entries differ
    Composite { shape: Shape, entries: Vec<DiffEntry> },
}

/// One entry of a composite diff, in traversal order
///
/// Equal entries are kept so the renderer can elide them while preserving
/// their position.
#[derive(Debug, Clone)]
pub enum DiffEntry {
    Equal { key: DiffKey, value: Value },
    Changed { key: DiffKey, node: DiffNode },
    /// Present only on the expected side
    Missing { key: DiffKey, expected: Value },
    /// Present only on the actual side
    Extra { key: DiffKey, actual: Value },
}

impl DiffEntry {
    pub fn key(&self) -> &DiffKey {
        match self {
            DiffEntry::Equal { key, .. }
            | DiffEntry::Changed { key, .. }
            | DiffEntry::Missing { key, .. }
            | DiffEntry::Extra { key, .. } => key,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, DiffEntry::Equal { .. })
    }
}

/// Classification of a flattened mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    Changed,
    Missing,
    Extra,
}

/// A single mismatch with its path from the root, e.g. `$.foo[1]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MismatchEntry {
    pub path: String,
    pub kind: MismatchKind,
}

impl DiffNode {
    pub fn leaf(frames: Vec<CellFrame>, actual: Value, expected: Value) -> Self {
        Self {
            frames,
            change: Change::Mismatch { actual, expected },
        }
    }

    /// Entry for `key`, if the node is a composite containing it
    pub fn child(&self, key: &DiffKey) -> Option<&DiffEntry> {
        match &self.change {
            Change::Composite { entries, .. } => entries.iter().find(|e| e.key() == key),
            Change::Mismatch { .. } => None,
        }
    }

    /// Flatten into leaf mismatches in traversal order
    pub fn mismatches(&self) -> Vec<MismatchEntry> {
        let mut out = Vec::new();
        collect(self, "$".to_string(), &mut out);
        out
    }

    pub fn mismatch_count(&self) -> usize {
        self.mismatches().len()
    }
}

fn collect(node: &DiffNode, path: String, out: &mut Vec<MismatchEntry>) {
    let entries = match &node.change {
        Change::Mismatch { .. } => {
            out.push(MismatchEntry {
                path,
                kind: MismatchKind::Changed,
            });
            return;
        }
        Change::Composite { entries, .. } => entries,
    };
    for entry in entries {
        let child_path = format!("{}{}", path, entry.key());
        match entry {
            DiffEntry::Equal { .. } => {}
            DiffEntry::Changed { node, .. } => collect(node, child_path, out),
            DiffEntry::Missing { .. } => out.push(MismatchEntry {
                path: child_path,
                kind: MismatchKind::Missing,
            }),
            DiffEntry::Extra { .. } => out.push(MismatchEntry {
                path: child_path,
                kind: MismatchKind::Extra,
            }),
        }
    }
}
