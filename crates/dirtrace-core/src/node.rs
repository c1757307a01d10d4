//! Tree node types and path classification.

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Key of the root node in every tree.
pub const ROOT_KEY: &str = "root";

/// Unique identifier for a node within a tree.
///
/// Keys are derived from a node's path relative to the build's base
/// directory, so they are stable across insertion orders and collision-free
/// across sibling directories (base names alone would collide).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeKey(CompactString);

impl NodeKey {
    /// Create a key from a raw string.
    pub fn new(key: impl Into<CompactString>) -> Self {
        Self(key.into())
    }

    /// The fixed sentinel key owned by the root node.
    pub fn root() -> Self {
        Self(CompactString::const_new(ROOT_KEY))
    }

    /// Check if this is the root sentinel.
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_KEY
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// File-or-directory classification of a path, reported by the enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Neither a file nor a directory (vanished between enumeration and
    /// classification, or an unsupported entry type such as a socket).
    Unknown,
}

/// Type of tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl NodeKind {
    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, NodeKind::Directory)
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File)
    }
}

/// A single file or directory entry in the tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique key for this node, used for parent-child linkage.
    pub key: NodeKey,

    /// Entry base name (not the full path), used for display.
    pub name: CompactString,

    /// Node type.
    pub kind: NodeKind,

    /// Key of the parent node. `None` only for the root.
    pub parent: Option<NodeKey>,

    /// Ordered child keys, resolved through the tree's registry.
    /// Meaningful only for directories; always empty for files.
    pub children: Vec<NodeKey>,
}

impl Node {
    /// Create a new file node.
    pub fn new_file(key: NodeKey, name: impl Into<CompactString>, parent: NodeKey) -> Self {
        Self {
            key,
            name: name.into(),
            kind: NodeKind::File,
            parent: Some(parent),
            children: Vec::new(),
        }
    }

    /// Create a new directory node.
    pub fn new_directory(
        key: NodeKey,
        name: impl Into<CompactString>,
        parent: Option<NodeKey>,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            kind: NodeKind::Directory,
            parent,
            children: Vec::new(),
        }
    }

    /// Check if this node is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }

    /// Check if this node is a file.
    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
