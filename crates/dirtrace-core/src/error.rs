//! Error and warning types for tree building, rendering, and walking.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::NodeKey;

/// Errors raised while building or rendering a tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// Parent key missing from the registry at insertion time.
    #[error("parent node '{key}' not found")]
    ParentNotFound { key: NodeKey },

    /// Insertion target exists but is a file, not a directory.
    #[error("cannot insert a child into non-directory node '{key}'")]
    NotADirectory { key: NodeKey },

    /// A path was neither a file nor a directory.
    #[error("cannot classify path: {path}")]
    Unclassifiable { path: PathBuf },

    /// A node with this key is already registered.
    #[error("node key '{key}' is already registered")]
    DuplicateKey { key: NodeKey },

    /// Operation attempted before a root exists. Construction always creates
    /// a root, so this is a defensive invariant check.
    #[error("tree has no root")]
    Uninitialized,

    /// A child key did not resolve during rendering. This signals a builder
    /// bug, not a data-quality issue; rendering aborts.
    #[error("tree is inconsistent: node '{key}' missing from the registry")]
    Inconsistent { key: NodeKey },
}

/// Errors raised by the directory walk, before the core is invoked.
#[derive(Debug, Error)]
pub enum WalkError {
    /// Target path not found.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Target path is not a directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WalkError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of trace warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Parent entry never arrived; the path was skipped after retries.
    Orphaned,
    /// Entry key collided with an already-registered node.
    Duplicate,
    /// Entry was neither a file nor a directory.
    Unclassifiable,
    /// Parent entry resolved to a file.
    InvalidParent,
    /// Error reading a directory entry.
    ReadError,
}

/// Non-fatal warning collected during a walk or build.
///
/// One skipped entry never blanks the whole output; it is reported here
/// instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceWarning {
    /// Path the warning refers to.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl TraceWarning {
    /// Create a new trace warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create an orphaned-entry warning.
    pub fn orphaned(path: impl Into<PathBuf>, parent: &NodeKey) -> Self {
        let path = path.into();
        Self {
            message: format!(
                "skipped {}: parent '{parent}' never arrived",
                path.display()
            ),
            path,
            kind: WarningKind::Orphaned,
        }
    }

    /// Create a read-error warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &impl std::fmt::Display) -> Self {
        let path = path.into();
        Self {
            message: format!("read error at {}: {error}", path.display()),
            path,
            kind: WarningKind::ReadError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_error_io_classification() {
        let err = WalkError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, WalkError::NotFound { .. }));

        let err = WalkError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, WalkError::Io { .. }));
    }

    #[test]
    fn test_orphaned_warning() {
        let warning = TraceWarning::orphaned("a/b/c.txt", &NodeKey::from("a/b"));
        assert_eq!(warning.kind, WarningKind::Orphaned);
        assert!(warning.message.contains("a/b"));
    }

    #[test]
    fn test_tree_error_display() {
        let err = TreeError::ParentNotFound {
            key: NodeKey::from("src"),
        };
        assert!(err.to_string().contains("'src'"));
    }
}
