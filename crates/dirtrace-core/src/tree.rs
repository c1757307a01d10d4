//! Key-addressed tree container and builder.
//!
//! A [`Tree`] owns a registry mapping every [`NodeKey`] to its [`Node`],
//! giving O(1) parent resolution during insertion. [`TreeBuilder`] assembles
//! a tree from enumerated paths that may arrive in any order.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{TraceWarning, TreeError, WarningKind};
use crate::node::{Classification, Node, NodeKey, NodeKind};

/// A rooted tree of filesystem entries.
///
/// The root is always a directory holding the sentinel key `"root"`. All
/// nodes, the root included, live in the registry; `children` lists hold
/// keys, not owned subtrees, so the registry and the node graph are torn
/// down together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    root: NodeKey,
    nodes: HashMap<NodeKey, Node>,
}

impl Tree {
    /// Create a tree with a single directory root named `root_name`.
    pub fn new(root_name: impl Into<CompactString>) -> Self {
        let root_key = NodeKey::root();
        let root = Node::new_directory(root_key.clone(), root_name, None);
        let mut nodes = HashMap::new();
        nodes.insert(root_key.clone(), root);
        Self {
            root: root_key,
            nodes,
        }
    }

    /// Get the root node.
    pub fn root(&self) -> Result<&Node, TreeError> {
        self.nodes.get(&self.root).ok_or(TreeError::Uninitialized)
    }

    /// Look up a node by key.
    pub fn get(&self, key: &NodeKey) -> Option<&Node> {
        self.nodes.get(key)
    }

    /// Check if a key is registered.
    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    /// Total number of registered nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of file nodes in the tree.
    pub fn total_files(&self) -> usize {
        self.nodes.values().filter(|n| n.is_file()).count()
    }

    /// Number of directory nodes in the tree, excluding the root.
    pub fn total_dirs(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| n.is_dir() && !n.key.is_root())
            .count()
    }

    /// Insert `node` as a child of the node addressed by `parent_key`.
    ///
    /// The node's `parent` field is set to `parent_key` so linkage always
    /// matches the actual attachment point. After insertion the parent's
    /// children are re-sorted (directories first, then case-insensitive by
    /// name), so the "children are sorted" invariant holds after every
    /// mutation, not just at render time.
    ///
    /// # Errors
    ///
    /// - [`TreeError::ParentNotFound`] if `parent_key` is not registered
    /// - [`TreeError::NotADirectory`] if the parent is a file
    /// - [`TreeError::DuplicateKey`] if the node's key is already registered
    ///
    /// All failures leave the tree structurally unchanged.
    pub fn insert_child(&mut self, parent_key: &NodeKey, mut node: Node) -> Result<(), TreeError> {
        let parent = self
            .nodes
            .get(parent_key)
            .ok_or_else(|| TreeError::ParentNotFound {
                key: parent_key.clone(),
            })?;
        if !parent.is_dir() {
            return Err(TreeError::NotADirectory {
                key: parent_key.clone(),
            });
        }
        if self.nodes.contains_key(&node.key) {
            return Err(TreeError::DuplicateKey { key: node.key });
        }

        let key = node.key.clone();
        node.parent = Some(parent_key.clone());
        self.nodes.insert(key.clone(), node);

        // Detach the sibling list so the registry stays borrowable while
        // ranking siblings.
        let mut children = match self.nodes.get_mut(parent_key) {
            Some(parent) => std::mem::take(&mut parent.children),
            None => return Err(TreeError::Uninitialized),
        };
        children.push(key);
        children.sort_by_cached_key(|k| self.sibling_rank(k));
        if let Some(parent) = self.nodes.get_mut(parent_key) {
            parent.children = children;
        }
        Ok(())
    }

    /// Sort rank for a child key: directories before files, then ascending
    /// case-insensitive by name.
    fn sibling_rank(&self, key: &NodeKey) -> (u8, String) {
        match self.nodes.get(key) {
            Some(node) => {
                let kind_rank = match node.kind {
                    NodeKind::Directory => 0,
                    NodeKind::File => 1,
                };
                (kind_rank, node.name.to_lowercase().to_string())
            }
            // Unreachable while the registry invariant holds; rank last.
            None => (u8::MAX, key.to_string()),
        }
    }
}

/// Result of a build: the finished tree plus non-fatal skips.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    /// The assembled tree.
    pub tree: Tree,
    /// Entries that could not be inserted, with the reason for each.
    pub warnings: Vec<TraceWarning>,
}

impl BuildOutcome {
    /// Check if any entries were skipped.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Assembles a [`Tree`] from a sequence of enumerated paths.
///
/// Keys are paths relative to `base`, with the base directory itself mapped
/// to the root sentinel. The base is injected here, once; the builder holds
/// no ambient globals and performs no I/O.
///
/// Paths may arrive in any order. An insertion whose parent has not arrived
/// yet is parked and retried after the rest of the batch; entries still
/// unresolved once a retry pass stops making progress are reported as
/// [`WarningKind::Orphaned`] and skipped, never silently dropped.
#[derive(Debug)]
pub struct TreeBuilder {
    base: PathBuf,
    tree: Tree,
}

impl TreeBuilder {
    /// Create a builder for entries under `base`, with a root displayed as
    /// `root_name`.
    pub fn new(base: impl Into<PathBuf>, root_name: impl Into<CompactString>) -> Self {
        Self {
            base: base.into(),
            tree: Tree::new(root_name),
        }
    }

    /// Derive the registry key for a path.
    fn key_for(&self, path: &Path) -> NodeKey {
        let rel = path.strip_prefix(&self.base).unwrap_or(path);
        if rel.as_os_str().is_empty() {
            NodeKey::root()
        } else {
            NodeKey::new(rel.to_string_lossy().as_ref())
        }
    }

    /// Key of the node that should own `path`.
    fn parent_key_for(&self, path: &Path) -> NodeKey {
        match path.parent() {
            Some(parent) => self.key_for(parent),
            None => NodeKey::root(),
        }
    }

    /// Create a node from a path and its classification.
    ///
    /// # Errors
    ///
    /// [`TreeError::Unclassifiable`] when the classification is
    /// [`Classification::Unknown`] or the path has no base name.
    pub fn node_from_path(
        &self,
        path: &Path,
        classification: Classification,
    ) -> Result<Node, TreeError> {
        let name = path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .ok_or_else(|| TreeError::Unclassifiable {
                path: path.to_path_buf(),
            })?;
        let key = self.key_for(path);
        let parent = self.parent_key_for(path);

        match classification {
            Classification::Directory => Ok(Node::new_directory(key, name, Some(parent))),
            Classification::File => Ok(Node::new_file(key, name, parent)),
            Classification::Unknown => Err(TreeError::Unclassifiable {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Build the tree from `paths`, classifying each through `classify`.
    ///
    /// Consumes the builder and returns the finished tree together with the
    /// warnings for every skipped entry.
    pub fn build<P, C>(mut self, paths: P, classify: C) -> BuildOutcome
    where
        P: IntoIterator<Item = PathBuf>,
        C: Fn(&Path) -> Classification,
    {
        let mut warnings = Vec::new();
        let mut pending: Vec<(PathBuf, Node)> = Vec::new();

        for path in paths {
            let node = match self.node_from_path(&path, classify(&path)) {
                Ok(node) => node,
                Err(err) => {
                    warn!(path = %path.display(), "skipping entry: {err}");
                    warnings.push(TraceWarning::new(
                        path,
                        err.to_string(),
                        WarningKind::Unclassifiable,
                    ));
                    continue;
                }
            };
            self.attach(path, node, &mut pending, &mut warnings);
        }

        // Entries can arrive before their parent directory. Retry parked
        // insertions until a pass makes no progress.
        loop {
            let parked = std::mem::take(&mut pending);
            let before = parked.len();
            if before == 0 {
                break;
            }
            for (path, node) in parked {
                self.attach(path, node, &mut pending, &mut warnings);
            }
            if pending.len() == before {
                break;
            }
        }

        for (path, node) in pending {
            let parent = node.parent.unwrap_or_else(NodeKey::root);
            warn!(path = %path.display(), parent = %parent, "parent never arrived, skipping");
            warnings.push(TraceWarning::orphaned(path, &parent));
        }

        BuildOutcome {
            tree: self.tree,
            warnings,
        }
    }

    /// Insert one node, parking it when its parent has not arrived yet.
    fn attach(
        &mut self,
        path: PathBuf,
        node: Node,
        pending: &mut Vec<(PathBuf, Node)>,
        warnings: &mut Vec<TraceWarning>,
    ) {
        let parent_key = node.parent.clone().unwrap_or_else(NodeKey::root);
        if !self.tree.contains(&parent_key) {
            pending.push((path, node));
            return;
        }
        if let Err(err) = self.tree.insert_child(&parent_key, node) {
            warn!(path = %path.display(), "skipping entry: {err}");
            let kind = match &err {
                TreeError::DuplicateKey { .. } => WarningKind::Duplicate,
                TreeError::NotADirectory { .. } => WarningKind::InvalidParent,
                _ => WarningKind::Orphaned,
            };
            warnings.push(TraceWarning::new(path, err.to_string(), kind));
        }
    }
}
