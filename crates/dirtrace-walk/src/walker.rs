//! jwalk-based directory enumeration.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use jwalk::{Parallelism, WalkDir};
use tracing::warn;

use dirtrace_core::{Classification, TraceConfig, TraceWarning, WalkError};

/// One enumerated path with its classification.
#[derive(Debug, Clone)]
pub struct WalkedEntry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// File-or-directory classification.
    pub classification: Classification,
}

/// Everything a walk produced.
#[derive(Debug)]
pub struct WalkOutcome {
    /// Canonicalized root that was walked.
    pub root: PathBuf,
    /// Enumerated entries in traversal order (parents before children).
    pub entries: Vec<WalkedEntry>,
    /// Non-fatal problems encountered along the way.
    pub warnings: Vec<TraceWarning>,
}

impl WalkOutcome {
    /// Paths of all enumerated entries.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }
}

/// Directory enumerator.
///
/// Applies ignore-list filtering and classification up front, so the tree
/// builder downstream never touches the filesystem. Unreadable entries
/// become warnings rather than aborting the walk.
#[derive(Debug, Default)]
pub struct Walker;

impl Walker {
    /// Create a new walker.
    pub fn new() -> Self {
        Self
    }

    /// Enumerate the configured root.
    ///
    /// # Errors
    ///
    /// Fails before yielding anything when the root does not exist, cannot
    /// be resolved, or is not a directory.
    pub fn walk(&self, config: &TraceConfig) -> Result<WalkOutcome, WalkError> {
        let root = config
            .root
            .canonicalize()
            .map_err(|e| WalkError::io(&config.root, e))?;
        if !root.is_dir() {
            return Err(WalkError::NotADirectory { path: root });
        }

        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };
        let max_depth = if config.recursive {
            config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX)
        } else {
            1
        };

        let walker = WalkDir::new(&root)
            .parallelism(parallelism)
            .skip_hidden(!config.include_hidden)
            .follow_links(false)
            .sort(true)
            .min_depth(1)
            .max_depth(max_depth);

        let mut entries = Vec::new();
        let mut warnings = Vec::new();
        // Roots of ignored subtrees; every descendant of one is dropped too.
        let mut ignored_roots: HashSet<PathBuf> = HashSet::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                    warn!(path = %path.display(), "unreadable entry: {err}");
                    warnings.push(TraceWarning::read_error(path, &err));
                    continue;
                }
            };

            let path = entry.path();
            if path
                .ancestors()
                .skip(1)
                .any(|ancestor| ignored_roots.contains(ancestor))
            {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if config.is_ignored(&name) {
                if entry.file_type().is_dir() {
                    ignored_roots.insert(path);
                }
                continue;
            }

            let classification = classify(entry.file_type(), &path);
            entries.push(WalkedEntry {
                path,
                classification,
            });
        }

        Ok(WalkOutcome {
            root,
            entries,
            warnings,
        })
    }
}

/// Classify an entry from its file type, resolving symlinks through the
/// link target the way stat-based classifiers do.
fn classify(file_type: std::fs::FileType, path: &Path) -> Classification {
    if file_type.is_dir() {
        Classification::Directory
    } else if file_type.is_file() {
        Classification::File
    } else if file_type.is_symlink() {
        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Classification::Directory,
            Ok(meta) if meta.is_file() => Classification::File,
            _ => Classification::Unknown,
        }
    } else {
        Classification::Unknown
    }
}
