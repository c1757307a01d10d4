//! Trace configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Names ignored by default: VCS internals, dependency and build output
/// directories, OS metadata files.
pub fn default_ignore_patterns() -> Vec<String> {
    ["node_modules", ".git", "target", ".DS_Store"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Configuration for a directory trace.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct TraceConfig {
    /// Directory to trace.
    pub root: PathBuf,

    /// Descend into subdirectories.
    #[builder(default = "false")]
    #[serde(default)]
    pub recursive: bool,

    /// Include hidden entries (names starting with `.`).
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Entry names to skip. A pattern matches exactly; a pattern starting
    /// with a dot also matches as a name prefix.
    #[builder(default = "default_ignore_patterns()")]
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,

    /// Maximum depth to traverse (None = unlimited). Only consulted when
    /// `recursive` is set.
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Number of walker threads (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

impl TraceConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl TraceConfig {
    /// Create a new trace config builder.
    pub fn builder() -> TraceConfigBuilder {
        TraceConfigBuilder::default()
    }

    /// Create a simple config for tracing a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            include_hidden: false,
            ignore_patterns: default_ignore_patterns(),
            max_depth: None,
            threads: 0,
        }
    }

    /// Check if an entry name is in the ignore list.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore_patterns.iter().any(|pattern| {
            name == pattern || (pattern.starts_with('.') && name.starts_with(pattern.as_str()))
        })
    }

    /// Check if a hidden entry should be skipped.
    pub fn should_skip_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
