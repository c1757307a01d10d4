//! Directory enumeration for dirtrace.
//!
//! This crate walks the real filesystem and yields the sequence of
//! descendant paths, each with a file-or-directory classification, for the
//! tree builder in `dirtrace-core` to consume. Key behaviors:
//!
//! - **Ignore filtering** applied during the walk, including whole subtrees
//!   of ignored directories
//! - **Classification** resolved up front, so the core stays free of I/O
//! - **Warnings, not aborts** for unreadable entries
//! - **Parallel traversal** via jwalk, thread count from the config
//!
//! # Example
//!
//! ```rust,no_run
//! use dirtrace_walk::{TraceConfig, Walker};
//!
//! let mut config = TraceConfig::new("/path/to/trace");
//! config.recursive = true;
//!
//! let outcome = Walker::new().walk(&config).unwrap();
//! println!("{} entries", outcome.entries.len());
//! ```

mod walker;

pub use walker::{WalkOutcome, WalkedEntry, Walker};

// Re-export core types for convenience
pub use dirtrace_core::{Classification, TraceConfig, TraceWarning, WalkError, WarningKind};
