//! Core tree-building and rendering engine for dirtrace.
//!
//! This crate converts a flat list of filesystem paths into a rooted,
//! key-addressed tree and renders that tree into connector-annotated text
//! lines suitable for pasting into text interfaces.
//!
//! Data flows one way: enumerated paths → [`TreeBuilder`] → [`Tree`] →
//! [`TreePrinter`] → lines. The core performs no I/O; classification of each
//! path is supplied by the enumerator (see the `dirtrace-walk` crate).
//!
//! # Example
//!
//! ```rust
//! use std::path::{Path, PathBuf};
//! use dirtrace_core::{Classification, TreeBuilder, TreePrinter};
//!
//! let paths = vec![
//!     PathBuf::from("/proj/src"),
//!     PathBuf::from("/proj/src/main.rs"),
//! ];
//! let classify = |p: &Path| {
//!     if p.extension().is_some() {
//!         Classification::File
//!     } else {
//!         Classification::Directory
//!     }
//! };
//!
//! let outcome = TreeBuilder::new("/proj", "proj").build(paths, classify);
//! let lines = TreePrinter::new().render(&outcome.tree).unwrap();
//! assert_eq!(lines, vec!["proj", "+-- src/", "|   +-- main.rs"]);
//! ```

mod config;
mod error;
mod node;
mod printer;
mod tree;

pub use config::{TraceConfig, TraceConfigBuilder, default_ignore_patterns};
pub use error::{TraceWarning, TreeError, WalkError, WarningKind};
pub use node::{Classification, Node, NodeKey, NodeKind, ROOT_KEY};
pub use printer::{RenderStyle, TreePrinter};
pub use tree::{BuildOutcome, Tree, TreeBuilder};
