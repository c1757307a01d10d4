//! dirtrace - trace a directory structure into a pasteable text tree.
//!
//! Usage:
//!   dirtrace [DIR]           Trace the top level of DIR
//!   dirtrace -r [DIR]        Trace recursively
//!   dirtrace -f json [DIR]   Emit the tree and warnings as JSON
//!   dirtrace --help          Show help
//!   drtr                     Short alias for all of the above

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::Level;

use dirtrace_core::{
    Classification, RenderStyle, TraceConfig, TraceWarning, TreeBuilder, TreePrinter,
    default_ignore_patterns,
};
use dirtrace_walk::Walker;

#[derive(Parser)]
#[command(
    name = "dirtrace",
    version,
    about = "Trace a directory structure into a pasteable text tree",
    long_about = "dirtrace renders a directory as an indented, connector-annotated\n\
                  text tree, ready to paste into LLM prompts, issues, or docs.\n\n\
                  By default only the top level is listed; pass -r to recurse."
)]
struct Cli {
    /// Directory to trace (defaults to current directory)
    #[arg(default_value = ".")]
    target: PathBuf,

    /// Recurse into subdirectories
    #[arg(short, long)]
    recursive: bool,

    /// Include hidden entries
    #[arg(short = 'a', long)]
    all: bool,

    /// Extra entry names to ignore (repeatable, adds to the built-in list)
    #[arg(short = 'I', long = "ignore", value_name = "NAME")]
    ignore: Vec<String>,

    /// Maximum recursion depth
    #[arg(short = 'd', long, value_name = "DEPTH")]
    depth: Option<u32>,

    /// Disable connector coloring
    #[arg(long)]
    no_color: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let mut ignore_patterns = default_ignore_patterns();
    ignore_patterns.extend(cli.ignore.iter().cloned());

    let config = TraceConfig::builder()
        .root(cli.target.clone())
        .recursive(cli.recursive)
        .include_hidden(cli.all)
        .ignore_patterns(ignore_patterns)
        .max_depth(cli.depth)
        .build()
        .context("Invalid configuration")?;

    // Boundary check: an unreadable or non-directory target is reported
    // here, once, and the core is never invoked.
    let walked = Walker::new()
        .walk(&config)
        .with_context(|| format!("Cannot trace {}", cli.target.display()))?;

    let root_name = walked
        .root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| walked.root.display().to_string());

    let kinds: HashMap<PathBuf, Classification> = walked
        .entries
        .iter()
        .map(|e| (e.path.clone(), e.classification))
        .collect();
    let built = TreeBuilder::new(&walked.root, root_name).build(walked.paths(), |p: &Path| {
        kinds.get(p).copied().unwrap_or(Classification::Unknown)
    });

    let mut warnings = walked.warnings;
    warnings.extend(built.warnings);

    match cli.format {
        OutputFormat::Text => print_text(&built.tree, &warnings, cli.no_color)?,
        OutputFormat::Json => print_json(&built.tree, &warnings)?,
    }

    Ok(())
}

/// Render the tree as text lines with a trailing summary.
fn print_text(
    tree: &dirtrace_core::Tree,
    warnings: &[TraceWarning],
    no_color: bool,
) -> Result<()> {
    let style = if !no_color && supports_color::on(supports_color::Stream::Stdout).is_some() {
        RenderStyle::colored()
    } else {
        RenderStyle::plain()
    };

    let lines = TreePrinter::with_style(style)
        .render(tree)
        .context("Render failed")?;
    for line in &lines {
        println!("{line}");
    }

    println!();
    println!("{} directories, {} files", tree.total_dirs(), tree.total_files());

    if !warnings.is_empty() {
        eprintln!();
        eprintln!("{} entr{} skipped:", warnings.len(), if warnings.len() == 1 { "y" } else { "ies" });
        for warning in warnings {
            eprintln!("  {}", warning.message);
        }
    }

    Ok(())
}

/// Emit the tree and warnings as pretty-printed JSON.
fn print_json(tree: &dirtrace_core::Tree, warnings: &[TraceWarning]) -> Result<()> {
    let report = serde_json::json!({
        "tree": tree,
        "warnings": warnings,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn setup_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => return,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .compact()
        .init();
}
