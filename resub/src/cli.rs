// resub/src/cli.rs
//! This file defines the command-line interface (CLI) for the resub
//! application. Running with no arguments reproduces the canonical batch:
//! every embedded batch, default rules, current directory.

use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "resub",
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Apply an ordered rewrite rule set across an enumerated list of source files",
    long_about = "resub reads each target file, applies every rewrite rule in order, and \
writes the file back only when its content changed, printing one status line per file. \
Missing targets are reported and skipped; the batch always runs to completion."
)]
pub struct Cli {
    /// Suppress all informational and debug log messages (status lines still print).
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for this run).
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// Resolve target paths against this directory instead of the current one.
    #[arg(long = "root", value_name = "DIR", help = "Resolve target paths against DIR.")]
    pub root: Option<PathBuf>,

    /// Path to a custom rewrite rule file (YAML), merged over the defaults.
    #[arg(long = "rules", value_name = "FILE", help = "Merge a custom rule file (YAML) over the default rules.")]
    pub rules: Option<PathBuf>,

    /// Path to a custom target manifest (YAML), replacing the embedded one.
    #[arg(long = "targets", value_name = "FILE", help = "Load a target manifest (YAML) instead of the embedded one.")]
    pub targets: Option<PathBuf>,

    /// Run only the named batches (repeatable). Defaults to every batch.
    #[arg(long = "batch", short = 'b', value_name = "NAME", help = "Run only the named batch; repeat for several.")]
    pub batch: Vec<String>,

    /// Report what would change without writing anything.
    #[arg(long = "dry-run", short = 'n', help = "Report what would change without writing anything.")]
    pub dry_run: bool,
}
