// resub/src/main.rs
//! resub entry point.
//!
//! Loads the rule set (defaults plus any `--rules` overlay), resolves the
//! selected batches from the target manifest, and runs one sequential batch
//! pass per selection, streaming a status line per file. The process exits
//! successfully even when targets are missing; only a rule-compilation
//! failure or a hard I/O error terminates the run early.

use std::io;
use std::path::PathBuf;

use is_terminal::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use resub::cli::Cli;
use resub::logger;
use resub::targets::TargetManifest;
use resub::ui::report;
use resub_core::{merge_rules, BatchOptions, BatchReport, RewriteConfig, RewriteEngine};

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(None);
    }

    // 1. Load rules: embedded defaults, with an optional user overlay.
    let default_config = RewriteConfig::load_default_rules()?;
    let config = match &args.rules {
        Some(path) => {
            let user_config = RewriteConfig::load_from_file(path)?;
            merge_rules(default_config, Some(user_config))
        }
        None => default_config,
    };
    debug!("Active rule set has {} rule(s).", config.rules.len());

    let engine = RewriteEngine::new(config)?;

    // 2. Load the target manifest and select batches.
    let manifest = match &args.targets {
        Some(path) => TargetManifest::load_from_file(path)?,
        None => TargetManifest::load_default()?,
    };
    let selected = manifest.select(&args.batch)?;

    let root = args.root.clone().unwrap_or_else(|| PathBuf::from("."));
    let options = BatchOptions { dry_run: args.dry_run };
    let use_color = io::stdout().is_terminal();

    // 3. Run each selected batch in manifest order.
    let mut combined = BatchReport::default();
    for batch in selected {
        info!("Running batch '{}' ({} targets).", batch.name, batch.targets.len());
        let batch_report = resub_core::rewrite_targets(
            &engine,
            &root,
            &batch.targets,
            options,
            |file_report| report::emit_file_status(file_report, args.dry_run, use_color),
        )
        .with_context(|| format!("Batch '{}' failed", batch.name))?;
        combined.merge(batch_report);
    }

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    report::print_completion(&mut writer, &combined, use_color)?;

    Ok(())
}
