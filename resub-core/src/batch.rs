//! The batch runner: one sequential pass of the engine over a target list.
//!
//! Each target is fully processed (read, transform, conditionally write)
//! before the next one starts. A missing target is a per-file status, never
//! a batch failure; any other I/O error (permissions, encoding, disk full)
//! propagates and aborts the batch at that point, matching the tool's
//! operator-supervised use case.
//!
//! Writes happen in place with no temp-file/rename step, so an interruption
//! mid-write can leave a partially written target. See DESIGN.md before
//! changing that behavior.
//!
//! License: MIT OR Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info};

use crate::engine::{RewriteEngine, RuleHit};

/// Per-file outcome of one batch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// At least one rule changed the content and the file was written back
    /// (or would have been, in dry-run mode).
    Rewritten,
    /// No rule changed the content; the file was not touched.
    Unchanged,
    /// The target path does not reference an existing file.
    Missing,
}

/// The record produced for each target path, in target-list order.
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The target path as given (relative to the batch root).
    pub path: PathBuf,
    pub status: FileStatus,
    /// Per-rule match counts; empty for missing or unmatched files.
    pub hits: Vec<RuleHit>,
}

/// The full report for one batch pass.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One report per target, in target-list order.
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn rewritten(&self) -> usize {
        self.count(FileStatus::Rewritten)
    }

    pub fn unchanged(&self) -> usize {
        self.count(FileStatus::Unchanged)
    }

    pub fn missing(&self) -> usize {
        self.count(FileStatus::Missing)
    }

    fn count(&self, status: FileStatus) -> usize {
        self.files.iter().filter(|f| f.status == status).count()
    }

    /// Absorbs another report, preserving file order.
    pub fn merge(&mut self, other: BatchReport) {
        self.files.extend(other.files);
    }
}

/// Options controlling a batch pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// When true, transformed content is computed and reported but never
    /// written back.
    pub dry_run: bool,
}

/// Runs the engine over every target path, in order.
///
/// `targets` are resolved against `root`. The `observer` callback receives
/// each `FileReport` as soon as the file is finished, so a caller can stream
/// status lines while the batch is still running; the same reports are also
/// returned in the final `BatchReport`.
///
/// One file's missing/unchanged outcome never aborts the batch; a hard read
/// or write failure does.
pub fn rewrite_targets<F>(
    engine: &RewriteEngine,
    root: &Path,
    targets: &[PathBuf],
    options: BatchOptions,
    mut observer: F,
) -> Result<BatchReport>
where
    F: FnMut(&FileReport),
{
    info!(
        "Starting batch pass over {} target(s) under {}.",
        targets.len(),
        root.display()
    );

    let mut report = BatchReport::default();

    for target in targets {
        let full_path = root.join(target);

        let file_report = if !full_path.is_file() {
            debug!("Target {} does not exist; skipping.", full_path.display());
            FileReport { path: target.clone(), status: FileStatus::Missing, hits: Vec::new() }
        } else {
            rewrite_one(engine, target, &full_path, options)?
        };

        observer(&file_report);
        report.files.push(file_report);
    }

    info!(
        "Batch pass complete: {} rewritten, {} unchanged, {} missing.",
        report.rewritten(),
        report.unchanged(),
        report.missing()
    );
    Ok(report)
}

fn rewrite_one(
    engine: &RewriteEngine,
    target: &Path,
    full_path: &Path,
    options: BatchOptions,
) -> Result<FileReport> {
    let content = fs::read_to_string(full_path)
        .with_context(|| format!("Failed to read target file {}", full_path.display()))?;

    let outcome = engine.apply(&content);

    if outcome.content == content {
        debug!("Target {} unchanged.", full_path.display());
        return Ok(FileReport {
            path: target.to_path_buf(),
            status: FileStatus::Unchanged,
            hits: outcome.hits,
        });
    }

    if options.dry_run {
        debug!("Dry run: not writing {}.", full_path.display());
    } else {
        // In-place overwrite, no backup. Matches the original scripts.
        fs::write(full_path, &outcome.content)
            .with_context(|| format!("Failed to write target file {}", full_path.display()))?;
        debug!(
            "Rewrote {} ({} -> {} bytes).",
            full_path.display(),
            content.len(),
            outcome.content.len()
        );
    }

    Ok(FileReport {
        path: target.to_path_buf(),
        status: FileStatus::Rewritten,
        hits: outcome.hits,
    })
}
