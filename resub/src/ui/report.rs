// resub/src/ui/report.rs
//! Per-file status lines and the batch completion summary.
//!
//! One line per target, in target order, using the original migration
//! script's markers: ✅ rewritten, ⏭️ unchanged, ❌ not found. Colors are
//! applied only when the destination is a terminal.

use std::io::{self, Write};

use anyhow::Result;
use owo_colors::OwoColorize;

use resub_core::{BatchReport, FileReport, FileStatus};

/// Prints the status line for one finished target.
pub fn print_file_status(
    writer: &mut dyn Write,
    report: &FileReport,
    dry_run: bool,
    use_color: bool,
) -> Result<()> {
    let path = report.path.display();
    let line = match report.status {
        FileStatus::Rewritten if dry_run => {
            if use_color {
                format!("✅ {} {}", path, "(dry-run)".yellow())
            } else {
                format!("✅ {} (dry-run)", path)
            }
        }
        FileStatus::Rewritten => {
            if use_color {
                format!("✅ {}", path.green())
            } else {
                format!("✅ {}", path)
            }
        }
        FileStatus::Unchanged => {
            if use_color {
                format!("⏭️ {} {}", path, "(unchanged)".dimmed())
            } else {
                format!("⏭️ {} (unchanged)", path)
            }
        }
        FileStatus::Missing => {
            if use_color {
                format!("❌ {} {}", path, "(not found)".red())
            } else {
                format!("❌ {} (not found)", path)
            }
        }
    };
    writeln!(writer, "{}", line)?;
    Ok(())
}

/// Prints the completion marker after every batch has run.
pub fn print_completion(writer: &mut dyn Write, report: &BatchReport, use_color: bool) -> Result<()> {
    let summary = format!(
        "Done! {} rewritten, {} unchanged, {} missing.",
        report.rewritten(),
        report.unchanged(),
        report.missing()
    );
    if use_color {
        writeln!(writer, "\n{}", summary.bold())?;
    } else {
        writeln!(writer, "\n{}", summary)?;
    }
    Ok(())
}

/// Convenience wrapper that streams a status line to stdout.
pub fn emit_file_status(report: &FileReport, dry_run: bool, use_color: bool) {
    let stdout = io::stdout();
    let mut writer = stdout.lock();
    let _ = print_file_status(&mut writer, report, dry_run, use_color);
}
