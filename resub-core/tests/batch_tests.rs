// resub-core/tests/batch_tests.rs
//! Tests for the sequential batch runner: per-file statuses, the
//! missing-target skip, conditional writes, dry-run, and idempotence.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

use resub_core::{
    rewrite_targets, BatchOptions, FileStatus, RewriteConfig, RewriteEngine,
};

const PAGE_BEFORE: &str = r#"import { supabase } from "@/lib/supabase"
const { data } = await supabase.query("centros")
"#;

const PAGE_AFTER: &str = r#"import { supabaseAdmin } from "@/lib/supabase"
const { data } = await supabaseAdmin.query("centros")
"#;

fn default_engine() -> Result<RewriteEngine> {
    RewriteEngine::new(RewriteConfig::load_default_rules()?)
}

#[test]
fn rewrites_changed_files_in_place() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("page.tsx"), PAGE_BEFORE)?;

    let engine = default_engine()?;
    let targets = vec![PathBuf::from("page.tsx")];
    let report =
        rewrite_targets(&engine, dir.path(), &targets, BatchOptions::default(), |_| {})?;

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].status, FileStatus::Rewritten);
    assert_eq!(fs::read_to_string(dir.path().join("page.tsx"))?, PAGE_AFTER);
    Ok(())
}

#[test]
fn unchanged_files_are_not_written() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("readme.md");
    fs::write(&path, "nothing to see here\n")?;
    let mtime_before = fs::metadata(&path)?.modified()?;

    let engine = default_engine()?;
    let targets = vec![PathBuf::from("readme.md")];
    let report =
        rewrite_targets(&engine, dir.path(), &targets, BatchOptions::default(), |_| {})?;

    assert_eq!(report.files[0].status, FileStatus::Unchanged);
    assert_eq!(fs::read_to_string(&path)?, "nothing to see here\n");
    assert_eq!(fs::metadata(&path)?.modified()?, mtime_before);
    Ok(())
}

#[test]
fn missing_target_is_skipped_and_batch_continues() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("after.tsx"), PAGE_BEFORE)?;

    let engine = default_engine()?;
    let targets = vec![PathBuf::from("ghost.tsx"), PathBuf::from("after.tsx")];
    let mut observed = Vec::new();
    let report = rewrite_targets(&engine, dir.path(), &targets, BatchOptions::default(), |r| {
        observed.push((r.path.clone(), r.status));
    })?;

    // Every path after the missing one must still be processed.
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[0].status, FileStatus::Missing);
    assert_eq!(report.files[1].status, FileStatus::Rewritten);
    assert_eq!(report.missing(), 1);
    assert_eq!(report.rewritten(), 1);

    // The observer saw the reports in target order, as they finished.
    assert_eq!(
        observed,
        vec![
            (PathBuf::from("ghost.tsx"), FileStatus::Missing),
            (PathBuf::from("after.tsx"), FileStatus::Rewritten),
        ]
    );
    Ok(())
}

#[test]
fn dry_run_reports_without_writing() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("page.tsx");
    fs::write(&path, PAGE_BEFORE)?;

    let engine = default_engine()?;
    let targets = vec![PathBuf::from("page.tsx")];
    let report =
        rewrite_targets(&engine, dir.path(), &targets, BatchOptions { dry_run: true }, |_| {})?;

    assert_eq!(report.files[0].status, FileStatus::Rewritten);
    assert_eq!(fs::read_to_string(&path)?, PAGE_BEFORE, "dry run must not write");
    Ok(())
}

#[test]
fn second_pass_reports_all_unchanged() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("a.tsx"), PAGE_BEFORE)?;
    fs::write(dir.path().join("b.tsx"), "await supabaseAdminAdmin.foo()\n")?;

    let engine = default_engine()?;
    let targets = vec![PathBuf::from("a.tsx"), PathBuf::from("b.tsx")];

    let first = rewrite_targets(&engine, dir.path(), &targets, BatchOptions::default(), |_| {})?;
    assert_eq!(first.rewritten(), 2);

    let second = rewrite_targets(&engine, dir.path(), &targets, BatchOptions::default(), |_| {})?;
    assert_eq!(second.rewritten(), 0);
    assert_eq!(second.unchanged(), 2);

    assert_eq!(fs::read_to_string(dir.path().join("b.tsx"))?, "await supabaseAdmin.foo()\n");
    Ok(())
}

#[test]
fn per_rule_hits_are_reported() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("page.tsx"), PAGE_BEFORE)?;

    let engine = default_engine()?;
    let targets = vec![PathBuf::from("page.tsx")];
    let report =
        rewrite_targets(&engine, dir.path(), &targets, BatchOptions::default(), |_| {})?;

    let hits = &report.files[0].hits;
    assert!(hits.iter().any(|h| h.rule_name == "import_single_client" && h.occurrences == 1));
    assert!(hits.iter().any(|h| h.rule_name == "client_usage" && h.occurrences == 1));
    Ok(())
}

#[test]
fn directory_target_counts_as_missing() -> Result<()> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("src"))?;

    let engine = default_engine()?;
    let targets = vec![PathBuf::from("src")];
    let report =
        rewrite_targets(&engine, dir.path(), &targets, BatchOptions::default(), |_| {})?;

    assert_eq!(report.files[0].status, FileStatus::Missing);
    Ok(())
}
