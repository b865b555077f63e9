// resub/src/targets.rs
//! Target manifests: the named, ordered batches of file paths to rewrite.
//!
//! The default manifest is embedded at compile time, the same way the core
//! crate embeds its default rules; `--targets` swaps in a user manifest.

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// One named batch: an ordered list of target paths.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TargetBatch {
    /// Unique batch name, used by `--batch`.
    pub name: String,
    /// Human-readable description of what the batch covers.
    pub description: Option<String>,
    /// Target paths, relative to the batch root, in processing order.
    pub targets: Vec<PathBuf>,
}

/// The full manifest: batches in declaration order.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TargetManifest {
    pub batches: Vec<TargetBatch>,
}

impl TargetManifest {
    /// Loads the embedded default manifest.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default target manifest from embedded string...");
        let default_yaml = include_str!("../config/default_targets.yaml");
        let manifest: TargetManifest =
            serde_yml::from_str(default_yaml).context("Failed to parse default target manifest")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Loads a manifest from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading target manifest from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read target manifest {}", path.display()))?;
        let manifest: TargetManifest = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse target manifest {}", path.display()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Returns the batches selected by `--batch`, or every batch when no
    /// selection was given. An unknown name is a hard error listing what is
    /// available.
    pub fn select(&self, names: &[String]) -> Result<Vec<&TargetBatch>> {
        if names.is_empty() {
            return Ok(self.batches.iter().collect());
        }

        let mut selected = Vec::with_capacity(names.len());
        for name in names {
            let batch = self.batches.iter().find(|b| &b.name == name).ok_or_else(|| {
                anyhow!(
                    "Unknown batch '{}'. Available batches: {}",
                    name,
                    self.batch_names().join(", ")
                )
            })?;
            selected.push(batch);
        }
        Ok(selected)
    }

    fn batch_names(&self) -> Vec<&str> {
        self.batches.iter().map(|b| b.name.as_str()).collect()
    }

    fn validate(&self) -> Result<()> {
        if self.batches.is_empty() {
            return Err(anyhow!("Target manifest contains no batches."));
        }
        let mut seen = HashSet::new();
        for batch in &self.batches {
            if batch.name.is_empty() {
                return Err(anyhow!("A batch has an empty `name` field."));
            }
            if !seen.insert(batch.name.as_str()) {
                return Err(anyhow!("Duplicate batch name found: '{}'.", batch.name));
            }
        }
        Ok(())
    }
}
