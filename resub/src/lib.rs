// resub/src/lib.rs
//! # resub CLI Application
//!
//! This crate provides the command-line shell around `resub-core`: argument
//! parsing, logger setup, the embedded target manifests, and per-file status
//! reporting.

pub mod cli;
pub mod logger;
pub mod targets;
pub mod ui;

pub use targets::{TargetBatch, TargetManifest};
