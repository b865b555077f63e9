// resub-core/src/lib.rs
//! # resub Core Library
//!
//! `resub-core` provides the logic for ordered, regex-based batch rewriting
//! of text files. It defines the rule data structures, compiles rule sets,
//! and runs the sequential read → transform → conditionally-write pass over
//! an enumerated target list.
//!
//! The rule set is an *ordered* sequence and that order is a contract:
//! rules apply one after another to the same buffer, so a trailing rule can
//! act as a cleanup pass for artifacts an earlier, broader rule introduced
//! (the built-in rule set collapses an accidentally doubled token this way).
//!
//! ## Modules
//!
//! * `config`: Defines `RewriteRule` and `RewriteConfig`, YAML loading,
//!   merging, and validation.
//! * `compiler`: Compiles a rule set into `CompiledRules` (regex build,
//!   literal escaping, replacement normalization).
//! * `engine`: The `RewriteEngine`, a pure ordered-substitution pass over a
//!   content buffer.
//! * `batch`: The sequential batch runner with per-file status reporting.
//! * `errors`: The `ResubError` error enum.
//!
//! ## Usage Example
//!
//! ```rust
//! use resub_core::{RewriteConfig, RewriteEngine};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = RewriteConfig::load_default_rules()?;
//!     let engine = RewriteEngine::new(config)?;
//!
//!     let input = r#"import { supabase } from "@/lib/supabase""#;
//!     let outcome = engine.apply(input);
//!     assert_eq!(outcome.content, r#"import { supabaseAdmin } from "@/lib/supabase""#);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `anyhow::Result` with context at the I/O
//! seams; rule compilation reports the structured `ResubError`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod batch;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;

/// Re-exports the public configuration types and functions for managing
/// rewrite rules.
pub use config::{merge_rules, validate_rules, RewriteConfig, RewriteRule, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ResubError;

/// Re-exports the rewrite engine and its per-pass result types.
pub use engine::{RewriteEngine, RewriteOutcome, RuleHit};

/// Re-exports the batch runner and its report types.
pub use batch::{rewrite_targets, BatchOptions, BatchReport, FileReport, FileStatus};

/// Re-exports compiled-rule types for advanced usage.
pub use compiler::{compile_rules, CompiledRule, CompiledRules};
