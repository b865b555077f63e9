//! Defines the `RewriteEngine`, the core text transformation pass.
//!
//! The engine owns a compiled rule set and applies it to a content buffer:
//! each rule replaces every non-overlapping match in the output of the
//! previous rule, in strict rule-set order. The engine is pure with respect
//! to its input; all file I/O lives in the `batch` module.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;

use crate::compiler::{compile_rules, CompiledRules};
use crate::config::RewriteConfig;

/// A per-rule match count for one rewrite pass over one buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    /// Name of the rule that matched.
    pub rule_name: String,
    /// Number of non-overlapping matches the rule replaced.
    pub occurrences: usize,
}

/// The result of applying the full rule set to one content buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutcome {
    /// The content after every rule has been applied in order.
    pub content: String,
    /// One entry per rule that matched at least once, in rule order.
    pub hits: Vec<RuleHit>,
}

impl RewriteOutcome {
    /// True when at least one rule matched (the content may still be equal
    /// to the input if a rule replaced a match with identical text).
    pub fn matched(&self) -> bool {
        !self.hits.is_empty()
    }
}

/// Applies an ordered rule set to text content.
#[derive(Debug)]
pub struct RewriteEngine {
    compiled_rules: CompiledRules,
    config: RewriteConfig,
}

impl RewriteEngine {
    /// Compiles the configuration into a ready-to-apply engine.
    pub fn new(config: RewriteConfig) -> Result<Self> {
        let compiled_rules =
            compile_rules(&config).context("Failed to compile rewrite rules for RewriteEngine")?;
        Ok(Self { compiled_rules, config })
    }

    /// Applies every rule in order and returns the transformed content.
    ///
    /// Each rule operates on the output of the previous one, never on a
    /// re-read of the original. Replacement uses standard regex semantics:
    /// leftmost, non-overlapping matches, with `$n` group substitution for
    /// regex rules.
    pub fn apply(&self, content: &str) -> RewriteOutcome {
        let mut current = content.to_string();
        let mut hits = Vec::new();

        for rule in &self.compiled_rules.rules {
            let occurrences = rule.regex.find_iter(&current).count();
            if occurrences == 0 {
                continue;
            }
            debug!("Rule '{}' matched {} time(s).", rule.name, occurrences);

            let replaced = rule.regex.replace_all(&current, rule.replace_with.as_str()).into_owned();
            current = replaced;
            hits.push(RuleHit { rule_name: rule.name.clone(), occurrences });
        }

        RewriteOutcome { content: current, hits }
    }

    /// Returns the compiled rules backing this engine.
    pub fn compiled_rules(&self) -> &CompiledRules {
        &self.compiled_rules
    }

    /// Returns the engine's rule configuration.
    pub fn get_rules(&self) -> &RewriteConfig {
        &self.config
    }
}
