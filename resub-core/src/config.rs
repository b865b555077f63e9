//! Configuration management for `resub-core`.
//!
//! This module defines the core data structures for rewrite rules and rule
//! sets. It handles serialization/deserialization of YAML configurations and
//! provides utilities for loading, merging, and validating them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a rule pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Pattern type marker for regex rules.
pub const PATTERN_TYPE_REGEX: &str = "regex";
/// Pattern type marker for literal (verbatim substring) rules.
pub const PATTERN_TYPE_LITERAL: &str = "literal";

static CAPTURE_GROUP_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").unwrap());

/// Represents a single rewrite rule applied to file content.
///
/// A rule pairs a matcher (a regex or a literal substring) with a
/// replacement. For regex rules the replacement may reference capture groups
/// with `$n`; for literal rules the replacement is inserted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RewriteRule {
    /// Unique identifier for the rule (e.g., "client_usage").
    pub name: String,
    /// Human-readable description of what the rule rewrites.
    pub description: Option<String>,
    /// The pattern string (regex source or literal text).
    pub pattern: Option<String>,
    /// The type of pattern: "regex" or "literal".
    pub pattern_type: String,
    /// The replacement text for each match.
    pub replace_with: String,
    /// If true, enables multiline mode for the regex engine.
    pub multiline: bool,
    /// If true, the dot character `.` in regex will match newlines.
    pub dot_matches_new_line: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for RewriteRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            pattern_type: PATTERN_TYPE_REGEX.to_string(),
            replace_with: String::new(),
            multiline: false,
            dot_matches_new_line: false,
            enabled: None,
        }
    }
}

impl RewriteRule {
    /// Returns true unless the rule is explicitly disabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Represents the top-level rule configuration for resub.
///
/// `rules` is an ordered sequence and the ordering is a contract: rules are
/// applied to content in exactly this order, because a trailing rule may be
/// a cleanup pass that collapses artifacts produced by an earlier, broader
/// rule (e.g. a doubled token).
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RewriteConfig {
    /// The ordered list of rewrite rules.
    pub rules: Vec<RewriteRule>,
}

impl RewriteConfig {
    /// Loads rewrite rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let config: RewriteConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse rules file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the default rewrite rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config: RewriteConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;
        validate_rules(&config.rules)?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }
}

/// Merges user-defined rules over the defaults while preserving order.
///
/// A user rule whose name matches a default rule replaces it *in place*, so
/// the default ordering (and any trailing cleanup rules) stays intact. User
/// rules with new names are appended after the defaults, in user order.
pub fn merge_rules(
    default_config: RewriteConfig,
    user_config: Option<RewriteConfig>,
) -> RewriteConfig {
    let Some(user_cfg) = user_config else {
        return default_config;
    };
    debug!(
        "merge_rules called with {} default and {} user rules.",
        default_config.rules.len(),
        user_cfg.rules.len()
    );

    let mut merged = default_config.rules;
    let mut appended: Vec<RewriteRule> = Vec::new();

    for user_rule in user_cfg.rules {
        if let Some(slot) = merged.iter_mut().find(|r| r.name == user_rule.name) {
            debug!("User rule '{}' overrides a default rule in place.", user_rule.name);
            *slot = user_rule;
        } else {
            appended.push(user_rule);
        }
    }
    merged.extend(appended);

    debug!("Final total rules after merge: {}", merged.len());
    RewriteConfig { rules: merged }
}

/// Validates rule integrity (names, patterns, capture group references).
pub fn validate_rules(rules: &[RewriteRule]) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.clone()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) => p,
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.is_empty() {
            errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            continue;
        }

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        match rule.pattern_type.as_str() {
            PATTERN_TYPE_LITERAL => {}
            PATTERN_TYPE_REGEX => {
                if let Err(e) = Regex::new(pattern) {
                    errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                    continue;
                }

                let group_count = count_capture_groups(pattern);
                for cap in CAPTURE_GROUP_REF.captures_iter(&rule.replace_with) {
                    if let Some(group_num_str) = cap.get(1) {
                        if let Ok(group_num) = group_num_str.as_str().parse::<usize>() {
                            if group_num > group_count {
                                errors.push(format!(
                                    "Rule '{}': replacement references non-existent capture group '${}'.",
                                    rule.name, group_num
                                ));
                            }
                        }
                    }
                }
            }
            other => {
                errors.push(format!(
                    "Rule '{}' has unknown pattern_type '{}' (expected 'regex' or 'literal').",
                    rule.name, other
                ));
            }
        }
    }

    if !errors.is_empty() {
        let full_error_message = format!("Rule validation failed:\n{}", errors.join("\n"));
        Err(anyhow!(full_error_message))
    } else {
        Ok(())
    }
}

/// Counts unescaped `(` occurrences as an upper bound on capture groups.
fn count_capture_groups(pattern: &str) -> usize {
    let mut group_count = 0;
    let mut is_escaped = false;
    for c in pattern.chars() {
        match c {
            '\\' => is_escaped = !is_escaped,
            '(' if !is_escaped => {
                group_count += 1;
                is_escaped = false;
            }
            _ => is_escaped = false,
        }
    }
    group_count
}
