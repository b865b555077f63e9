//! compiler.rs - Compiles an ordered rule set into applicable form.
//!
//! This module converts a `RewriteConfig` into `CompiledRules`: each rule's
//! pattern becomes a compiled `Regex` (literal rules are escaped first) and
//! its replacement is normalized so that `Regex::replace_all` applies it with
//! the intended semantics. Rule order is preserved exactly; it is part of the
//! rule-set contract.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::RegexBuilder;

use crate::config::{RewriteConfig, RewriteRule, MAX_PATTERN_LENGTH, PATTERN_TYPE_LITERAL};
use crate::errors::ResubError;

/// Represents a single compiled rewrite rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: regex::Regex,
    /// The replacement text, normalized for `Regex::replace_all`.
    pub replace_with: String,
    /// The unique name of the rewrite rule.
    pub name: String,
}

/// The full ordered sequence of compiled rules for one rewrite pass.
#[derive(Debug)]
pub struct CompiledRules {
    /// Compiled rules in application order.
    pub rules: Vec<CompiledRule>,
}

/// Compiles a list of `RewriteRule`s into `CompiledRules`.
///
/// Disabled rules are skipped. Literal rules are escaped so their pattern
/// matches verbatim and their replacement is inserted verbatim (a `$` in a
/// literal replacement is not a group reference). All compilation failures
/// are collected and reported together.
pub fn compile_rules(config: &RewriteConfig) -> Result<CompiledRules, ResubError> {
    debug!("Starting compilation of {} rules.", config.rules.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in &config.rules {
        if !rule.is_enabled() {
            debug!("Skipping disabled rule '{}'.", rule.name);
            continue;
        }

        let pattern = match rule.pattern.as_ref() {
            Some(p) => p,
            None => {
                // validate_rules rejects this earlier; tolerate it here too.
                debug!("Skipping rule '{}' because its pattern is missing.", rule.name);
                continue;
            }
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(ResubError::PatternLengthExceeded(
                rule.name.clone(),
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let is_literal = rule.pattern_type == PATTERN_TYPE_LITERAL;
        let pattern_source = if is_literal {
            regex::escape(pattern)
        } else {
            pattern.clone()
        };

        let regex_result = RegexBuilder::new(&pattern_source)
            .multi_line(rule.multiline)
            .dot_matches_new_line(rule.dot_matches_new_line)
            .size_limit(10 * (1 << 20)) // 10 MB limit for compiled regex
            .build();

        match regex_result {
            Ok(regex) => {
                debug!("Rule '{}' compiled successfully.", rule.name);
                compiled_rules.push(CompiledRule {
                    regex,
                    replace_with: normalize_replacement(rule, is_literal),
                    name: rule.name.clone(),
                });
            }
            Err(e) => {
                compilation_errors.push(ResubError::RuleCompilationError(rule.name.clone(), e));
            }
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        Err(ResubError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )))
    } else {
        debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
        Ok(CompiledRules { rules: compiled_rules })
    }
}

/// `Regex::replace_all` treats `$` as a group reference, so literal rules
/// double it to keep their replacement verbatim.
fn normalize_replacement(rule: &RewriteRule, is_literal: bool) -> String {
    if is_literal {
        rule.replace_with.replace('$', "$$")
    } else {
        rule.replace_with.clone()
    }
}
