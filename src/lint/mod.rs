//! Lint module for case script checking
//!
//! This module checks a case without playing it:
//! - Markup syntax errors and unknown triggers
//! - Trigger arguments that do not resolve against the case
//! - Blocks that can never be reached from the initial block

use crate::runtime::testimony;
use crate::types::case::Case;
use serde::{Deserialize, Serialize};

pub mod checks;
pub mod config;

/// Lint severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LintLevel {
    /// Error: must be fixed
    Error,
    /// Warning: should be reviewed
    Warning,
    /// Info: for your information
    Info,
}

/// A lint issue found in the case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintIssue {
    /// Severity level
    pub level: LintLevel,
    /// Issue message
    pub message: String,
    /// Block the issue was found in, if any
    pub block: Option<String>,
    /// Check family that reported it
    pub category: String,
}

impl LintIssue {
    pub fn new(
        level: LintLevel,
        category: &str,
        block: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            level,
            message: message.into(),
            block: block.map(str::to_string),
            category: category.to_string(),
        }
    }
}

impl std::fmt::Display for LintIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.level {
            LintLevel::Error => "error",
            LintLevel::Warning => "warning",
            LintLevel::Info => "info",
        };
        match &self.block {
            Some(block) => write!(f, "{level}[{}] {block}: {}", self.category, self.message),
            None => write!(f, "{level}[{}] {}", self.category, self.message),
        }
    }
}

/// Result of linting a case
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Issues found
    pub issues: Vec<LintIssue>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
    /// Number of info messages
    pub info_count: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_issue(&mut self, issue: LintIssue) {
        match issue.level {
            LintLevel::Error => self.error_count += 1,
            LintLevel::Warning => self.warning_count += 1,
            LintLevel::Info => self.info_count += 1,
        }
        self.issues.push(issue);
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Script text the engine may run, with the id it runs under.
///
/// Testimony statements are included under their display block ids since
/// their text is spliced into internal blocks at play time.
pub(crate) fn sources(case: &Case) -> Vec<(String, &str)> {
    let mut sources: Vec<(String, &str)> = case
        .buffers
        .iter()
        .map(|(id, text)| (id.clone(), text.as_str()))
        .collect();
    for (id, testimony) in &case.testimonies {
        for (index, piece) in testimony.pieces.iter().enumerate() {
            sources.push((testimony::piece_id(id, index), piece.text.as_str()));
        }
    }
    sources
}

/// Lint a case with default configuration
pub fn lint(case: &Case) -> LintResult {
    lint_with_config(case, &config::LintConfig::default())
}

/// Lint a case with custom configuration
pub fn lint_with_config(case: &Case, config: &config::LintConfig) -> LintResult {
    let mut result = LintResult::new();

    if config.syntax.enabled {
        checks::syntax::check(case, &mut result, config);
    }

    if config.references.enabled {
        checks::references::check(case, &mut result, config);
    }

    if config.flow.enabled {
        checks::flow::check(case, &mut result, config);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(blocks: &[(&str, &str)]) -> Case {
        let mut case = Case::new();
        case.initial_block = "intro".to_string();
        for (id, text) in blocks {
            case.buffers.insert(id.to_string(), text.to_string());
        }
        case
    }

    #[test]
    fn lint_simple_valid_case() {
        let case = case(&[("intro", "Hello.{goto:end;}"), ("end", "Bye.")]);
        let result = lint(&case);
        assert!(result.is_clean(), "{:?}", result.issues);
    }

    #[test]
    fn lint_counts_each_level() {
        let case = case(&[("intro", "{dance:now;}\\q"), ("orphan", "Alone.")]);
        let result = lint(&case);

        assert!(result.has_errors());
        assert_eq!(result.error_count, 1);
        assert_eq!(result.warning_count, 2);
        assert_eq!(result.issues.len(), 3);
    }

    #[test]
    fn disabled_checks_report_nothing() {
        let case = case(&[("intro", "{dance:now;}"), ("orphan", "Alone.")]);
        let mut config = config::LintConfig::default();
        config.syntax.enabled = false;
        config.flow.enabled = false;

        assert!(lint_with_config(&case, &config).is_clean());
    }

    #[test]
    fn issues_display_their_block() {
        let issue = LintIssue::new(LintLevel::Warning, "flow", Some("orphan"), "unreachable");
        assert_eq!(issue.to_string(), "warning[flow] orphan: unreachable");
    }
}
