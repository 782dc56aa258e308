//! Markup syntax checking

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult, sources};
use crate::parser::{FontColor, Token, tokenize};
use crate::runtime::triggers;
use crate::types::case::Case;

const CATEGORY: &str = "syntax";

/// Check markup of every block
pub fn check(case: &Case, result: &mut LintResult, config: &LintConfig) {
    for (block, text) in sources(case) {
        check_block(&block, text, result, config);
    }
}

fn check_block(block: &str, text: &str, result: &mut LintResult, config: &LintConfig) {
    let mut tag_open = false;
    let mut report = |level, message: String| {
        result.add_issue(LintIssue::new(level, CATEGORY, Some(block), message));
    };

    for token in tokenize(text) {
        match token {
            Token::Malformed { text, reason } => {
                report(LintLevel::Error, format!("malformed markup {text:?}: {reason}"));
            }
            Token::UnknownEscape(ch) => {
                report(LintLevel::Warning, format!("unknown escape '\\{ch}'"));
            }
            Token::Trigger { op, .. } if !triggers::is_known(&op) => {
                report(LintLevel::Error, format!("unknown trigger '{op}'"));
            }
            Token::Tag(name) => {
                // any tag closes an open one
                if !tag_open && config.syntax.check_tags && !is_known_tag(&name) {
                    report(LintLevel::Warning, format!("unknown tag <{name}>"));
                }
                tag_open = !tag_open;
            }
            _ => {}
        }
    }

    if tag_open {
        report(LintLevel::Info, "tag left open at end of block".to_string());
    }
}

fn is_known_tag(name: &str) -> bool {
    FontColor::from_tag(name).is_some() || matches!(name, "date" | "testimony_title")
}
