//! Reference integrity checking
//!
//! Every trigger is run once against a scratch copy of the case, so the
//! dispatcher's own argument parsing and lookups decide what is broken.

use crate::config::EngineConfig;
use crate::error::TriggerError;
use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult, sources};
use crate::parser::{Token, tokenize};
use crate::presenter::Recorder;
use crate::runtime::Context;
use crate::runtime::triggers::{self, Flow};
use crate::types::case::Case;
use crate::types::state::GameState;

const CATEGORY: &str = "references";

/// Check trigger arguments of every block
pub fn check(case: &Case, result: &mut LintResult, config: &LintConfig) {
    let engine_config = EngineConfig::default();
    for (block, text) in sources(case) {
        let mut scratch = case.clone();
        let mut state = GameState::new();
        let mut presenter = Recorder::new();
        let mut ctx = Context {
            case: &mut scratch,
            state: &mut state,
            presenter: &mut presenter,
            config: &engine_config,
        };

        for token in tokenize(text) {
            let Token::Trigger { op, command } = token else {
                continue;
            };
            if !triggers::is_known(&op) || depends_on_play(&op, &command) {
                continue;
            }
            let mut flow = Flow::default();
            if let Err(err) = triggers::dispatch(&mut ctx, &mut flow, &op, &command) {
                report(&block, &err, result, config);
            }
        }
    }
}

/// Triggers whose outcome is only known while the case is being played
fn depends_on_play(op: &str, command: &str) -> bool {
    op == "resume_cross_examination" && command.trim().is_empty()
}

fn report(block: &str, err: &TriggerError, result: &mut LintResult, config: &LintConfig) {
    let level = match err {
        TriggerError::Malformed { .. } => LintLevel::Error,
        TriggerError::Unresolved { .. } => LintLevel::Warning,
        TriggerError::Redundant { .. } if config.references.report_redundant => LintLevel::Info,
        TriggerError::Redundant { .. } | TriggerError::UnknownTrigger { .. } => return,
    };
    result.add_issue(LintIssue::new(level, CATEGORY, Some(block), err.to_string()));
}
