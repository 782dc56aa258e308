//! Flow analysis
//!
//! Walks everything the player can reach from the initial block. Besides
//! jumps, a block reaches the locations, characters and testimonies its
//! triggers name, and those in turn reach the blocks they own (arrival
//! blocks, hotspots, talk options, presentables, statements).

use crate::lint::config::LintConfig;
use crate::lint::{LintIssue, LintLevel, LintResult};
use crate::parser::{Token, tokenize};
use crate::runtime::testimony;
use crate::runtime::triggers::args;
use crate::types::case::Case;
use std::collections::{HashSet, VecDeque};

const CATEGORY: &str = "flow";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Node {
    Block(String),
    Location(String),
    Character(String),
    Testimony(String),
}

/// Check flow issues (missing entry point, unreachable blocks)
pub fn check(case: &Case, result: &mut LintResult, config: &LintConfig) {
    if case.block(&case.initial_block).is_none() {
        result.add_issue(LintIssue::new(
            LintLevel::Error,
            CATEGORY,
            None,
            format!("initial block '{}' does not exist", case.initial_block),
        ));
        return;
    }

    if config.flow.check_unreachable {
        check_unreachable_blocks(case, result);
    }
}

fn check_unreachable_blocks(case: &Case, result: &mut LintResult) {
    let reachable = reachable(case);
    for id in case.buffers.keys() {
        if !reachable.contains(&Node::Block(id.clone())) {
            result.add_issue(LintIssue::new(
                LintLevel::Warning,
                CATEGORY,
                Some(id),
                "block is unreachable from the initial block",
            ));
        }
    }
}

fn reachable(case: &Case) -> HashSet<Node> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();

    let roots = std::iter::once(&case.initial_block)
        .chain(case.core_blocks.bad_evidence.iter())
        .chain(case.core_blocks.failure.iter());
    for id in roots {
        queue.push_back(Node::Block(id.clone()));
    }

    while let Some(node) = queue.pop_front() {
        if !seen.insert(node.clone()) {
            continue;
        }
        for next in edges(case, &node) {
            if !seen.contains(&next) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn edges(case: &Case, node: &Node) -> Vec<Node> {
    let mut out = Vec::new();
    match node {
        Node::Block(id) => {
            if let Some(text) = case.block(id) {
                out.extend(trigger_targets(text));
            } else if let Some(internal) = testimony::parse_id(id) {
                out.push(Node::Testimony(internal.testimony().to_string()));
            }
        }
        Node::Location(id) => {
            let Some(location) = case.location(id) else {
                return out;
            };
            out.extend(location.trigger_block.iter().cloned().map(Node::Block));
            out.extend(location.hotspots.iter().map(|h| Node::Block(h.block.clone())));
            out.extend(location.character.iter().cloned().map(Node::Character));
            out.extend(location.move_locations.iter().cloned().map(Node::Location));
        }
        Node::Character(id) => {
            let Some(character) = case.character(id) else {
                return out;
            };
            out.extend(character.talk_options.iter().map(|o| Node::Block(o.block.clone())));
            out.extend(character.presentables.iter().map(|p| Node::Block(p.block.clone())));
            out.extend(character.bad_presentable_block.iter().cloned().map(Node::Block));
        }
        Node::Testimony(id) => {
            let Some(testimony) = case.testimony(id) else {
                return out;
            };
            out.extend(testimony.next_block.iter().cloned().map(Node::Block));
            out.extend(testimony.x_examine_end_block.iter().cloned().map(Node::Block));
            for piece in &testimony.pieces {
                out.extend(piece.press_block.iter().cloned().map(Node::Block));
                out.extend(piece.present_block.iter().cloned().map(Node::Block));
                out.extend(trigger_targets(&piece.text));
            }
        }
    }
    out
}

fn trigger_targets(text: &str) -> Vec<Node> {
    tokenize(text)
        .into_iter()
        .filter_map(|token| match token {
            Token::Trigger { op, command } => Some(targets(&op, &command)),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Everything a trigger can lead the player to
fn targets(op: &str, command: &str) -> Vec<Node> {
    let fields: Vec<&str> = command.split(',').map(str::trim).collect();
    let first = fields.first().copied().unwrap_or_default();
    let last = fields.last().copied().unwrap_or_default();

    let nodes = match op {
        "goto" | "direct_goto" | "timed_goto" => vec![Node::Block(first.to_string())],
        "set_location" => vec![Node::Location(first.to_string())],
        "add_location" => fields.iter().map(|f| Node::Location(f.to_string())).collect(),
        "set_location_trigger" | "add_presentable" | "set_bad_presentable_block" => {
            vec![Node::Block(last.to_string())]
        }
        "put_character" => {
            let mut nodes = vec![Node::Character(first.to_string())];
            nodes.extend(fields.get(1).map(|l| Node::Location(l.to_string())));
            nodes
        }
        "show_character" => vec![Node::Character(first.to_string())],
        "add_talk_option" => match args::talk_option(op, command) {
            Ok((character, option)) => vec![
                Node::Character(character.to_string()),
                Node::Block(option.block),
            ],
            Err(_) => Vec::new(),
        },
        "display_testimony" | "cross_examine" | "resume_cross_examination"
        | "show_testimony_piece" => vec![Node::Testimony(first.to_string())],
        "request_evidence" => fields
            .iter()
            .skip(1)
            .map(|f| Node::Block(f.to_string()))
            .collect(),
        "request_answer" => args::answer_options(op, command)
            .map(|options| options.into_iter().map(|o| Node::Block(o.block)).collect())
            .unwrap_or_default(),
        "request_image_contradiction" => fields
            .iter()
            .rev()
            .take(2)
            .map(|f| Node::Block(f.to_string()))
            .collect(),
        _ => Vec::new(),
    };

    nodes
        .into_iter()
        .filter(|node| match node {
            Node::Block(id) | Node::Location(id) | Node::Character(id) | Node::Testimony(id) => {
                args::optional(id).is_some()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::case::{Character, Gender, Hotspot, Location, Testimony, TestimonyPiece};
    use crate::types::geometry::Rect;

    fn case(blocks: &[(&str, &str)]) -> Case {
        let mut case = Case::new();
        case.initial_block = "intro".to_string();
        for (id, text) in blocks {
            case.buffers.insert(id.to_string(), text.to_string());
        }
        case
    }

    fn unreachable(case: &Case) -> Vec<String> {
        let mut result = LintResult::new();
        check(case, &mut result, &LintConfig::default());
        result.issues.into_iter().filter_map(|i| i.block).collect()
    }

    #[test]
    fn missing_initial_block_is_an_error() {
        let case = case(&[("other", "Hi.")]);
        let mut result = LintResult::new();
        check(&case, &mut result, &LintConfig::default());
        assert_eq!(result.error_count, 1);
        assert_eq!(result.issues.len(), 1);
    }

    #[test]
    fn jumps_and_requests_reach_blocks() {
        let case = case(&[
            ("intro", "{goto:quiz;}"),
            ("quiz", "{request_answer:(Yes,yes),(No, no);}"),
            ("yes", "{request_evidence:badge,right,wrong;}"),
            ("no", ""),
            ("right", ""),
            ("wrong", ""),
            ("orphan", ""),
        ]);
        assert_eq!(unreachable(&case), vec!["orphan".to_string()]);
    }

    #[test]
    fn locations_reach_their_blocks_and_neighbours() {
        let mut case = case(&[
            ("intro", "{set_location:office;}"),
            ("scratch", ""),
            ("lobby_intro", ""),
            ("talk", ""),
            ("gift", ""),
        ]);
        let mut office = Location::named("Office");
        office.hotspots.push(Hotspot {
            rect: Rect::new(0, 0, 10, 10),
            block: "scratch".to_string(),
        });
        office.move_locations.push("lobby".to_string());
        case.locations.insert("office".to_string(), office);

        let mut lobby = Location::named("Lobby");
        lobby.trigger_block = Some("lobby_intro".to_string());
        lobby.character = Some("maya".to_string());
        case.locations.insert("lobby".to_string(), lobby);

        let mut maya = Character::named("Maya", Gender::Female);
        maya.talk_options.push(crate::types::case::TalkOption::new("Hi", "talk"));
        maya.add_presentable("badge", "gift");
        case.characters.insert("maya".to_string(), maya);

        assert!(unreachable(&case).is_empty());
    }

    #[test]
    fn testimonies_reach_press_and_present_blocks() {
        let mut case = case(&[
            ("intro", "{display_testimony:t1;}"),
            ("after", "{cross_examine:t1;}"),
            ("press0", ""),
            ("gotcha", ""),
            ("hidden", ""),
        ]);
        let mut testimony = Testimony {
            next_block: Some("after".to_string()),
            ..Testimony::default()
        };
        testimony.pieces.push(TestimonyPiece {
            press_block: Some("press0".to_string()),
            present_block: Some("gotcha".to_string()),
            ..TestimonyPiece::new("I saw it.{goto:hidden;}")
        });
        case.testimonies.insert("t1".to_string(), testimony);

        assert!(unreachable(&case).is_empty());
    }

    #[test]
    fn core_blocks_are_always_reachable() {
        let mut case = case(&[("intro", ""), ("bad", "")]);
        case.core_blocks.bad_evidence = Some("bad".to_string());
        assert!(unreachable(&case).is_empty());
    }
}
