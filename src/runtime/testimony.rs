//! Blocks synthesized from testimonies
//!
//! Testimonies are stored as structured data, not script. When one is played
//! the engine builds a block per statement on demand, addressed by ids no
//! case file can contain:
//!
//! - `#testimony:<id>:title` shows the title card text
//! - `#testimony:<id>:<n>` shows statement `n` while the testimony is given
//! - `#cross:<id>:<n>` shows statement `n` during cross-examination

use crate::types::case::{Case, Testimony};

const TESTIMONY_PREFIX: &str = "#testimony:";
const CROSS_PREFIX: &str = "#cross:";
const TITLE: &str = "title";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalBlock {
    Title { testimony: String },
    Piece { testimony: String, index: usize },
    Cross { testimony: String, index: usize },
}

impl InternalBlock {
    pub fn testimony(&self) -> &str {
        match self {
            Self::Title { testimony }
            | Self::Piece { testimony, .. }
            | Self::Cross { testimony, .. } => testimony,
        }
    }
}

pub fn title_id(testimony: &str) -> String {
    format!("{TESTIMONY_PREFIX}{testimony}:{TITLE}")
}

pub fn piece_id(testimony: &str, index: usize) -> String {
    format!("{TESTIMONY_PREFIX}{testimony}:{index}")
}

pub fn cross_id(testimony: &str, index: usize) -> String {
    format!("{CROSS_PREFIX}{testimony}:{index}")
}

pub fn is_internal(id: &str) -> bool {
    id.starts_with(TESTIMONY_PREFIX) || id.starts_with(CROSS_PREFIX)
}

pub fn is_cross(id: &str) -> bool {
    id.starts_with(CROSS_PREFIX)
}

pub fn parse_id(id: &str) -> Option<InternalBlock> {
    if let Some(rest) = id.strip_prefix(CROSS_PREFIX) {
        let (testimony, index) = rest.rsplit_once(':')?;
        return Some(InternalBlock::Cross {
            testimony: testimony.to_string(),
            index: index.parse().ok()?,
        });
    }

    let rest = id.strip_prefix(TESTIMONY_PREFIX)?;
    let (testimony, tail) = rest.rsplit_once(':')?;
    let testimony = testimony.to_string();
    if tail == TITLE {
        Some(InternalBlock::Title { testimony })
    } else {
        Some(InternalBlock::Piece {
            testimony,
            index: tail.parse().ok()?,
        })
    }
}

/// Block that follows statement `index` during cross-examination
///
/// After the last visible statement this is the cross-examination end block,
/// or the first statement again when the testimony has none.
pub fn next_cross_block(testimony_id: &str, testimony: &Testimony, index: usize) -> Option<String> {
    match testimony.next_visible(index + 1) {
        Some(next) => Some(cross_id(testimony_id, next)),
        None => testimony
            .x_examine_end_block
            .clone()
            .or_else(|| testimony.next_visible(0).map(|first| cross_id(testimony_id, first))),
    }
}

fn next_display_block(testimony_id: &str, testimony: &Testimony, from: usize) -> Option<String> {
    match testimony.next_visible(from) {
        Some(next) => Some(piece_id(testimony_id, next)),
        None => testimony.next_block.clone(),
    }
}

fn goto(target: Option<String>) -> String {
    target
        .map(|t| format!("{{*goto:{t};*}}"))
        .unwrap_or_default()
}

/// Script text of an internal block, or `None` if it does not resolve
pub fn block_text(case: &Case, block: &InternalBlock) -> Option<String> {
    let testimony_id = block.testimony();
    let testimony = case.testimony(testimony_id)?;

    let text = match block {
        InternalBlock::Title { .. } => format!(
            "<testimony_title>{}<testimony_title>{}",
            testimony.title,
            goto(next_display_block(testimony_id, testimony, 0))
        ),
        InternalBlock::Piece { index, .. } => {
            let piece = testimony.pieces.get(*index)?;
            format!(
                "{{*speaker:{};*}}{}{}",
                testimony.speaker,
                piece.text,
                goto(next_display_block(testimony_id, testimony, index + 1))
            )
        }
        InternalBlock::Cross { index, .. } => {
            let piece = testimony.pieces.get(*index)?;
            format!(
                "{{*speaker:{};*}}\\g{}{}",
                testimony.speaker,
                piece.text,
                goto(next_cross_block(testimony_id, testimony, *index))
            )
        }
    };
    Some(text)
}

/// Whether an internal block id names something that exists
pub fn resolves(case: &Case, id: &str) -> bool {
    parse_id(id).is_some_and(|block| block_text(case, &block).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::case::TestimonyPiece;

    fn case() -> Case {
        let mut case = Case::new();
        let mut testimony = Testimony {
            title: "The Murder".to_string(),
            speaker: "sahwit".to_string(),
            next_block: Some("after".to_string()),
            ..Testimony::default()
        };
        testimony.pieces.push(TestimonyPiece::new("I heard a scream."));
        testimony.pieces.push(TestimonyPiece {
            hidden: true,
            ..TestimonyPiece::new("Hidden line.")
        });
        testimony.pieces.push(TestimonyPiece::new("I saw him run."));
        case.testimonies.insert("t1".to_string(), testimony);
        case
    }

    #[test]
    fn ids_round_trip() {
        assert_eq!(
            parse_id(&title_id("t1")),
            Some(InternalBlock::Title {
                testimony: "t1".to_string()
            })
        );
        assert_eq!(
            parse_id(&cross_id("a:b", 2)),
            Some(InternalBlock::Cross {
                testimony: "a:b".to_string(),
                index: 2
            })
        );
        assert_eq!(parse_id("intro"), None);
        assert_eq!(parse_id("#cross:t1:x"), None);
    }

    #[test]
    fn title_leads_to_first_piece() {
        let text = block_text(&case(), &parse_id(&title_id("t1")).unwrap()).unwrap();
        assert_eq!(
            text,
            "<testimony_title>The Murder<testimony_title>{*goto:#testimony:t1:0;*}"
        );
    }

    #[test]
    fn display_skips_hidden_and_ends_at_follow_up() {
        let case = case();
        let first = block_text(&case, &parse_id(&piece_id("t1", 0)).unwrap()).unwrap();
        assert!(first.ends_with("{*goto:#testimony:t1:2;*}"));

        let last = block_text(&case, &parse_id(&piece_id("t1", 2)).unwrap()).unwrap();
        assert_eq!(last, "{*speaker:sahwit;*}I saw him run.{*goto:after;*}");
    }

    #[test]
    fn cross_loops_without_end_block() {
        let case = case();
        let last = block_text(&case, &parse_id(&cross_id("t1", 2)).unwrap()).unwrap();
        assert_eq!(
            last,
            "{*speaker:sahwit;*}\\gI saw him run.{*goto:#cross:t1:0;*}"
        );
    }

    #[test]
    fn cross_ends_at_end_block() {
        let mut case = case();
        case.testimony_mut("t1").unwrap().x_examine_end_block = Some("loop_talk".to_string());
        let testimony = case.testimony("t1").unwrap();
        assert_eq!(
            next_cross_block("t1", testimony, 2),
            Some("loop_talk".to_string())
        );
    }

    #[test]
    fn unknown_pieces_do_not_resolve() {
        let case = case();
        assert!(resolves(&case, &piece_id("t1", 0)));
        assert!(!resolves(&case, &piece_id("t1", 9)));
        assert!(!resolves(&case, &title_id("missing")));
    }
}
