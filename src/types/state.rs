//! Game state of one playthrough

use crate::types::case::TalkOption;
use crate::types::geometry::{Point, Rect};
use crate::types::screen::ScreenState;
use serde::{Deserialize, Serialize};

/// Court Record slots per page
pub const PAGE_SIZE: usize = 8;

/// Credibility bar when full
pub const FULL_CREDIBILITY: u8 = 100;

/// Examine cursor position when a session starts
pub const EXAMINE_ORIGIN: Point = Point::new(128, 96);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShownEvidence {
    pub id: String,
    pub side: Side,
}

/// Which half of the dual screen an effect covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScreenTarget {
    Top,
    Bottom,
    Both,
}

impl ScreenTarget {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "both" => Some(Self::Both),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraPan {
    pub from: String,
    pub to: String,
}

/// One-shot effects waiting for the presentation layer
///
/// Each field is armed by a trigger and cleared by whoever plays it,
/// usually through [`QueuedEffects::take`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueuedEffects {
    pub fade: Option<ScreenTarget>,
    pub flash: Option<ScreenTarget>,
    /// Number of gavel slams
    pub gavel: Option<u32>,
    pub zoom: bool,
    pub court_camera: Option<CameraPan>,
    /// Evidence whose "added to the Court Record" animation should play
    pub added_evidence: Option<String>,
    pub shake: bool,
}

impl QueuedEffects {
    /// Hand every armed effect over and disarm them
    pub fn take(&mut self) -> QueuedEffects {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        *self == QueuedEffects::default()
    }
}

/// Blocking animations the interpreter waits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sequence {
    /// "Witness testimony" title card
    Testimony,
    /// "Cross examination" title card
    CrossExamination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestimonyMode {
    Displaying,
    CrossExamining,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonyProgress {
    pub testimony: String,
    pub piece: usize,
    pub mode: TestimonyMode,
}

/// Input the script is waiting for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerRequest {
    Evidence {
        item: String,
        correct: String,
        wrong: String,
    },
    /// Pick one of the queued talk options
    Answer,
    ImageContradiction {
        image: String,
        region: Rect,
        correct: String,
        wrong: String,
    },
}

/// Who receives an item presented from the Court Record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentTarget {
    /// The active `request_evidence`
    Request,
    /// The current cross-examination statement
    Statement,
    /// The character at the current location
    Character(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub screen: ScreenState,

    pub evidence_page: usize,
    pub profiles_page: usize,
    /// Selection within the current page
    pub selected_evidence: usize,
    pub selected_profile: usize,
    pub selected_control: usize,
    pub selected_location: usize,
    pub selected_talk_option: usize,

    pub examine: Point,

    pub current_location: Option<String>,
    pub shown_evidence: Option<ShownEvidence>,
    /// Character drawn next to the current dialogue
    pub display_character: Option<String>,
    pub temp_image: Option<String>,

    pub testimony: Option<TestimonyProgress>,
    /// Percentage left on the credibility bar
    pub credibility: u8,

    pub effects: QueuedEffects,
    pub sequence: Option<Sequence>,

    /// Request armed by a trigger, waiting for the reveal to finish
    pub queued_request: Option<PlayerRequest>,
    pub active_request: Option<PlayerRequest>,
    pub present_target: Option<PresentTarget>,

    pub visible_evidence: Vec<String>,
    pub visible_profiles: Vec<String>,
    pub talk_options: Vec<TalkOption>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            screen: ScreenState::new(),
            evidence_page: 0,
            profiles_page: 0,
            selected_evidence: 0,
            selected_profile: 0,
            selected_control: 0,
            selected_location: 0,
            selected_talk_option: 0,
            examine: EXAMINE_ORIGIN,
            current_location: None,
            shown_evidence: None,
            display_character: None,
            temp_image: None,
            testimony: None,
            credibility: FULL_CREDIBILITY,
            effects: QueuedEffects::default(),
            sequence: None,
            queued_request: None,
            active_request: None,
            present_target: None,
            visible_evidence: Vec::new(),
            visible_profiles: Vec::new(),
            talk_options: Vec::new(),
        }
    }
}

/// Number of Court Record pages for `len` items; an empty record still has one page
pub fn page_count(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE).max(1)
}

/// Number of items shown on `page`
pub fn items_on_page(len: usize, page: usize) -> usize {
    len.saturating_sub(page * PAGE_SIZE).min(PAGE_SIZE)
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append evidence to the Court Record, returning false if it was already there
    pub fn add_evidence(&mut self, id: &str) -> bool {
        if self.visible_evidence.iter().any(|e| e == id) {
            return false;
        }
        self.visible_evidence.push(id.to_string());
        true
    }

    /// Append a profile to the Court Record, returning false if it was already there
    pub fn add_profile(&mut self, id: &str) -> bool {
        if self.visible_profiles.iter().any(|p| p == id) {
            return false;
        }
        self.visible_profiles.push(id.to_string());
        true
    }

    fn record(&self, evidence: bool) -> (&[String], usize, usize) {
        if evidence {
            (self.visible_evidence.as_slice(), self.evidence_page, self.selected_evidence)
        } else {
            (self.visible_profiles.as_slice(), self.profiles_page, self.selected_profile)
        }
    }

    fn record_mut(&mut self, evidence: bool) -> (usize, &mut usize, &mut usize) {
        if evidence {
            (
                self.visible_evidence.len(),
                &mut self.evidence_page,
                &mut self.selected_evidence,
            )
        } else {
            (
                self.visible_profiles.len(),
                &mut self.profiles_page,
                &mut self.selected_profile,
            )
        }
    }

    /// Flip to the next page, wrapping to the first
    pub fn next_page(&mut self, evidence: bool) {
        let (len, page, selected) = self.record_mut(evidence);
        *page = (*page + 1) % page_count(len);
        *selected = 0;
    }

    /// Flip to the previous page, wrapping to the last
    pub fn prev_page(&mut self, evidence: bool) {
        let (len, page, selected) = self.record_mut(evidence);
        let count = page_count(len);
        *page = (*page + count - 1) % count;
        *selected = 0;
    }

    /// Move the selection within the current page, wrapping at its ends
    pub fn step_selection(&mut self, evidence: bool, forward: bool) {
        let (len, page, selected) = self.record_mut(evidence);
        let amount = items_on_page(len, *page);
        if amount == 0 {
            *selected = 0;
            return;
        }
        *selected = if forward {
            (*selected + 1) % amount
        } else {
            (*selected + amount - 1) % amount
        };
    }

    /// Move the selection across the whole record, flipping pages as needed
    pub fn step_item(&mut self, evidence: bool, forward: bool) {
        let (len, page, selected) = self.record_mut(evidence);
        if len == 0 {
            return;
        }
        let index = *page * PAGE_SIZE + *selected;
        let index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        *page = index / PAGE_SIZE;
        *selected = index % PAGE_SIZE;
    }

    /// Select a slot on the current page if it holds an item
    pub fn select_slot(&mut self, evidence: bool, slot: usize) -> bool {
        let (len, page, selected) = self.record_mut(evidence);
        if slot < items_on_page(len, *page) {
            *selected = slot;
            true
        } else {
            false
        }
    }

    /// Id of the selected evidence or profile
    pub fn selected_item(&self, evidence: bool) -> Option<&str> {
        let (items, page, selected) = self.record(evidence);
        items.get(page * PAGE_SIZE + selected).map(String::as_str)
    }

    pub fn is_cross_examining(&self) -> bool {
        matches!(
            self.testimony,
            Some(TestimonyProgress {
                mode: TestimonyMode::CrossExamining,
                ..
            })
        )
    }

    /// Remove `penalty` percent from the credibility bar, returning whether it is empty
    pub fn lose_credibility(&mut self, penalty: u8) -> bool {
        self.credibility = self.credibility.saturating_sub(penalty);
        self.credibility == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_evidence(count: usize) -> GameState {
        let mut state = GameState::new();
        for i in 0..count {
            state.add_evidence(&format!("item{i}"));
        }
        state
    }

    #[test]
    fn add_evidence_ignores_duplicates() {
        let mut state = GameState::new();
        assert!(state.add_evidence("badge"));
        assert!(!state.add_evidence("badge"));
        assert_eq!(state.visible_evidence, vec!["badge".to_string()]);
    }

    #[test]
    fn next_page_wraps_to_first() {
        let mut state = with_evidence(10);
        state.next_page(true);
        assert_eq!(state.evidence_page, 1);
        state.next_page(true);
        assert_eq!(state.evidence_page, 0);
    }

    #[test]
    fn prev_page_wraps_to_last() {
        let mut state = with_evidence(10);
        state.prev_page(true);
        assert_eq!(state.evidence_page, 1);
    }

    #[test]
    fn exact_page_multiple_has_no_empty_page() {
        let mut state = with_evidence(8);
        state.next_page(true);
        assert_eq!(state.evidence_page, 0);
    }

    #[test]
    fn selection_resolves_to_absolute_index() {
        let mut state = with_evidence(10);
        state.next_page(true);
        assert!(state.select_slot(true, 1));
        assert_eq!(state.selected_item(true), Some("item9"));
        assert!(!state.select_slot(true, 2));
    }

    #[test]
    fn selection_wraps_within_page() {
        let mut state = with_evidence(10);
        state.next_page(true);
        state.step_selection(true, true);
        state.step_selection(true, true);
        assert_eq!(state.selected_evidence, 0);
        state.step_selection(true, false);
        assert_eq!(state.selected_evidence, 1);
    }

    #[test]
    fn item_steps_cross_pages() {
        let mut state = with_evidence(10);
        state.select_slot(true, 7);
        state.step_item(true, true);
        assert_eq!((state.evidence_page, state.selected_evidence), (1, 0));
        state.step_item(true, true);
        state.step_item(true, true);
        assert_eq!(state.selected_item(true), Some("item0"));
        state.step_item(true, false);
        assert_eq!(state.selected_item(true), Some("item9"));
    }

    #[test]
    fn credibility_saturates_at_zero() {
        let mut state = GameState::new();
        state.credibility = 10;
        assert!(state.lose_credibility(20));
        assert_eq!(state.credibility, 0);
    }

    #[test]
    fn effects_take_disarms() {
        let mut effects = QueuedEffects {
            zoom: true,
            gavel: Some(3),
            ..QueuedEffects::default()
        };
        let taken = effects.take();
        assert!(taken.zoom);
        assert_eq!(taken.gavel, Some(3));
        assert!(effects.is_empty());
    }
}
