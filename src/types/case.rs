//! Case model
//!
//! A case is loaded once and lives for the whole session. All cross references
//! are string ids resolved through the lookup methods on [`Case`], which return
//! `None` for unknown ids rather than failing.

use crate::types::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The six locations that make up the courtroom
pub const COURT_LOCATIONS: [&str; 6] = [
    "prosecutor_stand",
    "defense_stand",
    "defense_helper_stand",
    "witness_stand",
    "judge_stand",
    "courtroom",
];

/// Keyword addressing every court location at once
pub const COURT_KEYWORD: &str = "court";

/// Whether `id` names the whole court (the keyword or one of its stands)
pub fn is_court_alias(id: &str) -> bool {
    id == COURT_KEYWORD || COURT_LOCATIONS.contains(&id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LawSystem {
    #[default]
    TwoDay,
    ThreeDay,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub name: String,
    pub author: String,
    pub law_system: LawSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unknown,
}

impl Gender {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

/// A labelled conversation topic leading to a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkOption {
    pub label: String,
    pub block: String,
}

impl TalkOption {
    pub fn new(label: impl Into<String>, block: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            block: block.into(),
        }
    }
}

/// An item a character reacts to when it is presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentable {
    pub item: String,
    pub block: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Character {
    pub name: String,
    pub caption: String,
    pub description: String,
    pub gender: Gender,
    /// Sprite sheet id
    pub sprite: Option<String>,
    /// Animation the sprite idles in
    pub root_animation: Option<String>,
    pub talk_options: Vec<TalkOption>,
    pub presentables: Vec<Presentable>,
    /// Block run when an item without a reaction is presented
    pub bad_presentable_block: Option<String>,
    pub text_box_tag: Option<String>,
    pub headshot: Option<String>,
    pub headshot_thumb: Option<String>,
}

impl Character {
    pub fn named(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
            ..Default::default()
        }
    }

    /// Remove the talk option with this label, returning whether one existed
    pub fn remove_talk_option(&mut self, label: &str) -> bool {
        let before = self.talk_options.len();
        self.talk_options.retain(|option| option.label != label);
        before != self.talk_options.len()
    }

    /// Register a reaction, replacing any previous one for the same item
    pub fn add_presentable(&mut self, item: impl Into<String>, block: impl Into<String>) {
        let item = item.into();
        let block = block.into();
        match self.presentables.iter_mut().find(|p| p.item == item) {
            Some(existing) => existing.block = block,
            None => self.presentables.push(Presentable { item, block }),
        }
    }

    pub fn remove_presentable(&mut self, item: &str) -> bool {
        let before = self.presentables.len();
        self.presentables.retain(|p| p.item != item);
        before != self.presentables.len()
    }

    /// Block to run for `item`, falling back to the bad presentable block
    pub fn reaction_to(&self, item: &str) -> Option<&str> {
        self.presentables
            .iter()
            .find(|p| p.item == item)
            .map(|p| p.block.as_str())
            .or(self.bad_presentable_block.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Evidence {
    pub name: String,
    pub caption: String,
    pub description: String,
    pub image: Option<String>,
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundType {
    #[default]
    Single,
    Double,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Background {
    pub kind: BackgroundType,
    pub image: Option<String>,
}

/// A clickable area of a location's background, relative to the lower screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub rect: Rect,
    pub block: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub name: String,
    pub background: Option<String>,
    /// Character standing here
    pub character: Option<String>,
    pub music: Option<String>,
    /// Block run on the next arrival, then cleared
    pub trigger_block: Option<String>,
    pub hotspots: Vec<Hotspot>,
    /// Locations reachable from here
    pub move_locations: Vec<String>,
}

impl Location {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TestimonyPiece {
    pub text: String,
    /// Item that contradicts this statement
    pub present_id: Option<String>,
    pub present_block: Option<String>,
    pub press_block: Option<String>,
    pub hidden: bool,
}

impl TestimonyPiece {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimony {
    pub title: String,
    pub speaker: String,
    /// Block run after the testimony has been displayed
    pub next_block: Option<String>,
    /// Block run after the last statement of a cross-examination
    pub x_examine_end_block: Option<String>,
    pub pieces: Vec<TestimonyPiece>,
}

impl Testimony {
    /// Index of the first visible piece at or after `from`
    pub fn next_visible(&self, from: usize) -> Option<usize> {
        (from..self.pieces.len()).find(|&i| !self.pieces[i].hidden)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub path: String,
}

/// Blocks the engine runs on its own during cross-examination
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreBlocks {
    /// Run after a wrong item is presented
    pub bad_evidence: Option<String>,
    /// Run when the credibility bar is empty
    pub failure: Option<String>,
}

/// A complete episode
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Case {
    pub overview: Overview,
    pub initial_block: String,
    pub core_blocks: CoreBlocks,
    pub characters: BTreeMap<String, Character>,
    pub backgrounds: BTreeMap<String, Background>,
    pub evidence: BTreeMap<String, Evidence>,
    pub images: BTreeMap<String, Image>,
    pub locations: BTreeMap<String, Location>,
    pub testimonies: BTreeMap<String, Testimony>,
    /// Raw script text keyed by block id
    pub buffers: BTreeMap<String, String>,
}

impl Case {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn character(&self, id: &str) -> Option<&Character> {
        self.characters.get(id)
    }

    pub fn character_mut(&mut self, id: &str) -> Option<&mut Character> {
        self.characters.get_mut(id)
    }

    pub fn evidence(&self, id: &str) -> Option<&Evidence> {
        self.evidence.get(id)
    }

    pub fn evidence_mut(&mut self, id: &str) -> Option<&mut Evidence> {
        self.evidence.get_mut(id)
    }

    pub fn background(&self, id: &str) -> Option<&Background> {
        self.backgrounds.get(id)
    }

    pub fn image(&self, id: &str) -> Option<&Image> {
        self.images.get(id)
    }

    pub fn location(&self, id: &str) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn location_mut(&mut self, id: &str) -> Option<&mut Location> {
        self.locations.get_mut(id)
    }

    pub fn testimony(&self, id: &str) -> Option<&Testimony> {
        self.testimonies.get(id)
    }

    pub fn testimony_mut(&mut self, id: &str) -> Option<&mut Testimony> {
        self.testimonies.get_mut(id)
    }

    /// Raw text of a script block
    pub fn block(&self, id: &str) -> Option<&str> {
        self.buffers.get(id).map(String::as_str)
    }

    /// Ids of the court locations that exist in this case
    pub fn court_locations(&self) -> Vec<&'static str> {
        COURT_LOCATIONS
            .iter()
            .copied()
            .filter(|id| self.locations.contains_key(*id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_return_none_for_unknown_ids() {
        let case = Case::new();
        assert!(case.character("nobody").is_none());
        assert!(case.evidence("nothing").is_none());
        assert!(case.location("nowhere").is_none());
        assert!(case.block("missing").is_none());
    }

    #[test]
    fn reaction_falls_back_to_bad_presentable_block() {
        let mut character = Character::named("Gumshoe", Gender::Male);
        character.add_presentable("badge", "badge_talk");
        character.bad_presentable_block = Some("huh".to_string());

        assert_eq!(character.reaction_to("badge"), Some("badge_talk"));
        assert_eq!(character.reaction_to("knife"), Some("huh"));
    }

    #[test]
    fn add_presentable_replaces_existing_reaction() {
        let mut character = Character::default();
        character.add_presentable("badge", "first");
        character.add_presentable("badge", "second");

        assert_eq!(character.presentables.len(), 1);
        assert_eq!(character.reaction_to("badge"), Some("second"));
    }

    #[test]
    fn court_aliases() {
        assert!(is_court_alias("court"));
        assert!(is_court_alias("witness_stand"));
        assert!(!is_court_alias("lobby"));
    }

    #[test]
    fn next_visible_skips_hidden_pieces() {
        let mut testimony = Testimony::default();
        testimony.pieces.push(TestimonyPiece::new("one"));
        testimony.pieces.push(TestimonyPiece {
            hidden: true,
            ..TestimonyPiece::new("two")
        });
        testimony.pieces.push(TestimonyPiece::new("three"));

        assert_eq!(testimony.next_visible(1), Some(2));
        assert_eq!(testimony.next_visible(3), None);
    }

    #[test]
    fn case_deserializes_with_missing_sections() {
        let json = r#"{ "initial_block": "intro", "buffers": { "intro": "Hi" } }"#;
        let case: Case = serde_json::from_str(json).unwrap();
        assert_eq!(case.block("intro"), Some("Hi"));
        assert!(case.characters.is_empty());
    }
}
