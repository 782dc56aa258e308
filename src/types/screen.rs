//! Presentation families and overlay buttons
//!
//! Exactly one [`Screen`] is active at a time. [`Overlays`] are independent
//! switches drawn on top of it. Every transition goes through
//! [`ScreenState::show`], which replaces both at once so no stale overlay
//! survives a change of family.

use serde::{Deserialize, Serialize};

/// Mutually exclusive presentation families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Dialogue or the investigation controls
    #[default]
    Main,
    Examine,
    Move,
    EvidencePage,
    EvidenceInfo,
    ProfilesPage,
    ProfileInfo,
    Talk,
}

impl Screen {
    /// Whether this family belongs to the Court Record
    pub fn is_court_record(self) -> bool {
        matches!(
            self,
            Screen::EvidencePage | Screen::EvidenceInfo | Screen::ProfilesPage | Screen::ProfileInfo
        )
    }

    /// Whether this family browses evidence rather than profiles
    pub fn is_evidence(self) -> bool {
        matches!(self, Screen::EvidencePage | Screen::EvidenceInfo)
    }
}

/// Overlay elements that combine freely with any family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Overlays {
    pub text_box: bool,
    pub lower_bar: bool,
    pub next_btn: bool,
    /// Examine / Move / Talk / Present quadrant
    pub controls: bool,
    pub back_btn: bool,
    pub court_rec_btn: bool,
    pub evidence_btn: bool,
    pub profiles_btn: bool,
    pub present_btn: bool,
    pub press_btn: bool,
}

impl Overlays {
    /// Default overlays of a family when it is entered from the player's side
    pub fn for_screen(screen: Screen) -> Self {
        match screen {
            Screen::Main => Self {
                controls: true,
                court_rec_btn: true,
                ..Self::default()
            },
            Screen::Examine | Screen::Move | Screen::Talk => Self {
                court_rec_btn: true,
                lower_bar: true,
                back_btn: true,
                ..Self::default()
            },
            Screen::EvidencePage | Screen::EvidenceInfo => Self {
                lower_bar: true,
                back_btn: true,
                profiles_btn: true,
                ..Self::default()
            },
            Screen::ProfilesPage | Screen::ProfileInfo => Self {
                lower_bar: true,
                back_btn: true,
                evidence_btn: true,
                ..Self::default()
            },
        }
    }

    /// Overlays of the Main family while a dialogue is running
    pub fn dialogue(press: bool) -> Self {
        Self {
            text_box: true,
            next_btn: true,
            court_rec_btn: true,
            press_btn: press,
            ..Self::default()
        }
    }

    /// Nothing but the bare family, used while a blocking sequence plays
    pub fn hidden() -> Self {
        Self::default()
    }
}

/// Bit values used by renderers that still think in draw flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DrawFlags(pub u32);

impl DrawFlags {
    pub const LOWER_BAR: u32 = 1;
    pub const COURT_REC_BTN: u32 = 2;
    pub const EVIDENCE_BTN: u32 = 4;
    pub const PROFILES_BTN: u32 = 8;
    pub const BACK_BTN: u32 = 16;
    pub const EVIDENCE_PAGE: u32 = 32;
    pub const PROFILES_PAGE: u32 = 64;
    pub const EVIDENCE_INFO_PAGE: u32 = 128;
    pub const PRESENT_BTN: u32 = 256;
    pub const PROFILE_INFO_PAGE: u32 = 512;
    pub const NEXT_BTN: u32 = 1024;
    pub const TEXT_BOX: u32 = 2048;
    pub const CONTROLS: u32 = 4096;
    pub const EXAMINE: u32 = 8192;
    pub const MOVE: u32 = 16384;
    pub const TALK: u32 = 32768;
    pub const PRESS_BTN: u32 = 65536;

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }
}

/// The active family, its overlays and the family to return to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenState {
    pub screen: Screen,
    pub overlays: Overlays,
    /// Underlying family (Main, Examine, Move or Talk) the player came from
    pub prev_screen: Screen,
}

impl ScreenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the family and all overlays
    pub fn show(&mut self, screen: Screen, overlays: Overlays) {
        log::trace!("screen {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
        self.overlays = overlays;
    }

    /// Enter an underlying family with its default overlays and remember it
    pub fn enter_family(&mut self, screen: Screen) {
        debug_assert!(!screen.is_court_record());
        self.prev_screen = screen;
        self.show(screen, Overlays::for_screen(screen));
    }

    /// Show the dialogue layout without touching the remembered family
    pub fn dialogue(&mut self, press: bool) {
        self.show(Screen::Main, Overlays::dialogue(press));
    }

    /// Whether `screen` is the active family
    pub fn is(&self, screen: Screen) -> bool {
        self.screen == screen
    }

    /// Flattened bitmask of the family and overlays
    pub fn draw_flags(&self) -> DrawFlags {
        let family = match self.screen {
            Screen::Main => 0,
            Screen::Examine => DrawFlags::EXAMINE,
            Screen::Move => DrawFlags::MOVE,
            Screen::EvidencePage => DrawFlags::EVIDENCE_PAGE,
            Screen::EvidenceInfo => DrawFlags::EVIDENCE_INFO_PAGE,
            Screen::ProfilesPage => DrawFlags::PROFILES_PAGE,
            Screen::ProfileInfo => DrawFlags::PROFILE_INFO_PAGE,
            Screen::Talk => DrawFlags::TALK,
        };

        let o = &self.overlays;
        let overlays = [
            (o.text_box, DrawFlags::TEXT_BOX),
            (o.lower_bar, DrawFlags::LOWER_BAR),
            (o.next_btn, DrawFlags::NEXT_BTN),
            (o.controls, DrawFlags::CONTROLS),
            (o.back_btn, DrawFlags::BACK_BTN),
            (o.court_rec_btn, DrawFlags::COURT_REC_BTN),
            (o.evidence_btn, DrawFlags::EVIDENCE_BTN),
            (o.profiles_btn, DrawFlags::PROFILES_BTN),
            (o.present_btn, DrawFlags::PRESENT_BTN),
            (o.press_btn, DrawFlags::PRESS_BTN),
        ]
        .iter()
        .filter(|(on, _)| *on)
        .fold(0, |acc, (_, bit)| acc | bit);

        DrawFlags(family | overlays)
    }
}
