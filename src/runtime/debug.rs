//! Machine-readable view of a running game for `--debug` output

use crate::presenter::Presenter;
use crate::runtime::Game;
use crate::types::screen::{Overlays, Screen};
use crate::types::state::{PlayerRequest, TestimonyProgress};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugSnapshot {
    pub block: Option<String>,
    pub screen: Screen,
    pub prev_screen: Screen,
    pub overlays: Overlays,
    pub draw_flags: u32,
    pub location: Option<String>,
    pub speaker: Option<String>,
    pub text: String,
    pub visible_text: String,
    pub testimony: Option<TestimonyProgress>,
    pub credibility: u8,
    pub evidence: Vec<String>,
    pub profiles: Vec<String>,
    pub request: Option<PlayerRequest>,
}

impl DebugSnapshot {
    pub fn capture<P: Presenter>(game: &Game<P>) -> Self {
        let state = game.state();
        let parser = game.parser();
        Self {
            block: parser.block_id().map(str::to_string),
            screen: state.screen.screen,
            prev_screen: state.screen.prev_screen,
            overlays: state.screen.overlays,
            draw_flags: state.screen.draw_flags().0,
            location: state.current_location.clone(),
            speaker: parser.speaker().map(str::to_string),
            text: parser.text(),
            visible_text: parser.visible_text(),
            testimony: state.testimony.clone(),
            credibility: state.credibility,
            evidence: state.visible_evidence.clone(),
            profiles: state.visible_profiles.clone(),
            request: state.active_request.clone(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::presenter::Recorder;
    use crate::types::case::Case;

    #[test]
    fn snapshot_serializes_screen_and_text() {
        let mut case = Case::new();
        case.initial_block = "intro".to_string();
        case.buffers
            .insert("intro".to_string(), "Court is now in session.".to_string());
        let mut game = Game::new(case, Recorder::new(), EngineConfig::default());
        game.start();
        game.tick(0);

        let snapshot = DebugSnapshot::capture(&game);
        assert_eq!(snapshot.block.as_deref(), Some("intro"));
        assert_eq!(snapshot.text, "Court is now in session.");
        assert_eq!(snapshot.visible_text, "");

        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["screen"], "Main");
        assert_eq!(json["credibility"], 100);
        assert_eq!(json["overlays"]["text_box"], true);
    }
}
