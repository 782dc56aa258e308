//! View state management for the console player
//!
//! Remembers what the console has already shown so each prompt only prints
//! what changed since the last one.

use crate::config::SoundConfig;
use crate::types::directive::Directive;
use crate::types::screen::Screen;
use crate::types::state::{GameState, QueuedEffects, ShownEvidence};

/// What the console currently shows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub location: Option<String>,
    pub screen: Screen,
    pub music: Option<String>,
    pub shown_evidence: Option<ShownEvidence>,
    pub temp_image: Option<String>,
    pub credibility: Option<u8>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold the game state and the presenter's requests into this view
    pub fn apply(
        &mut self,
        state: &GameState,
        effects: QueuedEffects,
        directives: &[Directive],
        sounds: &SoundConfig,
    ) -> RenderDelta {
        let mut delta = RenderDelta::new();

        if state.current_location != self.location {
            delta.location_changed = state.current_location.is_some();
            delta.new_location = state.current_location.clone();
            self.location = state.current_location.clone();
        }

        if state.screen.screen != self.screen {
            self.screen = state.screen.screen;
            delta.changes.push(format!("Screen: {:?}", self.screen));
        }

        if state.shown_evidence != self.shown_evidence {
            self.shown_evidence = state.shown_evidence.clone();
            match &self.shown_evidence {
                Some(shown) => delta
                    .changes
                    .push(format!("ShowEvidence: {} ({:?})", shown.id, shown.side)),
                None => delta.changes.push("HideEvidence".to_string()),
            }
        }

        if state.temp_image != self.temp_image {
            self.temp_image = state.temp_image.clone();
            match &self.temp_image {
                Some(image) => delta.changes.push(format!("ShowImage: {image}")),
                None => delta.changes.push("HideImage".to_string()),
            }
        }

        if state.testimony.is_some() && self.credibility != Some(state.credibility) {
            self.credibility = Some(state.credibility);
            delta
                .changes
                .push(format!("Credibility: {}%", state.credibility));
        }

        for directive in directives {
            match directive {
                Directive::PlayMusic { id } => {
                    if self.music.as_ref() != Some(id) {
                        delta.changes.push(format!("PlayMusic: {id}"));
                        self.music = Some(id.clone());
                    }
                }
                Directive::HaltMusic => {
                    if self.music.take().is_some() {
                        delta.changes.push("StopMusic".to_string());
                    }
                }
                // voice blips
                Directive::PlayEffect { id } if is_voice(id, sounds) => {}
                Directive::PlayEffect { id } => delta.changes.push(format!("PlaySE: {id}")),
            }
        }

        if let Some(target) = effects.fade {
            delta.changes.push(format!("FadeOut: {target:?}"));
        }
        if let Some(target) = effects.flash {
            delta.changes.push(format!("Flash: {target:?}"));
        }
        if let Some(count) = effects.gavel {
            delta.changes.push(format!("Gavel x{count}"));
        }
        if effects.zoom {
            delta.changes.push("Zoom".to_string());
        }
        if effects.shake {
            delta.changes.push("Shake".to_string());
        }
        if let Some(id) = effects.added_evidence {
            delta.changes.push(format!("EvidenceAdded: {id}"));
        }
        if let Some(pan) = effects.court_camera {
            delta
                .changes
                .push(format!("CourtCamera: {} -> {}", pan.from, pan.to));
        }

        delta
    }
}

fn is_voice(id: &str, sounds: &SoundConfig) -> bool {
    [
        &sounds.male_voice,
        &sounds.female_voice,
        &sounds.neutral_voice,
        &sounds.typewriter,
    ]
    .iter()
    .any(|voice| voice.as_str() == id)
}

/// What needs to be printed before the next prompt
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderDelta {
    pub location_changed: bool,
    pub new_location: Option<String>,
    /// Human-readable changes, in order
    pub changes: Vec<String>,
}

impl RenderDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !self.location_changed && self.changes.is_empty()
    }
}

/// Render a delta to the console
pub fn render_delta(delta: &RenderDelta, location_name: Option<&str>) {
    if delta.location_changed
        && let Some(id) = &delta.new_location
    {
        println!("=== {} ===", location_name.unwrap_or(id));
        println!();
    }

    if !delta.changes.is_empty() {
        println!("[Effects]");
        for change in &delta.changes {
            println!("  {change}");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::state::{Side, TestimonyMode, TestimonyProgress};

    fn apply(view: &mut ViewState, state: &GameState, directives: &[Directive]) -> RenderDelta {
        view.apply(
            state,
            QueuedEffects::default(),
            directives,
            &SoundConfig::default(),
        )
    }

    #[test]
    fn nothing_changes_on_a_fresh_state() {
        let mut view = ViewState::new();
        assert!(apply(&mut view, &GameState::new(), &[]).is_empty());
    }

    #[test]
    fn location_change_is_reported_once() {
        let mut view = ViewState::new();
        let mut state = GameState::new();
        state.current_location = Some("lobby".to_string());

        let delta = apply(&mut view, &state, &[]);
        assert!(delta.location_changed);
        assert_eq!(delta.new_location.as_deref(), Some("lobby"));
        assert!(apply(&mut view, &state, &[]).is_empty());
    }

    #[test]
    fn music_is_only_reported_when_it_changes() {
        let mut view = ViewState::new();
        let state = GameState::new();
        let delta = apply(&mut view, &state, &[Directive::music("mus_lobby")]);
        assert_eq!(delta.changes, vec!["PlayMusic: mus_lobby".to_string()]);

        let delta = apply(&mut view, &state, &[Directive::music("mus_lobby")]);
        assert!(delta.is_empty());

        let delta = apply(&mut view, &state, &[Directive::HaltMusic]);
        assert_eq!(delta.changes, vec!["StopMusic".to_string()]);
    }

    #[test]
    fn voice_blips_are_hidden() {
        let mut view = ViewState::new();
        let delta = apply(
            &mut view,
            &GameState::new(),
            &[
                Directive::effect("sfx_male_blip"),
                Directive::effect("sfx_gavel"),
            ],
        );
        assert_eq!(delta.changes, vec!["PlaySE: sfx_gavel".to_string()]);
    }

    #[test]
    fn shown_evidence_and_credibility() {
        let mut view = ViewState::new();
        let mut state = GameState::new();
        state.shown_evidence = Some(ShownEvidence {
            id: "badge".to_string(),
            side: Side::Left,
        });
        state.testimony = Some(TestimonyProgress {
            testimony: "t1".to_string(),
            piece: 0,
            mode: TestimonyMode::CrossExamining,
        });

        let delta = apply(&mut view, &state, &[]);
        assert_eq!(
            delta.changes,
            vec![
                "ShowEvidence: badge (Left)".to_string(),
                "Credibility: 100%".to_string()
            ]
        );
    }

    #[test]
    fn queued_effects_are_listed() {
        let mut view = ViewState::new();
        let effects = QueuedEffects {
            gavel: Some(3),
            zoom: true,
            ..QueuedEffects::default()
        };
        let delta = view.apply(&GameState::new(), effects, &[], &SoundConfig::default());
        assert_eq!(delta.changes, vec!["Gavel x3".to_string(), "Zoom".to_string()]);
    }
}
