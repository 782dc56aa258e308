//! Engine configuration
//!
//! Every field has a default matching the stock player, so a config file only
//! needs the values it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Text reveal and layout settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Milliseconds per character for plain text
    pub default_speed_ms: u32,
    pub date_speed_ms: u32,
    pub title_speed_ms: u32,
    /// Change applied by each speed sentinel
    pub speed_step_ms: u32,
    /// Slowest speed a sentinel can reach
    pub max_speed_ms: u32,
    /// Visual lines per text box
    pub max_lines: usize,
    /// Width of the text box in pixels
    pub box_width: u32,
    pub glyph_width: u32,
    pub space_width: u32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            default_speed_ms: 50,
            date_speed_ms: 100,
            title_speed_ms: 100,
            speed_step_ms: 10,
            max_speed_ms: 100,
            max_lines: 3,
            box_width: 248,
            glyph_width: 8,
            space_width: 4,
        }
    }
}

/// Sample ids the engine asks for on its own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    pub male_voice: String,
    pub female_voice: String,
    pub neutral_voice: String,
    /// Voice of date and testimony title text
    pub typewriter: String,
    /// Played when the player advances past a finished dialogue
    pub next_part: String,
}

impl Default for SoundConfig {
    fn default() -> Self {
        Self {
            male_voice: "sfx_male_blip".to_string(),
            female_voice: "sfx_female_blip".to_string(),
            neutral_voice: "sfx_blip".to_string(),
            typewriter: "sfx_typewriter".to_string(),
            next_part: "sfx_next_part".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub text: TextConfig,
    pub sounds: SoundConfig,
    /// Percent of the credibility bar lost per wrong presentation
    pub credibility_penalty: u8,
    /// Pixels the examine cursor moves per arrow key
    pub examine_step: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            text: TextConfig::default(),
            sounds: SoundConfig::default(),
            credibility_penalty: 20,
            examine_step: 4,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config {}: {e}", path.display()))?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "text": { "default_speed_ms": 30 } }"#).unwrap();
        assert_eq!(config.text.default_speed_ms, 30);
        assert_eq!(config.text.max_lines, 3);
        assert_eq!(config.credibility_penalty, 20);
        assert_eq!(config.sounds.next_part, "sfx_next_part");
    }

    #[test]
    fn invalid_config_is_an_error() {
        assert!(EngineConfig::from_json("{ not json").is_err());
    }
}
