//! Directives emitted towards the audio layer
//!
//! The engine never plays anything itself; it hands these to a
//! [`Presenter`](crate::presenter::Presenter), which may forward them or record them.

use serde::{Deserialize, Serialize};

/// A fire-and-forget request for the host
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Directive {
    /// Play a short sample such as a voice blip
    PlayEffect { id: String },
    /// Start a music track
    PlayMusic { id: String },
    /// Stop whatever music is playing
    HaltMusic,
}

impl Directive {
    pub fn effect(id: impl Into<String>) -> Self {
        Self::PlayEffect { id: id.into() }
    }

    pub fn music(id: impl Into<String>) -> Self {
        Self::PlayMusic { id: id.into() }
    }
}
