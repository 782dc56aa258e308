//! Core types for the casedeck library
//!
//! This module contains the plain data the engine works on:
//! - Case: static episode content, mutated in place by triggers
//! - GameState: everything that changes during one playthrough
//! - Screen: the presentation family and its overlays
//! - Event: raw input delivered by the host
//! - Directive: audio requests produced for the host

pub mod case;
pub mod directive;
pub mod event;
pub mod geometry;
pub mod screen;
pub mod state;

pub use case::Case;
pub use directive::Directive;
pub use event::{InputEvent, Key};
pub use geometry::{Point, Rect};
pub use screen::{DrawFlags, Overlays, Screen, ScreenState};
pub use state::GameState;
