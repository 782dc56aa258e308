//! # casedeck
//!
//! A playback engine for courtroom visual novels. A case is a JSON document
//! holding characters, evidence, locations, testimonies and script blocks;
//! the engine interprets the blocks' markup, reveals dialogue over time,
//! runs the triggers embedded in it and routes player input through the
//! investigation and Court Record screens.
//!
//! Rendering and audio live outside the crate. The engine talks to them
//! through the [`Presenter`] trait and exposes the screen as plain state
//! ([`GameState`], [`DrawFlags`]).
//!
//! ## Quick Start
//!
//! ```rust
//! use casedeck::{EngineConfig, Game, Recorder, load_case};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json = r#"{
//!     "initial_block": "intro",
//!     "buffers": { "intro": "Court is now in session." }
//! }"#;
//! let file = load_case(json.as_bytes())?;
//! let mut game = Game::new(file.case, Recorder::new(), EngineConfig::default());
//!
//! game.start();
//! let mut now = 0;
//! while !game.parser().is_revealed() {
//!     now += 16;
//!     game.tick(now);
//! }
//! assert_eq!(game.parser().visible_text(), "Court is now in session.");
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod parser;
pub mod presenter;
pub mod runtime;
pub mod storage;
pub mod types;

pub use config::EngineConfig;
pub use error::{CaseError, Severity, TriggerError};
pub use presenter::{Presenter, Recorder};
pub use runtime::Game;
pub use runtime::interpreter::ParseStatus;
pub use storage::{CaseFile, CaseRepository, FileSystemCaseRepository, load_case};
pub use types::{Case, DrawFlags, GameState, InputEvent, Key, Screen};
