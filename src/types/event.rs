//! Raw input events delivered by the host

use serde::{Deserialize, Serialize};

/// Symbolic key codes the engine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Return / advance
    Confirm,
    Back,
    /// Opens the Court Record
    CourtRecord,
    /// Press the current statement during cross-examination
    Press,
    /// Present the selected Court Record item
    Present,
    Other,
}

/// Input events that can be sent to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    /// Mouse button press at logical screen coordinates
    MouseDown { x: i32, y: i32 },
}
