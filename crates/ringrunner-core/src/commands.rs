//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next frame boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Keyboard ---
    /// A key was pressed. `key` uses DOM key names.
    KeyDown { key: String },
    /// A key was released.
    KeyUp { key: String },

    // --- Session control ---
    /// Start (or resume) the frame loop.
    Start,
    /// Stop the frame loop. No frames advance until Start or Retry.
    Stop,
    /// Reset the session after a crash and resume flying.
    Retry,
}

impl PlayerCommand {
    pub fn key_down(key: impl Into<String>) -> Self {
        PlayerCommand::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        PlayerCommand::KeyUp { key: key.into() }
    }
}
