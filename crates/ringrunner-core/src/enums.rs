//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Flight state of the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Normal motion and collision checks.
    #[default]
    Flying,
    /// Explosion growing, field frozen.
    Exploding,
    /// Explosion spent. Waits for retry.
    Over,
}

/// Whether the frame loop is advancing the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Loaded, waiting for the first start.
    #[default]
    Idle,
    Running,
    /// Stopped by the player. No frames advance until start or retry.
    Stopped,
}

/// Logical steering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Models requested from the asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ModelId {
    Spaceship,
    Asteroid,
    Explosion,
}

impl ModelId {
    pub const ALL: [ModelId; 3] = [ModelId::Spaceship, ModelId::Asteroid, ModelId::Explosion];

    /// Directory name of the model under the models root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ModelId::Spaceship => "spaceship2",
            ModelId::Asteroid => "asteroid",
            ModelId::Explosion => "explosion",
        }
    }
}

/// Kind of a scrolling pool member. Selects the initial spawn ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollKind {
    Asteroid,
    Loop,
}
