//! Events emitted by the simulation for logging and UI feedback.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Gameplay events produced during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// The ship flew through a loop for the first time this lap.
    LoopPassed { slot: usize, score: u32 },
    /// The ship hit an asteroid and the explosion started.
    AsteroidHit { slot: usize, position: Position },
    /// The explosion finished growing.
    ExplosionSpent,
    /// The score crossed a narrative milestone.
    MilestoneReached { index: usize },
    /// The session was reset after a crash.
    Retried,
}

/// Show/hide signals for the UI chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiSignal {
    /// Show the game-over overlay with the retry affordance.
    ShowGameOver,
    HideGameOver,
    /// The frame loop started or resumed.
    LoopStarted,
    /// The frame loop was stopped.
    LoopStopped,
}
