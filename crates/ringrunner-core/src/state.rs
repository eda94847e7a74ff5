//! Frame snapshot: the complete visible state handed to the presentation layer
//! after each frame.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{GameEvent, UiSignal};
use crate::types::{FrameTime, Position, Rotation, Scale};

/// Complete state published after each frame ("render now").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: FrameTime,
    pub phase: GamePhase,
    pub run_state: RunState,
    /// `None` when the ship model failed to load.
    pub ship: Option<ShipView>,
    pub asteroids: Vec<AsteroidView>,
    pub loops: Vec<LoopView>,
    pub explosion: ExplosionView,
    pub camera: CameraView,
    pub scroll_speed: f64,
    pub score: ScoreView,
    pub narrative: NarrativeView,
    pub ui: UiView,
    pub events: Vec<GameEvent>,
    pub ui_signals: Vec<UiSignal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Position,
    pub rotation: Rotation,
    pub scale: Scale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidView {
    pub slot: usize,
    pub position: Position,
    pub rotation: Rotation,
    pub scale: Scale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoopView {
    pub slot: usize,
    pub position: Position,
    pub passed: bool,
    /// 0xRRGGBB, changes once the loop is passed.
    pub color: u32,
}

/// Explosion actor and light.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplosionView {
    /// Whether the actor and light are in the scene.
    pub attached: bool,
    pub position: Position,
    pub scale: f64,
    pub light_intensity: f64,
    /// Growth frames remaining.
    pub countdown: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub position: Position,
    pub roll: f64,
    /// Point the camera looks at. `None` means straight down -z.
    pub look_at: Option<Position>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub score: u32,
    pub loops_passed: u32,
    pub scoring_enabled: bool,
}

/// Current milestone line and how much of it has been revealed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NarrativeView {
    pub index: usize,
    pub text: String,
    pub complete: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiView {
    pub game_over_visible: bool,
    pub retry_visible: bool,
}
