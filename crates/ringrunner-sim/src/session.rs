//! Per-session state that is not attached to any entity.
//!
//! Stored in `SimulationEngine`, NOT as ECS components.

use ringrunner_core::constants::*;
use ringrunner_core::enums::{GamePhase, RunState};
use ringrunner_core::types::Position;

/// Running score.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    /// Points awarded (stays 0 when scoring is disabled).
    pub score: u32,
    /// Loops flown through this session, counted with or without scoring.
    pub loops_passed: u32,
}

/// Explosion growth bookkeeping. The actor's Scale and the light's intensity
/// are written from these values each exploding frame.
#[derive(Debug, Clone)]
pub struct ExplosionTimer {
    /// Growth frames remaining.
    pub countdown: u32,
    pub scale: f64,
    pub light_intensity: f64,
}

impl Default for ExplosionTimer {
    fn default() -> Self {
        Self {
            countdown: EXPLOSION_DURATION,
            scale: EXPLOSION_INITIAL_SCALE,
            light_intensity: 0.0,
        }
    }
}

/// Camera pose. Follows the ship while flying, orbits the explosion after a crash.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub position: Position,
    pub roll: f64,
    pub orbit_angle: f64,
    pub look_at: Option<Position>,
}

impl Default for CameraRig {
    fn default() -> Self {
        let (x, y, z) = CAMERA_START;
        Self {
            position: Position::new(x, y, z),
            roll: 0.0,
            orbit_angle: 0.0,
            look_at: None,
        }
    }
}

/// Everything the frame loop mutates outside the ECS world.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: GamePhase,
    pub run_state: RunState,
    /// Current scroll speed of the field. Frozen to 0 by a crash.
    pub scroll_speed: f64,
    pub score: ScoreState,
    pub explosion: ExplosionTimer,
    pub camera: CameraRig,
    /// Index of the narrative line currently shown.
    pub narrative_index: usize,
    pub game_over_visible: bool,
}

impl Session {
    pub fn new(space_speed: f64) -> Self {
        Self {
            phase: GamePhase::default(),
            run_state: RunState::default(),
            scroll_speed: space_speed,
            score: ScoreState::default(),
            explosion: ExplosionTimer::default(),
            camera: CameraRig::default(),
            narrative_index: 0,
            game_over_visible: false,
        }
    }
}
