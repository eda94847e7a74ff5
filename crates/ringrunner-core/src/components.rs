//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.
//! `Position`, `Rotation` and `Scale` from `types` are used as components too.

use serde::{Deserialize, Serialize};

use crate::enums::{ModelId, ScrollKind};

/// Marks the player's spaceship. Exactly one exists once its model loads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ship;

/// Idle roll oscillation applied to the ship every flying frame.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wobble {
    /// Frames left before the direction flips.
    pub countdown: i32,
    /// True while rolling in the positive direction.
    pub positive: bool,
}

/// Asteroid pool member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid {
    /// Fixed slot within the pool.
    pub slot: usize,
}

/// Ring obstacle pool member.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RingLoop {
    pub slot: usize,
    /// Set on the first touch of this lap. Cleared when recycled.
    pub passed: bool,
}

/// Anything that moves with the scrolling field and is recycled at the bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scrolling {
    pub kind: ScrollKind,
}

/// The explosion model shown after a crash.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExplosionActor;

/// Light that accompanies the explosion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExplosionLight {
    pub intensity: f64,
    pub color: u32,
}

/// Present while an entity is part of the rendered scene.
/// The explosion actor and light carry it only between crash and retry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attached;

/// Which loaded model renders this entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelRef(pub ModelId);
