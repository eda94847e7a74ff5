//! Fundamental geometric and frame-timing types.

use std::time::Duration;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// 3D position in scene space.
/// x = right, y = up, z = toward the viewer (the scroll axis).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Euler rotation in radians. Only `z` (roll) changes during play.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Per-axis scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Frame counter for the simulation.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Current frame number (increments by 1 each running frame).
    pub frame: u64,
    /// Elapsed running time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        self.to_dvec3().distance(other.to_dvec3())
    }

    pub fn to_dvec3(self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }

    pub fn from_dvec3(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Rotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Roll around the viewing axis.
    pub fn roll(&self) -> f64 {
        self.z
    }
}

impl Scale {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn uniform(s: f64) -> Self {
        Self::new(s, s, s)
    }

    /// Largest axis, used for display sizing.
    pub fn max_axis(&self) -> f64 {
        self.x.max(self.y).max(self.z)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl FrameTime {
    /// Duration of one frame at `rate` Hz. A zero rate is treated as 1 Hz.
    pub fn frame_duration(rate: u32) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(rate.max(1)))
    }

    /// Advance by one frame lasting `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.frame += 1;
        self.elapsed_secs += dt.as_secs_f64();
    }
}
