//! Simulation constants and tuning parameters.

use std::time::Duration;

/// Nominal frame rate (Hz).
pub const FRAME_RATE: u32 = 60;

/// Wall-clock duration of one frame at the nominal rate.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

// --- Ship ---

/// Spawn pose of the ship.
pub const SHIP_SPAWN: (f64, f64, f64) = (0.0, -2.0, 0.0);

/// The ship model faces away from the camera.
pub const SHIP_YAW: f64 = std::f64::consts::PI;

pub const SHIP_SCALE: f64 = 1.5;

/// Default lateral speed of the ship (units per frame).
pub const SHIP_SPEED: f64 = 0.05;

/// Banking roll per frame is `ship_speed * BANK_FACTOR`.
pub const BANK_FACTOR: f64 = 0.1;

// --- Wobble ---

/// Roll added (or removed) by the idle wobble each frame.
pub const WOBBLE_STEP: f64 = 0.002;

/// Frames between wobble direction flips.
pub const WOBBLE_PERIOD: i32 = 50;

// --- Scrolling field ---

/// Default scroll speed along +z (units per frame).
pub const SPACE_SPEED: f64 = 0.1;

/// Entities whose z exceeds this bound are recycled.
pub const SCROLL_FORWARD_BOUND: f64 = 5.0;

/// Recycled entities land exactly on this z.
pub const SCROLL_RESPAWN_Z: f64 = -20.0;

/// Lateral (x and y) spawn range, half-open.
pub const LATERAL_MIN: f64 = -5.0;
pub const LATERAL_MAX: f64 = 5.0;

/// On retry, every pool member with z below this is re-randomized.
pub const RETRY_RESPAWN_BELOW_Z: f64 = SCROLL_FORWARD_BOUND;

// --- Pools ---

pub const ASTEROID_COUNT: usize = 10;
pub const LOOP_COUNT: usize = 5;

/// Asteroids initially spawn at z in (NEAR - DEPTH, NEAR].
pub const ASTEROID_SPAWN_Z_NEAR: f64 = -10.0;
pub const ASTEROID_SPAWN_DEPTH: f64 = 10.0;

/// Per-axis asteroid scale range, half-open.
pub const ASTEROID_SCALE_MIN: f64 = 2.0;
pub const ASTEROID_SCALE_MAX: f64 = 5.0;

/// Loops initially spawn at z in (NEAR - DEPTH, NEAR].
pub const LOOP_SPAWN_Z_NEAR: f64 = -20.0;
pub const LOOP_SPAWN_DEPTH: f64 = 15.0;

/// Torus geometry of a loop.
pub const LOOP_RADIUS: f64 = 1.5;
pub const LOOP_TUBE_RADIUS: f64 = 0.1;

/// Loop colors (0xRRGGBB).
pub const LOOP_COLOR: u32 = 0x00ff00;
pub const LOOP_PASSED_COLOR: u32 = 0x0000ff;

// --- Collision ---

/// A hit is `distance < COLLISION_RADIUS`.
pub const COLLISION_RADIUS: f64 = 1.5;

// --- Explosion ---

/// Frames of explosion growth.
pub const EXPLOSION_DURATION: u32 = 120;

pub const EXPLOSION_INITIAL_SCALE: f64 = 0.1;

/// Uniform scale added per frame while exploding.
pub const EXPLOSION_GROWTH: f64 = 0.05;

/// Light intensity added per frame while exploding.
pub const EXPLOSION_LIGHT_RAMP: f64 = 0.3;

pub const EXPLOSION_LIGHT_COLOR: u32 = 0xffff00;

// --- Camera ---

pub const CAMERA_START: (f64, f64, f64) = (0.0, 0.0, 5.0);

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEG: f64 = 75.0;

pub const CAMERA_ORBIT_RADIUS: f64 = 5.0;

/// Orbit angle advance per frame (radians).
pub const CAMERA_ORBIT_SPEED: f64 = 0.02;

// --- Narrative ---

/// Score points per narrative milestone.
pub const MILESTONE_INTERVAL: u32 = 20;

/// Delay between revealed characters.
pub const REVEAL_CHAR_DELAY: Duration = Duration::from_millis(50);
