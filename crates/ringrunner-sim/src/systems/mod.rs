//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state: entity state lives in components, session state
//! lives in the engine and is passed in.

pub mod camera;
pub mod collision;
pub mod explosion;
pub mod scroll;
pub mod ship_control;
pub mod snapshot;
pub mod wobble;
