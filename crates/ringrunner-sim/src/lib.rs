//! Simulation engine for RINGRUNNER.
//!
//! Owns the hecs ECS world, runs the per-frame systems,
//! and produces FrameSnapshots for the presentation layer.

pub mod assets;
pub mod config;
pub mod engine;
pub mod session;
pub mod systems;
pub mod world_setup;

pub use ringrunner_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
