//! RINGRUNNER terminal application.
//!
//! Wires the headless simulation to a frame-loop thread, a crossterm
//! keyboard source and a character-cell renderer.

pub mod control;
pub mod frame_loop;
pub mod keyboard;
pub mod render;
pub mod state;

pub use ringrunner_core as core;
