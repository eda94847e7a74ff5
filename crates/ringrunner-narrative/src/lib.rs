//! Milestone narrative for RINGRUNNER.
//!
//! Maps cumulative score to a fixed sequence of story lines and reveals the
//! current line one character at a time. No ECS dependency.

pub mod milestones;
pub mod typewriter;

pub use ringrunner_core as core;
