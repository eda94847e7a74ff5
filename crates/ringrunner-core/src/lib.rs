//! Core types and definitions for the RINGRUNNER simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, input flags, frame snapshots, events, and constants.
//! It has no dependency on the ECS or any presentation layer.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod types;
