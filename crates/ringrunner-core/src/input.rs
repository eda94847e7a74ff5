//! Keyboard input state.
//!
//! Key names follow the DOM `KeyboardEvent.key` convention (`"ArrowUp"`,
//! `"w"`, `"W"`), so any keyboard source only needs to forward names.

use serde::{Deserialize, Serialize};

use crate::enums::Direction;

/// The four steering flags consumed by the per-frame update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Map a key name to a steering direction. Arrows and WASD, any case.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowUp" => Some(Direction::Up),
        "ArrowDown" => Some(Direction::Down),
        "ArrowLeft" => Some(Direction::Left),
        "ArrowRight" => Some(Direction::Right),
        k if k.eq_ignore_ascii_case("w") => Some(Direction::Up),
        k if k.eq_ignore_ascii_case("s") => Some(Direction::Down),
        k if k.eq_ignore_ascii_case("a") => Some(Direction::Left),
        k if k.eq_ignore_ascii_case("d") => Some(Direction::Right),
        _ => None,
    }
}

impl InputState {
    /// Set the flag for `key`. Unrecognized keys are ignored.
    pub fn on_key_down(&mut self, key: &str) {
        if let Some(direction) = direction_for_key(key) {
            self.set(direction, true);
        }
    }

    /// Clear the flag for `key`. Unrecognized keys are ignored.
    pub fn on_key_up(&mut self, key: &str) {
        if let Some(direction) = direction_for_key(key) {
            self.set(direction, false);
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
