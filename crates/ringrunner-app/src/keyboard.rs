//! Keyboard source: turns crossterm key events into simulation commands.
//!
//! Steering keys become `KeyDown`/`KeyUp` commands carrying DOM-style key
//! names (`"ArrowUp"`, `"a"`), so the simulation's key mapping is the single
//! source of truth. App keys (quit, pause, retry, start) are reported
//! separately and never reach the steering state.
//!
//! Works on two classes of terminal:
//! * **Keyboard-enhancement capable** (kitty protocol): real
//!   `Press` / `Repeat` / `Release` events, keys are released on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows as
//!   repeated presses). A key is released after `HOLD_WINDOW` frames of
//!   silence.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use ringrunner_core::commands::PlayerCommand;
use ringrunner_core::input::direction_for_key;

/// Frames a key stays held after its last press/repeat on terminals without
/// release events (about 133 ms at 60 FPS).
pub const HOLD_WINDOW: u64 = 8;

/// Non-steering actions bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    /// Stop the frame loop if running, start it otherwise.
    ToggleRun,
    Retry,
    Start,
}

/// DOM-style name of a key, if it has one the simulation might care about.
pub fn key_name(code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Up => Some("ArrowUp".into()),
        KeyCode::Down => Some("ArrowDown".into()),
        KeyCode::Left => Some("ArrowLeft".into()),
        KeyCode::Right => Some("ArrowRight".into()),
        KeyCode::Char(c) => Some(c.to_string()),
        _ => None,
    }
}

/// App action for a key press, if any. Releases never trigger actions.
pub fn app_action(event: &KeyEvent) -> Option<AppAction> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AppAction::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(AppAction::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(AppAction::ToggleRun),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(AppAction::Retry),
        KeyCode::Enter | KeyCode::Char(' ') => Some(AppAction::Start),
        _ => None,
    }
}

/// Tracks which steering keys are held and when they were last seen.
#[derive(Debug, Clone)]
pub struct HeldKeys {
    /// Key name -> frame of last press/repeat.
    last_seen: HashMap<String, u64>,
    /// Terminal reports release events; no expiry needed.
    enhanced: bool,
}

impl HeldKeys {
    pub fn new(enhanced: bool) -> Self {
        Self {
            last_seen: HashMap::new(),
            enhanced,
        }
    }

    /// Translate one key event into steering commands.
    pub fn translate(&mut self, event: &KeyEvent, frame: u64) -> Vec<PlayerCommand> {
        let Some(name) = key_name(event.code) else {
            return Vec::new();
        };
        if direction_for_key(&name).is_none() {
            return Vec::new();
        }

        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let fresh = self.last_seen.insert(name.clone(), frame).is_none();
                if fresh {
                    vec![PlayerCommand::key_down(name)]
                } else {
                    Vec::new()
                }
            }
            KeyEventKind::Release => match self.last_seen.remove(&name) {
                Some(_) => vec![PlayerCommand::key_up(name)],
                None => Vec::new(),
            },
        }
    }

    /// Release keys not seen within `HOLD_WINDOW` frames. No-op on
    /// terminals that report releases.
    pub fn expire(&mut self, frame: u64) -> Vec<PlayerCommand> {
        if self.enhanced {
            return Vec::new();
        }
        let mut stale: Vec<String> = self
            .last_seen
            .iter()
            .filter(|&(_, &last)| frame.saturating_sub(last) > HOLD_WINDOW)
            .map(|(name, _)| name.clone())
            .collect();
        stale.sort();
        for name in &stale {
            self.last_seen.remove(name);
        }
        stale.into_iter().map(|name| PlayerCommand::key_up(name)).collect()
    }

    /// Release everything.
    pub fn release_all(&mut self) -> Vec<PlayerCommand> {
        let mut names: Vec<String> = self.last_seen.drain().map(|(name, _)| name).collect();
        names.sort();
        names.into_iter().map(|name| PlayerCommand::key_up(name)).collect()
    }

    /// Commands for a retry request: a key-up for every held key, then
    /// `Retry`. The simulation ignores a retry while flying, so the
    /// releases must reach it either way.
    pub fn retry(&mut self) -> Vec<PlayerCommand> {
        let mut commands = self.release_all();
        commands.push(PlayerCommand::Retry);
        commands
    }

    pub fn is_held(&self, name: &str) -> bool {
        self.last_seen.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use ringrunner_core::enums::{Direction, GamePhase};
    use ringrunner_sim::config::GameConfig;
    use ringrunner_sim::SimulationEngine;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_key_names() {
        assert_eq!(key_name(KeyCode::Up).as_deref(), Some("ArrowUp"));
        assert_eq!(key_name(KeyCode::Right).as_deref(), Some("ArrowRight"));
        assert_eq!(key_name(KeyCode::Char('a')).as_deref(), Some("a"));
        assert_eq!(key_name(KeyCode::F(1)), None);
    }

    #[test]
    fn test_app_actions() {
        assert_eq!(
            app_action(&key(KeyCode::Char('q'), KeyEventKind::Press)),
            Some(AppAction::Quit)
        );
        assert_eq!(
            app_action(&key(KeyCode::Esc, KeyEventKind::Press)),
            Some(AppAction::Quit)
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app_action(&ctrl_c), Some(AppAction::Quit));
        assert_eq!(
            app_action(&key(KeyCode::Char('r'), KeyEventKind::Press)),
            Some(AppAction::Retry)
        );
        assert_eq!(
            app_action(&key(KeyCode::Enter, KeyEventKind::Press)),
            Some(AppAction::Start)
        );
        assert_eq!(
            app_action(&key(KeyCode::Char('p'), KeyEventKind::Release)),
            None
        );
        assert_eq!(app_action(&key(KeyCode::Up, KeyEventKind::Press)), None);
    }

    #[test]
    fn test_press_once_then_release() {
        let mut held = HeldKeys::new(true);

        let down = held.translate(&key(KeyCode::Left, KeyEventKind::Press), 1);
        assert_eq!(down, vec![PlayerCommand::key_down("ArrowLeft")]);

        // Repeats refresh the key but do not resend it.
        let repeat = held.translate(&key(KeyCode::Left, KeyEventKind::Repeat), 2);
        assert!(repeat.is_empty());
        assert!(held.is_held("ArrowLeft"));

        let up = held.translate(&key(KeyCode::Left, KeyEventKind::Release), 3);
        assert_eq!(up, vec![PlayerCommand::key_up("ArrowLeft")]);
        assert!(!held.is_held("ArrowLeft"));
    }

    #[test]
    fn test_non_steering_keys_ignored() {
        let mut held = HeldKeys::new(false);
        assert!(held
            .translate(&key(KeyCode::Char('x'), KeyEventKind::Press), 1)
            .is_empty());
        assert!(held
            .translate(&key(KeyCode::Tab, KeyEventKind::Press), 1)
            .is_empty());
    }

    #[test]
    fn test_hold_window_expiry() {
        let mut held = HeldKeys::new(false);
        held.translate(&key(KeyCode::Char('d'), KeyEventKind::Press), 10);

        assert!(held.expire(10 + HOLD_WINDOW).is_empty());
        assert_eq!(
            held.expire(11 + HOLD_WINDOW),
            vec![PlayerCommand::key_up("d")]
        );
        assert!(!held.is_held("d"));
    }

    #[test]
    fn test_enhanced_terminal_never_expires() {
        let mut held = HeldKeys::new(true);
        held.translate(&key(KeyCode::Up, KeyEventKind::Press), 1);
        assert!(held.expire(1000).is_empty());
        assert!(held.is_held("ArrowUp"));
    }

    #[test]
    fn test_release_all() {
        let mut held = HeldKeys::new(false);
        held.translate(&key(KeyCode::Up, KeyEventKind::Press), 1);
        held.translate(&key(KeyCode::Left, KeyEventKind::Press), 1);

        let ups = held.release_all();
        assert_eq!(
            ups,
            vec![
                PlayerCommand::key_up("ArrowLeft"),
                PlayerCommand::key_up("ArrowUp"),
            ]
        );
        assert!(held.release_all().is_empty());
    }

    #[test]
    fn test_retry_releases_before_retrying() {
        let mut held = HeldKeys::new(false);
        held.translate(&key(KeyCode::Right, KeyEventKind::Press), 1);

        assert_eq!(
            held.retry(),
            vec![PlayerCommand::key_up("ArrowRight"), PlayerCommand::Retry]
        );
        assert!(!held.is_held("ArrowRight"));
        assert_eq!(held.retry(), vec![PlayerCommand::Retry]);
    }

    #[test]
    fn test_retry_while_flying_does_not_stick_steering() {
        let mut engine = SimulationEngine::new(GameConfig::default());
        let mut held = HeldKeys::new(false);
        engine.queue_command(PlayerCommand::Start);
        engine.tick();

        for command in held.translate(&key(KeyCode::Left, KeyEventKind::Press), 1) {
            engine.queue_command(command);
        }
        engine.tick();
        assert!(engine.input().is_held(Direction::Left));

        for command in held.retry() {
            engine.queue_command(command);
        }
        let before = engine.tick();
        assert_eq!(engine.phase(), GamePhase::Flying);
        assert!(!engine.input().is_held(Direction::Left));

        // Nothing left to expire, and the ship stays put.
        for frame in 2..200 {
            for command in held.expire(frame) {
                engine.queue_command(command);
            }
            engine.tick();
        }
        let after = engine.tick();
        assert_eq!(after.ship.map(|s| s.position.x), before.ship.map(|s| s.position.x));
    }
}
