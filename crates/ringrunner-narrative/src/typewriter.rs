//! Character-by-character text reveal.
//!
//! Driven by elapsed time from the owner's frame loop rather than by timers,
//! so a restart or cancel takes effect immediately and never races a stale
//! reveal writing into the same buffer.

use std::time::Duration;

use ringrunner_core::constants::REVEAL_CHAR_DELAY;

#[derive(Debug, Clone)]
pub struct Typewriter {
    text: Vec<char>,
    revealed: usize,
    delay: Duration,
    /// Time banked toward the next character.
    carry: Duration,
    active: bool,
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(REVEAL_CHAR_DELAY)
    }
}

impl Typewriter {
    pub fn new(delay: Duration) -> Self {
        Self {
            text: Vec::new(),
            revealed: 0,
            delay: delay.max(Duration::from_millis(1)),
            carry: Duration::ZERO,
            active: false,
        }
    }

    /// Begin revealing `text` from the first character, superseding any
    /// reveal in progress.
    pub fn start(&mut self, text: &str) {
        self.text = text.chars().collect();
        self.revealed = 0;
        self.carry = Duration::ZERO;
        self.active = !self.text.is_empty();
    }

    /// Stop revealing and clear the buffer.
    pub fn cancel(&mut self) {
        self.text.clear();
        self.revealed = 0;
        self.carry = Duration::ZERO;
        self.active = false;
    }

    /// Advance by `elapsed`. Returns the number of characters revealed.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        if !self.active {
            return 0;
        }
        self.carry += elapsed;
        let mut shown = 0;
        while self.carry >= self.delay && self.revealed < self.text.len() {
            self.carry -= self.delay;
            self.revealed += 1;
            shown += 1;
        }
        if self.revealed == self.text.len() {
            self.active = false;
            self.carry = Duration::ZERO;
        }
        shown
    }

    /// The revealed prefix.
    pub fn visible(&self) -> String {
        self.text[..self.revealed].iter().collect()
    }

    pub fn is_complete(&self) -> bool {
        !self.active && self.revealed == self.text.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
