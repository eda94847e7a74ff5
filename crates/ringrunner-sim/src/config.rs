//! Game configuration, loadable from TOML.
//!
//! Every field has a default, so a config file only needs the keys it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use ringrunner_core::constants::{
    FRAME_RATE, MILESTONE_INTERVAL, REVEAL_CHAR_DELAY, SHIP_SPEED, SPACE_SPEED,
};
use ringrunner_core::types::FrameTime;
use ringrunner_narrative::milestones::{NarrativeSequence, DEFAULT_LINES};

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Complete game configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub sim: SimConfig,
    pub features: FeatureFlags,
    pub narrative: NarrativeConfig,
}

/// Simulation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same field layout.
    pub seed: u64,
    /// Ship movement per frame along each held direction.
    pub ship_speed: f64,
    /// Scroll speed of the field; also the value restored on retry.
    pub space_speed: f64,
    /// Frames per second. Timed effects advance by one frame duration per tick.
    pub frame_rate: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ship_speed: SHIP_SPEED,
            space_speed: SPACE_SPEED,
            frame_rate: FRAME_RATE,
        }
    }
}

impl SimConfig {
    pub fn frame_duration(&self) -> Duration {
        FrameTime::frame_duration(self.frame_rate)
    }
}

/// Optional gameplay features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Points for loops and the milestone narrative.
    /// Off gives the plain flight variant: loops only change color.
    pub scoring: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self { scoring: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeConfig {
    pub milestone_interval: u32,
    pub char_delay_ms: u64,
    pub lines: Vec<String>,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            milestone_interval: MILESTONE_INTERVAL,
            char_delay_ms: REVEAL_CHAR_DELAY.as_millis() as u64,
            lines: DEFAULT_LINES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl NarrativeConfig {
    pub fn sequence(&self) -> NarrativeSequence {
        NarrativeSequence::new(self.lines.clone(), self.milestone_interval)
    }

    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load `path` if given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
