//! Engine configuration
//!
//! Everything a board needs at construction time: grid size, spawn anchor,
//! difficulty and RNG seed. Values are plain data passed into
//! [`Board::new`](crate::Board::new); there is no process-wide settings
//! object. Configs can be read from and written to TOML.

use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tetris_duel_types::{
    BOARD_HEIGHT, BOARD_WIDTH, BUFFER_ROWS, DEFAULT_MAX_HP, SPAWN_COL, SPAWN_ROW,
};

/// Largest accepted dimension on either axis
const MAX_DIMENSION: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Starting speed and score multiplier pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Drop interval at level 1, in milliseconds
    pub fn drop_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 1000,
            Difficulty::Medium => 500,
            Difficulty::Hard => 250,
        }
    }

    pub fn drop_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.drop_ms()))
    }

    /// Applied to every clear bonus
    pub fn score_multiplier(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Board cell where a new piece's top-left corner is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub col: i32,
    pub row: i32,
}

impl Default for SpawnPoint {
    fn default() -> Self {
        Self {
            col: SPAWN_COL,
            row: SPAWN_ROW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Columns
    pub width: usize,
    /// Rows, including the hidden buffer
    pub height: usize,
    pub difficulty: Difficulty,
    /// Fixed piece sequence when set; clock-derived otherwise
    pub seed: Option<u32>,
    pub spawn: SpawnPoint,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            difficulty: Difficulty::default(),
            seed: None,
            spawn: SpawnPoint::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// The configured seed, or one derived from the system clock
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.width > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "width must be in 1..={MAX_DIMENSION}, got {}",
                self.width
            )));
        }
        if self.height <= BUFFER_ROWS || self.height > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "height must be in {}..={MAX_DIMENSION}, got {}",
                BUFFER_ROWS + 1,
                self.height
            )));
        }
        let SpawnPoint { col, row } = self.spawn;
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            return Err(ConfigError::Invalid(format!(
                "spawn anchor ({col}, {row}) lies outside a {}x{} board",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}

/// Settings for a two-player match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersusConfig {
    pub max_hp: u32,
    /// Shared by both boards; player two's seed is offset by one
    pub engine: EngineConfig,
}

impl Default for VersusConfig {
    fn default() -> Self {
        Self {
            max_hp: DEFAULT_MAX_HP,
            engine: EngineConfig::default(),
        }
    }
}

impl VersusConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        if self.max_hp == 0 {
            return Err(ConfigError::Invalid("max_hp must be positive".into()));
        }
        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
