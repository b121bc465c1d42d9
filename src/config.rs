//! Configuration loaded from TOML.
//!
//! # Examples
//!
//! ```
//! use slidetile::config::PuzzleConfig;
//!
//! let config = PuzzleConfig::from_toml_str(r#"
//!     size = 4
//!
//!     [shuffle]
//!     min_moves = 20
//!     max_moves = 30
//!     seed = 7
//! "#).unwrap();
//!
//! assert_eq!(config.size, 4);
//! assert_eq!(config.shuffle.seed, Some(7));
//! assert_eq!(config.playback.interval_ms, 500);
//! ```
//!
//! Missing files fall back to defaults:
//!
//! ```
//! use slidetile::config::PuzzleConfig;
//!
//! let config = PuzzleConfig::load("slidetile.toml").unwrap_or_default();
//! assert_eq!(config.size, 3);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::check_size;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PuzzleConfig {
    /// Grid dimension `N`.
    pub size: usize,
    pub shuffle: ShuffleConfig,
    pub search: SearchConfig,
    pub playback: PlaybackConfig,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            size: 3,
            shuffle: ShuffleConfig::default(),
            search: SearchConfig::default(),
            playback: PlaybackConfig::default(),
        }
    }
}

impl PuzzleConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_size(self.size).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.shuffle.validate()?;
        if self.playback.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "playback.interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Random-walk scramble settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShuffleConfig {
    /// Fewest random slides in a scramble (inclusive).
    pub min_moves: u32,
    /// Most random slides in a scramble (inclusive).
    pub max_moves: u32,
    /// Seed for reproducible scrambles; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for ShuffleConfig {
    fn default() -> Self {
        Self {
            min_moves: 35,
            max_moves: 55,
            seed: None,
        }
    }
}

impl ShuffleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_moves > self.max_moves {
            return Err(ConfigError::Invalid(format!(
                "shuffle.min_moves ({}) exceeds shuffle.max_moves ({})",
                self.min_moves, self.max_moves
            )));
        }
        Ok(())
    }
}

/// A* search settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Stop with `SearchLimitExceeded` after this many expansions.
    pub max_expansions: Option<usize>,
    /// Reject unreachable starts up front using permutation parity instead
    /// of exhausting the state space.
    pub parity_check: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_expansions: None,
            parity_check: true,
        }
    }
}

/// Solution playback settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Delay between emitted states.
    pub interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { interval_ms: 500 }
    }
}

impl PlaybackConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
