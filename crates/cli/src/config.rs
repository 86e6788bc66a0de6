//! TOML configuration for the terminal front end.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use ttt_core::Player;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings for one play session. All fields are optional in the file;
/// anything missing falls back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search depth handed to the engine. Nine plies cover the full tree.
    pub depth: u8,
    /// Side the engine plays.
    pub engine_side: Player,
    /// Side that moves first.
    pub first_player: Player,
    /// How long to wait for the background search before falling back to
    /// a synchronous move.
    pub watchdog_ms: u64,
    /// Opaque UI settings round-tripped through the search envelope.
    pub color_scheme: Option<toml::Value>,
    pub window_size: Option<toml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth: 9,
            engine_side: Player::O,
            first_player: Player::X,
            watchdog_ms: 2_000,
            color_scheme: None,
            window_size: None,
        }
    }
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        debug!(path = %path.as_ref().display(), "config loaded");
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
