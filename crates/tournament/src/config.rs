//! `club.toml` configuration

use club_core::{PairingPolicy, DEFAULT_ROUNDS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Club-wide settings. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubConfig {
    /// Directory holding `tournaments.json` and `players.json`
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Rounds for new tournaments
    #[serde(default = "default_rounds_number")]
    pub rounds_number: u32,

    /// Opponent choice for rounds after the first
    #[serde(default)]
    pub pairing: PairingPolicy,

    /// Fixed RNG seed for reproducible pairings and sides
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data/tournaments")
}

fn default_rounds_number() -> u32 {
    DEFAULT_ROUNDS
}

impl Default for ClubConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            rounds_number: default_rounds_number(),
            pairing: PairingPolicy::default(),
            seed: None,
        }
    }
}

impl ClubConfig {
    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from_path(path)
    }

    /// Load `path`, which must exist.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds_number == 0 {
            return Err(ConfigError::Invalid(
                "rounds_number must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Random source for pairing and side assignment
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
