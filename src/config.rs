//! Runtime configuration: database location, logging and prompt timeout.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Program configuration, loadable from TOML.
///
/// Missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// SQLite file holding the results table.
    db_path: String,

    /// File receiving tracing output.
    log_file: PathBuf,

    /// How long a line prompt waits before re-prompting, in seconds.
    prompt_timeout_secs: u64,

    /// Fixed RNG seed for reproducible games.
    seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            db_path: "twenty48.db".to_string(),
            log_file: PathBuf::from("twenty48.log"),
            prompt_timeout_secs: 6 * 60 * 60,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;

        info!(db_path = %config.db_path, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces values with any that were given explicitly.
    #[instrument(skip(self))]
    pub fn with_overrides(
        mut self,
        db_path: Option<String>,
        log_file: Option<PathBuf>,
        prompt_timeout_secs: Option<u64>,
        seed: Option<u64>,
    ) -> Result<Self, ConfigError> {
        if let Some(db_path) = db_path {
            self.db_path = db_path;
        }
        if let Some(log_file) = log_file {
            self.log_file = log_file;
        }
        if let Some(secs) = prompt_timeout_secs {
            self.prompt_timeout_secs = secs;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self.validate()?;
        Ok(self)
    }

    /// Prompt timeout as a [`Duration`].
    pub fn prompt_timeout(&self) -> Duration {
        Duration::from_secs(self.prompt_timeout_secs)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::new("db_path must not be empty".to_string()));
        }
        if self.prompt_timeout_secs == 0 {
            return Err(ConfigError::new("prompt_timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
