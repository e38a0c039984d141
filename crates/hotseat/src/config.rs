//! Session configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use hotseat_core::DEFAULT_TURN_BUDGET;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Configuration for one hot-seat session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds each side gets per turn.
    #[serde(default = "default_turn_budget_secs")]
    turn_budget_secs: u32,

    /// Milliseconds between clock ticks.
    #[serde(default = "default_tick_interval_ms")]
    tick_interval_ms: u64,

    /// Where the terminal UI writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_turn_budget_secs() -> u32 {
    DEFAULT_TURN_BUDGET
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("hotseat.log")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            turn_budget_secs: default_turn_budget_secs(),
            tick_interval_ms: default_tick_interval_ms(),
            log_file: default_log_file(),
        }
    }
}

impl SessionConfig {
    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            turn_budget_secs = config.turn_budget_secs,
            tick_interval_ms = config.tick_interval_ms,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads from `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Replaces the turn budget, e.g. from a command-line flag.
    pub fn with_turn_budget(mut self, secs: u32) -> Result<Self, ConfigError> {
        self.turn_budget_secs = secs;
        self.validate()?;
        Ok(self)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.turn_budget_secs == 0 {
            warn!("Rejected zero turn budget");
            return Err(ConfigError::new(
                "turn_budget_secs must be at least 1".to_string(),
            ));
        }
        if self.tick_interval_ms == 0 {
            warn!("Rejected zero tick interval");
            return Err(ConfigError::new(
                "tick_interval_ms must be at least 1".to_string(),
            ));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = SessionConfig::from_toml("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(*config.turn_budget_secs(), 30);
        assert_eq!(*config.tick_interval_ms(), 1000);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = SessionConfig::from_toml("turn_budget_secs = 10").unwrap();
        assert_eq!(*config.turn_budget_secs(), 10);
        assert_eq!(config.log_file(), &PathBuf::from("hotseat.log"));
    }

    #[test]
    fn test_zero_budget_rejected() {
        let err = SessionConfig::from_toml("turn_budget_secs = 0").unwrap_err();
        assert!(err.message.contains("turn_budget_secs"));
        assert!(err.file.ends_with("config.rs"));
    }

    #[test]
    fn test_override_validates() {
        assert!(SessionConfig::default().with_turn_budget(0).is_err());
        let config = SessionConfig::default().with_turn_budget(5).unwrap();
        assert_eq!(*config.turn_budget_secs(), 5);
    }

    #[test]
    fn test_garbage_rejected() {
        let err = SessionConfig::from_toml("turn_budget_secs = \"soon\"").unwrap_err();
        assert!(err.message.starts_with("Failed to parse config"));
    }
}
