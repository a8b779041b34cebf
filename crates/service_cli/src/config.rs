//! CLI configuration
//!
//! Loads analyze defaults from an optional TOML file, then applies
//! REALVOL_* environment variable overrides. Command line flags take
//! precedence over both.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid rolling window: {0}. Must be between 1 and 252")]
    InvalidWindow(usize),

    #[error("Invalid lookback years: {0}. Must be between 1 and 50")]
    InvalidYears(u32),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Defaults applied when an analyze flag is not given
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Calendar years of history fetched per symbol
    pub years: u32,
    /// Rolling window (trading days) used for charts
    pub window: usize,
    /// Directory charts and CSV exports land in
    pub output_dir: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            years: 10,
            window: 30,
            output_dir: PathBuf::from("outputs"),
        }
    }
}

impl CliConfig {
    /// Load configuration from the given file if it exists, else defaults,
    /// with environment overrides applied either way.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(years_str) = std::env::var("REALVOL_YEARS") {
            self.years = years_str.parse().map_err(|_| {
                ConfigError::EnvError(format!(
                    "REALVOL_YEARS is not a valid year count: {}",
                    years_str
                ))
            })?;
        }

        if let Ok(window_str) = std::env::var("REALVOL_WINDOW") {
            self.window = window_str.parse().map_err(|_| {
                ConfigError::EnvError(format!(
                    "REALVOL_WINDOW is not a valid window: {}",
                    window_str
                ))
            })?;
        }

        if let Ok(dir) = std::env::var("REALVOL_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window == 0 || self.window > 252 {
            return Err(ConfigError::InvalidWindow(self.window));
        }

        if self.years == 0 || self.years > 50 {
            return Err(ConfigError::InvalidYears(self.years));
        }

        Ok(())
    }
}
