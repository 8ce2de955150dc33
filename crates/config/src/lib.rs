//! Configuration loading, validation, and management for Rudder.
//!
//! Loads configuration from `~/.rudder/config.toml` (or `$RUDDER_HOME/config.toml`)
//! with environment variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default byte budget for aggregated steering content.
pub const DEFAULT_STEERING_MAX_BYTES: usize = 16 * 1024;

/// Upper bound accepted for `steering.max_bytes`.
pub const MAX_STEERING_BYTES: usize = 1024 * 1024;

/// Environment variable that relocates the rudder home directory.
pub const HOME_ENV: &str = "RUDDER_HOME";

/// The root configuration structure.
///
/// Maps directly to `~/.rudder/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Steering file aggregation
    #[serde(default)]
    pub steering: SteeringConfig,

    /// External instruction blocks around steering content
    #[serde(default)]
    pub instructions: InstructionsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteeringConfig {
    /// When false, steering files are never read and nothing is injected.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum bytes of header + content injected across all steering files.
    #[serde(default = "default_steering_max_bytes")]
    pub max_bytes: usize,
}

fn default_true() -> bool {
    true
}
fn default_steering_max_bytes() -> usize {
    DEFAULT_STEERING_MAX_BYTES
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: default_steering_max_bytes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionsConfig {
    /// Load `AGENTS.md` from the rudder home as the leading block
    #[serde(default = "default_true")]
    pub load_global: bool,

    /// Load `AGENTS.md` from the project root as the trailing block
    #[serde(default = "default_true")]
    pub load_project: bool,
}

impl Default for InstructionsConfig {
    fn default() -> Self {
        Self {
            load_global: true,
            load_project: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (`<config_dir>/config.toml`).
    ///
    /// Also checks environment variables:
    /// - `RUDDER_STEERING_ENABLED`
    /// - `RUDDER_STEERING_MAX_BYTES`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("RUDDER_STEERING_ENABLED") {
            self.steering.enabled = parse_bool(&raw).ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "RUDDER_STEERING_ENABLED must be a boolean, got '{raw}'"
                ))
            })?;
        }

        if let Some(raw) = lookup("RUDDER_STEERING_MAX_BYTES") {
            self.steering.max_bytes = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "RUDDER_STEERING_MAX_BYTES must be a byte count, got '{raw}'"
                ))
            })?;
        }

        self.validate()
    }

    /// Get the configuration directory path (the rudder home).
    pub fn config_dir() -> PathBuf {
        match std::env::var_os(HOME_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs_home().join(".rudder"),
        }
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steering.max_bytes > MAX_STEERING_BYTES {
            return Err(ConfigError::ValidationError(format!(
                "steering.max_bytes must be at most {MAX_STEERING_BYTES}, got {}",
                self.steering.max_bytes
            )));
        }

        Ok(())
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
