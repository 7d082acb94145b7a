//! Configuration loading, validation, and management for ctxforge.
//!
//! Loads configuration from `ctxforge.toml` with environment variable
//! overrides. Validates all settings at load time.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("failed to parse config at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// The root configuration structure.
///
/// Maps directly to `ctxforge.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Context packing configuration.
    #[serde(default)]
    pub context: ContextConfig,

    /// Feedback recorder configuration.
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// Context optimizer configuration.
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Character budget for packed context.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
}

fn default_max_length() -> usize {
    10_000
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Target success rate in (0, 1].
    #[serde(default = "default_success_threshold")]
    pub success_threshold: f64,

    /// Latency above which executions count as slow, in ms.
    #[serde(default = "default_slow_call_ms")]
    pub slow_call_ms: u64,
}

fn default_success_threshold() -> f64 {
    0.8
}
fn default_slow_call_ms() -> u64 {
    1_000
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            success_threshold: default_success_threshold(),
            slow_call_ms: default_slow_call_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Token budget for optimized context.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

fn default_max_tokens() -> usize {
    8_000
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            context: ContextConfig::default(),
            feedback: FeedbackConfig::default(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `ctxforge.toml` in the current
    /// directory, falling back to defaults when the file is absent.
    ///
    /// Environment overrides (highest priority):
    /// - `CTXFORGE_MAX_LENGTH` — context character budget
    /// - `CTXFORGE_MAX_TOKENS` — optimizer token budget
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(Path::new("ctxforge.toml"))?;

        if let Ok(value) = std::env::var("CTXFORGE_MAX_LENGTH") {
            config.context.max_length = value.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "CTXFORGE_MAX_LENGTH must be a positive integer, got '{value}'"
                ))
            })?;
        }
        if let Ok(value) = std::env::var("CTXFORGE_MAX_TOKENS") {
            config.optimizer.max_tokens = value.parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "CTXFORGE_MAX_TOKENS must be a positive integer, got '{value}'"
                ))
            })?;
        }

        config.validate()?;
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

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.context.max_length == 0 {
            return Err(ConfigError::ValidationError(
                "context.max_length must be at least 1".into(),
            ));
        }

        if !(self.feedback.success_threshold > 0.0 && self.feedback.success_threshold <= 1.0) {
            return Err(ConfigError::ValidationError(
                "feedback.success_threshold must be in (0, 1]".into(),
            ));
        }

        if self.optimizer.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "optimizer.max_tokens must be at least 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}
