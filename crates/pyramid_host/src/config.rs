//! Configuration management for the pyramid host.
//!
//! Loads the TOML configuration file, creating one with the legacy defaults
//! when it does not exist yet, and validates it before the guard is built.

use pyramid_limiter::{LimitSettings, LimiterError, PyramidConfig, ZoneConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

fn default_pyramids() -> ZoneConfig {
    PyramidConfig::legacy().pyramids
}

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Quota limits
    #[serde(default)]
    pub limits: LimitSettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Gated zones keyed by name; an absent table means no zones
    #[serde(default)]
    pub pyramids: ZoneConfig,
}

/// Logging system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            limits: LimitSettings::default(),
            logging: LoggingSettings::default(),
            pyramids: default_pyramids(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    ///
    /// If the file doesn't exist, writes the default configuration to the
    /// given path and returns it.
    pub async fn load_from_file(path: &Path) -> Result<Self, LimiterError> {
        match Self::read_from_file(path).await? {
            Some(config) => Ok(config),
            None => {
                let default_config = AppConfig::default();
                let toml_content = toml::to_string_pretty(&default_config)?;
                tokio::fs::write(path, toml_content).await?;
                warn!(
                    "⚠️ Configuration file not found, created default: {}",
                    path.display()
                );
                Ok(default_config)
            }
        }
    }

    /// Parses the file if it exists. Never writes anything.
    pub async fn read_from_file(path: &Path) -> Result<Option<Self>, LimiterError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(Some(config))
    }

    /// The limiter's share of the configuration.
    pub fn pyramid_config(&self) -> PyramidConfig {
        PyramidConfig {
            limits: self.limits.clone(),
            pyramids: self.pyramids.clone(),
        }
    }

    /// Validates log level and limits. Inverted zones are accepted.
    pub fn validate(&self) -> Result<(), LimiterError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(LimiterError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            )));
        }

        self.limits.validate()?;

        Ok(())
    }
}
