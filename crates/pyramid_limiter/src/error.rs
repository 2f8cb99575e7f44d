//! Error types for the pyramid limiter.
//!
//! Decisions never fail; only reading or validating configuration can.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LimiterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Configuration serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid limit `{field}`: {reason}")]
    InvalidLimit { field: &'static str, reason: String },
}
