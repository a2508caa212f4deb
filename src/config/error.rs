//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Consistency threshold must be in (0, 1], got {0}")]
    InvalidConsistencyThreshold(f64),

    #[error("History capacity must be between 1 and {max}, got {actual}")]
    InvalidHistoryCapacity { max: usize, actual: usize },

    #[error("Invalid scoring endpoint URL: {0}")]
    InvalidScoringEndpoint(String),

    #[error("Invalid scoring timeout")]
    InvalidTimeout,

    #[error("Storage data directory must not be empty")]
    EmptyDataDir,

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
