//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PRIORITY_SHERPA` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use priority_sherpa::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("History keeps {} steps", config.history.capacity);
//! ```

mod comparison;
mod error;
mod history;
mod logging;
mod scoring;
mod storage;

pub use comparison::ComparisonConfig;
pub use error::{ConfigError, ValidationError};
pub use history::{HistoryConfig, MAX_HISTORY_CAPACITY};
pub use logging::LoggingConfig;
pub use scoring::ScoringConfig;
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Comparison engine settings (consistency threshold)
    #[serde(default)]
    pub comparison: ComparisonConfig,

    /// Undo/redo history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// External scoring service
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Persistence backend
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PRIORITY_SHERPA` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PRIORITY_SHERPA__HISTORY__CAPACITY=100` -> `history.capacity = 100`
    /// - `PRIORITY_SHERPA__SCORING__ENDPOINT=...` -> `scoring.endpoint = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PRIORITY_SHERPA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.comparison.validate()?;
        self.history.validate()?;
        self.scoring.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
