//! Scoring service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::scoring::{HttpScoringConfig, HttpScoringService, UnavailableScoringService};
use crate::ports::{RecalculationError, ScoringService};

use super::error::ValidationError;

/// Scoring configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Scoring endpoint URL; without one, scores stay stale
    pub endpoint: Option<String>,

    /// Bearer token for the endpoint
    pub api_key: Option<Secret<String>>,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ScoringConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Check if a remote scorer is configured
    pub fn has_endpoint(&self) -> bool {
        self.endpoint.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Build the scoring adapter this configuration selects
    pub fn build_service(&self) -> Result<Arc<dyn ScoringService>, RecalculationError> {
        let endpoint = match &self.endpoint {
            Some(endpoint) if !endpoint.is_empty() => endpoint,
            _ => return Ok(Arc::new(UnavailableScoringService::new())),
        };

        let mut http = HttpScoringConfig::new(endpoint.clone()).with_timeout(self.timeout());
        if let Some(key) = &self.api_key {
            http = http.with_api_key(key.expose_secret().clone());
        }
        Ok(Arc::new(HttpScoringService::new(http)?))
    }

    /// Validate scoring configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_ms == 0 {
            return Err(ValidationError::InvalidTimeout);
        }

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.is_empty()
                && !endpoint.starts_with("http://")
                && !endpoint.starts_with("https://")
            {
                return Err(ValidationError::InvalidScoringEndpoint(endpoint.clone()));
            }
        }

        Ok(())
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_defaults() {
        let config = ScoringConfig::default();
        assert!(!config.has_endpoint());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_endpoint_must_be_http() {
        let config = ScoringConfig {
            endpoint: Some("ftp://scores".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidScoringEndpoint("ftp://scores".to_string()))
        );
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ScoringConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_build_service_selects_adapter() {
        let unavailable = ScoringConfig::default().build_service().unwrap();
        assert_eq!(unavailable.name(), "unavailable");

        let http = ScoringConfig {
            endpoint: Some("http://localhost:9000/score".to_string()),
            api_key: Some(Secret::new("key".to_string())),
            ..Default::default()
        }
        .build_service()
        .unwrap();
        assert_eq!(http.name(), "http");
    }
}
