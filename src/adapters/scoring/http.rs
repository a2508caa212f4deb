//! HTTP Scoring Service - Posts the ordered item list to a remote scorer.
//!
//! # Wire format
//!
//! Request body:
//!
//! ```json
//! { "items": [ { "id": "A", "title": "...", "value_attributes": {...}, "score": null, "tier": null, "order_index": 0 } ] }
//! ```
//!
//! Response body:
//!
//! ```json
//! { "scores": [ { "item_id": "A", "score": 42.0, "tier": "high" } ] }
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::prioritization::{ItemScore, PrioritizedItem};
use crate::ports::{RecalculationError, ScoringService};

/// Configuration for the HTTP scoring service.
#[derive(Debug, Clone)]
pub struct HttpScoringConfig {
    /// Full URL of the scoring endpoint.
    pub endpoint: String,
    /// Optional bearer token.
    api_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpScoringConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|key| key.expose_secret().as_str())
    }
}

/// Scoring service backed by a JSON HTTP endpoint.
pub struct HttpScoringService {
    config: HttpScoringConfig,
    client: Client,
}

impl HttpScoringService {
    /// Creates the service.
    ///
    /// # Errors
    /// Returns `Unavailable` if the HTTP client cannot be built.
    pub fn new(config: HttpScoringConfig) -> Result<Self, RecalculationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RecalculationError::unavailable(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn timeout_error(&self) -> RecalculationError {
        RecalculationError::Timeout {
            timeout_ms: self.config.timeout.as_millis() as u64,
        }
    }

    async fn send(&self, items: &[PrioritizedItem]) -> Result<Response, RecalculationError> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .json(&ScoreRequestBody { items });

        if let Some(key) = self.config.api_key() {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else if e.is_connect() {
                RecalculationError::network(format!("Connection failed: {}", e))
            } else {
                RecalculationError::network(e.to_string())
            }
        })
    }

    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, RecalculationError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            400..=499 => Err(RecalculationError::invalid_response(format!(
                "Rejected with {}: {}",
                status, body
            ))),
            500..=599 => Err(RecalculationError::unavailable(format!(
                "Server error {}: {}",
                status, body
            ))),
            _ => Err(RecalculationError::network(format!(
                "Unexpected status {}: {}",
                status, body
            ))),
        }
    }
}

#[async_trait]
impl ScoringService for HttpScoringService {
    async fn score(
        &self,
        items: Vec<PrioritizedItem>,
    ) -> Result<Vec<ItemScore>, RecalculationError> {
        tracing::debug!(endpoint = %self.config.endpoint, items = items.len(), "Requesting scores");

        let response = self.send(&items).await?;
        let response = self.handle_response_status(response).await?;

        let body: ScoreResponseBody = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.timeout_error()
            } else {
                RecalculationError::invalid_response(format!("Failed to parse response: {}", e))
            }
        })?;

        Ok(body.scores)
    }

    fn name(&self) -> &str {
        "http"
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ScoreRequestBody<'a> {
    items: &'a [PrioritizedItem],
}

#[derive(Debug, Deserialize)]
struct ScoreResponseBody {
    scores: Vec<ItemScore>,
}
