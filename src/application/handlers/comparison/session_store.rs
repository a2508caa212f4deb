//! ComparisonSessionStore - Persistence of a comparison session under one key.
//!
//! Loading never fails because of what is on disk: a missing, malformed or
//! mismatched record is logged and replaced by a fresh session.

use std::sync::Arc;

use crate::domain::comparison::{
    ComparisonError, ComparisonSession, ComparisonSessionRecord, Criterion, CONSISTENCY_THRESHOLD,
};
use crate::ports::{KeyValueStore, StorageError};

/// Default storage key for the comparison session.
pub const DEFAULT_COMPARISON_KEY: &str = "comparison-session";

/// Loads and saves a `ComparisonSession` as JSON.
#[derive(Clone)]
pub struct ComparisonSessionStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
    consistency_threshold: f64,
}

impl ComparisonSessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            consistency_threshold: CONSISTENCY_THRESHOLD,
        }
    }

    /// Applies this threshold to every session loaded or started.
    pub fn with_consistency_threshold(mut self, threshold: f64) -> Self {
        self.consistency_threshold = threshold;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored session, or `None` if absent or unreadable.
    pub async fn load(&self) -> Option<ComparisonSession> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read comparison session");
                return None;
            }
        };

        match Self::decode(&raw) {
            Ok(session) => Some(session.with_consistency_threshold(self.consistency_threshold)),
            Err(reason) => {
                tracing::warn!(key = %self.key, %reason, "Discarding unreadable comparison session");
                None
            }
        }
    }

    /// Resumes the stored session when it covers exactly `criteria`,
    /// otherwise starts a fresh one.
    ///
    /// # Errors
    ///
    /// - `InvalidCriteria` if `criteria` contains duplicate ids
    pub async fn load_or_start(
        &self,
        criteria: Vec<Criterion>,
    ) -> Result<ComparisonSession, ComparisonError> {
        if let Some(session) = self.load().await {
            if session.criteria() == criteria.as_slice() {
                tracing::debug!(session_id = %session.id(), "Resumed comparison session");
                return Ok(session);
            }
            tracing::warn!(
                key = %self.key,
                "Stored comparison session covers different criteria, starting fresh"
            );
        }

        let session = ComparisonSession::new(criteria)?
            .with_consistency_threshold(self.consistency_threshold);
        tracing::info!(
            session_id = %session.id(),
            criteria = session.criteria().len(),
            "Started comparison session"
        );
        Ok(session)
    }

    /// Persists `session`, replacing any previous value.
    pub async fn save(&self, session: &ComparisonSession) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(&session.to_record()).map_err(StorageError::serialization)?;
        self.store.put(&self.key, &json).await
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.delete(&self.key).await
    }

    fn decode(raw: &str) -> Result<ComparisonSession, String> {
        let record: ComparisonSessionRecord =
            serde_json::from_str(raw).map_err(|e| e.to_string())?;
        ComparisonSession::reconstitute(record).map_err(|e| e.to_string())
    }
}
