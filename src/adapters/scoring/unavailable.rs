//! Scoring service used when no endpoint is configured.

use async_trait::async_trait;

use crate::domain::prioritization::{ItemScore, PrioritizedItem};
use crate::ports::{RecalculationError, ScoringService};

/// Always fails with `Unavailable`; reordering keeps working with stale scores.
#[derive(Debug, Clone, Default)]
pub struct UnavailableScoringService;

impl UnavailableScoringService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScoringService for UnavailableScoringService {
    async fn score(
        &self,
        _items: Vec<PrioritizedItem>,
    ) -> Result<Vec<ItemScore>, RecalculationError> {
        Err(RecalculationError::unavailable("no scoring endpoint configured"))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
