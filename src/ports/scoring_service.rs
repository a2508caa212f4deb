//! Scoring Service Port - Interface for the external score computation.
//!
//! Scores are never computed locally. An implementation receives the full
//! ordered item list and answers with one score per item it recognises.

use async_trait::async_trait;

use crate::domain::prioritization::{ItemScore, PrioritizedItem};

pub use crate::domain::prioritization::RecalculationError;

/// Port for recomputing item scores after a reorder.
#[async_trait]
pub trait ScoringService: Send + Sync {
    /// Score every item in `items`, given in display order.
    ///
    /// # Errors
    /// Returns `RecalculationError` on transport failure or a malformed answer.
    /// Callers keep the current ordering and mark scores stale.
    async fn score(&self, items: Vec<PrioritizedItem>)
        -> Result<Vec<ItemScore>, RecalculationError>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}
