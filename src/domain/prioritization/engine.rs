//! ReorderingEngine - direct-manipulation reordering with undo/redo and
//! sequenced score refresh.
//!
//! The engine is a synchronous state machine. A move returns the new order
//! immediately together with a `ScoringRequest`; whoever drives the engine
//! performs the request and feeds the outcome back through `apply_scores`.
//! Only the response to the most recently issued request is applied.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::reorder::{reindex, reorder};
use super::{
    HistorySnapshot, HistoryStore, ItemScore, PrioritizedItem, RecalculationError, ReorderError,
};

/// Freshness of the displayed scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Scores match the current order.
    #[default]
    Fresh,
    /// A request is outstanding; last-known scores are shown meanwhile.
    Recalculating { sequence: u64 },
    /// The last request failed; scores are from an earlier order.
    Stale { reason: String },
}

/// A scoring call the engine wants performed.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringRequest {
    pub sequence: u64,
    pub items: Vec<PrioritizedItem>,
}

/// Result of a move.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub items: Vec<PrioritizedItem>,
    /// `None` for a no-op move.
    pub request: Option<ScoringRequest>,
}

/// What happened to a scoring response.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreApplication {
    /// Scores were written to `updated` items.
    Applied { updated: usize },
    /// A newer request or an undo/redo superseded this response.
    Stale,
    /// The current request failed; ordering and old scores are kept.
    Failed(RecalculationError),
}

/// Owner of the ranked item list and its history.
#[derive(Debug, Clone)]
pub struct ReorderingEngine {
    items: Vec<PrioritizedItem>,
    history: HistoryStore,
    last_sequence: u64,
    status: ScoreStatus,
}

impl ReorderingEngine {
    /// Creates an engine over `items`, in the order given.
    ///
    /// `order_index` values are normalized to positions.
    ///
    /// # Errors
    ///
    /// - `DuplicateItem` if two items share an id
    pub fn new(items: Vec<PrioritizedItem>, history: HistoryStore) -> Result<Self, ReorderError> {
        let mut engine = Self {
            items: Vec::new(),
            history,
            last_sequence: 0,
            status: ScoreStatus::Fresh,
        };
        engine.replace_items(items)?;
        Ok(engine)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn items(&self) -> &[PrioritizedItem] {
        &self.items
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn score_status(&self) -> &ScoreStatus {
        &self.status
    }

    /// UI hint only; ordering never waits on scoring.
    pub fn is_recalculating(&self) -> bool {
        matches!(self.status, ScoreStatus::Recalculating { .. })
    }

    /// Reason the displayed scores are stale, if the last request failed.
    pub fn recalculation_error(&self) -> Option<&str> {
        match &self.status {
            ScoreStatus::Stale { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Sequence number of the most recently issued request (0 if none).
    pub fn last_sequence(&self) -> u64 {
        self.last_sequence
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves the item at `from` to `to`.
    ///
    /// Records the pre-move order in history and issues a scoring request.
    /// A move with `from == to` changes nothing and issues no request.
    ///
    /// # Errors
    ///
    /// - `IndexOutOfBounds` if either index is outside the list
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<MoveOutcome, ReorderError> {
        let reordered = reorder(&self.items, from, to)?;

        if from == to {
            return Ok(MoveOutcome {
                items: self.items.clone(),
                request: None,
            });
        }

        let label = format!(
            "Move '{}' from #{} to #{}",
            self.items[from].title,
            from + 1,
            to + 1
        );
        let status = self.snapshot_status();
        let previous = std::mem::replace(&mut self.items, reordered);
        self.history
            .record(HistorySnapshot::new(previous, label).with_score_status(status));

        let request = self.issue_request();
        tracing::info!(
            from,
            to,
            sequence = request.sequence,
            undo_depth = self.history.undo_depth(),
            "Reordered item"
        );

        Ok(MoveOutcome {
            items: self.items.clone(),
            request: Some(request),
        })
    }

    /// Requests scores for the current order without moving anything.
    ///
    /// Used after loading a list. Returns `None` for an empty list.
    pub fn refresh_scores(&mut self) -> Option<ScoringRequest> {
        if self.items.is_empty() {
            return None;
        }
        let request = self.issue_request();
        tracing::debug!(sequence = request.sequence, "Requested score refresh");
        Some(request)
    }

    /// Feeds back the outcome of request `sequence`.
    ///
    /// Responses to anything but the latest outstanding request are discarded.
    /// Scores are matched by item id; items missing from the response, or
    /// given a non-finite score, keep their previous value.
    pub fn apply_scores(
        &mut self,
        sequence: u64,
        result: Result<Vec<ItemScore>, RecalculationError>,
    ) -> ScoreApplication {
        let is_current =
            matches!(self.status, ScoreStatus::Recalculating { sequence: s } if s == sequence);
        if !is_current {
            tracing::debug!(
                sequence,
                latest = self.last_sequence,
                "Discarding superseded scoring response"
            );
            return ScoreApplication::Stale;
        }

        match result {
            Ok(scores) => {
                let by_id: HashMap<_, _> = scores.iter().map(|s| (&s.item_id, s)).collect();
                let mut updated = 0;
                for item in &mut self.items {
                    if let Some(score) = by_id.get(&item.id) {
                        if score.score.is_finite() {
                            item.score = Some(score.score);
                            item.tier = Some(score.tier);
                            updated += 1;
                        }
                    }
                }
                self.status = ScoreStatus::Fresh;
                tracing::debug!(sequence, updated, "Applied scoring response");
                ScoreApplication::Applied { updated }
            }
            Err(err) => {
                tracing::warn!(sequence, error = %err, "Score recalculation failed");
                self.status = ScoreStatus::Stale {
                    reason: err.to_string(),
                };
                ScoreApplication::Failed(err)
            }
        }
    }

    /// Restores the previous order, scores included, without rescoring.
    ///
    /// Returns `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Vec<PrioritizedItem>> {
        let current = HistorySnapshot::new(self.items.clone(), "Current order")
            .with_score_status(self.snapshot_status());
        let snapshot = self.history.undo(current)?;
        self.restore(snapshot, "undo");
        Some(self.items.clone())
    }

    /// Reapplies the next order, scores included, without rescoring.
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Vec<PrioritizedItem>> {
        let snapshot = self.history.redo()?;
        self.restore(snapshot, "redo");
        Some(self.items.clone())
    }

    /// Loads a new list and clears history.
    ///
    /// # Errors
    ///
    /// - `DuplicateItem` if two items share an id; the engine is unchanged
    pub fn replace_items(&mut self, mut items: Vec<PrioritizedItem>) -> Result<(), ReorderError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(&item.id) {
                return Err(ReorderError::DuplicateItem(item.id.clone()));
            }
        }

        reindex(&mut items);
        self.items = items;
        self.history.clear();
        self.status = ScoreStatus::Fresh;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn issue_request(&mut self) -> ScoringRequest {
        self.last_sequence += 1;
        self.status = ScoreStatus::Recalculating {
            sequence: self.last_sequence,
        };
        ScoringRequest {
            sequence: self.last_sequence,
            items: self.items.clone(),
        }
    }

    /// Status recorded with a snapshot of the current list.
    ///
    /// An outstanding request can never complete for a snapshot, so its
    /// scores are captured as stale.
    fn snapshot_status(&self) -> ScoreStatus {
        match &self.status {
            ScoreStatus::Recalculating { .. } => ScoreStatus::Stale {
                reason: "Order changed before scores arrived".to_string(),
            },
            settled => settled.clone(),
        }
    }

    fn restore(&mut self, snapshot: HistorySnapshot, action: &str) {
        self.items = snapshot.items;
        // Snapshot scores belong to the snapshot order; in-flight results do not.
        if let ScoreStatus::Recalculating { sequence } = self.status {
            tracing::debug!(sequence, action, "Superseding in-flight scoring request");
        }
        self.status = snapshot.score_status;
        tracing::info!(
            action,
            label = %snapshot.action_label,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "Restored item order"
        );
    }
}
