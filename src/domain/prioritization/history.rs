//! Bounded linear undo/redo history of item orderings.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::domain::foundation::Timestamp;

use super::{PrioritizedItem, ScoreStatus};

/// Default number of undoable steps kept.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Immutable capture of a full ordered item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub items: Vec<PrioritizedItem>,
    pub timestamp: Timestamp,
    pub action_label: String,
    /// Freshness of the captured scores; never `Recalculating`.
    #[serde(default)]
    pub score_status: ScoreStatus,
}

impl HistorySnapshot {
    pub fn new(items: Vec<PrioritizedItem>, action_label: impl Into<String>) -> Self {
        Self {
            items,
            timestamp: Timestamp::now(),
            action_label: action_label.into(),
            score_status: ScoreStatus::Fresh,
        }
    }

    pub fn with_score_status(mut self, score_status: ScoreStatus) -> Self {
        self.score_status = score_status;
        self
    }
}

/// Snapshots addressed by a cursor.
///
/// Entries before the cursor can be undone. When the cursor is not at the
/// end, `entries[cursor]` is the state currently displayed and everything
/// after it can be redone. Recording a new snapshot drops that redo tail.
///
/// # Invariants
///
/// - `cursor <= entries.len()`
/// - `cursor <= capacity` (undo depth never exceeds capacity)
/// - `entries.len() <= capacity + 1` (the extra slot holds the redo target)
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<HistorySnapshot>,
    cursor: usize,
    capacity: usize,
}

impl HistoryStore {
    /// Creates an empty history; a capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            cursor: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records the state that existed before a mutation.
    ///
    /// Discards the redo tail, then evicts the oldest entries beyond capacity.
    pub fn record(&mut self, snapshot: HistorySnapshot) {
        self.entries.truncate(self.cursor);
        self.entries.push_back(snapshot);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len();
    }

    /// Steps back one snapshot.
    ///
    /// `current` is kept as the redo target when undoing from the newest
    /// state. Returns `None` when there is nothing to undo.
    pub fn undo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        if self.cursor == 0 {
            return None;
        }
        if self.cursor == self.entries.len() {
            self.entries.push_back(current);
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Steps forward one snapshot, or `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<HistorySnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    pub fn redo_depth(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor + 1)
    }

    /// Label of the action `undo` would revert.
    pub fn undo_label(&self) -> Option<&str> {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .map(|s| s.action_label.as_str())
    }

    /// Label of the action `redo` would reapply.
    pub fn redo_label(&self) -> Option<&str> {
        if !self.can_redo() {
            return None;
        }
        self.entries.get(self.cursor).map(|s| s.action_label.as_str())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
