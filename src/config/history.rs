//! Undo/redo history configuration

use serde::Deserialize;

use crate::domain::prioritization::{HistoryStore, DEFAULT_HISTORY_CAPACITY};

use super::error::ValidationError;

/// Largest accepted history capacity.
pub const MAX_HISTORY_CAPACITY: usize = 1000;

/// History configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// Number of undoable steps kept
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl HistoryConfig {
    /// Build an empty history store with this capacity
    pub fn build_store(&self) -> HistoryStore {
        HistoryStore::new(self.capacity)
    }

    /// Validate history configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.capacity == 0 || self.capacity > MAX_HISTORY_CAPACITY {
            return Err(ValidationError::InvalidHistoryCapacity {
                max: MAX_HISTORY_CAPACITY,
                actual: self.capacity,
            });
        }
        Ok(())
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}
