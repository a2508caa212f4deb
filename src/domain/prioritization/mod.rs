//! Prioritization - ranked backlog items with undoable reordering.
//!
//! Reordering is synchronous and local. Scores come from an external
//! service and are applied only when they answer the latest request.

mod engine;
mod errors;
mod history;
mod item;
mod reorder;

pub use engine::{MoveOutcome, ReorderingEngine, ScoreApplication, ScoreStatus, ScoringRequest};
pub use errors::{RecalculationError, ReorderError};
pub use history::{HistorySnapshot, HistoryStore, DEFAULT_HISTORY_CAPACITY};
pub use item::{ItemScore, PrioritizedItem, PriorityTier, RiskLevel, ValueAttributes, MAX_RATING};
pub use reorder::{reindex, reorder};
