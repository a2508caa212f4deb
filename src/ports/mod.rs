//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ScoringService` - External score recomputation after a reorder
//! - `KeyValueStore` - Persistence of comparison sessions and item orderings

mod key_value_store;
mod scoring_service;

pub use key_value_store::{validate_key, KeyValueStore, StorageError};
pub use scoring_service::{RecalculationError, ScoringService};
