//! Adapters - Implementations of the ports.
//!
//! - `scoring` - ScoringService implementations
//! - `storage` - KeyValueStore implementations

pub mod scoring;
pub mod storage;
