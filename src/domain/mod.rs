//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `comparison` - Pairwise criteria comparison, weights and consistency
//! - `prioritization` - Ranked items, undo/redo history and score sequencing

pub mod comparison;
pub mod foundation;
pub mod prioritization;
