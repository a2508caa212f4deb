//! Priority Sherpa - Criteria weighting and backlog prioritization
//!
//! This crate derives criterion weights from pairwise comparisons and keeps
//! a ranked backlog in order through undoable moves, while scores are
//! recomputed by an external service in the background.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
