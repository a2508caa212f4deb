//! Comparison Module - Pairwise criteria weighting.
//!
//! Turns a sequence of pairwise judgments on the 9-point reciprocal scale
//! into a normalized weight vector plus a consistency diagnostic.
//!
//! # Components
//!
//! - `ScaleValue` / `Intensity` - The permitted judgment values and their verbal anchors
//! - `Pair` - Unordered criterion pair and the deterministic question order
//! - `ComparisonMatrix` - Sparse reciprocal matrix with a pure `get(i, j)`
//! - `weights` - Geometric-mean weights and the consistency ratio
//! - `ComparisonSession` - Aggregate driving the question sequence
//!
//! Everything here is synchronous and free of I/O.

mod errors;
mod matrix;
mod pair;
mod scale;
mod session;
pub mod weights;

pub use errors::{ComparisonError, InvalidPairReason};
pub use matrix::ComparisonMatrix;
pub use pair::{all_pairs, pair_count, Pair};
pub use scale::{Intensity, ScaleValue, SCALE_TOLERANCE};
pub use session::{
    ComparisonSession, ComparisonSessionRecord, Criterion, CriterionWeight, JudgmentRecord,
    PairPrompt, Progress,
};
pub use weights::{ConsistencyReport, CONSISTENCY_THRESHOLD, RANDOM_INDEX};
