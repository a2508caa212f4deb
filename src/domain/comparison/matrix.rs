//! Sparse reciprocal comparison matrix.
//!
//! Only one judgment per unordered pair is stored. The mirror cell is derived
//! as the reciprocal, the diagonal is always 1 and unanswered cells read as 1
//! (neutral), so the matrix is well-formed at every point of a session.

use std::collections::HashMap;

use super::{Pair, ScaleValue};

/// `n x n` pairwise comparison matrix keyed by unordered pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonMatrix {
    size: usize,
    judgments: HashMap<Pair, ScaleValue>,
}

impl ComparisonMatrix {
    /// Creates an all-neutral matrix for `size` criteria.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            judgments: HashMap::new(),
        }
    }

    /// Number of criteria (rows / columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Effective value of cell `(i, j)`.
    ///
    /// Indices outside the matrix read as neutral.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.judgment(i, j).map(|v| v.value()).unwrap_or(1.0)
    }

    /// Recorded judgment for `(i, j)` seen from row `i`, if any.
    pub fn judgment(&self, i: usize, j: usize) -> Option<ScaleValue> {
        if i == j {
            return Some(ScaleValue::EQUAL);
        }
        let pair = Pair::new(i, j)?;
        let stored = self.judgments.get(&pair)?;
        if pair.is_canonical(i, j) {
            Some(*stored)
        } else {
            Some(stored.reciprocal())
        }
    }

    /// Records "row `i` versus column `j` is `value`".
    ///
    /// The judgment is stored once on the canonical pair; recording the same
    /// pair again overwrites it. Callers enforce the answer-once rule.
    pub fn record(&mut self, i: usize, j: usize, value: ScaleValue) {
        if let Some(pair) = Pair::new(i, j) {
            let canonical = if pair.is_canonical(i, j) {
                value
            } else {
                value.reciprocal()
            };
            self.judgments.insert(pair, canonical);
        }
    }

    /// True if the pair already carries a judgment.
    pub fn is_answered(&self, pair: &Pair) -> bool {
        self.judgments.contains_key(pair)
    }

    /// Number of stored judgments.
    pub fn answered_count(&self) -> usize {
        self.judgments.len()
    }

    /// Sum of column `j`.
    pub fn column_sum(&self, j: usize) -> f64 {
        (0..self.size).map(|i| self.get(i, j)).sum()
    }

    /// Dense row-major copy, mostly for display and debugging.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        (0..self.size)
            .map(|i| (0..self.size).map(|j| self.get(i, j)).collect())
            .collect()
    }

    /// Drops every judgment.
    pub fn clear(&mut self) {
        self.judgments.clear();
    }
}
