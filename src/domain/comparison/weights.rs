//! Weight derivation and consistency diagnostics.
//!
//! Weights use the geometric-mean approximation to the principal eigenvector.
//! `lambda_max` is a single-pass estimate: each column sum of the matrix is
//! scaled by that column's weight and the products are summed. No iterative
//! eigensolver is used; the consistency figures depend on this exact estimate.

use serde::{Deserialize, Serialize};

use super::ComparisonMatrix;

/// Conventional upper bound for an acceptable consistency ratio.
pub const CONSISTENCY_THRESHOLD: f64 = 0.10;

/// Saaty random index by matrix size (index = number of criteria).
pub const RANDOM_INDEX: [f64; 11] = [
    0.0, 0.0, 0.0, 0.58, 0.9, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49,
];

/// Random index for `n` criteria. Sizes beyond the table use the value at index 9.
pub fn random_index(n: usize) -> f64 {
    RANDOM_INDEX.get(n).copied().unwrap_or(RANDOM_INDEX[9])
}

/// Normalized geometric-mean weights, one per row.
///
/// Row `i` gets `gm[i] = (prod_j m[i][j])^(1/n)`, then `w[i] = gm[i] / sum(gm)`.
/// An empty matrix yields an empty vector.
pub fn geometric_mean_weights(matrix: &ComparisonMatrix) -> Vec<f64> {
    let n = matrix.size();
    if n == 0 {
        return Vec::new();
    }

    // Summing logs keeps the product of up to n factors of 9 in range.
    let means: Vec<f64> = (0..n)
        .map(|i| {
            let log_sum: f64 = (0..n).map(|j| matrix.get(i, j).ln()).sum();
            (log_sum / n as f64).exp()
        })
        .collect();

    let total: f64 = means.iter().sum();
    means.iter().map(|gm| gm / total).collect()
}

/// Uniform weights for `n` criteria.
pub fn uniform_weights(n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    vec![1.0 / n as f64; n]
}

/// Consistency diagnostic for one matrix and weight vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyReport {
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub random_index: f64,
    pub ratio: f64,
}

impl ConsistencyReport {
    /// Report for a matrix with nothing to be inconsistent about.
    pub fn perfect(n: usize) -> Self {
        Self {
            lambda_max: n as f64,
            consistency_index: 0.0,
            random_index: random_index(n),
            ratio: 0.0,
        }
    }

    /// True when the ratio is within the conventional 0.10 bound.
    pub fn is_consistent(&self) -> bool {
        self.is_within(CONSISTENCY_THRESHOLD)
    }

    /// True when the ratio does not exceed `threshold`.
    pub fn is_within(&self, threshold: f64) -> bool {
        self.ratio <= threshold
    }
}

/// Computes `lambda_max`, CI and CR for `matrix` using `weights` as the vector.
///
/// `weights` must have one entry per row.
pub fn consistency(matrix: &ComparisonMatrix, weights: &[f64]) -> ConsistencyReport {
    let n = matrix.size();
    debug_assert_eq!(weights.len(), n);

    let lambda_max: f64 = weights
        .iter()
        .enumerate()
        .map(|(j, w)| w * matrix.column_sum(j))
        .sum();

    let consistency_index = if n > 1 {
        (lambda_max - n as f64) / (n as f64 - 1.0)
    } else {
        0.0
    };

    let ri = random_index(n);
    let ratio = if ri > 0.0 { consistency_index / ri } else { 0.0 };

    ConsistencyReport {
        lambda_max,
        consistency_index,
        random_index: ri,
        ratio,
    }
}
