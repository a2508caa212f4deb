//! Unordered criterion pairs and their deterministic question order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An unordered pair of criterion indices, stored with `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair {
    first: usize,
    second: usize,
}

impl Pair {
    /// Creates the canonical pair for two distinct indices, in either order.
    ///
    /// Returns `None` when both indices are equal.
    pub fn new(a: usize, b: usize) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Index of the lower-ordered criterion.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Index of the higher-ordered criterion.
    pub fn second(&self) -> usize {
        self.second
    }

    /// True if `(a, b)` names this pair in canonical orientation.
    pub fn is_canonical(&self, a: usize, b: usize) -> bool {
        self.first == a && self.second == b
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// Number of unordered pairs among `n` criteria: `n(n-1)/2`.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// All pairs in index-pair order: `(0,1), (0,2), .., (0,n-1), (1,2), ..`.
pub fn all_pairs(n: usize) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(pair_count(n));
    for first in 0..n {
        for second in (first + 1)..n {
            pairs.push(Pair { first, second });
        }
    }
    pairs
}
