//! Comparison-specific error types.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Why a submitted pair was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPairReason {
    /// One of the ids is not a criterion of this session.
    UnknownCriterion,
    /// Both ids name the same criterion.
    SameCriterion,
    /// The pair (in either orientation) already has a judgment.
    AlreadyAnswered,
}

impl fmt::Display for InvalidPairReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvalidPairReason::UnknownCriterion => "unknown criterion",
            InvalidPairReason::SameCriterion => "a criterion cannot be compared with itself",
            InvalidPairReason::AlreadyAnswered => "pair has already been answered",
        };
        write!(f, "{}", s)
    }
}

/// Errors raised by the comparison engine.
///
/// Every variant is raised before any session state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComparisonError {
    #[error("Invalid pair ({first}, {second}): {reason}")]
    InvalidPair {
        first: String,
        second: String,
        reason: InvalidPairReason,
    },

    #[error("Judgment value {value} is not on the 1/9..9 reciprocal scale")]
    InvalidScaleValue { value: f64 },

    #[error("Invalid criteria: {0}")]
    InvalidCriteria(#[from] ValidationError),

    #[error("Persisted session is corrupt: {0}")]
    CorruptRecord(String),
}

impl ComparisonError {
    pub fn invalid_pair(
        first: impl Into<String>,
        second: impl Into<String>,
        reason: InvalidPairReason,
    ) -> Self {
        ComparisonError::InvalidPair {
            first: first.into(),
            second: second.into(),
            reason,
        }
    }

    pub fn invalid_scale_value(value: f64) -> Self {
        ComparisonError::InvalidScaleValue { value }
    }

    pub fn corrupt(message: impl Into<String>) -> Self {
        ComparisonError::CorruptRecord(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ComparisonError::InvalidPair { .. } => ErrorCode::InvalidPair,
            ComparisonError::InvalidScaleValue { .. } => ErrorCode::InvalidScaleValue,
            ComparisonError::InvalidCriteria(_) => ErrorCode::ValidationFailed,
            ComparisonError::CorruptRecord(_) => ErrorCode::InvalidFormat,
        }
    }
}

impl From<ComparisonError> for DomainError {
    fn from(err: ComparisonError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
