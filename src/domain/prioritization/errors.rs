//! Prioritization error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId};

/// Errors raised by reordering. Reordering itself never fails for valid indices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("Index {index} is out of bounds for {len} items")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Duplicate item id '{0}'")]
    DuplicateItem(ItemId),
}

impl ReorderError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReorderError::IndexOutOfBounds { .. } => ErrorCode::IndexOutOfBounds,
            ReorderError::DuplicateItem(_) => ErrorCode::ValidationFailed,
        }
    }
}

impl From<ReorderError> for DomainError {
    fn from(err: ReorderError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Failure of a scoring round trip.
///
/// Always recovered locally: ordering is kept and scores are marked stale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecalculationError {
    #[error("Scoring service unavailable: {0}")]
    Unavailable(String),

    #[error("Scoring request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Scoring service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl RecalculationError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        RecalculationError::Unavailable(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        RecalculationError::InvalidResponse(message.into())
    }

    pub fn network(message: impl Into<String>) -> Self {
        RecalculationError::Network(message.into())
    }

    /// True for failures worth retrying on the next reorder.
    pub fn is_transient(&self) -> bool {
        !matches!(self, RecalculationError::InvalidResponse(_))
    }
}

impl From<RecalculationError> for DomainError {
    fn from(err: RecalculationError) -> Self {
        DomainError::new(ErrorCode::RecalculationFailed, err.to_string())
    }
}
