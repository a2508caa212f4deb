//! Application-level error type shared by the handlers.

use thiserror::Error;

use crate::domain::comparison::ComparisonError;
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::domain::prioritization::ReorderError;
use crate::ports::StorageError;

/// Errors surfaced by application handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Comparison(#[from] ComparisonError),

    #[error(transparent)]
    Reorder(#[from] ReorderError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No comparison session has been started")]
    NoActiveSession,
}

impl From<ApplicationError> for DomainError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Comparison(e) => e.into(),
            ApplicationError::Reorder(e) => e.into(),
            ApplicationError::Storage(e) => e.into(),
            ApplicationError::Validation(e) => e.into(),
            other @ ApplicationError::NoActiveSession => {
                DomainError::new(ErrorCode::ValidationFailed, other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_keeps_its_code() {
        let err: DomainError = ApplicationError::from(StorageError::io("boom")).into();
        assert_eq!(err.code, ErrorCode::StorageError);
    }

    #[test]
    fn comparison_error_keeps_its_code() {
        let err: DomainError =
            ApplicationError::from(ComparisonError::invalid_scale_value(2.0)).into();
        assert_eq!(err.code, ErrorCode::InvalidScaleValue);
    }
}
