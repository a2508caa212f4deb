//! Key-Value Store Port - Interface for string-keyed persistence.
//!
//! Values are opaque strings (JSON in practice). A `put` replaces the whole
//! value; the last write wins.

use async_trait::async_trait;

/// Errors that can occur during storage operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    pub fn io(err: impl std::fmt::Display) -> Self {
        StorageError::Io(err.to_string())
    }

    pub fn serialization(err: impl std::fmt::Display) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

impl From<StorageError> for crate::domain::foundation::DomainError {
    fn from(err: StorageError) -> Self {
        use crate::domain::foundation::{DomainError, ErrorCode};
        DomainError::new(ErrorCode::StorageError, err.to_string())
    }
}

/// Port for persisting named string values
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Load the value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys are restricted to `[A-Za-z0-9_.-]` so every backend can use them as file names.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, ErrorCode};

    #[test]
    fn validate_key_accepts_simple_names() {
        assert!(validate_key("comparison").is_ok());
        assert!(validate_key("board-1.order_v2").is_ok());
    }

    #[test]
    fn validate_key_rejects_paths_and_empty() {
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(".hidden").is_err());
    }

    #[test]
    fn storage_error_maps_to_storage_code() {
        let err: DomainError = StorageError::io("disk full").into();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(err.message.contains("disk full"));
    }
}
