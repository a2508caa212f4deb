//! Storage backend configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::storage::{FileKeyValueStore, InMemoryKeyValueStore};
use crate::ports::KeyValueStore;

use super::error::ValidationError;

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Which backend persists sessions and orderings
    #[serde(default)]
    pub backend: StorageBackend,

    /// Base directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Storage backend type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    #[default]
    File,
}

impl StorageConfig {
    /// Build the store this configuration selects
    pub fn build_store(&self) -> Arc<dyn KeyValueStore> {
        match self.backend {
            StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
            StorageBackend::File => Arc::new(FileKeyValueStore::new(&self.data_dir)),
        }
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
