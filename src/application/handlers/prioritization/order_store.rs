//! OrderStore - Persistence of the ranked item list under one key.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::prioritization::PrioritizedItem;
use crate::ports::{KeyValueStore, StorageError};

/// Default storage key for the item order.
pub const DEFAULT_ORDER_KEY: &str = "item-order";

#[derive(Debug, Serialize, Deserialize)]
struct OrderRecord {
    items: Vec<PrioritizedItem>,
    saved_at: Timestamp,
}

/// Loads and saves an ordered item list as JSON.
#[derive(Clone)]
pub struct OrderStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl OrderStore {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn save(&self, items: &[PrioritizedItem]) -> Result<(), StorageError> {
        let record = OrderRecord {
            items: items.to_vec(),
            saved_at: Timestamp::now(),
        };
        let json = serde_json::to_string(&record).map_err(StorageError::serialization)?;
        self.store.put(&self.key, &json).await
    }

    /// Loads the stored list in stored order.
    ///
    /// Missing or unreadable values yield `None`; the reason is logged.
    pub async fn load(&self) -> Option<Vec<PrioritizedItem>> {
        let raw = match self.store.get(&self.key).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Failed to read item order");
                return None;
            }
        };

        match serde_json::from_str::<OrderRecord>(&raw) {
            Ok(record) => Some(record.items),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Discarding unreadable item order");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::foundation::ItemId;
    use crate::domain::prioritization::ValueAttributes;

    #[tokio::test]
    async fn save_then_load_keeps_order_and_scores() {
        let store = OrderStore::new(Arc::new(InMemoryKeyValueStore::new()), DEFAULT_ORDER_KEY);
        let items = vec![
            PrioritizedItem::new(ItemId::new("B").unwrap(), "Second", ValueAttributes::default())
                .with_score(3.5),
            PrioritizedItem::new(ItemId::new("A").unwrap(), "First", ValueAttributes::default()),
        ];

        store.save(&items).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn unreadable_value_loads_as_none() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        kv.put(DEFAULT_ORDER_KEY, "[not json").await.unwrap();
        assert!(OrderStore::new(kv, DEFAULT_ORDER_KEY).load().await.is_none());
    }

    #[tokio::test]
    async fn invalid_item_fields_load_as_none() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = OrderStore::new(kv.clone(), DEFAULT_ORDER_KEY);
        let items = vec![PrioritizedItem::new(
            ItemId::new("A").unwrap(),
            "First",
            ValueAttributes::default(),
        )];
        store.save(&items).await.unwrap();
        let saved = kv.get(DEFAULT_ORDER_KEY).await.unwrap().unwrap();

        let zero_rating = saved.replace("\"business_value\":5", "\"business_value\":0");
        assert_ne!(zero_rating, saved);
        kv.put(DEFAULT_ORDER_KEY, &zero_rating).await.unwrap();
        assert!(store.load().await.is_none());

        let empty_id = saved.replace("\"id\":\"A\"", "\"id\":\"\"");
        assert_ne!(empty_id, saved);
        kv.put(DEFAULT_ORDER_KEY, &empty_id).await.unwrap();
        assert!(store.load().await.is_none());
    }
}
