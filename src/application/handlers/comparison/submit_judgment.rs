//! SubmitJudgmentHandler - Records one pairwise judgment.

use crate::application::ApplicationError;
use crate::domain::foundation::CriterionId;

use super::{ComparisonSessionStore, ComparisonView};

/// Command to record "`first` is `value` times as important as `second`".
#[derive(Debug, Clone)]
pub struct SubmitJudgmentCommand {
    pub first: CriterionId,
    pub second: CriterionId,
    pub value: f64,
}

/// Result of a recorded judgment: next pair, weights, consistency and progress.
#[derive(Debug, Clone)]
pub struct SubmitJudgmentResult {
    pub view: ComparisonView,
}

/// Handler for submitting judgments.
pub struct SubmitJudgmentHandler {
    sessions: ComparisonSessionStore,
}

impl SubmitJudgmentHandler {
    pub fn new(sessions: ComparisonSessionStore) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: SubmitJudgmentCommand,
    ) -> Result<SubmitJudgmentResult, ApplicationError> {
        // 1. Load session
        let mut session = self
            .sessions
            .load()
            .await
            .ok_or(ApplicationError::NoActiveSession)?;

        // 2. Apply judgment (no state change on error)
        session.submit_judgment(&cmd.first, &cmd.second, cmd.value)?;

        // 3. Persist
        self.sessions.save(&session).await?;

        let view = ComparisonView::from(&session);
        tracing::info!(
            session_id = %view.session_id,
            answered = view.progress.answered,
            total = view.progress.total,
            consistency_ratio = view.consistency.ratio,
            "Judgment recorded"
        );
        if view.progress.is_complete() && !view.is_consistent {
            tracing::warn!(
                session_id = %view.session_id,
                consistency_ratio = view.consistency.ratio,
                "Completed comparison is inconsistent"
            );
        }

        Ok(SubmitJudgmentResult { view })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::comparison::{ComparisonError, Criterion, InvalidPairReason};
    use crate::ports::{KeyValueStore, StorageError};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn cid(id: &str) -> CriterionId {
        CriterionId::new(id).unwrap()
    }

    async fn started(kv: Arc<dyn KeyValueStore>, ids: &[&str]) -> ComparisonSessionStore {
        let store = ComparisonSessionStore::new(kv, "cmp");
        let criteria = ids
            .iter()
            .map(|id| Criterion::new(cid(id), *id))
            .collect();
        let session = store.load_or_start(criteria).await.unwrap();
        store.save(&session).await.unwrap();
        store
    }

    fn judge(first: &str, second: &str, value: f64) -> SubmitJudgmentCommand {
        SubmitJudgmentCommand {
            first: cid(first),
            second: cid(second),
            value,
        }
    }

    #[tokio::test]
    async fn judgment_updates_and_persists_session() {
        let store = started(Arc::new(InMemoryKeyValueStore::new()), &["a", "b", "c"]).await;
        let handler = SubmitJudgmentHandler::new(store.clone());

        let result = handler.handle(judge("a", "b", 3.0)).await.unwrap();
        assert_eq!(result.view.progress.answered, 1);
        assert!(result.view.next_pair.is_some());

        let reloaded = store.load().await.unwrap();
        assert_eq!(reloaded.judgment(&cid("a"), &cid("b")), Some(3.0));
    }

    #[tokio::test]
    async fn full_consistent_set_gives_expected_weights() {
        let store = started(Arc::new(InMemoryKeyValueStore::new()), &["a", "b", "c"]).await;
        let handler = SubmitJudgmentHandler::new(store);

        handler.handle(judge("a", "b", 3.0)).await.unwrap();
        handler.handle(judge("a", "c", 9.0)).await.unwrap();
        let result = handler.handle(judge("b", "c", 3.0)).await.unwrap();

        assert!(result.view.next_pair.is_none());
        assert!(result.view.is_consistent);
        assert!(result.view.consistency.ratio < 1e-9);
        let ranked = result.view.ranked_weights();
        assert_eq!(ranked[0].criterion_id.as_str(), "a");
        assert!((ranked[0].weight - 9.0 / 13.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn answered_pair_is_rejected_without_saving() {
        let store = started(Arc::new(InMemoryKeyValueStore::new()), &["a", "b", "c"]).await;
        let handler = SubmitJudgmentHandler::new(store.clone());
        handler.handle(judge("a", "b", 3.0)).await.unwrap();

        let err = handler.handle(judge("b", "a", 5.0)).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Comparison(ComparisonError::InvalidPair {
                reason: InvalidPairReason::AlreadyAnswered,
                ..
            })
        ));
        assert_eq!(store.load().await.unwrap().judgment(&cid("a"), &cid("b")), Some(3.0));
    }

    #[tokio::test]
    async fn off_scale_value_is_rejected() {
        let store = started(Arc::new(InMemoryKeyValueStore::new()), &["a", "b"]).await;
        let err = SubmitJudgmentHandler::new(store)
            .handle(judge("a", "b", 2.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Comparison(ComparisonError::InvalidScaleValue { .. })
        ));
    }

    #[tokio::test]
    async fn without_session_fails() {
        let store = ComparisonSessionStore::new(Arc::new(InMemoryKeyValueStore::new()), "cmp");
        let err = SubmitJudgmentHandler::new(store)
            .handle(judge("a", "b", 3.0))
            .await
            .unwrap_err();
        assert_eq!(err, ApplicationError::NoActiveSession);
    }

    struct ReadOnlyStore {
        inner: InMemoryKeyValueStore,
    }

    #[async_trait]
    impl KeyValueStore for ReadOnlyStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(key).await
        }

        async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::io("read-only"))
        }

        async fn delete(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::io("read-only"))
        }
    }

    #[tokio::test]
    async fn storage_failure_is_reported() {
        let inner = InMemoryKeyValueStore::new();
        started(Arc::new(inner.clone()), &["a", "b"]).await;

        let store = ComparisonSessionStore::new(Arc::new(ReadOnlyStore { inner }), "cmp");
        let err = SubmitJudgmentHandler::new(store)
            .handle(judge("a", "b", 3.0))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::Storage(StorageError::Io(_))));
    }
}
