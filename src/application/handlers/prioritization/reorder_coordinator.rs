//! ReorderCoordinator - Runs scoring calls in the background for a `ReorderingEngine`.
//!
//! Moves, undo and redo return immediately. Each scoring request is spawned
//! on the Tokio runtime and its outcome comes back over a channel tagged with
//! the request's sequence number; the engine decides whether it still applies.
//!
//! All methods that issue requests must be called from within a Tokio runtime.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::application::ApplicationError;
use crate::domain::prioritization::{
    HistoryStore, ItemScore, PrioritizedItem, RecalculationError, ReorderingEngine,
    ScoreApplication, ScoreStatus, ScoringRequest,
};
use crate::ports::{ScoringService, StorageError};

use super::OrderStore;

/// A scoring outcome on its way back to the engine.
#[derive(Debug)]
struct ScoringResponse {
    sequence: u64,
    result: Result<Vec<ItemScore>, RecalculationError>,
}

/// Owns a `ReorderingEngine` and the scoring calls it issues.
pub struct ReorderCoordinator {
    engine: ReorderingEngine,
    scorer: Arc<dyn ScoringService>,
    timeout: Option<Duration>,
    sender: mpsc::UnboundedSender<ScoringResponse>,
    receiver: mpsc::UnboundedReceiver<ScoringResponse>,
    outstanding: usize,
}

impl ReorderCoordinator {
    pub fn new(engine: ReorderingEngine, scorer: Arc<dyn ScoringService>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            engine,
            scorer,
            timeout: None,
            sender,
            receiver,
            outstanding: 0,
        }
    }

    /// Convenience constructor over a fresh history.
    ///
    /// # Errors
    ///
    /// - `DuplicateItem` if two items share an id
    pub fn with_items(
        items: Vec<PrioritizedItem>,
        history: HistoryStore,
        scorer: Arc<dyn ScoringService>,
    ) -> Result<Self, ApplicationError> {
        Ok(Self::new(ReorderingEngine::new(items, history)?, scorer))
    }

    /// Fails scoring calls that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn engine(&self) -> &ReorderingEngine {
        &self.engine
    }

    pub fn items(&self) -> &[PrioritizedItem] {
        self.engine.items()
    }

    pub fn score_status(&self) -> &ScoreStatus {
        self.engine.score_status()
    }

    pub fn is_recalculating(&self) -> bool {
        self.engine.is_recalculating()
    }

    /// Number of spawned scoring calls whose outcome has not been consumed.
    pub fn outstanding_requests(&self) -> usize {
        self.outstanding
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────────────────────

    /// Moves an item and starts rescoring in the background.
    ///
    /// Returns the new order without waiting for scores.
    pub fn move_item(
        &mut self,
        from: usize,
        to: usize,
    ) -> Result<Vec<PrioritizedItem>, ApplicationError> {
        let outcome = self.engine.move_item(from, to)?;
        if let Some(request) = outcome.request {
            self.dispatch(request);
        }
        Ok(outcome.items)
    }

    /// Restores the previous order; returns `None` at the start of history.
    pub fn undo(&mut self) -> Option<Vec<PrioritizedItem>> {
        self.engine.undo()
    }

    /// Reapplies an undone order; returns `None` at the end of history.
    pub fn redo(&mut self) -> Option<Vec<PrioritizedItem>> {
        self.engine.redo()
    }

    /// Replaces the list, clears history and requests fresh scores.
    pub fn load_items(&mut self, items: Vec<PrioritizedItem>) -> Result<(), ApplicationError> {
        self.engine.replace_items(items)?;
        if let Some(request) = self.engine.refresh_scores() {
            self.dispatch(request);
        }
        Ok(())
    }

    /// Persists the current order, scores included.
    pub async fn save_order(&self, store: &OrderStore) -> Result<(), StorageError> {
        store.save(self.engine.items()).await
    }

    /// Replaces the list with the stored one, if any.
    ///
    /// Returns `false` (leaving the current list) when nothing usable is
    /// stored, including a stored list the engine rejects.
    pub async fn restore_order(&mut self, store: &OrderStore) -> bool {
        let Some(items) = store.load().await else {
            return false;
        };
        if let Err(e) = self.load_items(items) {
            tracing::warn!(key = store.key(), error = %e, "Discarding unusable item order");
            return false;
        }
        tracing::info!(items = self.engine.items().len(), "Restored item order");
        true
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Response handling
    // ─────────────────────────────────────────────────────────────────────────

    /// Waits for the next scoring outcome and feeds it to the engine.
    ///
    /// Returns `None` immediately when no call is outstanding.
    pub async fn process_next_response(&mut self) -> Option<ScoreApplication> {
        if self.outstanding == 0 {
            return None;
        }
        let response = self.receiver.recv().await?;
        Some(self.apply(response))
    }

    /// Feeds every outcome that has already arrived, without waiting.
    pub fn drain_responses(&mut self) -> Vec<ScoreApplication> {
        let mut applied = Vec::new();
        while let Ok(response) = self.receiver.try_recv() {
            applied.push(self.apply(response));
        }
        applied
    }

    /// Waits until every spawned call has reported back.
    pub async fn settle(&mut self) -> Vec<ScoreApplication> {
        let mut applied = Vec::new();
        while let Some(application) = self.process_next_response().await {
            applied.push(application);
        }
        applied
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn dispatch(&mut self, request: ScoringRequest) {
        let ScoringRequest { sequence, items } = request;
        let scorer = Arc::clone(&self.scorer);
        let sender = self.sender.clone();
        let timeout = self.timeout;

        self.outstanding += 1;
        tracing::debug!(sequence, scorer = scorer.name(), "Dispatching scoring request");

        let call = tokio::spawn(async move {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, scorer.score(items))
                    .await
                    .unwrap_or_else(|_| {
                        Err(RecalculationError::Timeout {
                            timeout_ms: limit.as_millis() as u64,
                        })
                    }),
                None => scorer.score(items).await,
            }
        });

        // Every dispatched request reports back exactly once, even if the
        // scorer panics, so `outstanding` always drains.
        tokio::spawn(async move {
            let result = call.await.unwrap_or_else(|e| {
                Err(RecalculationError::unavailable(format!(
                    "scoring task aborted: {}",
                    e
                )))
            });
            // The receiver lives as long as the coordinator.
            let _ = sender.send(ScoringResponse { sequence, result });
        });
    }

    fn apply(&mut self, response: ScoringResponse) -> ScoreApplication {
        self.outstanding = self.outstanding.saturating_sub(1);
        let application = self.engine.apply_scores(response.sequence, response.result);
        if let ScoreApplication::Failed(err) = &application {
            tracing::warn!(
                sequence = response.sequence,
                transient = err.is_transient(),
                error = %err,
                "Keeping previous scores"
            );
        }
        application
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scoring::MockScoringService;
    use crate::ports::KeyValueStore;
    use async_trait::async_trait;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::foundation::ItemId;
    use crate::domain::prioritization::{PriorityTier, ValueAttributes};

    fn items(ids: &[&str]) -> Vec<PrioritizedItem> {
        ids.iter()
            .map(|id| PrioritizedItem::new(ItemId::new(*id).unwrap(), *id, ValueAttributes::default()))
            .collect()
    }

    fn ids(items: &[PrioritizedItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    fn score(id: &str, value: f64) -> ItemScore {
        ItemScore {
            item_id: ItemId::new(id).unwrap(),
            score: value,
            tier: PriorityTier::Medium,
        }
    }

    fn score_of(coordinator: &ReorderCoordinator, id: &str) -> Option<f64> {
        coordinator.items().iter().find(|i| i.id.as_str() == id)?.score
    }

    fn coordinator(scorer: MockScoringService, ids: &[&str]) -> ReorderCoordinator {
        ReorderCoordinator::with_items(items(ids), HistoryStore::new(10), Arc::new(scorer)).unwrap()
    }

    #[tokio::test]
    async fn move_returns_before_scores_arrive() {
        let scorer = MockScoringService::new();
        let gate = scorer.push_gate();
        let mut coordinator = coordinator(scorer, &["A", "B", "C", "D"]);

        let order = coordinator.move_item(2, 0).unwrap();
        assert_eq!(ids(&order), vec!["C", "A", "B", "D"]);
        assert!(coordinator.is_recalculating());

        gate.send(Ok(vec![score("C", 99.0)])).unwrap();
        let applied = coordinator.process_next_response().await.unwrap();
        assert_eq!(applied, ScoreApplication::Applied { updated: 1 });
        assert_eq!(score_of(&coordinator, "C"), Some(99.0));
        assert!(!coordinator.is_recalculating());
    }

    #[tokio::test]
    async fn late_response_to_older_move_is_discarded() {
        let scorer = MockScoringService::new();
        let first = scorer.push_gate();
        let second = scorer.push_gate();
        let mut coordinator = coordinator(scorer, &["A", "B", "C"]);

        coordinator.move_item(0, 2).unwrap();
        coordinator.move_item(0, 1).unwrap();

        second.send(Ok(vec![score("A", 2.0)])).unwrap();
        assert_eq!(
            coordinator.process_next_response().await,
            Some(ScoreApplication::Applied { updated: 1 })
        );

        first.send(Ok(vec![score("A", 1.0)])).unwrap();
        assert_eq!(
            coordinator.process_next_response().await,
            Some(ScoreApplication::Stale)
        );
        assert_eq!(score_of(&coordinator, "A"), Some(2.0));
        assert_eq!(coordinator.outstanding_requests(), 0);
    }

    #[tokio::test]
    async fn failed_scoring_keeps_order_and_marks_stale() {
        let scorer = MockScoringService::new().with_error(RecalculationError::network("reset"));
        let mut coordinator = coordinator(scorer, &["A", "B"]);

        coordinator.move_item(1, 0).unwrap();
        let applied = coordinator.settle().await;

        assert!(matches!(applied.as_slice(), [ScoreApplication::Failed(_)]));
        assert_eq!(ids(coordinator.items()), vec!["B", "A"]);
        assert!(matches!(coordinator.score_status(), ScoreStatus::Stale { .. }));
    }

    #[tokio::test]
    async fn slow_scorer_times_out() {
        let scorer = MockScoringService::new().with_delay(Duration::from_millis(200));
        let mut coordinator = coordinator(scorer, &["A", "B"]).with_timeout(Duration::from_millis(10));

        coordinator.move_item(0, 1).unwrap();
        let applied = coordinator.settle().await;

        assert_eq!(
            applied,
            vec![ScoreApplication::Failed(RecalculationError::Timeout { timeout_ms: 10 })]
        );
    }

    #[tokio::test]
    async fn undo_supersedes_in_flight_request() {
        let scorer = MockScoringService::new();
        let gate = scorer.push_gate();
        let mut coordinator = coordinator(scorer.clone(), &["A", "B"]);

        coordinator.move_item(0, 1).unwrap();
        let restored = coordinator.undo().unwrap();
        assert_eq!(ids(&restored), vec!["A", "B"]);

        gate.send(Ok(vec![score("A", 5.0)])).unwrap();
        assert_eq!(
            coordinator.process_next_response().await,
            Some(ScoreApplication::Stale)
        );
        assert_eq!(score_of(&coordinator, "A"), None);
        assert_eq!(scorer.call_count(), 1);
    }

    #[tokio::test]
    async fn process_without_outstanding_returns_none() {
        let mut coordinator = coordinator(MockScoringService::new(), &["A"]);
        assert!(coordinator.process_next_response().await.is_none());
        assert!(coordinator.drain_responses().is_empty());
    }

    #[tokio::test]
    async fn drain_applies_arrived_responses() {
        let mut coordinator = coordinator(MockScoringService::new(), &["A", "B", "C"]);
        coordinator.move_item(0, 2).unwrap();

        while coordinator.outstanding_requests() > 0 {
            tokio::task::yield_now().await;
            coordinator.drain_responses();
        }
        assert_eq!(score_of(&coordinator, "B"), Some(30.0));
    }

    #[tokio::test]
    async fn save_and_restore_order() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = OrderStore::new(kv, "order");

        let mut original = coordinator(MockScoringService::new(), &["A", "B", "C"]);
        original.move_item(2, 0).unwrap();
        original.settle().await;
        original.save_order(&store).await.unwrap();

        let mut restored = coordinator(MockScoringService::new(), &["X"]);
        assert!(restored.restore_order(&store).await);
        assert_eq!(ids(restored.items()), vec!["C", "A", "B"]);
        assert_eq!(score_of(&restored, "C"), Some(30.0));
        assert!(!restored.engine().can_undo());

        restored.settle().await;
        assert_eq!(restored.score_status(), &ScoreStatus::Fresh);
    }

    #[tokio::test]
    async fn restore_without_stored_order_keeps_list() {
        let store = OrderStore::new(Arc::new(InMemoryKeyValueStore::new()), "order");
        let mut coordinator = coordinator(MockScoringService::new(), &["A", "B"]);

        assert!(!coordinator.restore_order(&store).await);
        assert_eq!(ids(coordinator.items()), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn restore_with_duplicate_ids_keeps_list() {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let item = serde_json::to_value(&items(&["A"])[0]).unwrap();
        let record = serde_json::json!({
            "items": [item.clone(), item],
            "saved_at": "2024-01-15T10:30:00Z",
        });
        kv.put("order", &record.to_string()).await.unwrap();
        let store = OrderStore::new(kv, "order");

        let mut coordinator = coordinator(MockScoringService::new(), &["X", "Y"]);
        assert!(!coordinator.restore_order(&store).await);
        assert_eq!(ids(coordinator.items()), vec!["X", "Y"]);
        assert_eq!(coordinator.outstanding_requests(), 0);
    }

    struct PanickingScorer;

    #[async_trait]
    impl ScoringService for PanickingScorer {
        async fn score(
            &self,
            _items: Vec<PrioritizedItem>,
        ) -> Result<Vec<ItemScore>, RecalculationError> {
            panic!("scorer bug")
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn panicking_scorer_still_settles() {
        let mut coordinator =
            ReorderCoordinator::with_items(items(&["A", "B"]), HistoryStore::new(10), Arc::new(PanickingScorer))
                .unwrap();

        coordinator.move_item(0, 1).unwrap();
        let applied = coordinator.settle().await;

        assert!(matches!(
            applied.as_slice(),
            [ScoreApplication::Failed(RecalculationError::Unavailable(_))]
        ));
        assert_eq!(coordinator.outstanding_requests(), 0);
        assert_eq!(ids(coordinator.items()), vec!["B", "A"]);
    }
}
