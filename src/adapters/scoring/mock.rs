//! Mock Scoring Service for testing.
//!
//! # Features
//!
//! - Scripted responses, consumed in call order
//! - Gated responses held open until the test releases them, so tests
//!   decide the order in which concurrent calls complete
//! - Error injection
//! - Call tracking for verification
//!
//! With nothing scripted, the mock scores by position: the first item gets
//! the highest score and tiers split the list into thirds.
//!
//! # Example
//!
//! ```ignore
//! let scorer = MockScoringService::new();
//! let release_first = scorer.push_gate();
//! let release_second = scorer.push_gate();
//!
//! // ... issue two moves ...
//!
//! release_second.send(Ok(latest_scores)).unwrap();
//! release_first.send(Ok(old_scores)).unwrap();
//! ```

use async_trait::async_trait;
use futures::channel::oneshot;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::prioritization::{ItemScore, PrioritizedItem, PriorityTier};
use crate::ports::{RecalculationError, ScoringService};

/// Sender half handed to tests for a gated call.
pub type ScoreGate = oneshot::Sender<Result<Vec<ItemScore>, RecalculationError>>;

/// A configured mock response.
#[derive(Debug)]
pub enum MockScoreResponse {
    /// Return these scores.
    Scores(Vec<ItemScore>),
    /// Return an error.
    Error(RecalculationError),
    /// Wait for the test to send the outcome.
    Gated(oneshot::Receiver<Result<Vec<ItemScore>, RecalculationError>>),
}

/// Mock scoring service for testing.
#[derive(Debug, Clone)]
pub struct MockScoringService {
    /// Pre-configured responses (consumed in order).
    responses: Arc<Mutex<VecDeque<MockScoreResponse>>>,
    /// Simulated latency per request.
    delay: Duration,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<Vec<PrioritizedItem>>>>,
}

impl Default for MockScoringService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockScoringService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_scores(self, scores: Vec<ItemScore>) -> Self {
        self.push(MockScoreResponse::Scores(scores));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: RecalculationError) -> Self {
        self.push(MockScoreResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a gated response and returns the sender that completes it.
    ///
    /// Dropping the sender completes the call with `Unavailable`.
    pub fn push_gate(&self) -> ScoreGate {
        let (sender, receiver) = oneshot::channel();
        self.push(MockScoreResponse::Gated(receiver));
        sender
    }

    /// Returns the number of calls made to this service.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls.
    pub fn get_calls(&self) -> Vec<Vec<PrioritizedItem>> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, response: MockScoreResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn next_response(&self) -> Option<MockScoreResponse> {
        self.responses.lock().unwrap().pop_front()
    }

    /// Positional scores: earlier items score higher.
    pub fn positional_scores(items: &[PrioritizedItem]) -> Vec<ItemScore> {
        let len = items.len();
        items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let tier = match position * 3 / len.max(1) {
                    0 => PriorityTier::High,
                    1 => PriorityTier::Medium,
                    _ => PriorityTier::Low,
                };
                ItemScore {
                    item_id: item.id.clone(),
                    score: ((len - position) * 10) as f64,
                    tier,
                }
            })
            .collect()
    }
}

#[async_trait]
impl ScoringService for MockScoringService {
    async fn score(
        &self,
        items: Vec<PrioritizedItem>,
    ) -> Result<Vec<ItemScore>, RecalculationError> {
        self.calls.lock().unwrap().push(items.clone());

        // Taken before the delay so responses pair with calls in call order.
        let response = self.next_response();

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match response {
            None => Ok(Self::positional_scores(&items)),
            Some(MockScoreResponse::Scores(scores)) => Ok(scores),
            Some(MockScoreResponse::Error(err)) => Err(err),
            Some(MockScoreResponse::Gated(receiver)) => receiver
                .await
                .unwrap_or_else(|_| Err(RecalculationError::unavailable("gate dropped"))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
