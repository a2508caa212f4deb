//! Read model returned by the comparison handlers.

use serde::Serialize;

use crate::domain::comparison::{
    ComparisonSession, ConsistencyReport, Criterion, CriterionWeight, PairPrompt, Progress,
};
use crate::domain::foundation::ComparisonSessionId;

/// Snapshot of a comparison session for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonView {
    pub session_id: ComparisonSessionId,
    pub criteria: Vec<Criterion>,
    pub next_pair: Option<PairPrompt>,
    /// Aligned to criteria order.
    pub weights: Vec<CriterionWeight>,
    pub consistency: ConsistencyReport,
    pub is_consistent: bool,
    pub progress: Progress,
}

impl From<&ComparisonSession> for ComparisonView {
    fn from(session: &ComparisonSession) -> Self {
        Self {
            session_id: *session.id(),
            criteria: session.criteria().to_vec(),
            next_pair: session.next_pair(),
            weights: session.weights(),
            consistency: *session.consistency_report(),
            is_consistent: session.is_consistent(),
            progress: session.progress(),
        }
    }
}

impl ComparisonView {
    /// Weights sorted from most to least important.
    pub fn ranked_weights(&self) -> Vec<CriterionWeight> {
        let mut ranked = self.weights.clone();
        ranked.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        ranked
    }
}
