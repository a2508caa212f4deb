//! GetComparisonResultHandler - Query for the current weights and consistency.

use crate::application::ApplicationError;

use super::{ComparisonSessionStore, ComparisonView};

/// Query for the active comparison's result.
#[derive(Debug, Clone, Default)]
pub struct GetComparisonResultQuery;

/// Handler for reading comparison results.
pub struct GetComparisonResultHandler {
    sessions: ComparisonSessionStore,
}

impl GetComparisonResultHandler {
    pub fn new(sessions: ComparisonSessionStore) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        _query: GetComparisonResultQuery,
    ) -> Result<ComparisonView, ApplicationError> {
        self.sessions
            .load()
            .await
            .map(|session| ComparisonView::from(&session))
            .ok_or(ApplicationError::NoActiveSession)
    }
}
