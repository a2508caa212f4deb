//! ResetComparisonHandler - Discards all judgments of the active session.

use crate::application::ApplicationError;

use super::{ComparisonSessionStore, ComparisonView};

/// Command to reset the active comparison.
#[derive(Debug, Clone, Default)]
pub struct ResetComparisonCommand;

/// Result of a reset.
#[derive(Debug, Clone)]
pub struct ResetComparisonResult {
    pub view: ComparisonView,
}

/// Handler for resetting comparisons.
pub struct ResetComparisonHandler {
    sessions: ComparisonSessionStore,
}

impl ResetComparisonHandler {
    pub fn new(sessions: ComparisonSessionStore) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        _cmd: ResetComparisonCommand,
    ) -> Result<ResetComparisonResult, ApplicationError> {
        let mut session = self
            .sessions
            .load()
            .await
            .ok_or(ApplicationError::NoActiveSession)?;

        let discarded = session.progress().answered;
        session.reset();
        self.sessions.save(&session).await?;

        tracing::info!(session_id = %session.id(), discarded, "Comparison reset");

        Ok(ResetComparisonResult {
            view: ComparisonView::from(&session),
        })
    }
}
