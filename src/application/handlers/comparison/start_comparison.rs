//! StartComparisonHandler - Opens (or resumes) the comparison for a criteria set.

use crate::application::ApplicationError;
use crate::domain::comparison::Criterion;

use super::{ComparisonSessionStore, ComparisonView};

/// Command to start comparing a set of criteria.
#[derive(Debug, Clone)]
pub struct StartComparisonCommand {
    pub criteria: Vec<Criterion>,
}

/// Result of starting a comparison.
#[derive(Debug, Clone)]
pub struct StartComparisonResult {
    pub view: ComparisonView,
    /// False when a stored session for the same criteria was resumed.
    pub started_fresh: bool,
}

/// Handler for starting comparisons.
pub struct StartComparisonHandler {
    sessions: ComparisonSessionStore,
}

impl StartComparisonHandler {
    pub fn new(sessions: ComparisonSessionStore) -> Self {
        Self { sessions }
    }

    pub async fn handle(
        &self,
        cmd: StartComparisonCommand,
    ) -> Result<StartComparisonResult, ApplicationError> {
        let previous_id = self.sessions.load().await.map(|s| *s.id());

        let session = self.sessions.load_or_start(cmd.criteria).await?;
        self.sessions.save(&session).await?;

        Ok(StartComparisonResult {
            started_fresh: previous_id != Some(*session.id()),
            view: ComparisonView::from(&session),
        })
    }
}
