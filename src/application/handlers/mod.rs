//! Command and query handlers.

pub mod comparison;
pub mod prioritization;

pub use comparison::{
    ComparisonSessionStore, ComparisonView, GetComparisonResultHandler, GetComparisonResultQuery,
    ResetComparisonCommand, ResetComparisonHandler, ResetComparisonResult,
    StartComparisonCommand, StartComparisonHandler, StartComparisonResult, SubmitJudgmentCommand,
    SubmitJudgmentHandler, SubmitJudgmentResult, DEFAULT_COMPARISON_KEY,
};
pub use prioritization::{OrderStore, ReorderCoordinator, DEFAULT_ORDER_KEY};
