//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod errors;
pub mod handlers;

pub use errors::ApplicationError;
pub use handlers::{
    // Comparison handlers
    ComparisonSessionStore, ComparisonView, GetComparisonResultHandler, GetComparisonResultQuery,
    ResetComparisonCommand, ResetComparisonHandler, ResetComparisonResult,
    StartComparisonCommand, StartComparisonHandler, StartComparisonResult, SubmitJudgmentCommand,
    SubmitJudgmentHandler, SubmitJudgmentResult, DEFAULT_COMPARISON_KEY,
    // Prioritization handlers
    OrderStore, ReorderCoordinator, DEFAULT_ORDER_KEY,
};
