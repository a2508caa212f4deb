//! Comparison handlers - session lifecycle over a `KeyValueStore`.

mod get_comparison_result;
mod reset_comparison;
mod session_store;
mod start_comparison;
mod submit_judgment;
mod view;

pub use get_comparison_result::{GetComparisonResultHandler, GetComparisonResultQuery};
pub use reset_comparison::{ResetComparisonCommand, ResetComparisonHandler, ResetComparisonResult};
pub use session_store::{ComparisonSessionStore, DEFAULT_COMPARISON_KEY};
pub use start_comparison::{StartComparisonCommand, StartComparisonHandler, StartComparisonResult};
pub use submit_judgment::{SubmitJudgmentCommand, SubmitJudgmentHandler, SubmitJudgmentResult};
pub use view::ComparisonView;
