//! Scoring Adapters
//!
//! Implementations of the ScoringService port.
//!
//! - **HttpScoringService** - JSON POST to a remote scorer
//! - **MockScoringService** - Scripted and gated responses (testing/development)
//! - **UnavailableScoringService** - Fallback when no endpoint is configured

mod http;
mod mock;
mod unavailable;

pub use http::{HttpScoringConfig, HttpScoringService};
pub use mock::{MockScoreResponse, MockScoringService, ScoreGate};
pub use unavailable::UnavailableScoringService;
