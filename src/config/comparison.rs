//! Comparison engine configuration

use serde::Deserialize;

use crate::domain::comparison::CONSISTENCY_THRESHOLD;

use super::error::ValidationError;

/// Comparison configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonConfig {
    /// Consistency ratio above which judgments are flagged as inconsistent.
    /// Advisory only; it never blocks a judgment.
    #[serde(default = "default_threshold")]
    pub consistency_threshold: f64,
}

impl ComparisonConfig {
    /// Validate comparison configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let t = self.consistency_threshold;
        if !(t > 0.0 && t <= 1.0) {
            return Err(ValidationError::InvalidConsistencyThreshold(t));
        }
        Ok(())
    }
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            consistency_threshold: default_threshold(),
        }
    }
}

fn default_threshold() -> f64 {
    CONSISTENCY_THRESHOLD
}
