//! Backlog items and the attributes the scoring service reads.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ItemId, ValidationError};

/// Upper bound for 1-10 attribute ratings.
pub const MAX_RATING: u8 = 10;

/// Delivery risk of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Discrete bucket derived from a score by the scoring service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    High,
    #[default]
    Medium,
    Low,
}

impl PriorityTier {
    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::High => "High",
            PriorityTier::Medium => "Medium",
            PriorityTier::Low => "Low",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inputs to the external score computation.
///
/// Deserialization goes through the same rating checks as [`ValueAttributes::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawValueAttributes")]
pub struct ValueAttributes {
    pub business_value: u8,
    pub technical_complexity: u8,
    pub story_points: u32,
    pub risk_level: RiskLevel,
    pub priority_tier: PriorityTier,
}

impl ValueAttributes {
    /// Creates attributes, validating the 1-10 ratings.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `business_value` or `technical_complexity` is outside 1..=10
    pub fn new(
        business_value: u8,
        technical_complexity: u8,
        story_points: u32,
        risk_level: RiskLevel,
    ) -> Result<Self, ValidationError> {
        Self::check_rating("business_value", business_value)?;
        Self::check_rating("technical_complexity", technical_complexity)?;
        Ok(Self {
            business_value,
            technical_complexity,
            story_points,
            risk_level,
            priority_tier: PriorityTier::default(),
        })
    }

    fn check_rating(field: &str, value: u8) -> Result<(), ValidationError> {
        if value == 0 || value > MAX_RATING {
            return Err(ValidationError::out_of_range(
                field,
                1,
                i64::from(MAX_RATING),
                i64::from(value),
            ));
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct RawValueAttributes {
    business_value: u8,
    technical_complexity: u8,
    story_points: u32,
    risk_level: RiskLevel,
    priority_tier: PriorityTier,
}

impl TryFrom<RawValueAttributes> for ValueAttributes {
    type Error = ValidationError;

    fn try_from(raw: RawValueAttributes) -> Result<Self, Self::Error> {
        let attributes = Self::new(
            raw.business_value,
            raw.technical_complexity,
            raw.story_points,
            raw.risk_level,
        )?;
        Ok(Self {
            priority_tier: raw.priority_tier,
            ..attributes
        })
    }
}

impl Default for ValueAttributes {
    fn default() -> Self {
        Self {
            business_value: 5,
            technical_complexity: 5,
            story_points: 3,
            risk_level: RiskLevel::default(),
            priority_tier: PriorityTier::default(),
        }
    }
}

/// A backlog item in a ranked list.
///
/// `order_index` is dense and zero-based. `score` and `tier` are whatever the
/// scoring service last returned and are never computed locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedItem {
    pub id: ItemId,
    pub title: String,
    pub value_attributes: ValueAttributes,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub tier: Option<PriorityTier>,
    pub order_index: usize,
}

impl PrioritizedItem {
    /// Creates an unscored item; its position is assigned when it joins a list.
    pub fn new(id: ItemId, title: impl Into<String>, value_attributes: ValueAttributes) -> Self {
        Self {
            id,
            title: title.into(),
            value_attributes,
            score: None,
            tier: None,
            order_index: 0,
        }
    }

    /// Sets an initial score (e.g. from a previous session).
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// One entry of a scoring response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemScore {
    pub item_id: ItemId,
    pub score: f64,
    pub tier: PriorityTier,
}
