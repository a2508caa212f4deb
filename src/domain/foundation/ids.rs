//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a pairwise comparison session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonSessionId(Uuid);

impl ComparisonSessionId {
    /// Creates a new random ComparisonSessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ComparisonSessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ComparisonSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ComparisonSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ComparisonSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Caller-supplied identifier of a decision criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CriterionId(String);

impl CriterionId {
    /// Creates a new CriterionId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("criterion_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CriterionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CriterionId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CriterionId> for String {
    fn from(id: CriterionId) -> Self {
        id.0
    }
}

/// Caller-supplied identifier of a backlog work item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new ItemId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("item_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemId> for String {
    fn from(id: ItemId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparison_session_id_generates_unique_values() {
        let id1 = ComparisonSessionId::new();
        let id2 = ComparisonSessionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn comparison_session_id_parses_from_string() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id: ComparisonSessionId = uuid_str.parse().unwrap();
        assert_eq!(id.to_string(), uuid_str);
    }

    #[test]
    fn comparison_session_id_rejects_invalid_uuid() {
        let result: Result<ComparisonSessionId, _> = "not-a-uuid".parse();
        assert!(result.is_err());
    }

    #[test]
    fn criterion_id_rejects_empty_string() {
        assert!(CriterionId::new("").is_err());
        assert!(CriterionId::new("   ").is_err());
    }

    #[test]
    fn criterion_id_accepts_value() {
        let id = CriterionId::new("cost").unwrap();
        assert_eq!(id.as_str(), "cost");
        assert_eq!(format!("{}", id), "cost");
    }

    #[test]
    fn item_id_serializes_transparently() {
        let id = ItemId::new("PROJ-42").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"PROJ-42\"");

        let back: ItemId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn empty_ids_fail_to_deserialize() {
        assert!(serde_json::from_str::<ItemId>("\"\"").is_err());
        assert!(serde_json::from_str::<CriterionId>("\"  \"").is_err());
    }

    #[test]
    fn item_id_rejects_empty_string() {
        let err = ItemId::new("").unwrap_err();
        assert_eq!(format!("{}", err), "Field 'item_id' cannot be empty");
    }
}
