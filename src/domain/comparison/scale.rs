//! The 9-point reciprocal judgment scale.
//!
//! A judgment answers "how much more important is the first criterion than
//! the second?". Values above 1 favour the first criterion, values below 1
//! are reciprocals favouring the second.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ComparisonError;

/// Relative tolerance used when matching a raw value against the scale.
pub const SCALE_TOLERANCE: f64 = 1e-6;

/// Verbal anchor for a judgment magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Intensity {
    #[default]
    Equal = 1,
    Moderate = 3,
    Strong = 5,
    VeryStrong = 7,
    Extreme = 9,
}

impl Intensity {
    /// All intensities, weakest first.
    pub const ALL: [Intensity; 5] = [
        Intensity::Equal,
        Intensity::Moderate,
        Intensity::Strong,
        Intensity::VeryStrong,
        Intensity::Extreme,
    ];

    /// Returns the magnitude (1, 3, 5, 7 or 9).
    pub fn magnitude(&self) -> u8 {
        *self as u8
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Equal => "Equally important",
            Intensity::Moderate => "Moderately more important",
            Intensity::Strong => "Strongly more important",
            Intensity::VeryStrong => "Very strongly more important",
            Intensity::Extreme => "Extremely more important",
        }
    }
}

/// A validated judgment value: one of `{1/9, 1/7, 1/5, 1/3, 1, 3, 5, 7, 9}`.
///
/// Serialized as the plain number so persisted sessions stay readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScaleValue {
    intensity: Intensity,
    favours_first: bool,
}

impl ScaleValue {
    /// Neutral judgment (value 1).
    pub const EQUAL: Self = Self {
        intensity: Intensity::Equal,
        favours_first: true,
    };

    /// Builds a value from a verbal anchor and a direction.
    pub fn new(intensity: Intensity, favours_first: bool) -> Self {
        Self {
            intensity,
            // Equal has no direction; keep a single canonical form.
            favours_first: favours_first || intensity == Intensity::Equal,
        }
    }

    /// Validates a raw number against the scale.
    ///
    /// # Errors
    ///
    /// - `InvalidScaleValue` if `value` is not within [`SCALE_TOLERANCE`] of one
    ///   of the nine permitted values.
    pub fn try_from_f64(value: f64) -> Result<Self, ComparisonError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ComparisonError::invalid_scale_value(value));
        }

        for intensity in Intensity::ALL {
            let magnitude = f64::from(intensity.magnitude());
            if approx_eq(value, magnitude) {
                return Ok(Self::new(intensity, true));
            }
            if approx_eq(value, 1.0 / magnitude) {
                return Ok(Self::new(intensity, false));
            }
        }

        Err(ComparisonError::invalid_scale_value(value))
    }

    /// Rounds an arbitrary positive ratio to the closest scale value.
    ///
    /// Distance is measured in log-space so `2` and `1/2` round symmetrically.
    /// Ratios beyond 9 (or below 1/9) clamp to the ends of the scale.
    /// Returns `None` for non-positive or non-finite input.
    pub fn nearest(ratio: f64) -> Option<Self> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return None;
        }

        let target = ratio.ln();
        Self::all()
            .into_iter()
            .map(|candidate| (candidate, (candidate.value().ln() - target).abs()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(candidate, _)| candidate)
    }

    /// All nine scale values in ascending order.
    pub fn all() -> Vec<Self> {
        let mut values: Vec<Self> = Intensity::ALL
            .iter()
            .rev()
            .filter(|i| **i != Intensity::Equal)
            .map(|i| Self::new(*i, false))
            .collect();
        values.extend(Intensity::ALL.iter().map(|i| Self::new(*i, true)));
        values
    }

    /// Returns the numeric value.
    pub fn value(&self) -> f64 {
        let magnitude = f64::from(self.intensity.magnitude());
        if self.favours_first {
            magnitude
        } else {
            1.0 / magnitude
        }
    }

    /// Returns the same judgment seen from the other criterion.
    pub fn reciprocal(&self) -> Self {
        Self::new(self.intensity, !self.favours_first)
    }

    /// Returns the verbal anchor.
    pub fn intensity(&self) -> Intensity {
        self.intensity
    }

    /// True when the first criterion is at least as important as the second.
    pub fn favours_first(&self) -> bool {
        self.favours_first
    }
}

impl Default for ScaleValue {
    fn default() -> Self {
        Self::EQUAL
    }
}

impl TryFrom<f64> for ScaleValue {
    type Error = ComparisonError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_from_f64(value)
    }
}

impl From<ScaleValue> for f64 {
    fn from(value: ScaleValue) -> Self {
        value.value()
    }
}

impl fmt::Display for ScaleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.favours_first {
            write!(f, "{}", self.intensity.magnitude())
        } else {
            write!(f, "1/{}", self.intensity.magnitude())
        }
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= SCALE_TOLERANCE * b.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_all_nine_values() {
        for raw in [1.0 / 9.0, 1.0 / 7.0, 1.0 / 5.0, 1.0 / 3.0, 1.0, 3.0, 5.0, 7.0, 9.0] {
            let value = ScaleValue::try_from_f64(raw).unwrap();
            assert!((value.value() - raw).abs() < 1e-12, "round-trip of {}", raw);
        }
    }

    #[test]
    fn accepts_truncated_reciprocals() {
        let value = ScaleValue::try_from_f64(0.3333333).unwrap();
        assert_eq!(value.intensity(), Intensity::Moderate);
        assert!(!value.favours_first());
    }

    #[test]
    fn rejects_values_off_the_scale() {
        for raw in [0.0, -3.0, 2.0, 4.0, 0.5, 10.0, 1.0 / 11.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(
                    ScaleValue::try_from_f64(raw),
                    Err(ComparisonError::InvalidScaleValue { .. })
                ),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn reciprocal_inverts_value() {
        for value in ScaleValue::all() {
            let product = value.value() * value.reciprocal().value();
            assert!((product - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn equal_is_its_own_reciprocal() {
        assert_eq!(ScaleValue::EQUAL.reciprocal(), ScaleValue::EQUAL);
    }

    #[test]
    fn all_is_ascending_and_has_nine_values() {
        let values: Vec<f64> = ScaleValue::all().iter().map(|v| v.value()).collect();
        assert_eq!(values.len(), 9);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn nearest_rounds_in_log_space() {
        assert_eq!(ScaleValue::nearest(2.0).unwrap().value(), 3.0);
        assert_eq!(ScaleValue::nearest(4.0).unwrap().value(), 5.0);
        assert!((ScaleValue::nearest(0.5).unwrap().value() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(ScaleValue::nearest(100.0).unwrap().value(), 9.0);
        assert_eq!(ScaleValue::nearest(1.1).unwrap().value(), 1.0);
        assert!(ScaleValue::nearest(0.0).is_none());
    }

    #[test]
    fn serializes_as_number() {
        let value = ScaleValue::new(Intensity::Strong, false);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "0.2");

        let back: ScaleValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);

        assert!(serde_json::from_str::<ScaleValue>("2.0").is_err());
    }

    #[test]
    fn display_uses_fraction_for_reciprocals() {
        assert_eq!(ScaleValue::new(Intensity::Extreme, true).to_string(), "9");
        assert_eq!(ScaleValue::new(Intensity::Extreme, false).to_string(), "1/9");
    }
}
