//! A numeric value that may be undefined.

use serde::{Deserialize, Serialize};

/// Denominators at or below this magnitude are treated as zero.
pub const DENOMINATOR_EPSILON: f64 = 1e-12;

/// Result of a quotient that may have no meaningful value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Measure {
    /// A finite value.
    Value(f64),
    /// The denominator was zero (or the quotient overflowed).
    Indeterminate,
}

impl Measure {
    /// Wrap a value, demoting anything non-finite to `Indeterminate`.
    pub fn finite(value: f64) -> Self {
        if value.is_finite() {
            Measure::Value(value)
        } else {
            Measure::Indeterminate
        }
    }

    /// `numerator / denominator`, or `Indeterminate` when the denominator is ~0.
    pub fn ratio(numerator: f64, denominator: f64) -> Self {
        if !denominator.is_finite() || denominator.abs() <= DENOMINATOR_EPSILON {
            return Measure::Indeterminate;
        }
        Self::finite(numerator / denominator)
    }

    /// `numerator / denominator × 100`, with the same zero rule as [`Measure::ratio`].
    pub fn percent(numerator: f64, denominator: f64) -> Self {
        Self::ratio(numerator, denominator).map(|r| r * 100.0)
    }

    /// The finite value, if any.
    pub fn value(self) -> Option<f64> {
        match self {
            Measure::Value(v) => Some(v),
            Measure::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(self) -> bool {
        matches!(self, Measure::Indeterminate)
    }

    /// Apply `f` to a finite value; a non-finite result becomes `Indeterminate`.
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Measure::Value(v) => Self::finite(f(v)),
            Measure::Indeterminate => Measure::Indeterminate,
        }
    }

    /// Fixed-point text, or `N/A`.
    pub fn format(self, decimals: usize) -> String {
        match self {
            Measure::Value(v) => format!("{:.*}", decimals, v),
            Measure::Indeterminate => "N/A".to_string(),
        }
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Measure::finite(value)
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Measure::Value(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Measure::Indeterminate => f.write_str("N/A"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(Measure::ratio(1.0, 0.0), Measure::Indeterminate);
        assert_eq!(Measure::ratio(1.0, 1e-13), Measure::Indeterminate);
        assert_eq!(Measure::ratio(0.0, -0.0), Measure::Indeterminate);
    }

    #[test]
    fn test_ratio_regular() {
        assert_eq!(Measure::ratio(1.0, 4.0), Measure::Value(0.25));
        assert_eq!(Measure::percent(1.98, 2.0).format(4), "99.0000");
    }

    #[test]
    fn test_ratio_overflow_is_indeterminate() {
        assert!(Measure::ratio(f64::MAX, 1e-3).is_indeterminate());
        assert!(Measure::ratio(1.0, f64::INFINITY).is_indeterminate());
    }

    #[test]
    fn test_finite_demotes_nan() {
        assert!(Measure::finite(f64::NAN).is_indeterminate());
        assert!(Measure::from(f64::NEG_INFINITY).is_indeterminate());
        assert_eq!(Measure::from(2.5).value(), Some(2.5));
    }

    #[test]
    fn test_display_precision() {
        assert_eq!(format!("{:.4}", Measure::Value(1.0)), "1.0000");
        assert_eq!(format!("{:.4}", Measure::Indeterminate), "N/A");
        assert_eq!(Measure::Indeterminate.format(2), "N/A");
    }

    #[test]
    fn test_map_keeps_indeterminate() {
        assert!(Measure::Indeterminate.map(|v| v + 1.0).is_indeterminate());
        assert_eq!(Measure::Value(2.0).map(|v| v * 3.0), Measure::Value(6.0));
    }
}
