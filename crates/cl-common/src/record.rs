//! Raw measurements of one two-cart collision.

use crate::error::{RecordError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One of the two carts on the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cart {
    One,
    Two,
}

impl Cart {
    /// Both carts, in display order.
    pub const ALL: [Cart; 2] = [Cart::One, Cart::Two];

    /// Human label used in tables and chart legends.
    pub fn label(self) -> &'static str {
        match self {
            Cart::One => "Cart 1",
            Cart::Two => "Cart 2",
        }
    }

    /// Subscript used in formulas (`m1`, `v2f`, ...).
    pub fn index(self) -> u8 {
        match self {
            Cart::One => 1,
            Cart::Two => 2,
        }
    }
}

impl std::fmt::Display for Cart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Results of a single elastic-collision simulation.
///
/// Values arrive already computed by the simulator; this crate never
/// recomputes energies or momenta from masses and velocities, so a record
/// can carry the simulator's rounding and the report will show it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    /// Mass of cart 1 (kg).
    pub m1: f64,
    /// Mass of cart 2 (kg).
    pub m2: f64,
    /// Initial velocity of cart 1 (m/s, signed).
    pub v1: f64,
    /// Initial velocity of cart 2 (m/s, signed).
    pub v2: f64,
    /// Final velocity of cart 1 (m/s, signed).
    pub v1f: f64,
    /// Final velocity of cart 2 (m/s, signed).
    pub v2f: f64,
    /// Total kinetic energy before the collision (J).
    #[serde(alias = "ecInicial", alias = "ec_inicial")]
    pub ke_initial: f64,
    /// Total kinetic energy after the collision (J).
    #[serde(alias = "ecFinal", alias = "ec_final")]
    pub ke_final: f64,
    /// Total linear momentum before the collision (kg·m/s).
    #[serde(alias = "pInicial", alias = "p_inicial")]
    pub p_initial: f64,
    /// Total linear momentum after the collision (kg·m/s).
    #[serde(alias = "pFinal", alias = "p_final")]
    pub p_final: f64,
}

impl ExperimentRecord {
    /// Parse a record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a record file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Mass of the given cart.
    pub fn mass(&self, cart: Cart) -> f64 {
        match cart {
            Cart::One => self.m1,
            Cart::Two => self.m2,
        }
    }

    /// Velocity of the given cart before the collision.
    pub fn initial_velocity(&self, cart: Cart) -> f64 {
        match cart {
            Cart::One => self.v1,
            Cart::Two => self.v2,
        }
    }

    /// Velocity of the given cart after the collision.
    pub fn final_velocity(&self, cart: Cart) -> f64 {
        match cart {
            Cart::One => self.v1f,
            Cart::Two => self.v2f,
        }
    }

    /// Check the record invariants, reporting the first offending field.
    ///
    /// Masses must be strictly positive, kinetic energies non-negative, and
    /// every field finite.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.fields() {
            if !value.is_finite() {
                return Err(RecordError::InvalidField {
                    field,
                    reason: format!("must be finite (got {value})"),
                });
            }
        }
        for (field, value) in [("m1", self.m1), ("m2", self.m2)] {
            if value <= 0.0 {
                return Err(RecordError::InvalidField {
                    field,
                    reason: format!("must be greater than zero (got {value})"),
                });
            }
        }
        for (field, value) in [("ke_initial", self.ke_initial), ("ke_final", self.ke_final)] {
            if value < 0.0 {
                return Err(RecordError::InvalidField {
                    field,
                    reason: format!("must not be negative (got {value})"),
                });
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, f64); 10] {
        [
            ("m1", self.m1),
            ("m2", self.m2),
            ("v1", self.v1),
            ("v2", self.v2),
            ("v1f", self.v1f),
            ("v2f", self.v2f),
            ("ke_initial", self.ke_initial),
            ("ke_final", self.ke_final),
            ("p_initial", self.p_initial),
            ("p_final", self.p_final),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_mass_swap() -> ExperimentRecord {
        ExperimentRecord {
            m1: 1.0,
            m2: 1.0,
            v1: 2.0,
            v2: 0.0,
            v1f: 0.0,
            v2f: 2.0,
            ke_initial: 2.0,
            ke_final: 2.0,
            p_initial: 2.0,
            p_final: 2.0,
        }
    }

    #[test]
    fn test_valid_record() {
        assert!(equal_mass_swap().validate().is_ok());
    }

    #[test]
    fn test_zero_mass_rejected() {
        let record = ExperimentRecord {
            m2: 0.0,
            ..equal_mass_swap()
        };
        let err = record.validate().unwrap_err();
        assert_eq!(err.field(), Some("m2"));
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn test_negative_mass_rejected() {
        let record = ExperimentRecord {
            m1: -3.0,
            ..equal_mass_swap()
        };
        assert_eq!(record.validate().unwrap_err().field(), Some("m1"));
    }

    #[test]
    fn test_non_finite_rejected_before_sign_checks() {
        let record = ExperimentRecord {
            m2: 0.0,
            v1f: f64::NAN,
            ..equal_mass_swap()
        };
        assert_eq!(record.validate().unwrap_err().field(), Some("m2"));

        let record = ExperimentRecord {
            p_final: f64::INFINITY,
            ..equal_mass_swap()
        };
        assert_eq!(record.validate().unwrap_err().field(), Some("p_final"));
    }

    #[test]
    fn test_negative_energy_rejected() {
        let record = ExperimentRecord {
            ke_final: -0.5,
            ..equal_mass_swap()
        };
        assert_eq!(record.validate().unwrap_err().field(), Some("ke_final"));
    }

    #[test]
    fn test_zero_energy_is_valid() {
        let record = ExperimentRecord {
            v1: 0.0,
            v2f: 0.0,
            ke_initial: 0.0,
            ke_final: 0.0,
            p_initial: 0.0,
            p_final: 0.0,
            ..equal_mass_swap()
        };
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_accessors_by_cart() {
        let record = equal_mass_swap();
        assert_eq!(record.initial_velocity(Cart::One), 2.0);
        assert_eq!(record.final_velocity(Cart::Two), 2.0);
        assert_eq!(record.mass(Cart::Two), 1.0);
        assert_eq!(Cart::Two.to_string(), "Cart 2");
    }

    #[test]
    fn test_json_accepts_simulator_field_names() {
        let json = r#"{
            "m1": 1.0, "m2": 1.0, "v1": 2.0, "v2": 0.0, "v1f": 0.0, "v2f": 2.0,
            "ecInicial": 2.0, "ecFinal": 1.98, "pInicial": 2.0, "pFinal": 2.0
        }"#;
        let record = ExperimentRecord::from_json(json).unwrap();
        assert_eq!(record.ke_final, 1.98);
        assert_eq!(record.p_initial, 2.0);
    }

    #[test]
    fn test_json_missing_field_is_error() {
        let err = ExperimentRecord::from_json(r#"{"m1": 1.0}"#).unwrap_err();
        assert!(matches!(err, RecordError::Json(_)));
    }
}
