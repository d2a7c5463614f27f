//! Derivation of every secondary quantity the report shows.

use crate::measure::{Measure, DENOMINATOR_EPSILON};
use cl_common::{Cart, ExperimentRecord};
use serde::{Deserialize, Serialize};

/// Per-cart quantities before and after the collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CartMetrics {
    pub cart: Cart,
    /// Mass (kg).
    pub mass: f64,
    /// Velocity before the collision (m/s).
    pub velocity_initial: f64,
    /// Velocity after the collision (m/s).
    pub velocity_final: f64,
    /// `v_final - v_initial` (m/s).
    pub velocity_delta: f64,
    /// `m·v` before (kg·m/s).
    pub momentum_initial: f64,
    /// `m·v` after (kg·m/s).
    pub momentum_final: f64,
    pub momentum_delta: f64,
    /// `½·m·v²` before (J).
    pub kinetic_initial: f64,
    /// `½·m·v²` after (J).
    pub kinetic_final: f64,
    pub kinetic_delta: f64,
}

impl CartMetrics {
    fn from_record(record: &ExperimentRecord, cart: Cart) -> Self {
        let mass = record.mass(cart);
        let vi = record.initial_velocity(cart);
        let vf = record.final_velocity(cart);
        let momentum_initial = mass * vi;
        let momentum_final = mass * vf;
        let kinetic_initial = 0.5 * mass * vi * vi;
        let kinetic_final = 0.5 * mass * vf * vf;
        Self {
            cart,
            mass,
            velocity_initial: vi,
            velocity_final: vf,
            velocity_delta: vf - vi,
            momentum_initial,
            momentum_final,
            momentum_delta: momentum_final - momentum_initial,
            kinetic_initial,
            kinetic_final,
            kinetic_delta: kinetic_final - kinetic_initial,
        }
    }
}

/// Complete metric set for one experiment.
///
/// Built once per report run and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// `m1 + m2` (kg).
    pub total_mass: f64,
    pub cart1: CartMetrics,
    pub cart2: CartMetrics,
    /// `|Ec_initial - Ec_final|` (J).
    pub energy_error: f64,
    /// `|p_initial - p_final|` (kg·m/s).
    pub momentum_error: f64,
    /// `Ec_final / Ec_initial × 100`.
    pub energy_conserved_pct: Measure,
    /// `p_final / p_initial × 100`.
    pub momentum_conserved_pct: Measure,
    /// `|v1 - v2|` (m/s).
    pub approach_speed: f64,
    /// `|v1f - v2f|` (m/s).
    pub separation_speed: f64,
    /// Coefficient of restitution, `separation / approach`.
    pub restitution: Measure,
    /// `m1·m2 / (m1 + m2)` (kg).
    pub reduced_mass: f64,
    /// Center-of-mass velocity before the collision (m/s).
    pub cm_velocity_initial: f64,
    /// Center-of-mass velocity after the collision (m/s).
    pub cm_velocity_final: f64,
    /// `m1 / m2`.
    pub mass_ratio: Measure,
    /// `Ec_initial / (m1 + m2)` (J/kg); indeterminate with no initial energy.
    pub energy_per_mass: Measure,
    /// `p_initial / (m1 + m2)` (m/s); indeterminate with no initial momentum.
    pub momentum_per_mass: Measure,
}

impl DerivedMetrics {
    /// Derive all metrics from a record.
    ///
    /// Total and side-effect free. The record is expected to have passed
    /// [`ExperimentRecord::validate`]; unvalidated input still produces a
    /// value, with undefined quotients reported as `Indeterminate`.
    pub fn compute(record: &ExperimentRecord) -> Self {
        let total_mass = record.m1 + record.m2;
        let cart1 = CartMetrics::from_record(record, Cart::One);
        let cart2 = CartMetrics::from_record(record, Cart::Two);

        let approach_speed = (record.v1 - record.v2).abs();
        let separation_speed = (record.v1f - record.v2f).abs();

        let cm_velocity_initial =
            Measure::ratio(cart1.momentum_initial + cart2.momentum_initial, total_mass);
        let cm_velocity_final =
            Measure::ratio(cart1.momentum_final + cart2.momentum_final, total_mass);

        Self {
            total_mass,
            cart1,
            cart2,
            energy_error: (record.ke_initial - record.ke_final).abs(),
            momentum_error: (record.p_initial - record.p_final).abs(),
            energy_conserved_pct: Measure::percent(record.ke_final, record.ke_initial),
            momentum_conserved_pct: Measure::percent(record.p_final, record.p_initial),
            approach_speed,
            separation_speed,
            restitution: Measure::ratio(separation_speed, approach_speed),
            reduced_mass: Measure::ratio(record.m1 * record.m2, total_mass)
                .value()
                .unwrap_or(0.0),
            cm_velocity_initial: cm_velocity_initial.value().unwrap_or(0.0),
            cm_velocity_final: cm_velocity_final.value().unwrap_or(0.0),
            mass_ratio: Measure::ratio(record.m1, record.m2),
            energy_per_mass: energy_per_unit_mass(record.ke_initial, total_mass),
            momentum_per_mass: Measure::ratio(record.p_initial, total_mass),
        }
    }

    /// Metrics of one cart.
    pub fn cart(&self, cart: Cart) -> &CartMetrics {
        match cart {
            Cart::One => &self.cart1,
            Cart::Two => &self.cart2,
        }
    }

    /// Sum of both carts' kinetic energy before the collision (J).
    pub fn system_kinetic_initial(&self) -> f64 {
        self.cart1.kinetic_initial + self.cart2.kinetic_initial
    }

    /// Sum of both carts' kinetic energy after the collision (J).
    pub fn system_kinetic_final(&self) -> f64 {
        self.cart1.kinetic_final + self.cart2.kinetic_final
    }

    /// Sum of both carts' momentum before the collision (kg·m/s).
    pub fn system_momentum_initial(&self) -> f64 {
        self.cart1.momentum_initial + self.cart2.momentum_initial
    }

    /// Sum of both carts' momentum after the collision (kg·m/s).
    pub fn system_momentum_final(&self) -> f64 {
        self.cart1.momentum_final + self.cart2.momentum_final
    }

    /// True when the absolute energy error is strictly below `tolerance`.
    pub fn energy_verified(&self, tolerance: f64) -> bool {
        self.energy_error < tolerance
    }

    /// True when the absolute momentum error is strictly below `tolerance`.
    pub fn momentum_verified(&self, tolerance: f64) -> bool {
        self.momentum_error < tolerance
    }

    /// The cart whose velocity changed the most in magnitude.
    ///
    /// Ties go to cart 2.
    pub fn largest_velocity_change(&self) -> Cart {
        if self.cart1.velocity_delta.abs() > self.cart2.velocity_delta.abs() {
            Cart::One
        } else {
            Cart::Two
        }
    }

    /// The cart holding more kinetic energy after the collision.
    ///
    /// Ties go to cart 2.
    pub fn dominant_final_energy(&self) -> Cart {
        if self.cart1.kinetic_final > self.cart2.kinetic_final {
            Cart::One
        } else {
            Cart::Two
        }
    }
}

// Energy per unit mass is undefined when there was no energy to share.
fn energy_per_unit_mass(ke_initial: f64, total_mass: f64) -> Measure {
    if ke_initial.abs() <= DENOMINATOR_EPSILON {
        return Measure::Indeterminate;
    }
    Measure::ratio(ke_initial, total_mass)
}
