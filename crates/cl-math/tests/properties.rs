//! Property-based tests for collision metrics.
//!
//! Uses proptest to verify metric properties hold across many random records.

use cl_common::ExperimentRecord;
use cl_math::{DerivedMetrics, Measure};
use proptest::prelude::*;

/// Tolerance for floating point comparisons.
const TOL: f64 = 1e-9;

/// Helper to check approximate equality.
fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol.max(tol * a.abs().max(b.abs()))
}

fn measure_ok(m: Measure) -> bool {
    match m {
        Measure::Value(v) => v.is_finite(),
        Measure::Indeterminate => true,
    }
}

prop_compose! {
    fn valid_record()(
        m1 in 0.01..100.0f64,
        m2 in 0.01..100.0f64,
        v1 in -50.0..50.0f64,
        v2 in -50.0..50.0f64,
        v1f in -50.0..50.0f64,
        v2f in -50.0..50.0f64,
        ke_initial in 0.0..1e4f64,
        ke_final in 0.0..1e4f64,
        p_initial in -1e3..1e3f64,
        p_final in -1e3..1e3f64,
    ) -> ExperimentRecord {
        ExperimentRecord { m1, m2, v1, v2, v1f, v2f, ke_initial, ke_final, p_initial, p_final }
    }
}

// ============================================================================
// Determinism and totality
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// The same record always yields identical metrics.
    #[test]
    fn compute_is_deterministic(record in valid_record()) {
        let a = DerivedMetrics::compute(&record);
        let b = DerivedMetrics::compute(&record);
        prop_assert_eq!(a, b);
    }

    /// No metric is ever NaN, and every Measure value is finite.
    #[test]
    fn compute_never_produces_nan(record in valid_record()) {
        let m = DerivedMetrics::compute(&record);
        for v in [
            m.total_mass, m.energy_error, m.momentum_error, m.approach_speed,
            m.separation_speed, m.reduced_mass, m.cm_velocity_initial, m.cm_velocity_final,
            m.cart1.kinetic_final, m.cart2.momentum_delta,
        ] {
            prop_assert!(v.is_finite(), "non-finite metric in {:?}", m);
        }
        for measure in [
            m.energy_conserved_pct, m.momentum_conserved_pct, m.restitution,
            m.mass_ratio, m.energy_per_mass, m.momentum_per_mass,
        ] {
            prop_assert!(measure_ok(measure), "bad measure {:?}", measure);
        }
    }
}

// ============================================================================
// Conservation properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Identical before/after totals mean 100% conserved with zero error.
    #[test]
    fn conserved_totals_are_exactly_one_hundred(
        record in valid_record(),
        ke in 1e-6..1e4f64,
        p in prop_oneof![-1e3..-1e-6f64, 1e-6..1e3f64],
    ) {
        let record = ExperimentRecord {
            ke_initial: ke,
            ke_final: ke,
            p_initial: p,
            p_final: p,
            ..record
        };
        let m = DerivedMetrics::compute(&record);
        prop_assert_eq!(m.energy_conserved_pct, Measure::Value(100.0));
        prop_assert_eq!(m.momentum_conserved_pct, Measure::Value(100.0));
        prop_assert_eq!(m.energy_error, 0.0);
        prop_assert_eq!(m.momentum_error, 0.0);
    }

    /// Zero initial energy makes the energy ratios indeterminate.
    #[test]
    fn zero_initial_energy_is_indeterminate(record in valid_record()) {
        let record = ExperimentRecord { ke_initial: 0.0, ..record };
        let m = DerivedMetrics::compute(&record);
        prop_assert!(m.energy_conserved_pct.is_indeterminate());
        prop_assert!(m.energy_per_mass.is_indeterminate());
    }

    /// Restitution is defined exactly when the carts approach each other.
    #[test]
    fn restitution_defined_iff_approaching(record in valid_record()) {
        let m = DerivedMetrics::compute(&record);
        let approaching = (record.v1 - record.v2).abs() > cl_math::DENOMINATOR_EPSILON;
        prop_assert_eq!(m.restitution.is_indeterminate(), !approaching);
        if let Measure::Value(e) = m.restitution {
            prop_assert!(e >= 0.0);
        }
    }

    /// The center-of-mass velocity is total momentum over total mass.
    #[test]
    fn cm_velocity_matches_momentum(record in valid_record()) {
        let m = DerivedMetrics::compute(&record);
        let p = record.m1 * record.v1 + record.m2 * record.v2;
        prop_assert!(approx_eq(m.cm_velocity_initial * m.total_mass, p, TOL));
    }

    /// Reduced mass never exceeds the lighter cart.
    #[test]
    fn reduced_mass_bounded_by_lighter_cart(record in valid_record()) {
        let m = DerivedMetrics::compute(&record);
        prop_assert!(m.reduced_mass <= record.m1.min(record.m2) * (1.0 + TOL));
        prop_assert!(m.reduced_mass > 0.0);
    }
}
