//! Collision metrics for cartlab.
//!
//! [`DerivedMetrics::compute`] is a pure function of an
//! [`ExperimentRecord`](cl_common::ExperimentRecord). Quotients whose
//! denominator is effectively zero become [`Measure::Indeterminate`] instead
//! of NaN or infinity, so downstream stages never format a non-number.

pub mod measure;
pub mod metrics;

pub use measure::{Measure, DENOMINATOR_EPSILON};
pub use metrics::{CartMetrics, DerivedMetrics};
