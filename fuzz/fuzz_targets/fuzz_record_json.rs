//! Fuzz target for experiment record JSON.
//!
//! Parses arbitrary bytes as a record, then runs validation, metric
//! derivation and chart planning on whatever parses. None may panic, and
//! a valid record must always yield seven planned charts.

#![no_main]

use cl_chart::{ChartSettings, ChartSpecBuilder};
use cl_common::ExperimentRecord;
use cl_math::DerivedMetrics;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(record) = serde_json::from_slice::<ExperimentRecord>(data) else {
        return;
    };
    if record.validate().is_err() {
        return;
    }
    let metrics = DerivedMetrics::compute(&record);
    let plan = ChartSpecBuilder::new(ChartSettings::default()).build(&record, &metrics);
    assert_eq!(plan.slots.len(), 7);
});
