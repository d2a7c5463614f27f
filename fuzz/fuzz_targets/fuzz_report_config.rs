//! Fuzz target for report configuration parsing and validation.

#![no_main]

use cl_report::ReportConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        if let Ok(config) = ReportConfig::from_json(json) {
            let _ = config.validate();
        }
    }
});
