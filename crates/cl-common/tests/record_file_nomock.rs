//! Loading experiment records from real files on disk.

use cl_common::{ExperimentRecord, RecordError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn record_file_roundtrips_through_pretty_json() {
    let record = ExperimentRecord {
        m1: 0.5,
        m2: 1.5,
        v1: 3.0,
        v2: -1.0,
        v1f: -3.0,
        v2f: 1.0,
        ke_initial: 3.0,
        ke_final: 3.0,
        p_initial: 0.0,
        p_final: 0.0,
    };
    let file = write_temp(&record.to_json().unwrap());

    let loaded = ExperimentRecord::from_path(file.path()).unwrap();
    assert_eq!(loaded, record);
    assert!(loaded.validate().is_ok());
}

#[test]
fn record_file_with_zero_mass_loads_but_fails_validation() {
    let file = write_temp(
        r#"{"m1": 1, "m2": 0, "v1": 2, "v2": 0, "v1f": 0, "v2f": 2,
            "ecInicial": 2, "ecFinal": 2, "pInicial": 2, "pFinal": 2}"#,
    );

    let record = ExperimentRecord::from_path(file.path()).unwrap();
    let err = record.validate().unwrap_err();
    assert!(matches!(err, RecordError::InvalidField { field: "m2", .. }));
}

#[test]
fn missing_record_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ExperimentRecord::from_path(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RecordError::Io(_)));
}

#[test]
fn truncated_record_file_is_json_error() {
    let file = write_temp(r#"{"m1": 1, "m2": "#);
    let err = ExperimentRecord::from_path(file.path()).unwrap_err();
    assert!(matches!(err, RecordError::Json(_)));
}
