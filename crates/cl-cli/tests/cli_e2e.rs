//! End-to-end tests for the `cartlab` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const SCENARIO_A: &str = r#"{"m1":1,"m2":1,"v1":2,"v2":0,"v1f":0,"v2f":2,
    "ecInicial":2,"ecFinal":2,"pInicial":2,"pFinal":2}"#;

fn cartlab() -> Command {
    Command::cargo_bin("cartlab").expect("cartlab binary should exist")
}

fn write_record(dir: &Path, json: &str) -> String {
    let path = dir.join("record.json");
    std::fs::write(&path, json).unwrap();
    path.display().to_string()
}

mod help {
    use super::*;

    #[test]
    fn top_level_help_lists_commands() {
        cartlab()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("generate").and(predicate::str::contains("config")));
    }

    #[test]
    fn generate_help_lists_flags() {
        cartlab()
            .args(["generate", "--help"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("--input")
                    .and(predicate::str::contains("--output-dir"))
                    .and(predicate::str::contains("--sequential")),
            );
    }

    #[test]
    fn config_prints_defaults() {
        cartlab()
            .arg("config")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"laboratory\": \"Virtual Physics Laboratory\""));
    }
}

mod generate {
    use super::*;

    #[test]
    fn writes_report_and_prints_path() {
        let dir = TempDir::new().unwrap();
        let input = write_record(dir.path(), SCENARIO_A);
        let out = dir.path().join("reports");

        let assert = cartlab()
            .args(["-q", "generate", "--input", &input, "--output-dir"])
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("Elastic_Collision_Report_"));

        let printed = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        let path = Path::new(printed.trim());
        assert!(path.starts_with(&out));
        assert_eq!(&std::fs::read(path).unwrap()[..2], b"PK");
    }

    #[test]
    fn sequential_rendering_also_succeeds() {
        let dir = TempDir::new().unwrap();
        let input = write_record(dir.path(), SCENARIO_A);

        cartlab()
            .args(["-q", "generate", "--sequential", "--input", &input, "--output-dir"])
            .arg(dir.path())
            .assert()
            .success();
    }

    #[test]
    fn reads_record_from_stdin() {
        let dir = TempDir::new().unwrap();
        cartlab()
            .args(["-q", "generate", "--input", "-", "--output-dir"])
            .arg(dir.path())
            .write_stdin(SCENARIO_A)
            .assert()
            .success()
            .stdout(predicate::str::ends_with(".xlsx\n"));
    }

    #[test]
    fn json_logs_carry_the_run_id() {
        let dir = TempDir::new().unwrap();
        let input = write_record(dir.path(), SCENARIO_A);

        cartlab()
            .args(["--log-format", "json", "generate", "--input", &input, "--output-dir"])
            .arg(dir.path())
            .assert()
            .success()
            .stderr(
                predicate::str::contains("\"run_id\":\"run-")
                    .and(predicate::str::contains("report generated")),
            );
    }
}

mod errors {
    use super::*;

    #[test]
    fn zero_mass_is_invalid_input() {
        let dir = TempDir::new().unwrap();
        let input = write_record(dir.path(), &SCENARIO_A.replace("\"m2\":1", "\"m2\":0"));

        cartlab()
            .args(["generate", "--input", &input, "--output-dir"])
            .arg(dir.path())
            .assert()
            .code(12)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("m2").and(predicate::str::contains("ERR_INVALID_INPUT")));

        let written = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.path().extension().is_some_and(|x| x == "xlsx"))
            .count();
        assert_eq!(written, 0);
    }

    #[test]
    fn null_record_is_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = write_record(dir.path(), "null");

        cartlab()
            .args(["generate", "--input", &input, "--output-dir"])
            .arg(dir.path())
            .assert()
            .code(11)
            .stderr(predicate::str::contains("ERR_MISSING_INPUT"));
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = TempDir::new().unwrap();
        let input = write_record(dir.path(), "{\"m1\": ");

        cartlab()
            .args(["generate", "--input", &input, "--output-dir"])
            .arg(dir.path())
            .assert()
            .code(13);
    }

    #[test]
    fn missing_input_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        cartlab()
            .args(["generate", "--input"])
            .arg(dir.path().join("absent.json"))
            .assert()
            .code(24)
            .stderr(predicate::str::contains("ERR_IO"));
    }

    #[test]
    fn invalid_config_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let input = write_record(dir.path(), SCENARIO_A);
        let config = dir.path().join("report.json");
        std::fs::write(&config, r#"{"render": {"timeout_ms": 0}}"#).unwrap();

        cartlab()
            .args(["generate", "--input", &input, "--config"])
            .arg(&config)
            .arg("--output-dir")
            .arg(dir.path())
            .assert()
            .code(14);
    }

    #[test]
    fn unknown_log_format_fails() {
        cartlab()
            .args(["--log-format", "xml", "config"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error"));
    }
}
