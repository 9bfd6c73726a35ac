//! Integration tests for the diagrams CLI
//!
//! These tests run the actual binary and verify output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
fn diagrams_cmd() -> Command {
    let mut cmd = Command::cargo_bin("diagrams").unwrap();
    // Keep a developer's environment from leaking into the tests
    cmd.env_remove("DIAGRAMS_CONFIG");
    cmd
}

#[test]
fn test_help_flag() {
    diagrams_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("tui"));
}

// ============================================================================
// show
// ============================================================================

#[test]
fn test_show_metric_default() {
    diagrams_cmd()
        .args(["show", "metric"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"selected\": \"faculty\""))
        .stdout(predicate::str::contains("Faculty Trained"))
        .stdout(predicate::str::contains("3000"));
}

#[test]
fn test_show_metric_selected() {
    diagrams_cmd()
        .args(["show", "metric", "--metric", "schools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Partner Schools"));
}

#[test]
fn test_show_unknown_metric_fails() {
    diagrams_cmd()
        .args(["show", "metric", "--metric", "revenue"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("DIAG-002"))
        .stderr(predicate::str::contains("Fix:"));
}

#[test]
fn test_show_parity_with_toggles() {
    diagrams_cmd()
        .args(["show", "parity", "--toggle", "0", "--toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"active_count\": 2"))
        .stdout(predicate::str::contains(
            "Active progress in 2 competency areas.",
        ));
}

#[test]
fn test_show_parity_unknown_element_fails() {
    diagrams_cmd()
        .args(["show", "parity", "--toggle", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DIAG-001"));
}

#[test]
fn test_show_stage() {
    diagrams_cmd()
        .args(["show", "stage", "--stage", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Qualified\""));
}

#[test]
fn test_show_stage_out_of_range_fails() {
    diagrams_cmd()
        .args(["show", "stage", "--stage", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DIAG-003"));
}

// ============================================================================
// config
// ============================================================================

#[test]
fn test_config_dump_is_loadable() {
    let output = diagrams_cmd()
        .args(["config", "--dump"])
        .assert()
        .success()
        .stdout(predicate::str::contains("interval_ms: 2000"))
        .get_output()
        .stdout
        .clone();

    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("diagrams.yaml");
    fs::write(&config_file, output).unwrap();

    diagrams_cmd()
        .args(["config", "--config"])
        .arg(&config_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"))
        .stdout(predicate::str::contains("5 elements, 4 indicators"));
}

#[test]
fn test_config_from_env_var() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("env.yaml");
    fs::write(
        &config_file,
        r#"
stages:
  interval_ms: 500
  stages:
    - label: Only
      icon: grid
      focus: syllabus
"#,
    )
    .unwrap();

    diagrams_cmd()
        .env("DIAGRAMS_CONFIG", &config_file)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stages: 1 every 500ms"));
}

#[test]
fn test_invalid_config_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.yaml");
    fs::write(
        &config_file,
        r#"
stages:
  interval_ms: 0
  stages:
    - label: Only
      icon: grid
      focus: syllabus
"#,
    )
    .unwrap();

    diagrams_cmd()
        .args(["config", "--config"])
        .arg(&config_file)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("DIAG-012"));
}

#[test]
fn test_missing_config_file_fails() {
    diagrams_cmd()
        .args(["config", "--config", "/nonexistent/diagrams.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DIAG-010"));
}
