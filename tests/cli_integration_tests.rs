//! CLI Integration Tests
//!
//! Runs the binary directly using assert_cmd to exercise main.rs code paths.

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const MAPPING_JSON: &str = r#"{
  "data": [
    {"client_name": "A", "engine": "E1", "dev": "", "sip_device_id": "S1", "mac_address": "M1", "device_local_id": "D1"},
    {"client_name": "A", "engine": "E2", "dev": "", "sip_device_id": "S2", "mac_address": "M2", "device_local_id": "D2"}
  ]
}"#;

fn command_in(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("product-plan").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("PRODUCT_PLAN_INPUT")
        .env_remove("PRODUCT_PLAN_OUTPUT")
        .env_remove("PRODUCT_PLAN_ROWS")
        .env_remove("RUST_LOG");
    cmd
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    command_in(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Product Plan"))
        .stdout(predicate::str::contains("Mapping.json"));
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    command_in(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("product-plan"));
}

// ═══════════════════════════════════════════════════════════════════════════
// PIPELINE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_no_flags_uses_fixed_paths() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Mapping.json"), MAPPING_JSON).unwrap();

    command_in(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));

    assert!(dir.path().join("hieu.xlsx").exists());
}

#[test]
fn test_explicit_paths_and_rows() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("devices.json");
    let output = dir.path().join("plan.xlsx");
    std::fs::write(&input, MAPPING_JSON).unwrap();

    command_in(&dir)
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["-r", "10", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product Plan"));

    assert!(output.exists());
    assert!(!dir.path().join("hieu.xlsx").exists());
}

#[test]
fn test_env_overrides() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("devices.json"), MAPPING_JSON).unwrap();

    command_in(&dir)
        .env("PRODUCT_PLAN_INPUT", "devices.json")
        .env("PRODUCT_PLAN_OUTPUT", "env.xlsx")
        .assert()
        .success();

    assert!(dir.path().join("env.xlsx").exists());
}

// ═══════════════════════════════════════════════════════════════════════════
// FAILURE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();

    command_in(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));

    assert!(!dir.path().join("hieu.xlsx").exists());
}

#[test]
fn test_malformed_input_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Mapping.json"), r#"{"data": "nope"}"#).unwrap();

    command_in(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("'data' must be an array"));
}

#[test]
fn test_zero_rows_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Mapping.json"), MAPPING_JSON).unwrap();

    command_in(&dir)
        .args(["--rows", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("allowed rows"));
}

#[test]
fn test_unwritable_output_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("Mapping.json"), MAPPING_JSON).unwrap();

    command_in(&dir)
        .args(["-o", "missing/dir/out.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to write"));
}
