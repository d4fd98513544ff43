//! Integration tests for top-level CLI behavior.

mod common;

use std::process::Command;

fn run_obd_compare(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_obd-compare");
    Command::new(bin)
        .args(args)
        .env_remove("OBD_COMPARE_DATASET")
        .env_remove("OBD_COMPARE_MAX_VEHICLES")
        .output()
        .expect("failed to run obd-compare binary")
}

#[test]
fn vehicles_lists_dataset_vehicles() {
    let (_dir, path) = common::dataset_file();
    let output = run_obd_compare(&["vehicles", "--dataset", path.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("Hyundai-Ioniq5"));
    assert!(stdout.contains("SAEJ1979"));
    assert!(stdout.contains("(generic)"));
}

#[test]
fn compare_common_only() {
    let (_dir, path) = common::dataset_file();
    let output = run_obd_compare(&[
        "compare",
        "Hyundai-Ioniq5,Subaru-WRX",
        "--common",
        "--dataset",
        path.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("WRX_SOC"));
    assert!(!stdout.contains("IONIQ5_TP_FL"));
    assert!(stdout.contains("1 of 4 parameters shown"));
}

#[test]
fn compare_json_output_is_valid() {
    let (_dir, path) = common::dataset_file();
    let output = run_obd_compare(&[
        "compare",
        "Hyundai-Ioniq5,Subaru-WRX",
        "--json",
        "--dataset",
        path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["selector"], "Hyundai-Ioniq5,Subaru-WRX");
    assert_eq!(report["parameters"].as_array().unwrap().len(), 4);
}

#[test]
fn compare_needs_two_known_vehicles() {
    let (_dir, path) = common::dataset_file();
    let output =
        run_obd_compare(&["compare", "Hyundai-Ioniq5,Toyota-Prius", "--dataset", path.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("at least 2"));
}

#[test]
fn transfer_prints_artifact() {
    let (_dir, path) = common::dataset_file();
    let output = run_obd_compare(&[
        "transfer",
        "Hyundai-Ioniq5,Subaru-WRX",
        "--select",
        "IONIQ5_TP_FL",
        "--to",
        "Subaru-WRX",
        "--dataset",
        path.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.starts_with("// Signal definitions for Subaru WRX\n"));
    assert!(stdout.contains("\"id\": \"WRX_TP_FL\""));
}

#[test]
fn transfer_writes_files_to_out_dir() {
    let (dir, path) = common::dataset_file();
    let out = dir.path().join("artifacts");
    let output = run_obd_compare(&[
        "transfer",
        "Hyundai-Ioniq5,Subaru-WRX",
        "--select",
        "IONIQ5_TP_FL",
        "--to",
        "Subaru-WRX",
        "--out",
        out.to_str().unwrap(),
        "--dataset",
        path.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let text = std::fs::read_to_string(out.join("Subaru-WRX.json.txt")).unwrap();
    assert!(text.contains("// === NEW COMMAND ==="));
}

#[test]
fn transfer_without_targets_prints_notice() {
    let (_dir, path) = common::dataset_file();
    let output = run_obd_compare(&[
        "transfer",
        "Hyundai-Ioniq5,Subaru-WRX",
        "--select",
        "IONIQ5_TP_FL",
        "--dataset",
        path.to_str().unwrap(),
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert_eq!(stdout.trim(), "No parameters to transfer.");
}

#[test]
fn config_file_limits_comparison_size() {
    let (dir, path) = common::dataset_file();
    let config = dir.path().join("obd-compare.yaml");
    std::fs::write(&config, "max_vehicles: 2\n").unwrap();
    let output = run_obd_compare(&[
        "compare",
        "Hyundai-Ioniq5,Subaru-WRX,Kia-EV6",
        "--config",
        config.to_str().unwrap(),
        "--dataset",
        path.to_str().unwrap(),
    ]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("at most 2"));
}

#[test]
fn missing_dataset_reports_path() {
    let output = run_obd_compare(&["vehicles", "--dataset", "/nonexistent/matrix_data.json"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("/nonexistent/matrix_data.json"));
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_obd_compare(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
