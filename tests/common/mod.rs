//! Shared fixture: a small dataset written to a temp directory.

#![allow(dead_code)]

use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

/// Rows for an IONIQ 5, a WRX and an EV6 sharing a state-of-charge signal,
/// tire-pressure signals only the IONIQ 5 has, and a generic SAE set.
pub fn dataset_json() -> String {
    json!([
        {"make": "Hyundai", "model": "Ioniq5", "hdr": "7E4", "cmd": {"22": "0101"},
         "id": "IONIQ5_SOC", "name": "IONIQ5_State of charge", "suggestedMetric": "stateOfCharge",
         "fmt": {"bix": 48, "len": 8, "div": 2, "unit": "percent"}},
        {"make": "Hyundai", "model": "Ioniq5", "hdr": "7A0", "cmd": {"22": "C00B"},
         "id": "IONIQ5_TP_FL", "name": "Tire pressure front left", "rax": "7A8",
         "bitOffset": 0, "bitLength": 8, "suggestedMetric": "frontLeftTirePressure",
         "scaling": "raw*0.2", "unit": "psi", "path": "Tires"},
        {"make": "Hyundai", "model": "Ioniq5", "hdr": "7A0", "cmd": {"22": "C00B"},
         "id": "IONIQ5_TP_FR", "name": "Tire pressure front right", "rax": "7A8",
         "bitOffset": 8, "bitLength": 8, "suggestedMetric": "frontRightTirePressure",
         "scaling": "raw*0.2", "unit": "psi", "path": "Tires"},
        {"make": "Subaru", "model": "WRX", "hdr": "7E4", "cmd": {"22": "0101"},
         "id": "WRX_SOC", "name": "State of charge", "suggestedMetric": "stateOfCharge",
         "fmt": {"bix": 48, "len": 8, "div": 2, "unit": "percent"}},
        {"make": "Subaru", "model": "WRX", "hdr": "7E0", "cmd": {"22": "1001"}, "freq": 1,
         "id": "WRX_OIL_TEMP", "name": "Oil temperature", "scaling": "raw +-40",
         "unit": "celsius"},
        {"make": "Kia", "model": "EV6", "hdr": "7E4", "cmd": {"22": "0101"},
         "id": "EV6_SOC", "name": "EV6 SOC", "suggestedMetric": "stateOfCharge",
         "fmt": {"bix": 48, "len": 8, "div": 2, "unit": "percent"}},
        {"make": "SAEJ1979", "model": "", "hdr": "7DF", "cmd": {"01": "0D"},
         "id": "SAE_VSS", "name": "Vehicle speed", "suggestedMetric": "speed",
         "fmt": {"len": 8, "unit": "kilometersPerHour"}}
    ])
    .to_string()
}

/// Writes [`dataset_json`] into a fresh temp directory.
pub fn dataset_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("matrix_data.json");
    std::fs::write(&path, dataset_json()).expect("write dataset");
    (dir, path)
}
