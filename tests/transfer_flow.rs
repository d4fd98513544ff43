//! End-to-end transfer through the public library API.

mod common;

use pretty_assertions::assert_eq;

use obd_compare::artifact::{
    serialize, ArtifactSerializer, NEW_COMMAND_MARKER, NEW_PARAMETER_MARKER,
};
use obd_compare::compare::{align, parse_vehicle_list, ComparisonSession, ParameterFilter};
use obd_compare::dataset::Dataset;
use obd_compare::signal::{CommandMap, ParameterRecord, VehicleRef};
use obd_compare::transfer::{group_by_command, plan, transfer, CommandGrouper, TransferOutcome};

fn tire_pressure() -> ParameterRecord {
    let mut p = ParameterRecord::new("IONIQ5_TP_FL", "Tire pressure FL");
    p.hdr = Some("7A0".into());
    p.cmd = Some(CommandMap::from_iter([("22", "C00B")]));
    p.bit_offset = Some(0);
    p.bit_length = Some(8);
    p.suggested_metric = Some("frontLeftTirePressure".into());
    p
}

#[test]
fn tire_pressure_moves_from_ioniq_to_wrx() {
    let vehicles = vec![VehicleRef::new("Hyundai", "Ioniq5"), VehicleRef::new("Subaru", "WRX")];
    let alignment = align(&vehicles, &[vec![tire_pressure()], vec![]]).unwrap();

    assert_eq!(alignment.parameters.len(), 1);
    assert_eq!(alignment.parameters[0].vehicles, vec![Some(tire_pressure()), None]);

    let plan = plan(&alignment.parameters, &[1], &vehicles);
    let synthesized = &plan.for_target(1)[0];
    assert_eq!(synthesized.record.id, "WRX_TP_FL");
    assert_eq!(synthesized.record.hdr.as_deref(), Some("7A0"));
    assert!(synthesized.is_new_parameter());
}

#[test]
fn shared_command_groups_into_one_block() {
    let mut first = tire_pressure();
    first.freq = Some(serde_json::Number::from(2));
    let mut second = tire_pressure();
    second.id = "IONIQ5_TP_FR".into();
    second.bit_offset = Some(8);

    let groups = group_by_command([&first, &second], &[]);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].signals.len(), 2);
    assert_eq!(groups[0].properties["freq"], serde_json::json!(2));

    let groups = group_by_command([&second], &[]);
    assert_eq!(groups[0].properties["freq"], serde_json::json!(0.5));
}

#[test]
fn markers_follow_newness() {
    let vehicles = vec![VehicleRef::new("Hyundai", "Ioniq5"), VehicleRef::new("Subaru", "WRX")];
    let mut fr = tire_pressure();
    fr.id = "IONIQ5_TP_FR".into();
    fr.bit_offset = Some(8);
    let mut wrx_fr = fr.clone();
    wrx_fr.id = "WRX_TP_FR".into();

    let alignment = align(&vehicles, &[vec![tire_pressure(), fr], vec![wrx_fr]]).unwrap();
    let plan = plan(&alignment.parameters, &[1], &vehicles);
    let existing: Vec<&ParameterRecord> = alignment.records_for(1).collect();
    let groups = group_by_command(existing, plan.for_target(1));
    let mixed = serialize(&groups, &vehicles[1]);

    assert!(!mixed.contains(NEW_COMMAND_MARKER));
    assert_eq!(mixed.matches(NEW_PARAMETER_MARKER).count(), 1);

    let only_new = serialize(&group_by_command([], plan.for_target(1)), &vehicles[1]);
    assert!(only_new.contains(&format!("{NEW_COMMAND_MARKER}\n{{")));
}

#[test]
fn dataset_transfer_produces_paste_ready_artifact() {
    let dataset = Dataset::from_json("matrix_data.json", &common::dataset_json()).unwrap();
    let requested = parse_vehicle_list("Hyundai-Ioniq5,Subaru-WRX");
    let session = ComparisonSession::open(&dataset, &requested, 4).unwrap();
    let alignment = session.alignment();

    let selected: Vec<_> = ParameterFilter { query: Some("tire".into()), common_only: false }
        .apply(&alignment.parameters)
        .into_iter()
        .filter(|p| p.record(1).is_none())
        .collect();
    assert_eq!(selected.len(), 2);

    let outcome = transfer(
        alignment,
        selected,
        &[1],
        &CommandGrouper::default(),
        &ArtifactSerializer::new(),
    );
    let TransferOutcome::Artifacts(artifacts) = outcome else {
        panic!("expected an artifact for the WRX");
    };
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].new_parameters, 2);
    assert!(artifacts[0].low_confidence_ids.is_empty());

    let expected = r#"// Signal definitions for Subaru WRX
// Merge into signalsets/v3/default.json of the Subaru-WRX repository
{ "commands": [
{
  "hdr": "7E4",
  "cmd": {"22":"0101"},
  "freq": 0.5,
  "signals": [
  {
    "id": "WRX_SOC",
    "name": "State of charge",
    "fmt": {
      "bix": 48,
      "len": 8,
      "div": 2,
      "unit": "percent"
    },
    "suggestedMetric": "stateOfCharge"
  }
  ]
},
{
  "hdr": "7E0",
  "cmd": {"22":"1001"},
  "freq": 1,
  "signals": [
  {
    "id": "WRX_OIL_TEMP",
    "name": "Oil temperature",
    "fmt": {
      "len": 8,
      "add": -40
    },
    "unit": "celsius"
  }
  ]
},
// === NEW COMMAND ===
{
  "hdr": "7A0",
  "cmd": {"22":"C00B"},
  "freq": 0.5,
  "rax": "7A8",
  "signals": [
  // === NEW PARAMETER ===
  {
    "id": "WRX_TP_FL",
    "name": "Tire pressure front left",
    "fmt": {
      "len": 8,
      "mul": 0.2
    },
    "unit": "psi",
    "suggestedMetric": "frontLeftTirePressure",
    "path": "Tires"
  },
  // === NEW PARAMETER ===
  {
    "id": "WRX_TP_FR",
    "name": "Tire pressure front right",
    "fmt": {
      "len": 8,
      "mul": 0.2
    },
    "unit": "psi",
    "suggestedMetric": "frontRightTirePressure",
    "path": "Tires"
  }
  ]
}
] }
"#;
    assert_eq!(artifacts[0].text, expected);
}

#[test]
fn nothing_selected_is_a_no_op() {
    let dataset = Dataset::from_json("matrix_data.json", &common::dataset_json()).unwrap();
    let session =
        ComparisonSession::open(&dataset, &parse_vehicle_list("Hyundai-Ioniq5,Subaru-WRX"), 4)
            .unwrap();
    let outcome = transfer(
        session.alignment(),
        [],
        &[1],
        &CommandGrouper::default(),
        &ArtifactSerializer::new(),
    );
    assert_eq!(outcome, TransferOutcome::NothingToTransfer);
}
