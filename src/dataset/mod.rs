//! The static parameter dataset and its lookup indexes.
//!
//! The source file is a flat JSON array; every row is one signal of one
//! vehicle:
//!
//! ```text
//! [{ "make": "Hyundai", "model": "IONIQ-5", "hdr": "7E4",
//!    "cmd": {"22": "0101"}, "id": "IONIQ5_SOC", "name": "...", ... }, ...]
//! ```
//!
//! Rows with an empty model (or a `specialCase` marker) describe generic
//! signal sets such as `SAEJ1979`.

mod query;
mod views;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::signal::{CommandMap, ParameterRecord, VehicleRef};

pub use query::{CommandFilter, ParameterSearch, VehicleFilter};
pub use views::{ecu_ids, filter_vehicle_parameters, group_by_ecu, group_by_metric, EcuGrouping};

/// Bucket name for parameters without a suggested metric.
pub const OTHER_METRIC: &str = "Other";

/// One row of the dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    /// Vehicle make.
    pub make: String,
    /// Vehicle model; empty for generic sets.
    #[serde(default)]
    pub model: String,
    /// Marks rows that belong to a generic set under another name.
    #[serde(default, rename = "specialCase", skip_serializing_if = "Option::is_none")]
    pub special_case: Option<String>,
    /// The signal itself.
    #[serde(flatten)]
    pub record: ParameterRecord,
}

impl DatasetRow {
    /// The vehicle this row belongs to.
    #[must_use]
    pub fn vehicle(&self) -> VehicleRef {
        match self.special_case.as_deref().filter(|s| !s.is_empty()) {
            Some(special) => VehicleRef::new(special, ""),
            None => VehicleRef::new(self.make.clone(), self.model.clone()),
        }
    }
}

/// A parameter together with the vehicle it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleParameter {
    /// Owning vehicle.
    pub vehicle: VehicleRef,
    /// The signal.
    pub record: ParameterRecord,
}

/// All signals sharing one ECU command (`hdr` + `cmd`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandEntry {
    /// `hdr_<cmd entries>`, e.g. `7E4_220101`.
    pub id: String,
    /// ECU header.
    pub hdr: String,
    /// Command map.
    pub cmd: CommandMap,
    /// Keys of the vehicles using this command, first-seen order.
    pub vehicles: Vec<String>,
    /// Distinct signals (by id and vehicle) decoded from this command.
    pub parameters: Vec<VehicleParameter>,
}

/// All signals sharing one id across vehicles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterEntry {
    /// Parameter id.
    pub id: String,
    /// Name of the first instance.
    pub name: String,
    /// Keys of the vehicles defining this id.
    pub vehicles: Vec<String>,
    /// Every row with this id.
    pub instances: Vec<VehicleParameter>,
    /// Suggested metric of the first instance.
    pub suggested_metric: Option<String>,
}

/// The loaded dataset with its derived indexes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    makes: Vec<String>,
    models: Vec<String>,
    headers: Vec<String>,
    parameter_ids: Vec<String>,
    suggested_metrics: Vec<String>,
    vehicles: Vec<VehicleRef>,
    parameters_by_vehicle: HashMap<VehicleRef, Vec<ParameterRecord>>,
    commands: Vec<CommandEntry>,
    parameters: Vec<ParameterEntry>,
}

impl Dataset {
    /// Decodes a dataset from the JSON text of the data file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Parse`] if the text is not an array of rows.
    pub fn from_json(location: &str, text: &str) -> Result<Self, DatasetError> {
        let rows: Vec<DatasetRow> = serde_json::from_str(text)
            .map_err(|source| DatasetError::Parse { location: location.to_string(), source })?;
        Ok(Self::from_rows(rows))
    }

    /// Builds the indexes from raw rows. Row order is preserved within each
    /// vehicle's parameter list.
    #[must_use]
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        let mut makes = BTreeSet::new();
        let mut models = BTreeSet::new();
        let mut headers = BTreeSet::new();
        let mut parameter_ids = BTreeSet::new();
        let mut metrics = BTreeSet::new();
        let mut vehicles = BTreeSet::new();
        let mut parameters_by_vehicle: HashMap<VehicleRef, Vec<ParameterRecord>> = HashMap::new();

        let mut commands: Vec<CommandEntry> = Vec::new();
        let mut command_index: HashMap<String, usize> = HashMap::new();
        let mut parameters: Vec<ParameterEntry> = Vec::new();
        let mut parameter_index: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let vehicle = row.vehicle();
            let record = row.record;

            makes.insert(row.make.clone());
            models.insert(row.model.clone());
            headers.insert(record.hdr.clone().unwrap_or_default());
            parameter_ids.insert(record.id.clone());
            if let Some(metric) = record.metric() {
                metrics.insert(metric.to_string());
            }
            vehicles.insert(vehicle.clone());

            let vehicle_key = vehicle.key();
            let instance = VehicleParameter { vehicle: vehicle.clone(), record: record.clone() };

            let command_id = record.command_id();
            let ci = *command_index.entry(command_id.clone()).or_insert_with(|| {
                commands.push(CommandEntry {
                    id: command_id,
                    hdr: record.hdr.clone().unwrap_or_default(),
                    cmd: record.cmd.clone().unwrap_or_default(),
                    vehicles: Vec::new(),
                    parameters: Vec::new(),
                });
                commands.len() - 1
            });
            let command = &mut commands[ci];
            if !command.vehicles.contains(&vehicle_key) {
                command.vehicles.push(vehicle_key.clone());
            }
            if !command
                .parameters
                .iter()
                .any(|p| p.record.id == record.id && p.vehicle == vehicle)
            {
                command.parameters.push(instance.clone());
            }

            let pi = *parameter_index.entry(record.id.clone()).or_insert_with(|| {
                parameters.push(ParameterEntry {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    vehicles: Vec::new(),
                    instances: Vec::new(),
                    suggested_metric: record.metric().map(String::from),
                });
                parameters.len() - 1
            });
            let entry = &mut parameters[pi];
            if !entry.vehicles.contains(&vehicle_key) {
                entry.vehicles.push(vehicle_key);
            }
            entry.instances.push(instance);

            parameters_by_vehicle.entry(vehicle).or_default().push(record);
        }

        tracing::debug!(
            vehicles = vehicles.len(),
            commands = commands.len(),
            parameters = parameters.len(),
            "dataset indexed"
        );

        Self {
            makes: makes.into_iter().collect(),
            models: models.into_iter().collect(),
            headers: headers.into_iter().collect(),
            parameter_ids: parameter_ids.into_iter().collect(),
            suggested_metrics: metrics.into_iter().collect(),
            vehicles: vehicles.into_iter().collect(),
            parameters_by_vehicle,
            commands,
            parameters,
        }
    }

    /// Sorted distinct makes.
    #[must_use]
    pub fn makes(&self) -> &[String] {
        &self.makes
    }

    /// Sorted distinct models.
    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Sorted distinct ECU headers.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Sorted distinct parameter ids.
    #[must_use]
    pub fn parameter_ids(&self) -> &[String] {
        &self.parameter_ids
    }

    /// Sorted distinct suggested metrics.
    #[must_use]
    pub fn suggested_metrics(&self) -> &[String] {
        &self.suggested_metrics
    }

    /// All vehicles, sorted by make then model.
    #[must_use]
    pub fn all_vehicles(&self) -> &[VehicleRef] {
        &self.vehicles
    }

    /// Returns `true` if the dataset has rows for `vehicle`.
    #[must_use]
    pub fn contains_vehicle(&self, vehicle: &VehicleRef) -> bool {
        self.parameters_by_vehicle.contains_key(vehicle)
    }

    /// Parameters of one vehicle in file order; empty for unknown vehicles.
    #[must_use]
    pub fn vehicle_parameters(&self, vehicle: &VehicleRef) -> &[ParameterRecord] {
        self.parameters_by_vehicle.get(vehicle).map_or(&[], Vec::as_slice)
    }

    /// Command index in first-seen order.
    #[must_use]
    pub fn all_commands(&self) -> &[CommandEntry] {
        &self.commands
    }

    /// Parameter index in first-seen order.
    #[must_use]
    pub fn all_parameters(&self) -> &[ParameterEntry] {
        &self.parameters
    }

    /// Every row carrying `metric` as its suggested metric.
    #[must_use]
    pub fn parameters_by_metric(&self, metric: &str) -> Vec<VehicleParameter> {
        self.parameters
            .iter()
            .flat_map(|p| &p.instances)
            .filter(|i| i.record.metric() == Some(metric))
            .cloned()
            .collect()
    }
}
