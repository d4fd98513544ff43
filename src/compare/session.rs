//! Setting up a comparison: vehicle selection, record preparation, alignment.

use crate::dataset::Dataset;
use crate::error::CompareError;
use crate::signal::{extract_bit_info, ParameterRecord, VehicleRef};

use super::align::{align, Alignment};

/// Smallest meaningful comparison.
pub const MIN_VEHICLES: usize = 2;

/// Parses a comma-separated `Make-Model` list. Tokens without a dash are
/// dropped.
#[must_use]
pub fn parse_vehicle_list(list: &str) -> Vec<VehicleRef> {
    list.split(',').filter_map(VehicleRef::parse).collect()
}

/// Inverse of [`parse_vehicle_list`].
#[must_use]
pub fn format_vehicle_list(vehicles: &[VehicleRef]) -> String {
    vehicles.iter().map(VehicleRef::key).collect::<Vec<_>>().join(",")
}

/// Copies a vehicle's records, filling in `bitOffset`/`bitLength` from
/// `fmt` and tagging each with the vehicle's make and model.
#[must_use]
pub fn prepare_records(vehicle: &VehicleRef, params: &[ParameterRecord]) -> Vec<ParameterRecord> {
    params
        .iter()
        .map(|param| {
            let mut prepared = param.clone();
            if let Some(range) = extract_bit_info(param) {
                prepared.bit_offset = Some(range.offset);
                prepared.bit_length = Some(range.length);
            }
            prepared.vehicle_make = Some(vehicle.make.clone());
            prepared.vehicle_model = Some(vehicle.model.clone());
            prepared
        })
        .collect()
}

/// Keeps requested vehicles that exist in the dataset, dropping duplicates,
/// and checks the comparison size.
///
/// # Errors
///
/// Returns [`CompareError::TooFewVehicles`] if fewer than two remain and
/// [`CompareError::TooManyVehicles`] if more than `max_vehicles` remain.
pub fn select_vehicles(
    dataset: &Dataset,
    requested: &[VehicleRef],
    max_vehicles: usize,
) -> Result<Vec<VehicleRef>, CompareError> {
    let mut selected: Vec<VehicleRef> = Vec::new();
    for vehicle in requested {
        if !dataset.contains_vehicle(vehicle) {
            tracing::warn!(vehicle = %vehicle.key(), "vehicle not found in dataset");
            continue;
        }
        if !selected.contains(vehicle) {
            selected.push(vehicle.clone());
        }
    }

    if selected.len() < MIN_VEHICLES {
        return Err(CompareError::TooFewVehicles(selected.len()));
    }
    if selected.len() > max_vehicles {
        return Err(CompareError::TooManyVehicles { max: max_vehicles, requested: selected.len() });
    }
    Ok(selected)
}

/// A comparison of several vehicles from one dataset.
#[derive(Debug, Clone)]
pub struct ComparisonSession {
    alignment: Alignment,
}

impl ComparisonSession {
    /// Selects, prepares and aligns the requested vehicles.
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle selection is invalid.
    pub fn open(
        dataset: &Dataset,
        requested: &[VehicleRef],
        max_vehicles: usize,
    ) -> Result<Self, CompareError> {
        let vehicles = select_vehicles(dataset, requested, max_vehicles)?;
        let lists: Vec<Vec<ParameterRecord>> = vehicles
            .iter()
            .map(|v| prepare_records(v, dataset.vehicle_parameters(v)))
            .collect();
        let alignment = align(&vehicles, &lists)?;
        Ok(Self { alignment })
    }

    /// The aligned parameters.
    #[must_use]
    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    /// Compared vehicles in slot order.
    #[must_use]
    pub fn vehicles(&self) -> &[VehicleRef] {
        &self.alignment.vehicles
    }

    /// Shareable `Make-Model,...` selector for this comparison.
    #[must_use]
    pub fn selector(&self) -> String {
        format_vehicle_list(self.vehicles())
    }

    /// Slot index of `vehicle`.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError::NotInComparison`] for vehicles outside the
    /// comparison.
    pub fn index_of(&self, vehicle: &VehicleRef) -> Result<usize, CompareError> {
        self.alignment
            .vehicle_index(vehicle)
            .ok_or_else(|| CompareError::NotInComparison(vehicle.key()))
    }
}
