//! Cross-vehicle alignment of parameters by signature.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CompareError;
use crate::signal::{signature, NamePrefixMatcher, ParameterRecord, VehicleRef};

/// One logical signal across the compared vehicles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalParameter {
    /// Shared signature; empty for records that could not be matched.
    pub signature: String,
    /// Id of the first record seen with this signature.
    pub id: String,
    /// Normalized display name of that first record.
    pub name: String,
    /// One slot per compared vehicle, in comparison order.
    pub vehicles: Vec<Option<ParameterRecord>>,
}

impl CanonicalParameter {
    /// Number of vehicles that have this parameter.
    #[must_use]
    pub fn present_count(&self) -> usize {
        self.vehicles.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` if every compared vehicle has this parameter.
    #[must_use]
    pub fn is_common(&self) -> bool {
        self.vehicles.iter().all(Option::is_some)
    }

    /// The first vehicle slot holding a record, with its index.
    #[must_use]
    pub fn first_present(&self) -> Option<(usize, &ParameterRecord)> {
        self.vehicles.iter().enumerate().find_map(|(i, slot)| slot.as_ref().map(|p| (i, p)))
    }

    /// The record for vehicle `index`, if present.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&ParameterRecord> {
        self.vehicles.get(index).and_then(Option::as_ref)
    }
}

/// Two records of the same vehicle that produced the same signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureCollision {
    /// Vehicle whose list contained both records.
    pub vehicle_index: usize,
    /// The shared signature.
    pub signature: String,
    /// Id of the record that was overwritten.
    pub replaced_id: String,
    /// Id of the record that now occupies the slot.
    pub kept_id: String,
}

/// Result of aligning N vehicles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alignment {
    /// Compared vehicles, in slot order.
    pub vehicles: Vec<VehicleRef>,
    /// Canonical parameters in first-seen order.
    pub parameters: Vec<CanonicalParameter>,
    /// Same-vehicle signature collisions found while aligning.
    pub collisions: Vec<SignatureCollision>,
}

impl Alignment {
    /// Index of a vehicle within the comparison.
    #[must_use]
    pub fn vehicle_index(&self, vehicle: &VehicleRef) -> Option<usize> {
        self.vehicles.iter().position(|v| v == vehicle)
    }

    /// Records present for vehicle `index`, in alignment order.
    pub fn records_for(&self, index: usize) -> impl Iterator<Item = &ParameterRecord> + '_ {
        self.parameters.iter().filter_map(move |p| p.record(index))
    }

    /// Finds a canonical parameter by its signature.
    #[must_use]
    pub fn by_signature(&self, signature: &str) -> Option<&CanonicalParameter> {
        self.parameters.iter().find(|p| !p.signature.is_empty() && p.signature == signature)
    }
}

/// Aligns the parameter lists of several vehicles.
///
/// `parameter_lists[i]` belongs to `vehicles[i]`. Records are matched by
/// signature; the first record seen for a signature provides the
/// representative id and name. When a vehicle has two records with the same
/// signature the later one takes the slot and the collision is reported.
/// Records with an empty signature are never merged.
///
/// # Errors
///
/// Returns [`CompareError::ParameterListMismatch`] when the two slices differ
/// in length.
pub fn align(
    vehicles: &[VehicleRef],
    parameter_lists: &[Vec<ParameterRecord>],
) -> Result<Alignment, CompareError> {
    if vehicles.len() != parameter_lists.len() {
        return Err(CompareError::ParameterListMismatch {
            vehicles: vehicles.len(),
            lists: parameter_lists.len(),
        });
    }

    let mut parameters: Vec<CanonicalParameter> = Vec::new();
    let mut index_by_signature: HashMap<String, usize> = HashMap::new();
    let mut collisions = Vec::new();

    for (vehicle_index, (vehicle, list)) in vehicles.iter().zip(parameter_lists).enumerate() {
        let matcher = NamePrefixMatcher::new(&vehicle.make, &vehicle.model);

        for param in list {
            let sig = signature(param);
            let existing = if sig.is_empty() { None } else { index_by_signature.get(&sig).copied() };

            let slot_index = if let Some(i) = existing {
                i
            } else {
                let name = if param.name.is_empty() { String::new() } else { matcher.strip(&param.name) };
                parameters.push(CanonicalParameter {
                    signature: sig.clone(),
                    id: param.id.clone(),
                    name,
                    vehicles: vec![None; vehicles.len()],
                });
                let i = parameters.len() - 1;
                if sig.is_empty() {
                    tracing::debug!(id = %param.id, vehicle = %vehicle, "record has no signature");
                } else {
                    index_by_signature.insert(sig.clone(), i);
                }
                i
            };

            let slot = &mut parameters[slot_index].vehicles[vehicle_index];
            if let Some(previous) = slot.as_ref() {
                tracing::warn!(
                    vehicle = %vehicle,
                    signature = %sig,
                    replaced = %previous.id,
                    kept = %param.id,
                    "two parameters of one vehicle share a signature"
                );
                collisions.push(SignatureCollision {
                    vehicle_index,
                    signature: sig.clone(),
                    replaced_id: previous.id.clone(),
                    kept_id: param.id.clone(),
                });
            }
            *slot = Some(param.clone());
        }
    }

    tracing::debug!(
        vehicles = vehicles.len(),
        parameters = parameters.len(),
        collisions = collisions.len(),
        "aligned parameters"
    );

    Ok(Alignment { vehicles: vehicles.to_vec(), parameters, collisions })
}
