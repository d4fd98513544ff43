//! Works out which parameters each target vehicle is missing and synthesizes
//! a definition for every gap.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::compare::CanonicalParameter;
use crate::signal::{ParameterRecord, VehicleRef};

use super::transplant::{transplant_id, TransplantConfidence};

/// Where a synthesized parameter came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    /// Make of the vehicle the definition was copied from.
    pub source_make: String,
    /// Model of the source vehicle.
    pub source_model: String,
    /// Id of the parameter on the source vehicle.
    pub source_id: String,
    /// Make of the receiving vehicle.
    pub target_make: String,
    /// Model of the receiving vehicle.
    pub target_model: String,
}

/// A parameter definition copied from a source vehicle onto a target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedParameter {
    /// The copied record with its id transplanted and vehicle-specific fields
    /// removed.
    pub record: ParameterRecord,
    /// Source and target of the copy.
    pub provenance: Provenance,
    /// How the new id was derived.
    pub id_confidence: TransplantConfidence,
}

impl SynthesizedParameter {
    /// Always `true`; synthesized parameters are new to their target.
    #[must_use]
    pub fn is_new_parameter(&self) -> bool {
        true
    }
}

/// Synthesized parameters per target vehicle index.
///
/// Targets with nothing to receive have no entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransferPlan {
    targets: BTreeMap<usize, Vec<SynthesizedParameter>>,
}

impl TransferPlan {
    /// Returns `true` if no target receives anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Parameters planned for vehicle `index`.
    #[must_use]
    pub fn for_target(&self, index: usize) -> &[SynthesizedParameter] {
        self.targets.get(&index).map_or(&[], Vec::as_slice)
    }

    /// Iterates `(target index, parameters)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[SynthesizedParameter])> + '_ {
        self.targets.iter().map(|(i, params)| (*i, params.as_slice()))
    }

    /// Total number of synthesized parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.values().map(Vec::len).sum()
    }
}

/// Plans a transfer of `selected` parameters onto `target_indices`.
///
/// The source for each parameter is its first present vehicle slot. Targets
/// that already have the parameter receive nothing for it.
pub fn plan<'a>(
    selected: impl IntoIterator<Item = &'a CanonicalParameter>,
    target_indices: &[usize],
    vehicles: &[VehicleRef],
) -> TransferPlan {
    let mut targets: BTreeMap<usize, Vec<SynthesizedParameter>> = BTreeMap::new();

    for canonical in selected {
        let Some((source_index, source_param)) = canonical.first_present() else {
            tracing::debug!(id = %canonical.id, "selected parameter has no source");
            continue;
        };
        let Some(source_vehicle) = vehicles.get(source_index) else {
            continue;
        };

        for &target_index in target_indices {
            let Some(target_vehicle) = vehicles.get(target_index) else {
                tracing::warn!(target_index, "transfer target outside the comparison");
                continue;
            };
            if canonical.record(target_index).is_some() {
                continue;
            }

            let transplant = transplant_id(&source_param.id, source_vehicle, target_vehicle);
            if transplant.confidence.needs_review() {
                tracing::debug!(
                    source_id = %source_param.id,
                    new_id = %transplant.id,
                    "id prefix not recognised; prepended target prefix"
                );
            }

            let mut record = source_param.clone();
            record.vehicle_make = None;
            record.vehicle_model = None;
            record.bit_offset = None;
            record.bit_length = None;
            record.id = transplant.id;

            targets.entry(target_index).or_default().push(SynthesizedParameter {
                record,
                provenance: Provenance {
                    source_make: source_vehicle.make.clone(),
                    source_model: source_vehicle.model.clone(),
                    source_id: source_param.id.clone(),
                    target_make: target_vehicle.make.clone(),
                    target_model: target_vehicle.model.clone(),
                },
                id_confidence: transplant.confidence,
            });
        }
    }

    tracing::debug!(targets = targets.len(), "planned transfer");
    TransferPlan { targets }
}
