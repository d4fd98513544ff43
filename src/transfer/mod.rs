//! Copying parameter definitions from one compared vehicle to others.
//!
//! The pipeline is plan → group → serialize: [`plan`] finds the gaps,
//! [`CommandGrouper`] merges each target's existing and new signals by
//! command, and [`ArtifactSerializer`] renders the result.

pub mod fields;
mod grouper;
mod planner;
mod transplant;

pub use grouper::{
    command_key, group_by_command, CommandGroup, CommandGrouper, SignalEntry, DEFAULT_FREQ,
};
pub use planner::{plan, Provenance, SynthesizedParameter, TransferPlan};
pub use transplant::{adjust_id, model_prefix, transplant_id, Transplant, TransplantConfidence};

use serde::Serialize;

use crate::artifact::{ArtifactSerializer, ScalingParser};
use crate::compare::{Alignment, CanonicalParameter};
use crate::signal::VehicleRef;

/// The generated artifact for one target vehicle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleArtifact {
    /// Receiving vehicle.
    pub vehicle: VehicleRef,
    /// Artifact text.
    pub text: String,
    /// Number of synthesized parameters in the artifact.
    pub new_parameters: usize,
    /// New ids derived without recognising the source prefix.
    pub low_confidence_ids: Vec<String>,
}

/// Result of a transfer request.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    /// No target was missing any selected parameter.
    NothingToTransfer,
    /// One artifact per target with at least one new parameter.
    Artifacts(Vec<VehicleArtifact>),
}

/// Runs the whole transfer pipeline over an alignment.
///
/// Each target's artifact contains its existing signals (in alignment order)
/// followed by the synthesized ones.
pub fn transfer<'a, P: ScalingParser>(
    alignment: &Alignment,
    selected: impl IntoIterator<Item = &'a CanonicalParameter>,
    target_indices: &[usize],
    grouper: &CommandGrouper,
    serializer: &ArtifactSerializer<P>,
) -> TransferOutcome {
    let plan = plan(selected, target_indices, &alignment.vehicles);
    if plan.is_empty() {
        return TransferOutcome::NothingToTransfer;
    }

    let artifacts = plan
        .iter()
        .map(|(target, synthesized)| {
            let vehicle = alignment.vehicles[target].clone();
            let groups = grouper.group(alignment.records_for(target), synthesized);
            let text = serializer.serialize(&groups, &vehicle);
            let low_confidence_ids = synthesized
                .iter()
                .filter(|s| s.id_confidence.needs_review())
                .map(|s| s.record.id.clone())
                .collect();
            tracing::debug!(vehicle = %vehicle, new = synthesized.len(), "built transfer artifact");
            VehicleArtifact { vehicle, text, new_parameters: synthesized.len(), low_confidence_ids }
        })
        .collect();

    TransferOutcome::Artifacts(artifacts)
}
