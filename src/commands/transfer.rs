//! `obd-compare transfer` command.

use std::path::{Path, PathBuf};

use crate::artifact::ArtifactSerializer;
use crate::compare::{parse_vehicle_list, Alignment, CanonicalParameter, ComparisonSession};
use crate::context::ServiceContext;
use crate::transfer::{transfer, CommandGrouper, TransferOutcome, VehicleArtifact};

/// Printed when no target is missing any selected parameter.
pub const NOTHING_TO_TRANSFER: &str = "No parameters to transfer.";

/// Execute the `transfer` command.
///
/// # Errors
///
/// Returns an error string if the dataset cannot be loaded, the vehicle
/// selection is invalid, a selector or target is not part of the
/// comparison, or an artifact cannot be written.
pub fn run(
    ctx: &ServiceContext,
    vehicles: &str,
    selectors: &[String],
    targets: &[String],
    out: Option<&Path>,
) -> Result<(), String> {
    let dataset = super::load_dataset(ctx)?;
    let requested = parse_vehicle_list(vehicles);
    let session = ComparisonSession::open(&dataset, &requested, ctx.config.max_vehicles)
        .map_err(|e| format!("Cannot compare {vehicles}: {e}"))?;

    let selected = resolve_selection(session.alignment(), selectors)?;
    let target_indices = targets
        .iter()
        .map(|t| session.index_of(&super::vehicle_arg(t)).map_err(|e| e.to_string()))
        .collect::<Result<Vec<_>, _>>()?;

    let grouper = CommandGrouper::new(ctx.config.default_freq);
    let outcome = transfer(
        session.alignment(),
        selected,
        &target_indices,
        &grouper,
        &ArtifactSerializer::new(),
    );

    let TransferOutcome::Artifacts(artifacts) = outcome else {
        println!("{NOTHING_TO_TRANSFER}");
        return Ok(());
    };

    for artifact in &artifacts {
        for id in &artifact.low_confidence_ids {
            eprintln!("Review id {id} for {}: source prefix not recognised", artifact.vehicle);
        }
        match out {
            Some(dir) => {
                let path = write_artifact(ctx, dir, artifact)?;
                println!(
                    "Wrote {} ({} new parameters)",
                    path.display(),
                    artifact.new_parameters
                );
            }
            None => print!("{}", artifact.text),
        }
    }
    Ok(())
}

/// Finds the canonical parameters named by `selectors`, in selector order.
///
/// A selector matches a signature, a representative id, or any vehicle's
/// parameter id. Repeated matches are kept once.
///
/// # Errors
///
/// Returns an error string naming the first selector that matches nothing.
pub fn resolve_selection<'a>(
    alignment: &'a Alignment,
    selectors: &[String],
) -> Result<Vec<&'a CanonicalParameter>, String> {
    let mut selected: Vec<&CanonicalParameter> = Vec::new();
    for selector in selectors {
        let found = alignment
            .by_signature(selector)
            .or_else(|| alignment.parameters.iter().find(|p| p.id == *selector))
            .or_else(|| {
                alignment
                    .parameters
                    .iter()
                    .find(|p| p.vehicles.iter().flatten().any(|r| r.id == *selector))
            })
            .ok_or_else(|| format!("No parameter matches '{selector}' in this comparison"))?;
        if !selected.iter().any(|p| std::ptr::eq(*p, found)) {
            selected.push(found);
        }
    }
    Ok(selected)
}

/// Writes `<dir>/<Make-Model>.json.txt` through the filesystem port.
fn write_artifact(
    ctx: &ServiceContext,
    dir: &Path,
    artifact: &VehicleArtifact,
) -> Result<PathBuf, String> {
    let path = dir.join(format!("{}.json.txt", artifact.vehicle.key()));
    ctx.fs
        .write(&path, &artifact.text)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{MemoryFileSystem, StaticDatasetSource};
    use crate::config::ExplorerConfig;
    use crate::dataset::tests::sample;
    use std::sync::Arc;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn selectors_match_ids_and_signatures() {
        let vehicles = parse_vehicle_list("Hyundai-IONIQ-5,Subaru-WRX");
        let session = ComparisonSession::open(&sample(), &vehicles, 4).unwrap();
        let alignment = session.alignment();

        let by_other_id = resolve_selection(alignment, &args(&["WRX_SOC"])).unwrap();
        assert_eq!(by_other_id[0].id, "IONIQ5_SOC");

        let sig = by_other_id[0].signature.clone();
        let both = resolve_selection(alignment, &[sig, "IONIQ5_SOC".into()]).unwrap();
        assert_eq!(both.len(), 1);

        let err = resolve_selection(alignment, &args(&["NOPE"])).unwrap_err();
        assert!(err.contains("NOPE"));
    }

    #[test]
    fn writes_artifact_per_target() {
        let fs = Arc::new(MemoryFileSystem::new());
        let ctx = ServiceContext::new(
            fs.clone(),
            Box::new(StaticDatasetSource::new(sample())),
            ExplorerConfig::default(),
        );

        run(
            &ctx,
            "Hyundai-IONIQ-5,Subaru-WRX",
            &args(&["IONIQ5_TP_FL"]),
            &args(&["Subaru-WRX"]),
            Some(Path::new("out")),
        )
        .unwrap();

        let text = fs.contents(Path::new("out/Subaru-WRX.json.txt")).unwrap();
        assert!(text.contains("\"id\": \"WRX_TP_FL\""));
        assert!(text.contains("// === NEW COMMAND ==="));
    }

    #[test]
    fn nothing_to_transfer_is_not_an_error() {
        let fs = Arc::new(MemoryFileSystem::new());
        let ctx = ServiceContext::new(
            fs.clone(),
            Box::new(StaticDatasetSource::new(sample())),
            ExplorerConfig::default(),
        );
        let result = run(
            &ctx,
            "Hyundai-IONIQ-5,Subaru-WRX",
            &args(&["IONIQ5_SOC"]),
            &args(&["Subaru-WRX"]),
            Some(Path::new("out")),
        );
        assert!(result.is_ok());
        assert!(fs.paths().is_empty());
    }

    #[test]
    fn target_outside_comparison_is_rejected() {
        let ctx = crate::commands::tests::sample_context();
        let err = run(
            &ctx,
            "Hyundai-IONIQ-5,Subaru-WRX",
            &args(&["IONIQ5_TP_FL"]),
            &args(&["Kia-EV6"]),
            None,
        )
        .unwrap_err();
        assert!(err.contains("Kia-EV6"));
    }
}
