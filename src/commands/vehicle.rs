//! `obd-compare vehicle` command.

use crate::cli::Grouping;
use crate::context::ServiceContext;
use crate::dataset::{filter_vehicle_parameters, group_by_ecu, group_by_metric, EcuGrouping};
use crate::signal::{ParameterRecord, VehicleRef};

/// Execute the `vehicle` command.
///
/// # Errors
///
/// Returns an error string if the dataset cannot be loaded or the vehicle
/// is unknown.
pub fn run(
    ctx: &ServiceContext,
    vehicle: &str,
    grouping: Grouping,
    filter: Option<&str>,
) -> Result<(), String> {
    let dataset = super::load_dataset(ctx)?;
    let vehicle = super::vehicle_arg(vehicle);
    if !dataset.contains_vehicle(&vehicle) {
        return Err(format!("Vehicle not found: {}", vehicle.key()));
    }
    print!("{}", render(&vehicle, dataset.vehicle_parameters(&vehicle), grouping, filter));
    Ok(())
}

/// Renders a vehicle's parameters under group headings.
#[must_use]
pub fn render(
    vehicle: &VehicleRef,
    params: &[ParameterRecord],
    grouping: Grouping,
    filter: Option<&str>,
) -> String {
    let matching: Vec<ParameterRecord> =
        filter_vehicle_parameters(params, filter.unwrap_or_default()).into_iter().cloned().collect();

    let mut out = format!("{vehicle}: {} of {} parameters\n", matching.len(), params.len());
    let groups = match grouping {
        Grouping::Ecu => group_by_ecu(&matching, EcuGrouping::Header),
        Grouping::EcuEax => group_by_ecu(&matching, EcuGrouping::ExtendedAddress),
        Grouping::Metric => group_by_metric(&matching),
    };
    for (heading, members) in groups {
        out.push_str(&format!("\n[{heading}]\n"));
        for param in members {
            let unit = param.unit.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "  {}  {}  {}  {unit}\n",
                param.id,
                param.name,
                param.command_label()
            ));
        }
    }
    out
}
