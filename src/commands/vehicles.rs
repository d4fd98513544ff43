//! `obd-compare vehicles` command.

use crate::context::ServiceContext;
use crate::dataset::{Dataset, VehicleFilter};

/// Execute the `vehicles` command.
///
/// # Errors
///
/// Returns an error string if the dataset cannot be loaded.
pub fn run(ctx: &ServiceContext, make: Option<&str>, model: Option<&str>) -> Result<(), String> {
    let dataset = super::load_dataset(ctx)?;
    let filter = VehicleFilter { make: make.map(String::from), model: model.map(String::from) };
    print!("{}", render(&dataset, &filter));
    Ok(())
}

/// One line per vehicle: key, parameter count, generic marker.
#[must_use]
pub fn render(dataset: &Dataset, filter: &VehicleFilter) -> String {
    let vehicles = dataset.vehicles(filter);
    if vehicles.is_empty() {
        return "No vehicles found.\n".to_string();
    }
    let width = vehicles.iter().map(|v| v.key().len()).max().unwrap_or(0);
    let mut out = String::new();
    for vehicle in vehicles {
        let count = dataset.vehicle_parameters(vehicle).len();
        let generic = if vehicle.is_generic() { "  (generic)" } else { "" };
        out.push_str(&format!("{:<width$}  {count} parameters{generic}\n", vehicle.key()));
    }
    out
}
