//! `obd-compare parameters` command.

use crate::context::ServiceContext;
use crate::dataset::{Dataset, ParameterSearch};

/// Execute the `parameters` command.
///
/// # Errors
///
/// Returns an error string if the dataset cannot be loaded.
pub fn run(
    ctx: &ServiceContext,
    query: Option<&str>,
    vehicle: Option<&str>,
    metric: Option<&str>,
) -> Result<(), String> {
    let dataset = super::load_dataset(ctx)?;
    let search = ParameterSearch {
        query: query.map(String::from),
        vehicle: vehicle.map(|v| super::vehicle_arg(v).key()),
        metric: metric.map(String::from),
    };
    print!("{}", render(&dataset, &search));
    Ok(())
}

/// One line per parameter id.
#[must_use]
pub fn render(dataset: &Dataset, search: &ParameterSearch) -> String {
    let params = dataset.search_parameters(search);
    if params.is_empty() {
        return "No parameters found.\n".to_string();
    }
    let mut out = String::new();
    for param in params {
        let metric = param.suggested_metric.as_deref().unwrap_or("-");
        out.push_str(&format!(
            "{}  {}  [{metric}]  {}\n",
            param.id,
            param.name,
            param.vehicles.join(", ")
        ));
    }
    out
}
