//! `obd-compare commands` command.

use crate::context::ServiceContext;
use crate::dataset::{CommandFilter, Dataset};

/// Execute the `commands` command.
///
/// # Errors
///
/// Returns an error string if the dataset cannot be loaded.
pub fn run(
    ctx: &ServiceContext,
    hdr: Option<&str>,
    vehicle: Option<&str>,
    parameter: Option<&str>,
) -> Result<(), String> {
    let dataset = super::load_dataset(ctx)?;
    let filter = CommandFilter {
        hdr: hdr.map(String::from),
        vehicle: vehicle.map(|v| super::vehicle_arg(v).key()),
        parameter: parameter.map(String::from),
    };
    print!("{}", render(&dataset, &filter));
    Ok(())
}

/// One line per command with its users and decoded parameters.
#[must_use]
pub fn render(dataset: &Dataset, filter: &CommandFilter) -> String {
    let commands = dataset.commands(filter);
    if commands.is_empty() {
        return "No commands found.\n".to_string();
    }
    let mut out = String::new();
    for command in commands {
        let ids: Vec<&str> = command.parameters.iter().map(|p| p.record.id.as_str()).collect();
        out.push_str(&format!(
            "{}  hdr {}  cmd {}\n    vehicles: {}\n    parameters: {}\n",
            command.id,
            command.hdr,
            command.cmd.joined(" "),
            command.vehicles.join(", "),
            ids.join(", ")
        ));
    }
    out
}
