//! `obd-compare compare` command.

use serde::Serialize;

use crate::compare::{
    parse_vehicle_list, CanonicalParameter, ComparisonSession, ParameterFilter, SignatureCollision,
};
use crate::context::ServiceContext;

/// JSON shape of `compare --json`.
#[derive(Debug, Serialize)]
pub struct CompareReport<'a> {
    /// Shareable `Make-Model,...` selector.
    pub selector: String,
    /// Compared vehicle keys in slot order.
    pub vehicles: Vec<String>,
    /// Filtered and sorted parameters.
    pub parameters: Vec<&'a CanonicalParameter>,
    /// Same-vehicle signature collisions.
    pub collisions: &'a [SignatureCollision],
}

/// Execute the `compare` command.
///
/// # Errors
///
/// Returns an error string if the dataset cannot be loaded or the vehicle
/// selection is invalid.
pub fn run(
    ctx: &ServiceContext,
    vehicles: &str,
    query: Option<&str>,
    common_only: bool,
    json: bool,
) -> Result<(), String> {
    let dataset = super::load_dataset(ctx)?;
    let requested = parse_vehicle_list(vehicles);
    let session = ComparisonSession::open(&dataset, &requested, ctx.config.max_vehicles)
        .map_err(|e| format!("Cannot compare {vehicles}: {e}"))?;
    let filter = ParameterFilter { query: query.map(String::from), common_only };

    if json {
        let report = report(&session, &filter);
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize comparison: {e}"))?;
        println!("{text}");
    } else {
        print!("{}", render(&session, &filter));
    }
    Ok(())
}

/// Builds the JSON report.
#[must_use]
pub fn report<'a>(session: &'a ComparisonSession, filter: &ParameterFilter) -> CompareReport<'a> {
    let alignment = session.alignment();
    CompareReport {
        selector: session.selector(),
        vehicles: session.vehicles().iter().map(|v| v.key()).collect(),
        parameters: filter.apply(&alignment.parameters),
        collisions: &alignment.collisions,
    }
}

/// Renders the comparison table: one row per parameter with each
/// vehicle's id (or `-`) and a `Common` marker.
#[must_use]
pub fn render(session: &ComparisonSession, filter: &ParameterFilter) -> String {
    let alignment = session.alignment();
    let rows = filter.apply(&alignment.parameters);

    let mut header = vec!["Parameter".to_string(), "Command".to_string()];
    header.extend(session.vehicles().iter().map(|v| v.key()));
    header.push(String::new());

    let mut table: Vec<Vec<String>> = vec![header];
    for param in &rows {
        let command = param
            .first_present()
            .map(|(_, p)| format!("{} {}", p.hdr.as_deref().unwrap_or_default(), p.command_label()))
            .unwrap_or_default();
        let mut row = vec![param.name.clone(), command.trim().to_string()];
        row.extend(
            param.vehicles.iter().map(|slot| slot.as_ref().map_or("-".to_string(), |p| p.id.clone())),
        );
        row.push(if param.is_common() { "Common".to_string() } else { String::new() });
        table.push(row);
    }

    let mut out = format!("Comparing {}\n\n", session.selector());
    out.push_str(&format_table(&table));
    out.push_str(&format!(
        "\n{} of {} parameters shown\n",
        rows.len(),
        alignment.parameters.len()
    ));
    if !alignment.collisions.is_empty() {
        out.push_str(&format!(
            "{} same-vehicle signature collisions (later record kept)\n",
            alignment.collisions.len()
        ));
    }
    out
}

fn format_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|c| rows.iter().filter_map(|r| r.get(c)).map(String::len).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in rows {
        let cells: Vec<String> =
            row.iter().zip(&widths).map(|(cell, width)| format!("{cell:<width$}")).collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}
