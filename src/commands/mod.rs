//! Command dispatch and handlers.

pub mod compare;
pub mod ecu_commands;
pub mod parameters;
pub mod transfer;
pub mod vehicle;
pub mod vehicles;

use std::sync::Arc;

use crate::adapters::live::LiveFileSystem;
use crate::cli::{Cli, Command};
use crate::config::ExplorerConfig;
use crate::context::ServiceContext;
use crate::dataset::Dataset;
use crate::signal::VehicleRef;

/// Resolve configuration, build a live context and run the command.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config =
        ExplorerConfig::resolve(&LiveFileSystem, cli.config.as_deref(), cli.dataset.as_deref())?;
    let ctx = ServiceContext::live(config);
    dispatch_with_context(&cli.command, &ctx)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Vehicles { make, model } => vehicles::run(ctx, make.as_deref(), model.as_deref()),
        Command::Vehicle { vehicle, group, filter } => {
            vehicle::run(ctx, vehicle, *group, filter.as_deref())
        }
        Command::Commands { hdr, vehicle, parameter } => {
            ecu_commands::run(ctx, hdr.as_deref(), vehicle.as_deref(), parameter.as_deref())
        }
        Command::Parameters { query, vehicle, metric } => {
            parameters::run(ctx, query.as_deref(), vehicle.as_deref(), metric.as_deref())
        }
        Command::Compare { vehicles, filter, common, json } => {
            compare::run(ctx, vehicles, filter.as_deref(), *common, *json)
        }
        Command::Transfer { vehicles, select, to, out } => {
            transfer::run(ctx, vehicles, select, to, out.as_deref())
        }
    }
}

/// Loads the dataset through the context's source.
fn load_dataset(ctx: &ServiceContext) -> Result<Arc<Dataset>, String> {
    ctx.dataset.load_dataset().map_err(|e| e.to_string())
}

/// Parses a `Make-Model` token, treating a token without `-` as a generic
/// signal set (`SAEJ1979`).
fn vehicle_arg(token: &str) -> VehicleRef {
    VehicleRef::parse(token).unwrap_or_else(|| VehicleRef::new(token.trim(), ""))
}
