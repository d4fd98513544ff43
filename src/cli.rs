//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Top-level CLI parser for `obd-compare`.
#[derive(Debug, Parser)]
#[command(
    name = "obd-compare",
    version,
    about = "Compare OBD-II parameters across vehicles and transfer missing definitions"
)]
pub struct Cli {
    /// Dataset file or URL (overrides config and environment).
    #[arg(long, global = true)]
    pub dataset: Option<String>,

    /// Path to a YAML config file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// How `vehicle` groups a vehicle's parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Grouping {
    /// By ECU header.
    Ecu,
    /// By extended address, falling back to the header.
    EcuEax,
    /// By suggested metric.
    Metric,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List vehicles in the dataset.
    Vehicles {
        /// Only this make.
        #[arg(long)]
        make: Option<String>,
        /// Model substring, case-insensitive.
        #[arg(long)]
        model: Option<String>,
    },
    /// Show one vehicle's parameters.
    Vehicle {
        /// Vehicle as `Make-Model`, or a generic set name such as `SAEJ1979`.
        vehicle: String,
        /// Grouping for the listing.
        #[arg(long, value_enum, default_value = "ecu")]
        group: Grouping,
        /// Text filter over id, name, command, header, unit and metric.
        #[arg(long)]
        filter: Option<String>,
    },
    /// List ECU commands.
    Commands {
        /// Only this ECU header.
        #[arg(long)]
        hdr: Option<String>,
        /// Only commands used by this vehicle (`Make-Model`).
        #[arg(long)]
        vehicle: Option<String>,
        /// Only commands with a parameter id containing this text.
        #[arg(long)]
        parameter: Option<String>,
    },
    /// Search parameters across vehicles.
    Parameters {
        /// Text to match against parameter ids and names.
        query: Option<String>,
        /// Only parameters of this vehicle (`Make-Model`).
        #[arg(long)]
        vehicle: Option<String>,
        /// Only parameters with this suggested metric.
        #[arg(long)]
        metric: Option<String>,
    },
    /// Compare parameters of several vehicles side by side.
    Compare {
        /// Comma-separated `Make-Model` list.
        vehicles: String,
        /// Text filter over parameter ids and names.
        #[arg(long)]
        filter: Option<String>,
        /// Only parameters every vehicle has.
        #[arg(long)]
        common: bool,
        /// Print the alignment as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Copy selected parameters to vehicles that lack them.
    Transfer {
        /// Comma-separated `Make-Model` list.
        vehicles: String,
        /// Parameter to transfer: signature or any vehicle's parameter id.
        #[arg(long = "select")]
        select: Vec<String>,
        /// Target vehicle (`Make-Model`).
        #[arg(long = "to")]
        to: Vec<String>,
        /// Directory for `<Make-Model>.json.txt` artifacts instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
