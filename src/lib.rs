//! Cross-vehicle OBD-II parameter comparison and transfer.
//!
//! The library aligns the signal definitions of several vehicles by a
//! derived signature ([`compare`]), lets a caller pick parameters one vehicle
//! has and another lacks, and renders paste-ready signal-set fragments for
//! the vehicles missing them ([`transfer`], [`artifact`]). The `obd-compare`
//! binary wraps this around a static JSON dataset ([`dataset`]).

pub mod adapters;
pub mod artifact;
pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod logging;
pub mod ports;
pub mod signal;
pub mod transfer;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli)
}
