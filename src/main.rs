//! Binary entrypoint for the `obd-compare` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    obd_compare::logging::init();
    match obd_compare::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
