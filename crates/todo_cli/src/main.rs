//! `todo` command line entry point.

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("todo: {err}");
            ExitCode::FAILURE
        }
    }
}
