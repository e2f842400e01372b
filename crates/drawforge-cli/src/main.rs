//! drawforge command-line interface.
//!
//! Exit codes: 0 on success, 1 when the draw fails or the assignments are
//! invalid, 2 when an input or config file cannot be read.

mod commands;
mod input;
mod output;

use std::process::ExitCode;

use owo_colors::OwoColorize;

use commands::{CommandLine, Outcome};

fn main() -> ExitCode {
    match CommandLine::parse_args().run() {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Failure) => ExitCode::from(1),
        Err(err) => {
            eprintln!("{}: {}", "error".bright_red().bold(), err);
            ExitCode::from(2)
        }
    }
}
