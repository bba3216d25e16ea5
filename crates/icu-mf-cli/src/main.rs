#![forbid(unsafe_code)]

mod cli;
mod command_display_name;
mod command_kind;
mod command_parse;
mod command_validate;
mod config;
mod diagnostic;
mod error;
mod logging;
mod message_source;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
