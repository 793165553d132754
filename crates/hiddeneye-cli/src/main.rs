use std::process::ExitCode;

use clap::Parser;
use hiddeneye_core::HiddenEyeError;

mod cli;
mod commands;

use cli::CliArgs;

pub type CliResult<T> = Result<T, HiddenEyeError>;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    match args.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
