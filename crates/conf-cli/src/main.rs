//! conf CLI
//!
//! Layers configuration files, environment variables and overrides, then
//! prints lookups or the merged snapshot.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use cli::Cli;
use error::Result;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(files = cli.files.len(), overrides = cli.overrides.len(), "Building configuration");

    let conf = commands::build_manager(&cli)?;
    let mut stdout = std::io::stdout().lock();
    commands::execute(&conf, &cli.command, &mut stdout)
}
