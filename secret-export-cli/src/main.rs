//! `secret-service-export` - exports a Secret Service collection
//!
//! Without a collection name the tool lists the available collections. With
//! one, it reads every item of that collection and writes them as Paw JSON or
//! CSV to stdout or a file.

mod cli;
mod commands;
mod error;
mod util;

use clap::Parser;
use cli::Cli;
use error::CliError;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let settings = util::load_settings(cli.config.as_deref())?;
    secret_export_core::init_tracing(&util::tracing_config(&settings, cli.verbose, cli.quiet))
        .map_err(|e| CliError::Logging(e.to_string()))?;

    commands::dispatch(cli, &settings)
}
