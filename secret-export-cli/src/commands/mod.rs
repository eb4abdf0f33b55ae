//! Command handler modules for the CLI.

mod export;
mod list;

use secret_export_core::config::ExportSettings;
use secret_export_core::{DbusSecretService, ExportError, ExportFormat};

use crate::cli::Cli;
use crate::error::CliError;
use crate::util::create_runtime;

/// Connects to the session bus and runs list or export mode.
pub fn dispatch(cli: &Cli, settings: &ExportSettings) -> Result<(), CliError> {
    let runtime = create_runtime()?;
    let client = runtime
        .block_on(DbusSecretService::connect())
        .map_err(|e| ExportError::Connection(e.to_string()))?;

    match cli.collection_name() {
        None => {
            if cli.output.is_some() {
                tracing::warn!("--output is ignored when listing collections");
            }
            list::cmd_list(&runtime, &client, &mut std::io::stdout().lock())
        }
        Some(collection) => {
            let format = cli.format.map_or(settings.default_format, ExportFormat::from);
            export::cmd_export(
                &runtime,
                &client,
                &export::ExportParams {
                    collection,
                    format,
                    output: cli.output.as_deref(),
                },
            )
            .map(|_| ())
        }
    }
}
