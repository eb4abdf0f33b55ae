//! List mode: prints collection labels.

use std::io::Write;

use secret_export_core::{SecretServiceClient, list_collections};
use tokio::runtime::Runtime;

use crate::error::CliError;

/// Writes one collection label per line
pub fn cmd_list(
    runtime: &Runtime,
    client: &dyn SecretServiceClient,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let labels = runtime.block_on(list_collections(client))?;
    for label in &labels {
        writeln!(out, "{label}")?;
    }
    out.flush()?;
    Ok(())
}
