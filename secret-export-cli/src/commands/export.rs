//! Export mode: reads a collection and writes it in the chosen format.

use std::path::Path;

use chrono::Utc;
use secret_export_core::{
    ExportFormat, ExportSummary, SecretServiceClient, export_collection, open_output, span_names,
};
use tokio::runtime::Runtime;

use crate::error::CliError;

/// Parameters for the export command
pub struct ExportParams<'a> {
    /// Label of the collection to export
    pub collection: &'a str,
    /// Output format
    pub format: ExportFormat,
    /// Output file, stdout when `None`
    pub output: Option<&'a Path>,
}

/// Exports a collection.
///
/// The sink is only opened once every item has been read, so a failed
/// export leaves no output file behind.
pub fn cmd_export(
    runtime: &Runtime,
    client: &dyn SecretServiceClient,
    params: &ExportParams<'_>,
) -> Result<ExportSummary, CliError> {
    let outcome = runtime.block_on(export_collection(client, params.collection, Utc::now()))?;

    let exporter = params.format.exporter();
    let _span =
        tracing::info_span!(span_names::EXPORT_RENDER, format = %exporter.format_id()).entered();
    let mut sink = open_output(params.output)?;
    exporter.render(&outcome.document, sink.as_mut())?;

    let summary = outcome.summary;
    match params.output {
        Some(path) => tracing::info!(
            exported = summary.exported_count,
            skipped = summary.skipped_count(),
            "Exported {} as {} to {}",
            params.collection,
            exporter.display_name(),
            path.display()
        ),
        None => tracing::info!(
            exported = summary.exported_count,
            skipped = summary.skipped_count(),
            "Exported {} as {}",
            params.collection,
            exporter.display_name()
        ),
    }
    Ok(summary)
}
