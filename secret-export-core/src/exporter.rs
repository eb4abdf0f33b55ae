//! Export pipeline
//!
//! Resolves the collection, lists its items, opens one secret session and
//! reads the items in order. The first failure aborts the run before
//! anything is rendered, so a failed export never produces output.

use chrono::{DateTime, Utc};
use tracing::Instrument;

use crate::collection::{list_items, resolve_collection};
use crate::error::ExportResult;
use crate::reader::read_item;
use crate::record::{self, ExportDocument};
use crate::service::SecretServiceClient;
use crate::session::SecretSession;
use crate::tracing::span_names;

/// Counters of one export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Items turned into records
    pub exported_count: usize,
    /// Labels of items skipped because their secret was empty
    pub skipped: Vec<String>,
}

impl ExportSummary {
    /// Number of skipped items
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Total number of items seen
    #[must_use]
    pub fn total(&self) -> usize {
        self.exported_count + self.skipped.len()
    }
}

/// Result of a successful export run
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Records ready to be rendered
    pub document: ExportDocument,
    /// What was exported and skipped
    pub summary: ExportSummary,
}

/// Reads every item of the collection labelled `collection_name` into an
/// export document.
///
/// `run_timestamp` stamps the document and the provenance note of every
/// record.
///
/// # Errors
///
/// Returns the first error hit while resolving the collection, listing its
/// items, opening the session or reading any item.
pub async fn export_collection(
    client: &dyn SecretServiceClient,
    collection_name: &str,
    run_timestamp: DateTime<Utc>,
) -> ExportResult<ExportOutcome> {
    let span = tracing::info_span!(span_names::EXPORT_COLLECTION, collection = %collection_name);
    read_collection(client, collection_name, run_timestamp)
        .instrument(span)
        .await
}

async fn read_collection(
    client: &dyn SecretServiceClient,
    collection_name: &str,
    run_timestamp: DateTime<Utc>,
) -> ExportResult<ExportOutcome> {
    let collection = resolve_collection(client, collection_name).await?;
    let items = list_items(collection.as_ref()).await?;
    let session = SecretSession::open(client).await?;

    let mut document = ExportDocument::new(run_timestamp);
    let mut summary = ExportSummary::default();

    for item in &items {
        let raw = read_item(item.as_ref(), &session).await?;
        match record::build(&raw, collection_name, run_timestamp) {
            Some(record) => {
                document.records.push(record);
                summary.exported_count += 1;
            }
            None => summary.skipped.push(raw.label),
        }
    }

    tracing::info!(
        exported = summary.exported_count,
        skipped = summary.skipped_count(),
        "Export complete"
    );

    Ok(ExportOutcome { document, summary })
}
