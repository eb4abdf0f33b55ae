//! Collection enumeration
//!
//! Listing is advisory: a collection whose label cannot be read is logged and
//! left out. Resolving items for an export is not: any failure aborts.

use tracing::Instrument;

use crate::error::{ExportError, ExportResult};
use crate::service::{SecretCollection, SecretItem, SecretServiceClient};
use crate::tracing::span_names;

/// Returns the labels of all collections with a non-empty label, in the
/// order reported by the service.
///
/// # Errors
///
/// Returns `ExportError::Connection` if the collections cannot be listed.
pub async fn list_collections(client: &dyn SecretServiceClient) -> ExportResult<Vec<String>> {
    collection_labels(client)
        .instrument(tracing::info_span!(span_names::LIST_COLLECTIONS))
        .await
}

async fn collection_labels(client: &dyn SecretServiceClient) -> ExportResult<Vec<String>> {
    let collections = client
        .collections()
        .await
        .map_err(|e| ExportError::Connection(format!("could not retrieve the collections: {e}")))?;

    let mut labels = Vec::with_capacity(collections.len());
    for collection in &collections {
        if let Some(label) = readable_label(collection.as_ref()).await {
            labels.push(label);
        }
    }
    Ok(labels)
}

/// Finds the collection whose label is exactly `name`.
///
/// # Errors
///
/// Returns `ExportError::Connection` if the collections cannot be listed and
/// `ExportError::CollectionNotFound` if no label matches.
pub async fn resolve_collection(
    client: &dyn SecretServiceClient,
    name: &str,
) -> ExportResult<Box<dyn SecretCollection>> {
    let collections = client
        .collections()
        .await
        .map_err(|e| ExportError::Connection(format!("could not retrieve the collections: {e}")))?;

    for collection in collections {
        if readable_label(collection.as_ref()).await.as_deref() == Some(name) {
            tracing::debug!(collection = %collection.path(), name, "Resolved collection");
            return Ok(collection);
        }
    }
    Err(ExportError::CollectionNotFound(name.to_string()))
}

/// Lists every item of a collection.
///
/// # Errors
///
/// Returns `ExportError::Connection` on any failure; no partial list is
/// returned.
pub async fn list_items(collection: &dyn SecretCollection) -> ExportResult<Vec<Box<dyn SecretItem>>> {
    let items = collection.items().await.map_err(|e| {
        ExportError::Connection(format!(
            "could not list the items of {}: {e}",
            collection.path()
        ))
    })?;
    tracing::debug!(collection = %collection.path(), count = items.len(), "Listed items");
    Ok(items)
}

/// Reads a collection label, returning `None` for unreadable or empty labels.
async fn readable_label(collection: &dyn SecretCollection) -> Option<String> {
    match collection.label().await {
        Ok(label) if label.is_empty() => None,
        Ok(label) => Some(label),
        Err(e) => {
            tracing::warn!(collection = %collection.path(), error = %e, "Skipping collection with unreadable label");
            None
        }
    }
}
