//! Item reader
//!
//! Reads one item at a time: unlock, label, secret, timestamps. Every
//! failure is fatal to the export run.

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::error::{ExportError, ExportResult, ServiceError};
use crate::service::SecretItem;
use crate::session::SecretSession;

/// Everything read from one item
pub struct RawItem {
    /// Object path of the item
    pub path: String,
    /// Item label
    pub label: String,
    /// Secret value, wiped on drop
    pub secret: Zeroizing<Vec<u8>>,
    /// Creation time, `None` when the service reports none
    pub created: Option<DateTime<Utc>>,
    /// Last modification time, `None` when the service reports none
    pub modified: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for RawItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawItem")
            .field("path", &self.path)
            .field("label", &self.label)
            .field("secret", &format_args!("[{} bytes]", self.secret.len()))
            .field("created", &self.created)
            .field("modified", &self.modified)
            .finish()
    }
}

/// Converts a Secret Service timestamp (seconds since the epoch) to UTC.
///
/// Zero means "not set" and maps to `None`, as do values chrono cannot
/// represent.
#[must_use]
pub fn timestamp_from_secs(secs: u64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    i64::try_from(secs)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

/// Unlocks an item and reads all of its exported attributes.
///
/// The unlock call may block until the user answers a prompt.
///
/// # Errors
///
/// - `ExportError::Unlock` if the item cannot be unlocked
/// - `ExportError::Metadata` if the label or a timestamp cannot be read
/// - `ExportError::SecretRetrieval` if the secret cannot be read
pub async fn read_item(item: &dyn SecretItem, session: &SecretSession) -> ExportResult<RawItem> {
    let path = item.path().to_string();

    item.unlock().await.map_err(|e| ExportError::Unlock {
        item: path.clone(),
        reason: e.to_string(),
    })?;

    let label = item
        .label()
        .await
        .map_err(|e| metadata_error(&path, "label", &e))?;

    let secret = item
        .secret(session.handle())
        .await
        .map_err(|e| ExportError::SecretRetrieval {
            item: path.clone(),
            reason: e.to_string(),
        })?;

    let created = item
        .created()
        .await
        .map_err(|e| metadata_error(&path, "creation time", &e))?;
    let modified = item
        .modified()
        .await
        .map_err(|e| metadata_error(&path, "modification time", &e))?;

    tracing::trace!(item = %path, label = %label, "Read item");

    Ok(RawItem {
        path,
        label,
        secret,
        created: timestamp_from_secs(created),
        modified: timestamp_from_secs(modified),
    })
}

fn metadata_error(path: &str, field: &'static str, err: &ServiceError) -> ExportError {
    ExportError::Metadata {
        item: path.to_string(),
        field,
        reason: err.to_string(),
    }
}
