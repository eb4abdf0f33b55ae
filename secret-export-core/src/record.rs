//! Canonical export records
//!
//! An [`ExportRecord`] is the format-agnostic form of one exported
//! credential. Records are only built for items with a non-empty secret.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use crate::reader::RawItem;

/// strftime pattern for RFC 1123 dates in UTC
const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// One exported credential
#[derive(Debug, Clone)]
pub struct ExportRecord {
    /// Item label
    pub name: String,
    /// Secret value decoded as text
    pub secret: SecretString,
    /// Creation time, if known
    pub created: Option<DateTime<Utc>>,
    /// Last modification time, if known
    pub modified: Option<DateTime<Utc>>,
    /// Provenance note attached to the record
    pub note: String,
}

impl ExportRecord {
    /// Secret value as plain text.
    ///
    /// Only the serializers should call this.
    #[must_use]
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

/// The ordered records of one export run
#[derive(Debug, Clone)]
pub struct ExportDocument {
    /// When the export was generated
    pub generated_at: DateTime<Utc>,
    /// Records in item order
    pub records: Vec<ExportRecord>,
}

impl ExportDocument {
    /// Creates an empty document stamped with the run timestamp
    #[must_use]
    pub const fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            records: Vec::new(),
        }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no item was exported
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Formats a timestamp as RFC 1123 (`Mon, 02 Jan 2006 15:04:05 GMT`)
#[must_use]
pub fn format_rfc1123(timestamp: DateTime<Utc>) -> String {
    timestamp.format(RFC1123_FORMAT).to_string()
}

/// Builds the provenance note for records of `collection_name`
#[must_use]
pub fn provenance_note(collection_name: &str, run_timestamp: DateTime<Utc>) -> String {
    format!(
        "exported from the Secret Service collection {:?}\n({})",
        collection_name,
        format_rfc1123(run_timestamp)
    )
}

/// Maps a raw item to an export record.
///
/// Returns `None` and logs a warning when the secret is empty. Secrets that
/// are not valid UTF-8 are decoded lossily, with a warning.
#[must_use]
pub fn build(
    item: &RawItem,
    collection_name: &str,
    run_timestamp: DateTime<Utc>,
) -> Option<ExportRecord> {
    if item.secret.is_empty() {
        tracing::warn!("skipped item with empty password: {}", item.label);
        return None;
    }

    let secret = match std::str::from_utf8(&item.secret) {
        Ok(text) => text.to_owned(),
        Err(_) => {
            tracing::warn!(item = %item.path, "secret of {} is not valid UTF-8, invalid bytes replaced", item.label);
            String::from_utf8_lossy(&item.secret).into_owned()
        }
    };

    Some(ExportRecord {
        name: item.label.clone(),
        secret: SecretString::from(secret),
        created: item.created,
        modified: item.modified,
        note: provenance_note(collection_name, run_timestamp),
    })
}
