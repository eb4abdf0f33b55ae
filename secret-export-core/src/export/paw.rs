//! Paw JSON exporter
//!
//! Produces `{"login":[{"metadata":{..},"note":{..},"password":{..}}]}`,
//! the login import format of the Paw password manager.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::ExportResult;
use crate::record::{ExportDocument, ExportRecord};

use super::{ExportFormat, ExportTarget};

/// Paw item type tagging an entry as a login
pub const LOGIN_ITEM_TYPE: u8 = 8;

#[derive(Serialize)]
struct PawDocument<'a> {
    login: Vec<PawLogin<'a>>,
}

#[derive(Serialize)]
struct PawLogin<'a> {
    metadata: PawMetadata<'a>,
    note: PawValue<'a>,
    password: PawValue<'a>,
}

#[derive(Serialize)]
struct PawMetadata<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    name: &'a str,
    #[serde(rename = "type")]
    item_type: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct PawValue<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    value: &'a str,
}

impl<'a> From<&'a ExportRecord> for PawLogin<'a> {
    fn from(record: &'a ExportRecord) -> Self {
        Self {
            metadata: PawMetadata {
                name: &record.name,
                item_type: LOGIN_ITEM_TYPE,
                modified: record.modified,
                created: record.created,
            },
            note: PawValue {
                value: &record.note,
            },
            password: PawValue {
                value: record.expose_secret(),
            },
        }
    }
}

/// Paw JSON exporter
pub struct PawExporter;

impl PawExporter {
    /// Creates a new Paw exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for PawExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportTarget for PawExporter {
    fn format_id(&self) -> ExportFormat {
        ExportFormat::Paw
    }

    fn display_name(&self) -> &'static str {
        ExportFormat::Paw.display_name()
    }

    fn render(&self, document: &ExportDocument, sink: &mut dyn Write) -> ExportResult<()> {
        let paw = PawDocument {
            login: document.records.iter().map(PawLogin::from).collect(),
        };
        serde_json::to_writer(&mut *sink, &paw)?;
        sink.write_all(b"\n")
            .and_then(|()| sink.flush())
            .map_err(|e| crate::error::ExportError::Serialization(e.to_string()))
    }
}
