//! CSV exporter
//!
//! One header row followed by one row per record. Quoting follows RFC 4180
//! via the `csv` crate.

use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::ExportResult;
use crate::record::ExportDocument;

use super::{ExportFormat, ExportTarget};

/// Column header of the CSV export
pub const CSV_HEADER: [&str; 4] = ["name", "password", "created", "modified"];

/// Canonical textual timestamp used in CSV cells.
///
/// RFC 3339 in UTC with whole seconds; unknown timestamps render empty.
#[must_use]
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// CSV exporter
pub struct CsvExporter;

impl CsvExporter {
    /// Creates a new CSV exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportTarget for CsvExporter {
    fn format_id(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn display_name(&self) -> &'static str {
        ExportFormat::Csv.display_name()
    }

    fn render(&self, document: &ExportDocument, sink: &mut dyn Write) -> ExportResult<()> {
        let mut writer = ::csv::WriterBuilder::new()
            .terminator(::csv::Terminator::Any(b'\n'))
            .from_writer(sink);

        writer.write_record(CSV_HEADER)?;
        for record in &document.records {
            writer.write_record([
                record.name.as_str(),
                record.expose_secret(),
                format_timestamp(record.created).as_str(),
                format_timestamp(record.modified).as_str(),
            ])?;
        }
        writer
            .flush()
            .map_err(|e| crate::error::ExportError::Serialization(e.to_string()))
    }
}
