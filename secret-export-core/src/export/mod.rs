//! Export renderers
//!
//! Renderers turn an [`ExportDocument`] into bytes on an already-open sink.
//! Two formats are supported: Paw JSON and CSV.

mod csv;
mod paw;
mod sink;

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::ExportResult;
use crate::record::ExportDocument;

pub use self::csv::{CSV_HEADER, CsvExporter, format_timestamp};
pub use paw::{LOGIN_ITEM_TYPE, PawExporter};
pub use sink::{OUTPUT_FILE_MODE, open_output};

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Paw password manager JSON
    #[default]
    Paw,
    /// Flat `name,password,created,modified` table
    Csv,
}

impl ExportFormat {
    /// Returns all available export formats
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Paw, Self::Csv]
    }

    /// Identifier used on the command line and in the config file
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Paw => "paw",
            Self::Csv => "csv",
        }
    }

    /// Human-readable name of the format
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Paw => "Paw JSON",
            Self::Csv => "CSV",
        }
    }

    /// Returns the renderer for this format
    #[must_use]
    pub fn exporter(self) -> Box<dyn ExportTarget> {
        match self {
            Self::Paw => Box::new(PawExporter::new()),
            Self::Csv => Box::new(CsvExporter::new()),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paw" => Ok(Self::Paw),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown export format '{other}', expected paw or csv")),
        }
    }
}

/// A renderer for one export format
pub trait ExportTarget {
    /// Format produced by this renderer
    fn format_id(&self) -> ExportFormat;

    /// Human-readable name of the renderer
    fn display_name(&self) -> &'static str;

    /// Writes the whole document to `sink`.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Serialization` if encoding or writing fails.
    /// Output already written to the sink is not rolled back.
    fn render(&self, document: &ExportDocument, sink: &mut dyn Write) -> ExportResult<()>;
}
