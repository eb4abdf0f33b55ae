//! Secret Service export core library
//!
//! Reads the items of one Secret Service collection over D-Bus and renders
//! them as a paw JSON document or a CSV table.
//!
//! # Crate Structure
//!
//! - [`service`] - Client traits and the D-Bus implementation
//! - [`collection`] - Collection listing and lookup by label
//! - [`session`] / [`reader`] - Secret session and per-item reads
//! - [`record`] - Format-agnostic export records
//! - [`export`] - Paw and CSV serializers, output sinks
//! - [`exporter`] - The end-to-end export pipeline
//! - [`config`] / [`tracing`] - Settings file and structured logging
//! - [`testing`] - In-memory Secret Service for tests

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod collection;
pub mod config;
pub mod error;
pub mod export;
pub mod exporter;
pub mod reader;
pub mod record;
pub mod service;
pub mod session;
pub mod testing;
pub mod tracing;

pub use collection::{list_collections, list_items, resolve_collection};
pub use config::{ConfigManager, ExportSettings};
pub use error::{
    ConfigError, ConfigResult, ExportError, ExportResult, ServiceError, ServiceResult,
};
pub use export::{CsvExporter, ExportFormat, ExportTarget, PawExporter, open_output};
pub use exporter::{ExportOutcome, ExportSummary, export_collection};
pub use reader::{RawItem, read_item};
pub use record::{ExportDocument, ExportRecord};
pub use service::{
    DbusSecretService, SecretCollection, SecretItem, SecretServiceClient, SessionHandle,
};
pub use session::SecretSession;
pub use self::tracing::{
    TracingConfig, TracingError, TracingLevel, TracingResult, init_tracing, span_names,
};
