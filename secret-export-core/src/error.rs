//! Error types for secret-export-core
//!
//! Every step of an export run reports failures as an [`ExportError`] value.
//! Only collection listing recovers locally; everything else propagates to
//! the caller, which terminates the run.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the Secret Service client seam.
///
/// These carry no knowledge of which export step failed; the enumerator,
/// session and item reader wrap them into the matching [`ExportError`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A D-Bus call or property read failed
    #[error("D-Bus error: {0}")]
    Bus(String),

    /// The user dismissed the unlock prompt
    #[error("unlock prompt was dismissed")]
    PromptDismissed,

    /// The prompt finished without emitting its completion signal
    #[error("unlock prompt ended without a result")]
    PromptAborted,

    /// An object path returned by (or passed to) the service is malformed
    #[error("invalid object path: {0}")]
    InvalidPath(String),
}

impl From<zbus::Error> for ServiceError {
    fn from(err: zbus::Error) -> Self {
        Self::Bus(err.to_string())
    }
}

impl From<zvariant::Error> for ServiceError {
    fn from(err: zvariant::Error) -> Self {
        Self::InvalidPath(err.to_string())
    }
}

/// Result type for Secret Service client calls
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Errors that abort an export run
#[derive(Debug, Error)]
pub enum ExportError {
    /// The bus or the Secret Service is unreachable
    #[error("Failed to connect to the Secret Service: {0}")]
    Connection(String),

    /// No collection carries the requested label
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// The secret retrieval session could not be negotiated
    #[error("Failed to open a Secret Service session: {0}")]
    Session(String),

    /// An item could not be unlocked
    #[error("Failed to unlock item {item}: {reason}")]
    Unlock {
        /// Object path of the item
        item: String,
        /// Failure description
        reason: String,
    },

    /// An item attribute (label, timestamps) could not be read
    #[error("Failed to read {field} of item {item}: {reason}")]
    Metadata {
        /// Object path of the item
        item: String,
        /// Attribute being read
        field: &'static str,
        /// Failure description
        reason: String,
    },

    /// The secret value of an item could not be retrieved
    #[error("Failed to retrieve the secret of item {item}: {reason}")]
    SecretRetrieval {
        /// Object path of the item
        item: String,
        /// Failure description
        reason: String,
    },

    /// Rendering the export to the sink failed
    #[error("Failed to write the export: {0}")]
    Serialization(String),

    /// The output file could not be created
    #[error("Could not create the output file {}: {source}", path.display())]
    OutputIo {
        /// Requested output path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result type for export operations
pub type ExportResult<T> = std::result::Result<T, ExportError>;

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl ExportError {
    /// Returns true for failures talking to the service itself rather than
    /// failures of an individual item or of the output.
    #[must_use]
    pub const fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::CollectionNotFound(_) | Self::Session(_)
        )
    }
}

/// Errors related to the optional configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration directory could be determined
    #[error("Could not determine the configuration directory")]
    NoConfigDir,

    /// The settings file exists but could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        /// Settings file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown values
    #[error("Failed to parse config file {}: {reason}", path.display())]
    Parse {
        /// Settings file path
        path: PathBuf,
        /// Parser message
        reason: String,
    },
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
