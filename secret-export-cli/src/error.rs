//! CLI error types and exit codes.

use secret_export_core::{ConfigError, ExportError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, item, serialization or output errors
    pub const GENERAL_ERROR: i32 = 1;
    /// Service failure - the Secret Service could not be reached, the
    /// collection does not exist or no session could be opened
    pub const SERVICE_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(String),

    /// Async runtime could not be created
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Secret Service unavailable or collection missing
    #[error("{0}")]
    Service(String),

    /// Export failed after the collection was found
    #[error("{0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        if err.is_service_failure() {
            Self::Service(err.to_string())
        } else {
            Self::Export(err.to_string())
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error
    /// - 2: Service failure
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Service(_) => exit_codes::SERVICE_FAILURE,
            Self::Config(_)
            | Self::Logging(_)
            | Self::Runtime(_)
            | Self::Export(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }
}
