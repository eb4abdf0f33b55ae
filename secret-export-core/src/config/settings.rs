//! Settings file model

use serde::{Deserialize, Serialize};

use crate::export::ExportFormat;
use crate::tracing::TracingLevel;

/// Contents of `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Format used when `--format` is not given
    pub default_format: ExportFormat,
    /// Log level for the diagnostic output
    pub log_level: TracingLevel,
    /// Custom `EnvFilter` directives, overriding `log_level`
    pub log_filter: Option<String>,
}
