//! Shared utility functions used across command modules.

use std::path::Path;

use secret_export_core::config::{ConfigManager, ExportSettings};
use secret_export_core::{TracingConfig, TracingLevel};

use crate::error::CliError;

/// Creates a `ConfigManager` using the optional custom config directory
/// from CLI args.
pub fn create_config_manager(config_path: Option<&Path>) -> Result<ConfigManager, CliError> {
    match config_path {
        Some(path) => Ok(ConfigManager::with_config_dir(path.to_path_buf())),
        None => ConfigManager::new()
            .map_err(|e| CliError::Config(format!("Failed to initialize config: {e}"))),
    }
}

/// Loads the settings file, or the defaults when there is none
pub fn load_settings(config_path: Option<&Path>) -> Result<ExportSettings, CliError> {
    Ok(create_config_manager(config_path)?.load_settings()?)
}

/// Builds the tracing configuration.
///
/// `-q` and `-v` take precedence over the settings file; a custom
/// `log_filter` only applies when neither is given.
pub fn tracing_config(settings: &ExportSettings, verbose: u8, quiet: bool) -> TracingConfig {
    if quiet {
        return TracingConfig::new().with_level(TracingLevel::Error);
    }

    let config = TracingConfig::new().with_level(settings.log_level.raised_by(verbose));
    match &settings.log_filter {
        Some(filter) if verbose == 0 => config.with_filter(filter.clone()),
        _ => config,
    }
}

/// Creates the runtime that drives the D-Bus client
pub fn create_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new().map_err(|e| CliError::Runtime(e.to_string()))
}
