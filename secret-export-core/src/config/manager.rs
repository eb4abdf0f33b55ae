//! Settings file location and loading

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

use super::ExportSettings;

/// Directory name under the user's configuration directory
pub const APP_DIR_NAME: &str = "secret-service-export";

/// Settings file name inside the configuration directory
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Locates and loads the settings file
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Uses `$XDG_CONFIG_HOME/secret-service-export`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoConfigDir` if no configuration directory can
    /// be determined for the current user.
    pub fn new() -> ConfigResult<Self> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(Self::with_config_dir(base.join(APP_DIR_NAME)))
    }

    /// Uses a custom configuration directory
    #[must_use]
    pub const fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Configuration directory in use
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Full path of the settings file
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE_NAME)
    }

    /// Loads the settings, falling back to defaults when the file is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file exists but cannot be read and
    /// `ConfigError::Parse` if it is not a valid settings file.
    pub fn load_settings(&self) -> ConfigResult<ExportSettings> {
        let path = self.settings_path();
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No settings file, using defaults");
                return Ok(ExportSettings::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path,
            reason: e.message().to_string(),
        })
    }
}
