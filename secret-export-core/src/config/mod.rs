//! Configuration for secret-service-export
//!
//! Settings come from an optional TOML file. A missing file yields the
//! built-in defaults; command-line flags override whatever is loaded here.

mod manager;
mod settings;

pub use manager::{APP_DIR_NAME, ConfigManager, SETTINGS_FILE_NAME};
pub use settings::ExportSettings;
