//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use secret_export_core::ExportFormat;

/// Export a Secret Service collection to Paw JSON or CSV
#[derive(Parser)]
#[command(name = "secret-service-export")]
#[command(
    author,
    version,
    about = "Export a Secret Service collection to Paw JSON or CSV",
    long_about = "Export the items of a Secret Service collection (GNOME Keyring, KeePassXC, ...) \
                  to Paw JSON or CSV.\n\nWithout a collection name, the available collections \
                  are listed one per line."
)]
pub struct Cli {
    /// Name of the collection to export (lists collections when omitted)
    #[arg(short, long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Collection name, as an alternative to --collection
    #[arg(value_name = "COLLECTION", conflicts_with = "collection")]
    pub name: Option<String>,

    /// Output format [default: paw, or `default_format` from the config file]
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Write the export to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Path to the configuration directory
    #[arg(long, value_name = "DIR", env = "SECRET_SERVICE_EXPORT_CONFIG_DIR")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The requested collection, from the flag or the positional argument
    pub fn collection_name(&self) -> Option<&str> {
        self.collection.as_deref().or(self.name.as_deref())
    }
}

/// Export format options
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Paw password manager JSON
    Paw,
    /// CSV with name, password, created and modified columns
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Paw => Self::Paw,
            FormatArg::Csv => Self::Csv,
        }
    }
}
