//! Output sink selection

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use crate::error::{ExportError, ExportResult};

/// Permission bits for newly created output files
pub const OUTPUT_FILE_MODE: u32 = 0o660;

/// Opens the export sink: the file at `path`, or stdout when `None`.
///
/// Files are created if missing and truncated otherwise. The returned
/// writer is buffered; renderers flush it before returning and it is closed
/// when dropped.
///
/// # Errors
///
/// Returns `ExportError::OutputIo` if the file cannot be created.
pub fn open_output(path: Option<&Path>) -> ExportResult<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    };

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .mode(OUTPUT_FILE_MODE)
        .open(path)
        .map_err(|source| ExportError::OutputIo {
            path: path.to_path_buf(),
            source,
        })?;
    tracing::debug!(path = %path.display(), "Opened output file");
    Ok(Box::new(BufWriter::new(file)))
}
