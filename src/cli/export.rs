//! Writes CSV exports and reports to files.

use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use devlog::export::ExportKind;
use devlog::{DevlogConfig, DevlogError};
use tracing::info;

use super::output::line;

/// Returns true when `kind` was requested with `--export`.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] when a different data set was
/// requested, since only the current view's data can be exported.
pub fn requested(config: &DevlogConfig, kind: ExportKind) -> Result<bool, DevlogError> {
    match config.export_kind()? {
        None => Ok(false),
        Some(wanted) if wanted == kind => Ok(true),
        Some(wanted) => Err(DevlogError::Configuration {
            message: format!("export '{wanted}' is not available for this view (expected '{kind}')"),
        }),
    }
}

/// Output path for `kind`: `--output` or the default file name.
#[must_use]
pub fn target_path(config: &DevlogConfig, kind: ExportKind) -> Utf8PathBuf {
    config
        .output
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map_or_else(
            || Utf8PathBuf::from(kind.default_filename()),
            Utf8PathBuf::from,
        )
}

/// Notice printed instead of writing a file for an empty data set.
pub const NO_DATA_TO_EXPORT: &str = "No data to export";

/// Renders through `write`, then stores the bytes at `path`.
///
/// Nothing touches the file system when `write` fails.
///
/// # Errors
///
/// Returns whatever `write` returns, and [`DevlogError::Io`] when the file
/// cannot be written.
pub fn write_file<F>(path: &Utf8Path, write: F) -> Result<(), DevlogError>
where
    F: FnOnce(&mut Vec<u8>) -> Result<(), DevlogError>,
{
    let mut rendered = Vec::new();
    write(&mut rendered)?;
    fs::write(path, rendered).map_err(|error| DevlogError::Io {
        message: format!("failed to create output file '{path}': {error}"),
    })
}

/// Writes a CSV export for `kind` and reports where it went.
///
/// An empty data set only prints [`NO_DATA_TO_EXPORT`].
///
/// # Errors
///
/// Propagates file and CSV errors.
pub fn export_csv<W, F>(
    config: &DevlogConfig,
    kind: ExportKind,
    rows: usize,
    status: &mut W,
    write: F,
) -> Result<(), DevlogError>
where
    W: Write,
    F: FnOnce(&mut Vec<u8>) -> Result<(), DevlogError>,
{
    if rows == 0 {
        return line(status, NO_DATA_TO_EXPORT);
    }
    let path = target_path(config, kind);
    write_file(&path, write)?;
    info!(kind = %kind, rows, path = %path, "export written");
    line(
        status,
        &format!("Exported {rows} rows of {} to {path}", kind.description()),
    )
}
