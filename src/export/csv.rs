//! Semicolon-delimited CSV writers.
//!
//! Rows are separated by `\n`. A field is quoted when it contains the
//! delimiter, a double quote, or a line break; embedded quotes are doubled.

use std::borrow::Cow;
use std::io::Write;

use crate::api::models::{
    DetectedChange, MigrationMatch, ModuleStats, display_date, display_timestamp, first_line,
    or_unknown, short_sha,
};
use crate::error::{DevlogError, io_error};

use super::model::ExportKind;

/// Field separator.
pub const DELIMITER: char = ';';

const MIGRATION_HEADER: [&str; 9] = [
    "SHA",
    "Date",
    "Author",
    "Message",
    "Branch",
    "File",
    "Status",
    "Additions",
    "Deletions",
];
const MODULE_HEADER: [&str; 6] = [
    "Module",
    "Commits",
    "Contributors",
    "Additions",
    "Deletions",
    "Last Modified",
];
const DETECTED_CHANGES_HEADER: [&str; 6] = ["Type", "SHA", "Date", "Author", "Message", "File"];

/// Quotes `field` when it would otherwise break the row structure.
///
/// ```
/// use devlog::export::escape_field;
///
/// assert_eq!(escape_field("plain"), "plain");
/// assert_eq!(escape_field("a;b"), "\"a;b\"");
/// assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
#[must_use]
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([DELIMITER, '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_row<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> Result<(), DevlogError> {
    let line = fields
        .iter()
        .map(|field| escape_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(&DELIMITER.to_string());
    writeln!(writer, "{line}").map_err(|e| io_error(&e))
}

fn ensure_rows<T>(rows: &[T], kind: ExportKind) -> Result<(), DevlogError> {
    if rows.is_empty() {
        return Err(DevlogError::EmptyExport {
            message: kind.description().to_owned(),
        });
    }
    Ok(())
}

/// Writes migration search matches.
///
/// # Errors
///
/// Returns [`DevlogError::EmptyExport`] for an empty slice and
/// [`DevlogError::Io`] if writing fails.
pub fn write_migration_csv<W: Write>(
    writer: &mut W,
    matches: &[MigrationMatch],
) -> Result<(), DevlogError> {
    ensure_rows(matches, ExportKind::MigrationResults)?;
    write_row(writer, &MIGRATION_HEADER)?;
    for entry in matches {
        let commit = &entry.commit;
        let file = &entry.file;
        write_row(
            writer,
            &[
                short_sha(&commit.sha).to_owned(),
                display_timestamp(commit.date.as_deref()),
                commit.author_name().to_owned(),
                first_line(&commit.message).to_owned(),
                commit.branch.clone(),
                file.filename.clone(),
                file.status.clone(),
                file.additions.to_string(),
                file.deletions.to_string(),
            ],
        )?;
    }
    Ok(())
}

/// Writes per-module analytics.
///
/// # Errors
///
/// Returns [`DevlogError::EmptyExport`] for an empty slice and
/// [`DevlogError::Io`] if writing fails.
pub fn write_module_csv<W: Write>(
    writer: &mut W,
    modules: &[ModuleStats],
) -> Result<(), DevlogError> {
    ensure_rows(modules, ExportKind::ModuleAnalytics)?;
    write_row(writer, &MODULE_HEADER)?;
    for module in modules {
        write_row(
            writer,
            &[
                module.module.clone(),
                module.commits.to_string(),
                module.contributors.to_string(),
                module.additions.to_string(),
                module.deletions.to_string(),
                display_date(module.last_modified.as_deref()),
            ],
        )?;
    }
    Ok(())
}

/// Writes server-detected changes.
///
/// # Errors
///
/// Returns [`DevlogError::EmptyExport`] for an empty slice and
/// [`DevlogError::Io`] if writing fails.
pub fn write_detected_changes_csv<W: Write>(
    writer: &mut W,
    changes: &[DetectedChange],
) -> Result<(), DevlogError> {
    ensure_rows(changes, ExportKind::DetectedChanges)?;
    write_row(writer, &DETECTED_CHANGES_HEADER)?;
    for change in changes {
        write_row(
            writer,
            &[
                change.change_type.clone(),
                short_sha(&change.commit_sha).to_owned(),
                display_timestamp(change.date.as_deref()),
                or_unknown(change.author.as_deref()).to_owned(),
                first_line(&change.commit_message).to_owned(),
                change.filename.clone(),
            ],
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "csv_tests.rs"]
mod tests;
