//! Local database migration operation.

use std::io::Write;

use devlog::persistence::{PersistenceError, migrate_database};
use devlog::telemetry::TelemetrySink;
use devlog::{DevlogConfig, DevlogError};

use super::output::line;

/// Creates or upgrades the preference database.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] if the database URL is missing or
/// blank, and [`DevlogError::Persistence`] for connection or migration
/// failures.
pub fn run<W: Write>(
    config: &DevlogConfig,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let database_url = config
        .database_url
        .as_deref()
        .ok_or(PersistenceError::MissingDatabaseUrl)?;
    let report = migrate_database(database_url, telemetry)?;
    let version = report.schema_version.as_str();
    if report.was_current() {
        line(writer, &format!("Database already at schema version {version}"))
    } else {
        line(
            writer,
            &format!(
                "Database migrated to schema version {version} ({} applied)",
                report.applied.len()
            ),
        )
    }
}
