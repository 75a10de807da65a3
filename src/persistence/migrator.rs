//! Schema management for the preference database.
//!
//! Migrations are embedded at compile time and applied on request only
//! (`--migrate-db`); views never migrate implicitly.

use diesel::Connection;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::PersistenceError;

/// Migrations compiled into the binary from `migrations/`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Version of the migration creating the `preferences` table.
pub const INITIAL_SCHEMA_VERSION: &str = "20261019000000";

/// Newest applied migration version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaVersion(String);

impl SchemaVersion {
    /// Version text, e.g. `20261019000000`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What a migration run changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Schema version after the run.
    pub schema_version: SchemaVersion,
    /// Versions applied by this run, oldest first.
    pub applied: Vec<String>,
}

impl MigrationReport {
    /// Returns true when the database was already current.
    #[must_use]
    pub fn was_current(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Brings the database at `database_url` up to date.
///
/// The resulting schema version is emitted as
/// [`TelemetryEvent::SchemaVersionRecorded`].
///
/// # Errors
///
/// Returns [`PersistenceError::BlankDatabaseUrl`] for a blank URL,
/// [`PersistenceError::ConnectionFailed`] when `SQLite` cannot open it, and
/// [`PersistenceError::MigrationFailed`] or a schema-version error when the
/// migration table cannot be updated or read.
pub fn migrate_database(
    database_url: &str,
    telemetry: &dyn TelemetrySink,
) -> Result<MigrationReport, PersistenceError> {
    let url = database_url.trim();
    if url.is_empty() {
        return Err(PersistenceError::BlankDatabaseUrl);
    }

    let mut connection =
        SqliteConnection::establish(url).map_err(|error| PersistenceError::ConnectionFailed {
            message: error.to_string(),
        })?;

    let applied: Vec<String> = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| PersistenceError::MigrationFailed {
            message: error.to_string(),
        })?
        .iter()
        .map(ToString::to_string)
        .collect();

    let schema_version = newest_applied(&mut connection)?;
    info!(
        applied = applied.len(),
        schema_version = schema_version.as_str(),
        "preference database ready"
    );
    telemetry.record(TelemetryEvent::SchemaVersionRecorded {
        schema_version: schema_version.as_str().to_owned(),
    });

    Ok(MigrationReport {
        schema_version,
        applied,
    })
}

fn newest_applied(connection: &mut SqliteConnection) -> Result<SchemaVersion, PersistenceError> {
    connection
        .applied_migrations()
        .map_err(|error| PersistenceError::SchemaVersionQueryFailed {
            message: error.to_string(),
        })?
        .into_iter()
        .max()
        .map(|version| SchemaVersion(version.to_string()))
        .ok_or(PersistenceError::MissingSchemaVersion)
}
