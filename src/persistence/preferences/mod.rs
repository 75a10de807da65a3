//! Key-value preference storage backed by `SQLite`.
//!
//! Values are JSON documents stored as text under string keys, the same
//! shape a browser's local storage would hold. Typed helpers treat a missing
//! or unreadable value as empty so a corrupted entry never blocks a view.

use diesel::Connection;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::PersistenceError;

const PREFERENCES_TABLE: &str = "preferences";

/// SQLite-backed key-value store for small JSON preferences.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    database_url: String,
}

impl PreferenceStore {
    /// Create a store targeting the configured `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let database_url_string = database_url.into();
        if database_url_string.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self {
            database_url: database_url_string,
        })
    }

    /// Reads the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the database cannot be opened, the
    /// schema is missing, or the query fails.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = Text)]
            value: String,
        }

        let mut connection = self.establish_connection()?;

        let result: Option<Row> = sql_query("SELECT value FROM preferences WHERE key = ? LIMIT 1;")
            .bind::<Text, _>(key)
            .get_result(&mut connection)
            .optional()
            .map_err(|error| Self::map_query_error(&mut connection, &error))?;

        Ok(result.map(|row| row.value))
    }

    /// Stores raw text under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn put_raw(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query(
            "INSERT INTO preferences (key, value) VALUES (?, ?) \
             ON CONFLICT(key) DO UPDATE SET \
               value = excluded.value, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<Text, _>(key)
        .bind::<Text, _>(value)
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    /// Deletes the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the schema is missing or the write
    /// fails.
    pub fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let mut connection = self.establish_connection()?;

        sql_query("DELETE FROM preferences WHERE key = ?;")
            .bind::<Text, _>(key)
            .execute(&mut connection)
            .map(drop)
            .map_err(|error| Self::map_write_error(&mut connection, &error))
    }

    /// Reads and decodes the JSON value under `key`.
    ///
    /// A missing key, or a value that fails to decode, yields `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] only for storage failures.
    pub fn get_json<T>(&self, key: &str) -> Result<T, PersistenceError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(T::default());
        };

        Ok(serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(key, %error, "stored preference is unreadable; treating it as empty");
            T::default()
        }))
    }

    /// Encodes `value` as JSON and stores it under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::SerialisationFailed`] when encoding fails,
    /// or a storage error from [`Self::put_raw`].
    pub fn put_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let raw =
            serde_json::to_string(value).map_err(|error| PersistenceError::SerialisationFailed {
                key: key.to_owned(),
                message: error.to_string(),
            })?;
        self.put_raw(key, &raw)
    }

    fn establish_connection(&self) -> Result<SqliteConnection, PersistenceError> {
        SqliteConnection::establish(&self.database_url).map_err(|error| {
            PersistenceError::ConnectionFailed {
                message: error.to_string(),
            }
        })
    }

    fn preferences_table_exists(
        connection: &mut SqliteConnection,
    ) -> Result<bool, diesel::result::Error> {
        #[derive(Debug, QueryableByName)]
        struct Row {
            #[diesel(sql_type = BigInt)]
            count: i64,
        }

        let row: Row = sql_query(
            "SELECT COUNT(*) AS count FROM sqlite_master WHERE type = 'table' AND name = ?;",
        )
        .bind::<Text, _>(PREFERENCES_TABLE)
        .get_result(connection)?;

        Ok(row.count > 0)
    }

    fn map_error_with_schema_check<F>(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
        create_error: F,
    ) -> PersistenceError
    where
        F: Fn(String) -> PersistenceError,
    {
        match Self::preferences_table_exists(connection) {
            Ok(false) => PersistenceError::SchemaNotInitialised,
            Ok(true) => create_error(error.to_string()),
            Err(check_error) => create_error(format!(
                "schema presence check failed: {check_error}; original error: {error}"
            )),
        }
    }

    fn map_query_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::QueryFailed { message }
        })
    }

    fn map_write_error(
        connection: &mut SqliteConnection,
        error: &diesel::result::Error,
    ) -> PersistenceError {
        Self::map_error_with_schema_check(connection, error, |message| {
            PersistenceError::WriteFailed { message }
        })
    }
}
