//! Local persistence and database migrations.
//!
//! devlog keeps small user preferences (search history and favorite commits)
//! in a local sqlite database. The schema is managed with Diesel migrations
//! so the database can be created and upgraded consistently across machines.

mod error;
mod favorites;
mod history;
mod migrator;
mod preferences;

pub use error::PersistenceError;
pub use favorites::{FAVORITES_KEY, Favorite, Favorites, MAX_FAVORITES};
pub use history::{MAX_HISTORY_ENTRIES, SEARCH_HISTORY_KEY, SearchHistory, SearchHistoryEntry};
pub use migrator::{INITIAL_SCHEMA_VERSION, MigrationReport, SchemaVersion, migrate_database};
pub use preferences::PreferenceStore;
