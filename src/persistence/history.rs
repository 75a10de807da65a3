//! Recent migration searches, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PersistenceError, PreferenceStore};

/// Preference key holding the history list.
pub const SEARCH_HISTORY_KEY: &str = "searchHistory";
/// Number of searches kept.
pub const MAX_HISTORY_ENTRIES: usize = 20;

/// A past migration search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    /// Search term.
    pub term: String,
    /// Old version branch.
    pub from_version: String,
    /// New version branch.
    pub to_version: String,
    /// When the search ran.
    pub timestamp: DateTime<Utc>,
}

impl SearchHistoryEntry {
    /// Creates an entry stamped with the current time.
    #[must_use]
    pub fn now(
        term: impl Into<String>,
        from_version: impl Into<String>,
        to_version: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            from_version: from_version.into(),
            to_version: to_version.into(),
            timestamp: Utc::now(),
        }
    }

    fn same_search(&self, other: &Self) -> bool {
        self.term == other.term
            && self.from_version == other.from_version
            && self.to_version == other.to_version
    }
}

/// Ordered search history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryEntry>,
}

impl SearchHistory {
    /// Loads the stored history, or an empty one.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] for storage failures.
    pub fn load(store: &PreferenceStore) -> Result<Self, PersistenceError> {
        store.get_json(SEARCH_HISTORY_KEY)
    }

    /// Persists the history.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] for storage failures.
    pub fn save(&self, store: &PreferenceStore) -> Result<(), PersistenceError> {
        store.put_json(SEARCH_HISTORY_KEY, self)
    }

    /// Deletes the stored history.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] for storage failures.
    pub fn clear(store: &PreferenceStore) -> Result<(), PersistenceError> {
        store.remove(SEARCH_HISTORY_KEY)
    }

    /// Puts `entry` at the front.
    ///
    /// An earlier search with the same term and version pair is dropped, and
    /// the list is cut to [`MAX_HISTORY_ENTRIES`].
    pub fn record(&mut self, entry: SearchHistoryEntry) {
        self.entries.retain(|existing| !existing.same_search(&entry));
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_HISTORY_ENTRIES);
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SearchHistoryEntry> {
        self.entries.get(index)
    }

    /// Distinct past terms, newest first.
    #[must_use]
    pub fn terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !terms.contains(&entry.term.as_str()) {
                terms.push(&entry.term);
            }
        }
        terms
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no search was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
