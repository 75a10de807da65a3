//! Bookmarked commits, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::models::CommitSummary;

use super::{PersistenceError, PreferenceStore};

/// Preference key holding the favorites list.
pub const FAVORITES_KEY: &str = "favorites";
/// Number of favorites kept.
pub const MAX_FAVORITES: usize = 100;

/// A bookmarked commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Commit identifier.
    pub id: u64,
    /// Full hash.
    pub sha: String,
    /// Commit message.
    pub message: String,
    /// Author name.
    pub author: Option<String>,
    /// Commit timestamp as reported by the API.
    pub date: Option<String>,
    /// When the bookmark was made.
    pub timestamp: DateTime<Utc>,
}

impl Favorite {
    /// Bookmarks `commit` now.
    #[must_use]
    pub fn from_commit(commit: &CommitSummary) -> Self {
        Self {
            id: commit.id,
            sha: commit.sha.clone(),
            message: commit.message.clone(),
            author: commit.author_name.clone(),
            date: commit.committed_date.clone(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered favorites list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites {
    entries: Vec<Favorite>,
}

impl Favorites {
    /// Loads stored favorites, or an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] for storage failures.
    pub fn load(store: &PreferenceStore) -> Result<Self, PersistenceError> {
        store.get_json(FAVORITES_KEY)
    }

    /// Persists the list.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] for storage failures.
    pub fn save(&self, store: &PreferenceStore) -> Result<(), PersistenceError> {
        store.put_json(FAVORITES_KEY, self)
    }

    /// Puts `favorite` at the front, replacing any entry with the same id.
    pub fn add(&mut self, favorite: Favorite) {
        self.entries.retain(|existing| existing.id != favorite.id);
        self.entries.insert(0, favorite);
        self.entries.truncate(MAX_FAVORITES);
    }

    /// Removes the entry at `index`.
    pub fn remove_at(&mut self, index: usize) -> Option<Favorite> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    /// Removes the entry for commit `id`.
    pub fn remove_id(&mut self, id: u64) -> Option<Favorite> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        self.remove_at(index)
    }

    /// Returns true when commit `id` is bookmarked.
    #[must_use]
    pub fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Entries, newest first.
    #[must_use]
    pub fn entries(&self) -> &[Favorite] {
        &self.entries
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing is bookmarked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
