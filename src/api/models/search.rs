//! Migration search results.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{first_line, or_unknown, short_sha};

/// Commit columns of a migration match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationCommit {
    /// Server identifier.
    pub id: u64,
    /// Full hash.
    pub sha: String,
    /// Full message.
    pub message: String,
    /// Author name.
    pub author: Option<String>,
    /// ISO timestamp.
    pub date: Option<String>,
    /// Lines added by the commit.
    pub additions: u64,
    /// Lines removed by the commit.
    pub deletions: u64,
    /// Branch the commit lives on.
    pub branch: String,
}

impl MigrationCommit {
    /// Abbreviated hash.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }

    /// First line of the message.
    #[must_use]
    pub fn title(&self) -> &str {
        first_line(&self.message)
    }

    /// Author or `Unknown`.
    #[must_use]
    pub fn author_name(&self) -> &str {
        or_unknown(self.author.as_deref())
    }
}

/// File columns of a migration match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationFile {
    /// Server identifier.
    pub id: u64,
    /// Path of the file.
    pub filename: String,
    /// Change status.
    pub status: String,
    /// Lines added in this file.
    pub additions: u64,
    /// Lines removed in this file.
    pub deletions: u64,
    /// Unified diff text.
    pub patch: Option<String>,
}

impl MigrationFile {
    /// First path segment, used to bucket files by module.
    #[must_use]
    pub fn module(&self) -> &str {
        self.filename.split('/').next().unwrap_or_default()
    }
}

/// A commit/file pair whose patch mentions the search term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationMatch {
    /// Commit columns.
    pub commit: MigrationCommit,
    /// File columns.
    pub file: MigrationFile,
}

/// Response of `/search/migration`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationResults {
    /// Matches, newest first.
    pub results: Vec<MigrationMatch>,
    /// Number of matches reported by the server.
    pub count: u64,
    /// Old version searched.
    pub from_version: Option<String>,
    /// New version searched.
    pub to_version: Option<String>,
    /// Server note, set when the branches were not found.
    pub message: Option<String>,
}

impl MigrationResults {
    /// Distinct file paths across all matches.
    #[must_use]
    pub fn unique_files(&self) -> usize {
        self.results
            .iter()
            .map(|entry| entry.file.filename.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Distinct modules across all matches.
    #[must_use]
    pub fn unique_modules(&self) -> usize {
        self.results
            .iter()
            .map(|entry| entry.file.module())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Sum of per-file additions.
    #[must_use]
    pub fn total_additions(&self) -> u64 {
        self.results.iter().map(|entry| entry.file.additions).sum()
    }

    /// Sum of per-file deletions.
    #[must_use]
    pub fn total_deletions(&self) -> u64 {
        self.results.iter().map(|entry| entry.file.deletions).sum()
    }
}
