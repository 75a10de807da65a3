//! Repositories, branches, commits and reference lists.

use serde::{Deserialize, Serialize};

use super::{first_line, or_unknown, short_sha};

/// An imported repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    /// Server identifier.
    pub id: u64,
    /// `owner/name` path.
    pub full_name: String,
    /// Repository description.
    pub description: Option<String>,
    /// Default branch name.
    pub default_branch: Option<String>,
    /// Browser URL.
    pub html_url: Option<String>,
}

/// A branch of an imported repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branch {
    /// Server identifier.
    pub id: u64,
    /// Branch name, usually a version such as `17.0`.
    pub name: String,
    /// Whether this is the repository default branch.
    pub is_default: bool,
    /// Hash of the newest imported commit.
    pub last_commit_sha: Option<String>,
}

/// One row of a branch commit listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitSummary {
    /// Server identifier.
    pub id: u64,
    /// Full commit hash.
    pub sha: String,
    /// Full commit message.
    pub message: String,
    /// Author display name.
    pub author_name: Option<String>,
    /// Author e-mail address.
    pub author_email: Option<String>,
    /// ISO commit timestamp.
    pub committed_date: Option<String>,
    /// Lines added across all files.
    pub additions: u64,
    /// Lines removed across all files.
    pub deletions: u64,
    /// `additions + deletions` as reported by the server.
    pub total_changes: u64,
    /// Whether the commit has several parents.
    pub is_merge: bool,
    /// Browser URL.
    pub html_url: Option<String>,
}

impl CommitSummary {
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

    /// Author name or `Unknown`.
    #[must_use]
    pub fn author(&self) -> &str {
        or_unknown(self.author_name.as_deref())
    }
}

/// A file touched by a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChange {
    /// Path after the change.
    pub filename: String,
    /// `added`, `modified`, `removed` or `renamed`.
    pub status: String,
    /// Lines added.
    pub additions: u64,
    /// Lines removed.
    pub deletions: u64,
    /// `additions + deletions`.
    pub changes: u64,
    /// Path before a rename.
    pub previous_filename: Option<String>,
    /// Unified diff text.
    pub patch: Option<String>,
}

/// Commit with its changed files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitDetail {
    /// Summary columns shared with listings.
    #[serde(flatten)]
    pub commit: CommitSummary,
    /// Changed files in server order.
    pub files_changed: Vec<FileChange>,
}

/// An entry of the commit-type taxonomy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitType {
    /// Bracketed prefix code such as `FIX`.
    pub code: String,
    /// Human label.
    pub label: String,
    /// Badge colour.
    pub color: String,
}

/// A detected module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    /// Module name.
    pub name: String,
    /// Path prefix inside the repository.
    pub path: Option<String>,
    /// Owning repository full name.
    pub repo: Option<String>,
}

/// Feature switches advertised by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    /// Analytics views are available.
    pub analytics: bool,
    /// CSV export is available.
    pub export: bool,
    /// Migration search accepts patterns.
    pub regex_search: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            analytics: true,
            export: true,
            regex_search: true,
        }
    }
}

/// Runtime configuration served at `/config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Public API base URL.
    pub api_url: String,
    /// Server version string.
    pub version: String,
    /// Enabled features.
    pub features: FeatureFlags,
}

/// API base used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            version: "1.0.0".to_owned(),
            features: FeatureFlags::default(),
        }
    }
}
