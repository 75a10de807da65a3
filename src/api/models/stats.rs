//! Dashboard totals, contributor rankings and branch comparison.

use serde::{Deserialize, Serialize};

use super::{first_line, or_unknown, short_sha};

/// Totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryStats {
    /// Imported repositories.
    pub total_repositories: u64,
    /// Imported branches.
    pub total_branches: u64,
    /// Imported commits.
    pub total_commits: u64,
    /// Imported per-file changes.
    pub total_file_changes: u64,
    /// Distinct commit authors.
    pub unique_authors: u64,
    /// Lines added overall.
    pub total_additions: u64,
    /// Lines removed overall.
    pub total_deletions: u64,
}

/// A leaderboard row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contributor {
    /// Author name.
    pub author: Option<String>,
    /// Commit count.
    pub commits: u64,
    /// Lines added.
    pub additions: u64,
    /// Lines removed.
    pub deletions: u64,
}

impl Contributor {
    /// Author or `Unknown`.
    #[must_use]
    pub fn name(&self) -> &str {
        or_unknown(self.author.as_deref())
    }
}

/// Totals for one side of a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchStats {
    /// Commits on the branch.
    pub total_commits: u64,
    /// Lines added on the branch.
    pub total_additions: u64,
    /// Lines removed on the branch.
    pub total_deletions: u64,
    /// Distinct authors on the branch.
    pub unique_authors: u64,
}

/// A commit found on one branch only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparedCommit {
    /// Full hash.
    pub sha: String,
    /// Full message.
    pub message: String,
    /// Author name.
    pub author: Option<String>,
    /// ISO timestamp.
    pub date: Option<String>,
    /// Lines added.
    pub additions: u64,
    /// Lines removed.
    pub deletions: u64,
}

impl ComparedCommit {
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
}

/// One side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchSide {
    /// Branch name.
    pub name: String,
    /// Branch totals.
    pub stats: BranchStats,
    /// Commits absent from the other branch.
    pub unique_commits: Vec<ComparedCommit>,
}

/// Response of `/compare`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchComparison {
    /// First selected branch.
    pub branch1: BranchSide,
    /// Second selected branch.
    pub branch2: BranchSide,
}
