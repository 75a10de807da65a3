//! Views the CLI can run.

use std::fmt;
use std::str::FromStr;

use crate::error::DevlogError;

/// Operation mode determined by the `view` setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OperationMode {
    /// Dashboard totals and top contributors.
    #[default]
    Summary,
    /// Contributor leaderboard.
    Contributors,
    /// Imported repositories.
    Repositories,
    /// Branches of a repository.
    Branches,
    /// One page of a branch's commits.
    Commits,
    /// One commit with its files and diffs.
    Commit,
    /// Commits unique to each of two branches.
    Compare,
    /// Term search across a version pair.
    Migration,
    /// Migration search re-run for each term read from standard input.
    MigrationWatch,
    /// Commit-type taxonomy.
    CommitTypes,
    /// Detected modules.
    Modules,
    /// Daily activity of a branch.
    Timeline,
    /// Per-module rollups of a branch.
    ModuleAnalytics,
    /// Changes the server classified by kind.
    DetectedChanges,
    /// Server runtime configuration.
    RemoteConfig,
    /// Start a sync job and follow its log.
    Sync,
    /// Running state and recent sync runs.
    SyncStatus,
    /// Stop the running sync job.
    SyncCancel,
    /// Past migration searches.
    History,
    /// Re-run a past migration search.
    HistoryReplay,
    /// Forget all past searches.
    HistoryClear,
    /// Bookmarked commits.
    Favorites,
    /// Bookmark a commit.
    FavoriteAdd,
    /// Remove a bookmark.
    FavoriteRemove,
}

impl OperationMode {
    /// Every view, in help order.
    pub const ALL: [Self; 24] = [
        Self::Summary,
        Self::Contributors,
        Self::Repositories,
        Self::Branches,
        Self::Commits,
        Self::Commit,
        Self::Compare,
        Self::Migration,
        Self::MigrationWatch,
        Self::CommitTypes,
        Self::Modules,
        Self::Timeline,
        Self::ModuleAnalytics,
        Self::DetectedChanges,
        Self::RemoteConfig,
        Self::Sync,
        Self::SyncStatus,
        Self::SyncCancel,
        Self::History,
        Self::HistoryReplay,
        Self::HistoryClear,
        Self::Favorites,
        Self::FavoriteAdd,
        Self::FavoriteRemove,
    ];

    /// Name accepted by `--view`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Contributors => "contributors",
            Self::Repositories => "repositories",
            Self::Branches => "branches",
            Self::Commits => "commits",
            Self::Commit => "commit",
            Self::Compare => "compare",
            Self::Migration => "migration",
            Self::MigrationWatch => "migration-watch",
            Self::CommitTypes => "commit-types",
            Self::Modules => "modules",
            Self::Timeline => "timeline",
            Self::ModuleAnalytics => "module-analytics",
            Self::DetectedChanges => "detected-changes",
            Self::RemoteConfig => "remote-config",
            Self::Sync => "sync",
            Self::SyncStatus => "sync-status",
            Self::SyncCancel => "sync-cancel",
            Self::History => "history",
            Self::HistoryReplay => "history-replay",
            Self::HistoryClear => "history-clear",
            Self::Favorites => "favorites",
            Self::FavoriteAdd => "favorite-add",
            Self::FavoriteRemove => "favorite-remove",
        }
    }

    /// Returns true for views that only touch the local database.
    #[must_use]
    pub const fn is_local(self) -> bool {
        matches!(
            self,
            Self::History
                | Self::HistoryClear
                | Self::Favorites
                | Self::FavoriteRemove
        )
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperationMode {
    type Err = DevlogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == wanted)
            .ok_or_else(|| DevlogError::Configuration {
                message: format!(
                    "unknown view '{}' (expected one of: {})",
                    s.trim(),
                    Self::ALL.map(Self::name).join(", ")
                ),
            })
    }
}
