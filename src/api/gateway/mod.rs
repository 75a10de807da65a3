//! Gateways for talking to the history API.
//!
//! [`DevlogGateway`] lists one method per endpoint so views and the sync
//! monitor can be exercised against mocks, while [`HttpGateway`] performs the
//! real requests.

mod error_mapping;
mod http_client;

pub use http_client::{DEFAULT_TIMEOUT, HttpGateway};

use async_trait::async_trait;

use crate::api::models::{
    Branch, BranchComparison, CancelAck, CommitDetail, CommitSummary, CommitType, Contributor,
    DetectedChanges, MigrationResults, Module, ModuleAnalytics, Repository, RuntimeConfig,
    SummaryStats, SyncHistory, SyncLogChunk, SyncRequest, SyncRunning, SyncStarted, Timeline,
};
use crate::api::query::{
    CommitQuery, CompareQuery, DetectedChangesQuery, MigrationQuery, TimelineQuery,
};
use crate::error::DevlogError;

/// Gateway over every endpoint of the history API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DevlogGateway: Send + Sync {
    /// Dashboard totals.
    async fn summary(&self) -> Result<SummaryStats, DevlogError>;

    /// Leaderboard of the `limit` most active authors.
    async fn top_contributors(&self, limit: u32) -> Result<Vec<Contributor>, DevlogError>;

    /// All imported repositories.
    async fn repositories(&self) -> Result<Vec<Repository>, DevlogError>;

    /// Branches of one repository.
    async fn branches(&self, repo_id: u64) -> Result<Vec<Branch>, DevlogError>;

    /// One page of a branch commit listing.
    async fn commits(
        &self,
        branch_id: u64,
        query: &CommitQuery,
    ) -> Result<Vec<CommitSummary>, DevlogError>;

    /// Commit with its changed files and patches.
    async fn commit(&self, commit_id: u64) -> Result<CommitDetail, DevlogError>;

    /// Commits unique to each of two branches.
    async fn compare(&self, query: &CompareQuery) -> Result<BranchComparison, DevlogError>;

    /// Patches mentioning a term across a version pair.
    async fn migration_search(
        &self,
        query: &MigrationQuery,
    ) -> Result<MigrationResults, DevlogError>;

    /// Commit-type taxonomy.
    async fn commit_types(&self) -> Result<Vec<CommitType>, DevlogError>;

    /// Detected modules.
    async fn modules(&self) -> Result<Vec<Module>, DevlogError>;

    /// Daily activity for a branch.
    async fn timeline(&self, query: &TimelineQuery) -> Result<Timeline, DevlogError>;

    /// Per-module rollups for a branch.
    async fn module_analytics(&self, branch_name: &str) -> Result<ModuleAnalytics, DevlogError>;

    /// Changes the server classified by kind.
    async fn detected_changes(
        &self,
        query: &DetectedChangesQuery,
    ) -> Result<DetectedChanges, DevlogError>;

    /// Server-advertised runtime configuration.
    async fn runtime_config(&self) -> Result<RuntimeConfig, DevlogError>;

    /// Starts a sync job.
    async fn start_sync(&self, request: &SyncRequest) -> Result<SyncStarted, DevlogError>;

    /// Job log lines after `last_position`.
    async fn sync_logs(&self, last_position: u64) -> Result<SyncLogChunk, DevlogError>;

    /// Whether a job is running.
    async fn sync_running(&self) -> Result<SyncRunning, DevlogError>;

    /// Recent import runs.
    async fn sync_history(&self) -> Result<SyncHistory, DevlogError>;

    /// Asks the server to stop the running job.
    async fn cancel_sync(&self) -> Result<CancelAck, DevlogError>;
}
