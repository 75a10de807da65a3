//! CLI operation mode handlers.
//!
//! Each view writes plain text to the supplied writer:
//! - [`dashboard`]: totals, contributors and reference lists
//! - [`browse`]: repositories, branches, commit pages and commit detail
//! - [`compare`]: commits unique to each of two branches
//! - [`migration`]: term search across versions and its history
//! - [`watch`]: migration search as terms are typed
//! - [`analytics`]: timeline, module rollups and detected changes
//! - [`sync`]: server-side import jobs
//! - [`preferences`]: favorite commits
//! - [`migrations`]: local database schema
//!
//! Shared formatting lives in [`output`], commit-type labels in
//! [`taxonomy`] and file export in [`export`].

use std::io::Write;

use devlog::telemetry::TelemetrySink;
use tokio::io::{BufReader, stdin};
use devlog::{DevlogConfig, DevlogError, DevlogGateway, OperationMode};

pub mod analytics;
pub mod browse;
pub mod compare;
pub mod dashboard;
pub mod export;
pub mod migration;
pub mod migrations;
pub mod output;
pub mod preferences;
pub mod sync;
pub mod taxonomy;
pub mod watch;

#[cfg(test)]
pub mod test_utils;

/// Runs the view selected by `mode`.
///
/// # Errors
///
/// Propagates the view's failure.
pub async fn run_view<G: DevlogGateway + Clone + 'static, W: Write>(
    mode: OperationMode,
    gateway: &G,
    config: &DevlogConfig,
    telemetry: &dyn TelemetrySink,
    writer: &mut W,
) -> Result<(), DevlogError> {
    match mode {
        OperationMode::Summary => dashboard::summary(gateway, config, writer).await,
        OperationMode::Contributors => dashboard::contributors(gateway, config, writer).await,
        OperationMode::CommitTypes => dashboard::commit_types(gateway, writer).await,
        OperationMode::Modules => dashboard::modules(gateway, writer).await,
        OperationMode::RemoteConfig => dashboard::remote_config(gateway, writer).await,
        OperationMode::Repositories => browse::repositories(gateway, writer).await,
        OperationMode::Branches => browse::branches(gateway, config, writer).await,
        OperationMode::Commits => browse::commits(gateway, config, writer).await,
        OperationMode::Commit => browse::commit(gateway, config, writer).await,
        OperationMode::Compare => compare::run(gateway, config, writer).await,
        OperationMode::Migration => migration::run(gateway, config, writer).await,
        OperationMode::MigrationWatch => {
            watch::run(gateway, config, BufReader::new(stdin()), writer).await
        }
        OperationMode::History => migration::history(config, writer),
        OperationMode::HistoryReplay => migration::replay(gateway, config, writer).await,
        OperationMode::HistoryClear => migration::clear_history(config, writer),
        OperationMode::Timeline => analytics::timeline(gateway, config, writer).await,
        OperationMode::ModuleAnalytics => analytics::modules(gateway, config, writer).await,
        OperationMode::DetectedChanges => {
            analytics::detected_changes(gateway, config, writer).await
        }
        OperationMode::Sync => sync::run(gateway, config, telemetry, writer).await,
        OperationMode::SyncStatus => sync::status(gateway, writer).await,
        OperationMode::SyncCancel => sync::cancel(gateway, writer).await,
        OperationMode::Favorites => preferences::list(config, writer),
        OperationMode::FavoriteAdd => preferences::add(gateway, config, writer).await,
        OperationMode::FavoriteRemove => preferences::remove(config, writer),
    }
}

/// What a failing view was loading, for the error prefix.
#[must_use]
pub const fn subject(mode: OperationMode) -> &'static str {
    match mode {
        OperationMode::Summary => "dashboard",
        OperationMode::Contributors => "contributors",
        OperationMode::CommitTypes => "commit types",
        OperationMode::Modules => "modules",
        OperationMode::RemoteConfig => "server configuration",
        OperationMode::Repositories => "repositories",
        OperationMode::Branches => "branches",
        OperationMode::Commits => "commits",
        OperationMode::Commit => "commit details",
        OperationMode::Compare => "branch comparison",
        OperationMode::Migration
        | OperationMode::MigrationWatch
        | OperationMode::HistoryReplay => "migration search",
        OperationMode::History | OperationMode::HistoryClear => "search history",
        OperationMode::Timeline => "timeline",
        OperationMode::ModuleAnalytics => "module analytics",
        OperationMode::DetectedChanges => "detected changes",
        OperationMode::Sync => "sync job",
        OperationMode::SyncStatus | OperationMode::SyncCancel => "sync status",
        OperationMode::Favorites | OperationMode::FavoriteAdd | OperationMode::FavoriteRemove => {
            "favorites"
        }
    }
}
