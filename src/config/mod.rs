//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.devlog.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `DEVLOG_API_URL`, `DEVLOG_VIEW`, ...
//! 4. **Command-line arguments** – `--api-url`/`-a`, `--view`/`-v`, ...
//!
//! # Configuration File
//!
//! ```toml
//! api_url = "http://localhost:8000"
//! database_url = "devlog.sqlite"
//! from_version = "16.0"
//! to_version = "17.0"
//! poll_interval_ms = 2000
//! ```

mod operation_mode;

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::api::models::{DEFAULT_API_URL, SyncMode, SyncRequest};
use crate::api::pagination::DEFAULT_PAGE_SIZE;
use crate::api::query::{
    DEFAULT_CONTRIBUTOR_LIMIT, DEFAULT_TIMELINE_DAYS, DetectedChangesQuery, TimelineQuery,
};
use crate::error::DevlogError;
use crate::export::ExportKind;
use crate::session::{CommitBrowser, CommitFilters, CompareSelection, MigrationForm};
use crate::sync::{DEFAULT_MAX_POLL_FAILURES, PollSettings};

pub use operation_mode::OperationMode;

const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration supporting CLI, environment, and file sources.
///
/// Boolean switches (`migrate_db`, `use_regex`) are read from the CLI and the
/// configuration file only, since `ortho_config` does not load booleans from
/// the environment.
///
/// # Example
///
/// ```no_run
/// use devlog::DevlogConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = DevlogConfig::load().expect("failed to load configuration");
/// let mode = config.operation_mode().expect("known view");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "DEVLOG",
    discovery(
        dotfile_name = ".devlog.toml",
        config_file_name = "devlog.toml",
        app_name = "devlog"
    )
)]
pub struct DevlogConfig {
    /// Base URL of the history API.
    ///
    /// Can be provided via:
    /// - CLI: `--api-url <URL>` or `-a <URL>`
    /// - Environment: `DEVLOG_API_URL`
    /// - Config file: `api_url = "..."`
    #[ortho_config(cli_short = 'a')]
    pub api_url: String,

    /// View to run, such as `summary`, `commits` or `migration`.
    #[ortho_config(cli_short = 'v')]
    pub view: Option<String>,

    /// Repository identifier for branch and comparison views.
    pub repo_id: Option<u64>,

    /// Branch identifier for commit and timeline views.
    pub branch_id: Option<u64>,

    /// Commit identifier for the commit detail and favorite views.
    pub commit_id: Option<u64>,

    /// First branch name of a comparison.
    pub branch1: Option<String>,

    /// Second branch name of a comparison.
    pub branch2: Option<String>,

    /// Branch name for module analytics and detected changes.
    pub branch_name: Option<String>,

    /// Free-text commit message search.
    pub search: Option<String>,

    /// Author filter for commit listings.
    pub author: Option<String>,

    /// Commit-type code filter, such as `FIX`.
    pub commit_type: Option<String>,

    /// Module filter.
    pub module: Option<String>,

    /// Migration search term.
    #[ortho_config(cli_short = 't')]
    pub term: Option<String>,

    /// Old version branch of a migration search.
    pub from_version: Option<String>,

    /// New version branch of a migration search.
    pub to_version: Option<String>,

    /// Treats the migration term as a pattern.
    pub use_regex: bool,

    /// Zero-based page of the commit listing.
    pub page: u32,

    /// Commits per page.
    pub page_size: u32,

    /// Leaderboard length.
    pub limit: u32,

    /// Timeline window in days.
    pub days: u32,

    /// Kind filter for detected changes, such as `field_rename`.
    pub change_type: Option<String>,

    /// CSV export to write: `migration`, `modules` or `detected-changes`.
    pub export: Option<String>,

    /// CSV output path; defaults to the export's standard filename.
    #[ortho_config(cli_short = 'o')]
    pub output: Option<String>,

    /// HTML report path for migration results.
    pub html_output: Option<String>,

    /// Local `SQLite` database path holding search history and favorites.
    ///
    /// Can be provided via:
    /// - CLI: `--database-url <PATH>`
    /// - Environment: `DEVLOG_DATABASE_URL`
    /// - Config file: `database_url = "..."`
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    pub migrate_db: bool,

    /// Sync job mode: `incremental` or `full`.
    pub sync_mode: Option<String>,

    /// Comma-separated repository names a sync job is restricted to.
    pub sync_repositories: Option<String>,

    /// Comma-separated branch names a sync job is restricted to.
    pub sync_branches: Option<String>,

    /// Milliseconds between sync log polls.
    pub poll_interval_ms: u64,

    /// Failed polls in a row before monitoring stops.
    pub max_poll_failures: u32,

    /// HTTP request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Position in the history or favorites list.
    pub index: Option<usize>,
}

impl Default for DevlogConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            view: None,
            repo_id: None,
            branch_id: None,
            commit_id: None,
            branch1: None,
            branch2: None,
            branch_name: None,
            search: None,
            author: None,
            commit_type: None,
            module: None,
            term: None,
            from_version: None,
            to_version: None,
            use_regex: false,
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            limit: DEFAULT_CONTRIBUTOR_LIMIT,
            days: DEFAULT_TIMELINE_DAYS,
            change_type: None,
            export: None,
            output: None,
            html_output: None,
            database_url: None,
            migrate_db: false,
            sync_mode: None,
            sync_repositories: None,
            sync_branches: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_failures: DEFAULT_MAX_POLL_FAILURES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            index: None,
        }
    }
}

fn missing(name: &str, flag: &str) -> DevlogError {
    DevlogError::Configuration {
        message: format!("{name} is required (use --{flag})"),
    }
}

fn comma_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

impl DevlogConfig {
    /// Resolves the configured view.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] for an unknown view name.
    pub fn operation_mode(&self) -> Result<OperationMode, DevlogError> {
        self.view
            .as_deref()
            .map_or_else(|| Ok(OperationMode::default()), str::parse)
    }

    /// Checks values that every view relies on.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] naming the first bad value.
    pub fn validate(&self) -> Result<(), DevlogError> {
        if self.api_url.trim().is_empty() {
            return Err(DevlogError::Configuration {
                message: "api_url must not be empty".to_owned(),
            });
        }
        if self.page_size == 0 {
            return Err(DevlogError::Configuration {
                message: "page_size must be at least 1".to_owned(),
            });
        }
        if self.poll_interval_ms == 0 {
            return Err(DevlogError::Configuration {
                message: "poll_interval_ms must be at least 1".to_owned(),
            });
        }
        self.export_kind()?;
        self.sync_mode()?;
        Ok(())
    }

    /// Returns the repository id or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] when unset.
    pub fn require_repo_id(&self) -> Result<u64, DevlogError> {
        self.repo_id.ok_or_else(|| missing("repository id", "repo-id"))
    }

    /// Returns the branch id or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] when unset.
    pub fn require_branch_id(&self) -> Result<u64, DevlogError> {
        self.branch_id.ok_or_else(|| missing("branch id", "branch-id"))
    }

    /// Returns the commit id or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] when unset.
    pub fn require_commit_id(&self) -> Result<u64, DevlogError> {
        self.commit_id.ok_or_else(|| missing("commit id", "commit-id"))
    }

    /// Returns the branch name or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] when unset or blank.
    pub fn require_branch_name(&self) -> Result<&str, DevlogError> {
        self.branch_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| missing("branch name", "branch-name"))
    }

    /// Returns the list position or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] when unset.
    pub fn require_index(&self) -> Result<usize, DevlogError> {
        self.index.ok_or_else(|| missing("list index", "index"))
    }

    /// Returns the database path or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] when unset.
    pub fn require_database_url(&self) -> Result<&str, DevlogError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| missing("database path", "database-url"))
    }

    /// Commit browser positioned on the configured branch, filters and page.
    #[must_use]
    pub fn commit_browser(&self) -> CommitBrowser {
        let mut browser = CommitBrowser::new(self.page_size);
        browser.select_repository(self.repo_id);
        browser.select_branch(self.branch_id);
        browser.set_filters(CommitFilters {
            search: self.search.clone(),
            author: self.author.clone(),
            module: self.module.clone(),
            commit_type: self.commit_type.clone(),
        });
        browser.go_to_page(self.page);
        browser
    }

    /// Branch pair chosen for comparison.
    #[must_use]
    pub fn compare_selection(&self) -> CompareSelection {
        CompareSelection::new(self.repo_id, self.branch1.clone(), self.branch2.clone())
    }

    /// Migration search form filled from configuration.
    #[must_use]
    pub fn migration_form(&self) -> MigrationForm {
        let mut form = MigrationForm::default();
        form.set_term(self.term.clone().unwrap_or_default());
        form.set_from_version(self.from_version.clone());
        form.set_to_version(self.to_version.clone());
        form.set_module(self.module.clone());
        form.set_commit_type(self.commit_type.clone());
        form.set_use_regex(self.use_regex);
        form
    }

    /// Timeline request for the configured branch and window.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] without a branch id, or
    /// [`DevlogError::InvalidQuery`] for an out-of-range window.
    pub fn timeline_query(&self) -> Result<TimelineQuery, DevlogError> {
        let query = TimelineQuery::new(self.require_branch_id()?).with_days(self.days);
        query.validate()?;
        Ok(query)
    }

    /// Detected-changes request for the configured branch and kind.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] without a branch name.
    pub fn detected_changes_query(&self) -> Result<DetectedChangesQuery, DevlogError> {
        Ok(DetectedChangesQuery {
            branch_name: self.require_branch_name()?.to_owned(),
            change_type: self.change_type.clone(),
        })
    }

    /// Parsed sync mode, defaulting to incremental.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] for an unknown mode.
    pub fn sync_mode(&self) -> Result<SyncMode, DevlogError> {
        self.sync_mode
            .as_deref()
            .map_or_else(|| Ok(SyncMode::default()), str::parse)
    }

    /// Sync job request built from the mode and restriction lists.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] for an unknown mode.
    pub fn sync_request(&self) -> Result<SyncRequest, DevlogError> {
        Ok(SyncRequest {
            mode: self.sync_mode()?,
            repositories: comma_list(self.sync_repositories.as_deref()),
            branches: comma_list(self.sync_branches.as_deref()),
        })
    }

    /// Polling cadence for sync monitoring.
    #[must_use]
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings::new(
            Duration::from_millis(self.poll_interval_ms),
            self.max_poll_failures,
        )
    }

    /// HTTP request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Requested CSV export, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::Configuration`] for an unknown export name.
    pub fn export_kind(&self) -> Result<Option<ExportKind>, DevlogError> {
        self.export
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::parse)
            .transpose()
    }
}

#[cfg(test)]
mod tests;
