//! Payloads of the admin sync endpoints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DevlogError;

/// How much history a sync job imports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// Only commits newer than the last import.
    #[default]
    Incremental,
    /// Everything, from scratch.
    Full,
}

impl SyncMode {
    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Incremental => "incremental",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SyncMode {
    type Err = DevlogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "incremental" => Ok(Self::Incremental),
            "full" => Ok(Self::Full),
            other => Err(DevlogError::Configuration {
                message: format!("unknown sync mode '{other}' (expected incremental or full)"),
            }),
        }
    }
}

/// Body of `POST /admin/fetch`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRequest {
    /// Import mode.
    pub mode: SyncMode,
    /// Repository full names to restrict the job to; empty means all.
    pub repositories: Vec<String>,
    /// Branch names to restrict the job to; empty means all.
    pub branches: Vec<String>,
}

/// Acknowledgement of a started job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncStarted {
    /// Job status, normally `started`.
    pub status: String,
    /// Mode echoed back.
    pub mode: Option<String>,
    /// Server process identifier.
    pub pid: Option<u64>,
    /// Human-readable note.
    pub message: Option<String>,
}

/// One poll of the job log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncLogChunk {
    /// Lines written since the requested position.
    pub logs: Vec<String>,
    /// Position to request on the next poll.
    pub position: u64,
    /// Whether the job is still running.
    pub running: bool,
}

/// Response of `/admin/fetch-running`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncRunning {
    /// Whether a job is running.
    pub running: bool,
}

/// One past import run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncRun {
    /// Log identifier.
    pub id: u64,
    /// ISO start time.
    pub started_at: Option<String>,
    /// ISO completion time.
    pub completed_at: Option<String>,
    /// Final or current status.
    pub status: Option<String>,
    /// Commits imported by the run.
    pub commits_imported: u64,
    /// Failure detail.
    pub error_message: Option<String>,
    /// Repository the run imported.
    pub repo_id: Option<u64>,
    /// Branch the run imported.
    pub branch_name: Option<String>,
    /// Run length in seconds.
    pub duration: Option<f64>,
}

/// Response of `/admin/fetch-status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncHistory {
    /// Recent runs, newest first.
    pub logs: Vec<SyncRun>,
    /// Newest run.
    pub last_fetch: Option<SyncRun>,
    /// Server-side error while reading the history.
    pub error: Option<String>,
}

/// Response of `POST /admin/cancel-fetch`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CancelAck {
    /// Cancellation status.
    pub status: String,
    /// Human-readable note.
    pub message: Option<String>,
}
