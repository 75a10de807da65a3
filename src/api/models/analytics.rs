//! Timeline, module and detected-change analytics.

use serde::{Deserialize, Serialize};

/// Activity for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineDay {
    /// ISO date.
    pub date: Option<String>,
    /// Commits that day.
    pub commit_count: u64,
    /// Lines added that day.
    pub total_additions: u64,
    /// Lines removed that day.
    pub total_deletions: u64,
    /// Distinct authors that day.
    pub author_count: u64,
}

/// Response of `/analytics/timeline`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeline {
    /// Branch the timeline covers.
    pub branch_id: u64,
    /// Window size in days.
    pub days: u32,
    /// One row per active day.
    pub timeline: Vec<TimelineDay>,
}

impl Timeline {
    /// Highest daily commit count, used to scale bars.
    #[must_use]
    pub fn busiest_day(&self) -> u64 {
        self.timeline
            .iter()
            .map(|day| day.commit_count)
            .max()
            .unwrap_or_default()
    }
}

/// Rollup for one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleStats {
    /// Module name.
    pub module: String,
    /// Commits touching the module.
    pub commits: u64,
    /// Lines added.
    pub additions: u64,
    /// Lines removed.
    pub deletions: u64,
    /// Distinct authors.
    pub contributors: u64,
    /// ISO timestamp of the latest change.
    pub last_modified: Option<String>,
}

/// Response of `/analytics/modules`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleAnalytics {
    /// Branch name.
    pub branch: String,
    /// Module rows, busiest first.
    pub modules: Vec<ModuleStats>,
}

/// A change the server classified by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedChange {
    /// Commit identifier.
    pub commit_id: u64,
    /// Abbreviated hash.
    pub commit_sha: String,
    /// First message line.
    pub commit_message: String,
    /// Author name.
    pub author: Option<String>,
    /// ISO timestamp.
    pub date: Option<String>,
    /// File path.
    pub filename: String,
    /// Change kind, for example `field_rename`.
    #[serde(rename = "type")]
    pub change_type: String,
    /// Value before the change.
    pub old_value: Option<String>,
    /// Value after the change.
    pub new_value: Option<String>,
}

/// Response of `/analytics/detected-changes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedChanges {
    /// Branch name.
    pub branch: String,
    /// Requested change kind filter.
    pub change_type: Option<String>,
    /// Detected changes.
    pub changes: Vec<DetectedChange>,
}
