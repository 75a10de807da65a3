//! Typed payloads returned by the history API.
//!
//! Optional fields stay `Option` and counters default to zero so partially
//! populated rows still decode. Display helpers substitute [`UNKNOWN`] and
//! [`NOT_AVAILABLE`] for missing values.

mod analytics;
mod catalog;
mod search;
mod stats;
mod sync;

pub use analytics::{
    DetectedChange, DetectedChanges, ModuleAnalytics, ModuleStats, Timeline, TimelineDay,
};
pub use catalog::{
    Branch, CommitDetail, CommitSummary, CommitType, DEFAULT_API_URL, FeatureFlags, FileChange,
    Module, Repository, RuntimeConfig,
};
pub use search::{MigrationCommit, MigrationFile, MigrationMatch, MigrationResults};
pub use stats::{
    BranchComparison, BranchSide, BranchStats, ComparedCommit, Contributor, SummaryStats,
};
pub use sync::{
    CancelAck, SyncHistory, SyncLogChunk, SyncMode, SyncRequest, SyncRun, SyncRunning,
    SyncStarted,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Fallback text for a missing author or name.
pub const UNKNOWN: &str = "Unknown";
/// Fallback text for a missing date or value.
pub const NOT_AVAILABLE: &str = "N/A";

/// Length of the abbreviated commit hash.
pub const SHORT_SHA_LEN: usize = 7;

/// Returns the first [`SHORT_SHA_LEN`] characters of `sha`.
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    sha.char_indices()
        .nth(SHORT_SHA_LEN)
        .and_then(|(index, _)| sha.get(..index))
        .unwrap_or(sha)
}

/// Returns the first line of a commit message.
#[must_use]
pub fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

/// Returns `value` or [`UNKNOWN`] when missing or blank.
#[must_use]
pub fn or_unknown(value: Option<&str>) -> &str {
    value.filter(|text| !text.trim().is_empty()).unwrap_or(UNKNOWN)
}

/// Parses the timestamp formats the API emits.
///
/// Accepts RFC 3339 values, naive ISO date-times with or without fractional
/// seconds, and bare dates.
#[must_use]
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|date_time| date_time.naive_local())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Formats an API timestamp as `YYYY-MM-DD HH:MM`, or [`NOT_AVAILABLE`].
#[must_use]
pub fn display_timestamp(value: Option<&str>) -> String {
    value
        .and_then(parse_timestamp)
        .map_or_else(
            || NOT_AVAILABLE.to_owned(),
            |date_time| date_time.format("%Y-%m-%d %H:%M").to_string(),
        )
}

/// Formats an API timestamp as `YYYY-MM-DD`, or [`NOT_AVAILABLE`].
#[must_use]
pub fn display_date(value: Option<&str>) -> String {
    value.and_then(parse_timestamp).map_or_else(
        || NOT_AVAILABLE.to_owned(),
        |date_time| date_time.format("%Y-%m-%d").to_string(),
    )
}
