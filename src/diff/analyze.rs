//! Before/after summary of how a search term changed inside a patch.

use std::fmt;

use super::classify::{DiffLine, DiffLineKind};

/// Shown when the term had no removed occurrence.
pub const NOTHING_PLACEHOLDER: &str = "(nothing)";
/// Shown when the term had no added occurrence.
pub const REMOVED_PLACEHOLDER: &str = "(removed)";

/// Removed and added lines mentioning a search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedLines {
    /// Trimmed removed lines containing the term.
    pub old: Vec<String>,
    /// Trimmed added lines containing the term.
    pub new: Vec<String>,
}

impl DetectedLines {
    /// Old side joined by newlines, or [`NOTHING_PLACEHOLDER`].
    #[must_use]
    pub fn old_display(&self) -> String {
        join_or(&self.old, NOTHING_PLACEHOLDER)
    }

    /// New side joined by newlines, or [`REMOVED_PLACEHOLDER`].
    #[must_use]
    pub fn new_display(&self) -> String {
        join_or(&self.new, REMOVED_PLACEHOLDER)
    }
}

impl fmt::Display for DetectedLines {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{} -> {}",
            self.old_display(),
            self.new_display()
        )
    }
}

fn join_or(lines: &[String], placeholder: &str) -> String {
    if lines.is_empty() {
        placeholder.to_owned()
    } else {
        lines.join("\n")
    }
}

/// Collects removed and added lines of `patch` containing `term`,
/// ignoring case.
///
/// Returns `None` when either input is empty or no changed line mentions
/// the term. Context lines are ignored.
#[must_use]
pub fn detect_change(patch: &str, term: &str) -> Option<DetectedLines> {
    if patch.is_empty() || term.is_empty() {
        return None;
    }

    let needle = term.to_lowercase();
    let mut detected = DetectedLines::default();
    for line in DiffLine::parse_patch(patch) {
        if !line.text().to_lowercase().contains(&needle) {
            continue;
        }
        match line.kind() {
            DiffLineKind::Removed => detected.old.push(line.content().trim().to_owned()),
            DiffLineKind::Added => detected.new.push(line.content().trim().to_owned()),
            DiffLineKind::Header | DiffLineKind::HunkHeader | DiffLineKind::Context => {}
        }
    }

    (!detected.old.is_empty() || !detected.new.is_empty()).then_some(detected)
}
