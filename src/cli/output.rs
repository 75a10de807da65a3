//! Text formatting shared by the CLI views.

use std::io::Write;

use devlog::DevlogError;
use devlog::api::models::{CommitSummary, CommitType, display_timestamp};
use devlog::error::io_error;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::taxonomy::typed_title;

/// Widest commit title printed in listings.
pub const TITLE_WIDTH: usize = 72;
/// Longest timeline bar.
pub const BAR_WIDTH: u64 = 40;

const ELLIPSIS: char = '…';
const BAR: char = '█';

/// Writes one line and maps I/O failures.
pub fn line<W: Write>(writer: &mut W, text: &str) -> Result<(), DevlogError> {
    writeln!(writer, "{text}").map_err(|error| io_error(&error))
}

/// Writes an empty line.
pub fn blank<W: Write>(writer: &mut W) -> Result<(), DevlogError> {
    writeln!(writer).map_err(|error| io_error(&error))
}

/// Formats `value` with comma thousands separators.
pub fn group_thousands(value: u64) -> String {
    let mut reversed = String::new();
    let mut in_group = 0;
    for digit in value.to_string().chars().rev() {
        if in_group == 3 {
            reversed.push(',');
            in_group = 0;
        }
        reversed.push(digit);
        in_group += 1;
    }
    reversed.chars().rev().collect()
}

/// Cuts `text` to at most `width` terminal columns, ending with an ellipsis
/// when something was dropped.
pub fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_owned();
    }
    let budget = width.saturating_sub(1);
    let mut used = 0;
    let mut fitted = String::new();
    for character in text.chars() {
        let character_width = character.width().unwrap_or(0);
        if used + character_width > budget {
            break;
        }
        used += character_width;
        fitted.push(character);
    }
    fitted.push(ELLIPSIS);
    fitted
}

/// Bar proportional to `count` against the busiest day.
pub fn timeline_bar(count: u64, busiest: u64) -> String {
    let filled = count
        .saturating_mul(BAR_WIDTH)
        .checked_div(busiest)
        .unwrap_or(0);
    let length = if count > 0 { filled.max(1) } else { 0 };
    std::iter::repeat_n(BAR, usize::try_from(length).unwrap_or_default()).collect()
}

/// `+additions/-deletions` summary.
pub fn churn(additions: u64, deletions: u64) -> String {
    format!(
        "+{}/-{}",
        group_thousands(additions),
        group_thousands(deletions)
    )
}

/// One commit listing row: short SHA, date, author and title, with the
/// title's commit type labelled from `taxonomy`.
pub fn write_commit_line<W: Write>(
    writer: &mut W,
    commit: &CommitSummary,
    taxonomy: &[CommitType],
) -> Result<(), DevlogError> {
    line(
        writer,
        &format!(
            "  {} {} {} {} ({})",
            commit.short_sha(),
            display_timestamp(commit.committed_date.as_deref()),
            commit.author(),
            fit_width(&typed_title(commit.title(), taxonomy), TITLE_WIDTH),
            churn(commit.additions, commit.deletions)
        ),
    )
}
