//! Branch comparison view.

use std::io::Write;

use devlog::api::models::{BranchSide, display_timestamp, or_unknown};
use devlog::{DevlogConfig, DevlogError, DevlogGateway};

use super::output::{TITLE_WIDTH, blank, churn, fit_width, group_thousands, line};

/// Prints the stats and unique commits of two branches.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] unless a repository and two
/// distinct branch names are configured, and propagates gateway and output
/// failures.
pub async fn run<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let query = config
        .compare_selection()
        .query()
        .ok_or_else(|| DevlogError::Configuration {
            message: "comparison needs --repo-id and two different branches (--branch1, --branch2)"
                .to_owned(),
        })?;
    let comparison = gateway.compare(&query).await?;
    write_side(writer, &comparison.branch1)?;
    blank(writer)?;
    write_side(writer, &comparison.branch2)
}

fn write_side<W: Write>(writer: &mut W, side: &BranchSide) -> Result<(), DevlogError> {
    let stats = &side.stats;
    line(writer, &format!("Branch {}", side.name))?;
    line(
        writer,
        &format!(
            "  {} commits, {} authors ({})",
            group_thousands(stats.total_commits),
            group_thousands(stats.unique_authors),
            churn(stats.total_additions, stats.total_deletions)
        ),
    )?;
    line(
        writer,
        &format!("  Unique commits: {}", side.unique_commits.len()),
    )?;
    for commit in &side.unique_commits {
        line(
            writer,
            &format!(
                "    {} {} {} {}",
                commit.short_sha(),
                display_timestamp(commit.date.as_deref()),
                or_unknown(commit.author.as_deref()),
                fit_width(commit.title(), TITLE_WIDTH)
            ),
        )?;
    }
    Ok(())
}
