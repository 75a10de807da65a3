//! Dashboard and reference-list views.

use std::io::Write;

use devlog::api::models::{CommitType, Contributor, Module, RuntimeConfig, SummaryStats};
use devlog::{DashboardIntake, DevlogConfig, DevlogError, DevlogGateway};

use super::output::{blank, churn, group_thousands, line};

/// Prints dashboard totals followed by the contributor leaderboard.
///
/// # Errors
///
/// Propagates gateway and output failures.
pub async fn summary<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let overview = DashboardIntake::new(gateway).overview(config.limit).await?;
    write_summary(writer, &overview.summary)?;
    blank(writer)?;
    write_contributors(writer, &overview.contributors)
}

/// Prints the contributor leaderboard only.
///
/// # Errors
///
/// Propagates gateway and output failures.
pub async fn contributors<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let ranking = gateway.top_contributors(config.limit).await?;
    write_contributors(writer, &ranking)
}

/// Prints the commit-type taxonomy.
///
/// # Errors
///
/// Propagates gateway and output failures.
pub async fn commit_types<G: DevlogGateway, W: Write>(
    gateway: &G,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let types = gateway.commit_types().await?;
    write_commit_types(writer, &types)
}

/// Prints the detected modules.
///
/// # Errors
///
/// Propagates gateway and output failures.
pub async fn modules<G: DevlogGateway, W: Write>(
    gateway: &G,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let modules = gateway.modules().await?;
    write_modules(writer, &modules)
}

/// Prints what the server advertises about itself.
///
/// # Errors
///
/// Propagates gateway and output failures.
pub async fn remote_config<G: DevlogGateway, W: Write>(
    gateway: &G,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let remote = gateway.runtime_config().await?;
    write_runtime_config(writer, &remote)
}

fn write_summary<W: Write>(writer: &mut W, stats: &SummaryStats) -> Result<(), DevlogError> {
    line(writer, "Summary")?;
    for (label, value) in [
        ("Repositories", stats.total_repositories),
        ("Branches", stats.total_branches),
        ("Commits", stats.total_commits),
        ("Files changed", stats.total_file_changes),
        ("Authors", stats.unique_authors),
        ("Lines added", stats.total_additions),
        ("Lines removed", stats.total_deletions),
    ] {
        line(writer, &format!("  {label:<14}{}", group_thousands(value)))?;
    }
    Ok(())
}

fn write_contributors<W: Write>(
    writer: &mut W,
    ranking: &[Contributor],
) -> Result<(), DevlogError> {
    line(writer, "Top contributors")?;
    if ranking.is_empty() {
        return line(writer, "  No contributors yet");
    }
    for (rank, contributor) in ranking.iter().enumerate() {
        line(
            writer,
            &format!(
                "  #{} {} - {} commits ({})",
                rank + 1,
                contributor.name(),
                group_thousands(contributor.commits),
                churn(contributor.additions, contributor.deletions)
            ),
        )?;
    }
    Ok(())
}

fn write_commit_types<W: Write>(writer: &mut W, types: &[CommitType]) -> Result<(), DevlogError> {
    line(writer, "Commit types")?;
    for commit_type in types {
        line(
            writer,
            &format!("  [{}] {}", commit_type.code, commit_type.label),
        )?;
    }
    Ok(())
}

fn write_modules<W: Write>(writer: &mut W, modules: &[Module]) -> Result<(), DevlogError> {
    line(writer, &format!("Modules ({})", modules.len()))?;
    for module in modules {
        match module.repo.as_deref() {
            Some(repo) => line(writer, &format!("  {} ({repo})", module.name))?,
            None => line(writer, &format!("  {}", module.name))?,
        }
    }
    Ok(())
}

fn write_runtime_config<W: Write>(
    writer: &mut W,
    remote: &RuntimeConfig,
) -> Result<(), DevlogError> {
    let flag = |enabled: bool| if enabled { "on" } else { "off" };
    line(writer, &format!("API URL: {}", remote.api_url))?;
    line(writer, &format!("Version: {}", remote.version))?;
    line(
        writer,
        &format!(
            "Features: analytics {}, export {}, regex search {}",
            flag(remote.features.analytics),
            flag(remote.features.export),
            flag(remote.features.regex_search)
        ),
    )
}
