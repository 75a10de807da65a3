//! Repository, branch and commit browsing views.

use std::io::Write;

use camino::Utf8PathBuf;
use devlog::api::models::{CommitDetail, CommitType, FileChange, display_timestamp};
use devlog::diff::find_commit_type;
use devlog::export::write_commit_report;
use devlog::{CommitPage, DashboardIntake, DevlogConfig, DevlogError, DevlogGateway};

use super::export::write_file;
use super::output::{blank, churn, line, write_commit_line};
use super::taxonomy::{self, type_label};

/// Lists imported repositories.
///
/// # Errors
///
/// Propagates gateway and output failures.
pub async fn repositories<G: DevlogGateway, W: Write>(
    gateway: &G,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let repositories = gateway.repositories().await?;
    line(writer, &format!("Repositories ({})", repositories.len()))?;
    for repository in &repositories {
        let branch = repository.default_branch.as_deref().unwrap_or("-");
        line(
            writer,
            &format!("  {:>4} {} [{branch}]", repository.id, repository.full_name),
        )?;
    }
    Ok(())
}

/// Lists the branches of the configured repository.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] without a repository id and
/// propagates gateway and output failures.
pub async fn branches<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let repo_id = config.require_repo_id()?;
    let branches = gateway.branches(repo_id).await?;
    line(writer, &format!("Branches of repository {repo_id}"))?;
    for branch in &branches {
        let marker = if branch.is_default { " (default)" } else { "" };
        line(writer, &format!("  {:>4} {}{marker}", branch.id, branch.name))?;
    }
    Ok(())
}

/// Prints one page of commits for the configured branch and filters.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] without a branch id and
/// propagates gateway and output failures.
pub async fn commits<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let mut browser = config.commit_browser();
    let (branch_id, query) = browser.request().ok_or_else(|| DevlogError::Configuration {
        message: "branch id is required (use --branch-id)".to_owned(),
    })?;
    let page = DashboardIntake::new(gateway)
        .commit_page(branch_id, &query)
        .await?;
    let types = taxonomy::load(gateway).await;
    browser.record_results(page.commits.len());
    let next = browser.next_page().then(|| browser.page().index());
    write_commit_page(writer, &page, &types, next)
}

fn write_commit_page<W: Write>(
    writer: &mut W,
    page: &CommitPage,
    types: &[CommitType],
    next: Option<u32>,
) -> Result<(), DevlogError> {
    if page.commits.is_empty() {
        return line(writer, "No commits found");
    }
    for commit in &page.commits {
        write_commit_line(writer, commit, types)?;
    }
    blank(writer)?;
    line(
        writer,
        &format!(
            "Page {} ({} commits)",
            page.page.index() + 1,
            page.commits.len()
        ),
    )?;
    if let Some(index) = next {
        line(
            writer,
            &format!("More commits available (use --page {index})"),
        )?;
    }
    Ok(())
}

/// Prints one commit with its changed files and patches.
///
/// With `--html-output` the commit is also written as an HTML page with a
/// unified diff per file.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] without a commit id and
/// propagates gateway, file and output failures.
pub async fn commit<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let detail = gateway.commit(config.require_commit_id()?).await?;
    let types = taxonomy::load(gateway).await;
    write_commit_detail(writer, &detail, &types)?;
    if let Some(report) = config.html_output.as_deref() {
        let path = Utf8PathBuf::from(report);
        let commit_type = find_commit_type(&detail.commit.message, &types);
        write_file(&path, |file| write_commit_report(file, &detail, commit_type))?;
        blank(writer)?;
        line(writer, &format!("Report written to {path}"))?;
    }
    Ok(())
}

fn write_commit_detail<W: Write>(
    writer: &mut W,
    detail: &CommitDetail,
    types: &[CommitType],
) -> Result<(), DevlogError> {
    let commit = &detail.commit;
    line(writer, &format!("commit {}", commit.sha))?;
    line(writer, &format!("Author: {}", commit.author()))?;
    line(
        writer,
        &format!(
            "Date:   {}",
            display_timestamp(commit.committed_date.as_deref())
        ),
    )?;
    if let Some(label) = type_label(&commit.message, types) {
        line(writer, &format!("Type:   {label}"))?;
    }
    if commit.is_merge {
        line(writer, "Merge commit")?;
    }
    blank(writer)?;
    for message_line in commit.message.lines() {
        line(writer, &format!("    {message_line}"))?;
    }
    blank(writer)?;
    line(
        writer,
        &format!(
            "{} files changed ({})",
            detail.files_changed.len(),
            churn(commit.additions, commit.deletions)
        ),
    )?;
    for file in &detail.files_changed {
        write_file_change(writer, file)?;
    }
    Ok(())
}

fn write_file_change<W: Write>(writer: &mut W, file: &FileChange) -> Result<(), DevlogError> {
    blank(writer)?;
    let renamed = file
        .previous_filename
        .as_deref()
        .map(|previous| format!(" (from {previous})"))
        .unwrap_or_default();
    line(
        writer,
        &format!(
            "{} {}{renamed} ({})",
            file.status,
            file.filename,
            churn(file.additions, file.deletions)
        ),
    )?;
    match file.patch.as_deref() {
        Some(patch) if !patch.trim().is_empty() => {
            for patch_line in patch.lines() {
                line(writer, patch_line)?;
            }
            Ok(())
        }
        _ => line(writer, "  (no diff available)"),
    }
}
