//! Migration search and search-history views.

use std::io::Write;

use camino::Utf8PathBuf;
use devlog::api::models::{CommitType, MigrationMatch, MigrationResults, display_timestamp};
use devlog::api::query::MigrationQuery;
use devlog::diff::detect_change;
use devlog::export::{ExportKind, write_migration_csv, write_migration_report};
use devlog::persistence::{SearchHistory, SearchHistoryEntry};
use devlog::session::{highlighted_suggestions, suggestions};
use devlog::{DevlogConfig, DevlogError, DevlogGateway};
use tracing::{debug, warn};

use super::export::{NO_DATA_TO_EXPORT, export_csv, requested, write_file};
use super::output::{TITLE_WIDTH, blank, churn, fit_width, group_thousands, line};
use super::preferences::open_store;
use super::taxonomy::{self, typed_title};

/// Runs the configured migration search.
///
/// The search is recorded in history when a database is configured. A CSV
/// export and an HTML report are written when requested.
///
/// # Errors
///
/// Returns [`DevlogError::InvalidQuery`] for an incomplete form and
/// propagates gateway, storage and output failures.
pub async fn run<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let query = config.migration_form().build_query()?;
    let export = requested(config, ExportKind::MigrationResults)?;
    let results = gateway.migration_search(&query).await?;
    remember(config, &query);
    let types = taxonomy::load(gateway).await;

    write_results(writer, &query, &results, &types)?;
    if export {
        export_csv(
            config,
            ExportKind::MigrationResults,
            results.results.len(),
            writer,
            |file| write_migration_csv(file, &results.results),
        )?;
    }
    if let Some(report) = config.html_output.as_deref() {
        if results.results.is_empty() {
            return line(writer, NO_DATA_TO_EXPORT);
        }
        let path = Utf8PathBuf::from(report);
        let related = related_searches(config, query.trimmed_term());
        write_file(&path, |file| {
            write_migration_report(file, &results, query.trimmed_term(), &related)
        })?;
        line(writer, &format!("Report written to {path}"))?;
    }
    Ok(())
}

/// Records `query` in the search history when a database is configured.
pub fn remember(config: &DevlogConfig, query: &MigrationQuery) {
    if config.database_url.is_none() {
        return;
    }
    let saved = open_store(config).and_then(|store| {
        let mut history = SearchHistory::load(&store)?;
        history.record(SearchHistoryEntry::now(
            query.trimmed_term(),
            query.from_version.trim(),
            query.to_version.trim(),
        ));
        history.save(&store).map_err(DevlogError::from)
    });
    match saved {
        Ok(()) => debug!(term = query.trimmed_term(), "search recorded in history"),
        Err(error) => warn!(%error, "could not record search history"),
    }
}

/// Past searches related to `term`, marked up for the HTML report.
fn related_searches(config: &DevlogConfig, term: &str) -> Vec<String> {
    if config.database_url.is_none() {
        return Vec::new();
    }
    match open_store(config).and_then(|store| SearchHistory::load(&store).map_err(DevlogError::from)) {
        Ok(history) => suggestions(term, &history)
            .into_iter()
            .zip(highlighted_suggestions(term, &history))
            .filter(|(plain, _)| plain != term)
            .map(|(_, marked)| marked)
            .collect(),
        Err(error) => {
            warn!(%error, "could not load search history for the report");
            Vec::new()
        }
    }
}

/// Prints the stats and matches of one search.
pub fn write_results<W: Write>(
    writer: &mut W,
    query: &MigrationQuery,
    results: &MigrationResults,
    types: &[CommitType],
) -> Result<(), DevlogError> {
    if results.results.is_empty() {
        let note = results
            .message
            .as_deref()
            .unwrap_or("No changes found for this term");
        return line(writer, note);
    }
    line(
        writer,
        &format!(
            "{} matches for '{}' between {} and {}",
            group_thousands(results.count),
            query.trimmed_term(),
            query.from_version.trim(),
            query.to_version.trim()
        ),
    )?;
    line(
        writer,
        &format!(
            "  {} files in {} modules ({})",
            results.unique_files(),
            results.unique_modules(),
            churn(results.total_additions(), results.total_deletions())
        ),
    )?;
    for entry in &results.results {
        blank(writer)?;
        write_match(writer, entry, query.trimmed_term(), types)?;
    }
    Ok(())
}

fn write_match<W: Write>(
    writer: &mut W,
    entry: &MigrationMatch,
    term: &str,
    types: &[CommitType],
) -> Result<(), DevlogError> {
    let commit = &entry.commit;
    let file = &entry.file;
    line(
        writer,
        &format!(
            "{} {} {} [{}] {}",
            commit.short_sha(),
            display_timestamp(commit.date.as_deref()),
            commit.author_name(),
            commit.branch,
            fit_width(&typed_title(commit.title(), types), TITLE_WIDTH)
        ),
    )?;
    line(
        writer,
        &format!(
            "  {} {} ({})",
            file.status,
            file.filename,
            churn(file.additions, file.deletions)
        ),
    )?;
    let detected = file
        .patch
        .as_deref()
        .and_then(|patch| detect_change(patch, term));
    if let Some(change) = detected {
        line(writer, &format!("  - {}", change.old_display()))?;
        line(writer, &format!("  + {}", change.new_display()))?;
    }
    Ok(())
}

/// Lists past searches, plus completions when `--term` is set.
///
/// # Errors
///
/// Propagates storage and output failures.
pub fn history<W: Write>(config: &DevlogConfig, writer: &mut W) -> Result<(), DevlogError> {
    let history = SearchHistory::load(&open_store(config)?)?;
    if history.is_empty() {
        line(writer, "No searches yet")?;
    } else {
        line(writer, &format!("Recent searches ({})", history.len()))?;
        for (index, entry) in history.entries().iter().enumerate() {
            line(
                writer,
                &format!(
                    "  [{index}] {} ({} -> {}) {}",
                    entry.term,
                    entry.from_version,
                    entry.to_version,
                    entry.timestamp.format("%Y-%m-%d %H:%M")
                ),
            )?;
        }
    }
    if let Some(term) = config.term.as_deref() {
        let completions = suggestions(term, &history);
        if !completions.is_empty() {
            blank(writer)?;
            line(writer, &format!("Suggestions: {}", completions.join(", ")))?;
        }
    }
    Ok(())
}

/// Re-runs the search stored at `--index`.
///
/// Module, commit-type and pattern options come from the current
/// configuration.
///
/// # Errors
///
/// Returns [`DevlogError::NotFound`] when no search is stored at the index
/// and propagates search failures.
pub async fn replay<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let index = config.require_index()?;
    let history = SearchHistory::load(&open_store(config)?)?;
    let entry = history.get(index).ok_or_else(|| DevlogError::NotFound {
        message: format!("no search at index {index}"),
    })?;
    let replayed = DevlogConfig {
        term: Some(entry.term.clone()),
        from_version: Some(entry.from_version.clone()),
        to_version: Some(entry.to_version.clone()),
        ..config.clone()
    };
    run(gateway, &replayed, writer).await
}

/// Forgets every past search.
///
/// # Errors
///
/// Propagates storage and output failures.
pub fn clear_history<W: Write>(config: &DevlogConfig, writer: &mut W) -> Result<(), DevlogError> {
    SearchHistory::clear(&open_store(config)?)?;
    line(writer, "Search history cleared")
}

#[cfg(test)]
#[path = "migration_tests.rs"]
mod tests;
