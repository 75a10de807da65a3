//! Standalone HTML reports.
//!
//! A migration report gives each match a section with its commit, file,
//! detected change and the side-by-side diff with the search term
//! highlighted. A commit report lists every changed file with its unified
//! diff. Text fields are auto-escaped by the template engine; pre-rendered
//! diff markup is inserted as-is.

use std::io::Write;

use chrono::Utc;
use minijinja::{AutoEscape, Environment, context};
use serde::Serialize;

use crate::api::models::{
    CommitDetail, CommitType, FileChange, MigrationMatch, MigrationResults, display_timestamp,
};
use crate::diff::{
    detect_change, highlight_term, reconstruct, render_side_by_side, render_unified,
};
use crate::error::{DevlogError, io_error};

const REPORT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Migration search: {{ term }}</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
.diff-side-by-side { font-family: monospace; font-size: 12px; }
.diff-header-row, .diff-content-row { display: flex; }
.diff-column { flex: 1; overflow-x: auto; }
.diff-line { white-space: pre; min-height: 1.2em; }
.diff-del { background: #fee2e2; }
.diff-add { background: #dcfce7; }
.diff-empty { background: #f3f4f6; }
mark { background: #fbbf24; color: #000; }
</style>
</head>
<body>
<h1>Migration search: {{ term }}</h1>
<p>{{ from_version }} &rarr; {{ to_version }} &middot; {{ entries | length }} result(s) &middot; generated {{ generated_at }}</p>
{% if related %}
<p class="related-searches">Related searches:{% for suggestion in related %} <span>{{ suggestion | safe }}</span>{% endfor %}</p>
{% endif %}
{% for entry in entries %}
<section class="migration-result">
<h2>{{ entry.filename }}</h2>
<p><code>{{ entry.sha }}</code> {{ entry.title }} &middot; {{ entry.author }} &middot; {{ entry.date }} &middot; {{ entry.branch }} &middot; {{ entry.status }} +{{ entry.additions }} -{{ entry.deletions }}</p>
{% if entry.detected_old is not none %}
<p class="detected-change"><strong>Before:</strong> <code>{{ entry.detected_old }}</code> <strong>After:</strong> <code>{{ entry.detected_new }}</code></p>
{% endif %}
{{ entry.diff_html | safe }}
</section>
{% endfor %}
</body>
</html>
"#;

const COMMIT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Commit {{ sha }}</title>
<style>
body { font-family: sans-serif; margin: 2rem; }
.diff-line { font-family: monospace; font-size: 12px; white-space: pre; }
.diff-line-header { color: #6b7280; }
.diff-line-add { background: #dcfce7; }
.diff-line-remove { background: #fee2e2; }
</style>
</head>
<body>
<h1>{{ title }}</h1>
<p><code>{{ sha }}</code> &middot; {{ author }} &middot; {{ date }}{% if commit_type %} &middot; {{ commit_type }}{% endif %} &middot; +{{ additions }} -{{ deletions }}</p>
{% if body %}<pre>{{ body }}</pre>{% endif %}
{% for file in files %}
<section class="changed-file">
<h2>{{ file.status }} {{ file.filename }}</h2>
<p>+{{ file.additions }} -{{ file.deletions }}</p>
{{ file.diff_html | safe }}
</section>
{% endfor %}
</body>
</html>
"#;

#[derive(Debug, Clone, Serialize)]
struct ReportEntry {
    sha: String,
    title: String,
    author: String,
    date: String,
    branch: String,
    filename: String,
    status: String,
    additions: u64,
    deletions: u64,
    detected_old: Option<String>,
    detected_new: Option<String>,
    diff_html: String,
}

impl ReportEntry {
    fn new(entry: &MigrationMatch, term: &str, from_label: &str, to_label: &str) -> Self {
        let patch = entry.file.patch.as_deref();
        let detected = patch.and_then(|text| detect_change(text, term));
        let diff = reconstruct(patch, from_label, to_label);

        Self {
            sha: entry.commit.short_sha().to_owned(),
            title: entry.commit.title().to_owned(),
            author: entry.commit.author_name().to_owned(),
            date: display_timestamp(entry.commit.date.as_deref()),
            branch: entry.commit.branch.clone(),
            filename: entry.file.filename.clone(),
            status: entry.file.status.clone(),
            additions: entry.file.additions,
            deletions: entry.file.deletions,
            detected_old: detected.as_ref().map(|lines| lines.old_display()),
            detected_new: detected.as_ref().map(|lines| lines.new_display()),
            diff_html: highlight_term(&render_side_by_side(&diff), term),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChangedFile {
    filename: String,
    status: String,
    additions: u64,
    deletions: u64,
    diff_html: String,
}

impl From<&FileChange> for ChangedFile {
    fn from(file: &FileChange) -> Self {
        Self {
            filename: file.filename.clone(),
            status: file.status.clone(),
            additions: file.additions,
            deletions: file.deletions,
            diff_html: render_unified(file.patch.as_deref()),
        }
    }
}

/// Writes an HTML report of migration search results.
///
/// `related` holds suggestion fragments already escaped and highlighted,
/// such as those from [`crate::session::highlighted_suggestions`].
///
/// # Errors
///
/// Returns [`DevlogError::EmptyExport`] when there are no matches,
/// [`DevlogError::Configuration`] if the template fails to render, and
/// [`DevlogError::Io`] if writing fails.
pub fn write_migration_report<W: Write>(
    writer: &mut W,
    results: &MigrationResults,
    term: &str,
    related: &[String],
) -> Result<(), DevlogError> {
    if results.results.is_empty() {
        return Err(DevlogError::EmptyExport {
            message: "migration report".to_owned(),
        });
    }

    let from_version = results.from_version.as_deref().unwrap_or_default();
    let to_version = results.to_version.as_deref().unwrap_or_default();
    let entries: Vec<ReportEntry> = results
        .results
        .iter()
        .map(|entry| ReportEntry::new(entry, term, from_version, to_version))
        .collect();

    render(
        writer,
        REPORT_TEMPLATE,
        context! {
            term => term,
            from_version => from_version,
            to_version => to_version,
            generated_at => Utc::now().to_rfc3339(),
            related => related,
            entries => entries,
        },
    )
}

/// Writes an HTML page for one commit with a unified diff per file.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] if the template fails to render
/// and [`DevlogError::Io`] if writing fails.
pub fn write_commit_report<W: Write>(
    writer: &mut W,
    detail: &CommitDetail,
    commit_type: Option<&CommitType>,
) -> Result<(), DevlogError> {
    let commit = &detail.commit;
    let body = commit
        .message
        .split_once('\n')
        .map(|(_, rest)| rest.trim())
        .unwrap_or_default();
    let files: Vec<ChangedFile> = detail.files_changed.iter().map(ChangedFile::from).collect();

    render(
        writer,
        COMMIT_TEMPLATE,
        context! {
            sha => commit.sha,
            title => commit.title(),
            body => body,
            author => commit.author(),
            date => display_timestamp(commit.committed_date.as_deref()),
            commit_type => commit_type.map(|found| format!("{} ({})", found.code, found.label)),
            additions => commit.additions,
            deletions => commit.deletions,
            files => files,
        },
    )
}

fn render<W: Write>(
    writer: &mut W,
    source: &str,
    values: minijinja::Value,
) -> Result<(), DevlogError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_template("report", source)
        .map_err(|e| DevlogError::Configuration {
            message: format!("invalid report template: {e}"),
        })?;

    let template = env
        .get_template("report")
        .map_err(|e| DevlogError::Configuration {
            message: format!("report template missing: {e}"),
        })?;

    let rendered = template
        .render(values)
        .map_err(|e| DevlogError::Configuration {
            message: format!("report rendering failed: {e}"),
        })?;

    writer
        .write_all(rendered.as_bytes())
        .map_err(|e| io_error(&e))
}
