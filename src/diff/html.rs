//! HTML fragments for the unified and side-by-side diff views.

use super::classify::{DiffLine, DiffLineKind};
use super::side_by_side::{DiffCell, SideBySideDiff};

const NO_DIFF_UNIFIED: &str = r#"<div class="no-diff">No diff available</div>"#;
const NO_DIFF_SIDE_BY_SIDE: &str = r#"<p class="info-text">No diff available</p>"#;

/// Escapes the five HTML-significant characters.
///
/// ```
/// use devlog::diff::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">'&'</a>"#),
///     "&lt;a href=&quot;x&quot;&gt;&#039;&amp;&#039;&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Renders the single-column view used on the commit detail page.
///
/// Every line is kept, including file and hunk headers.
#[must_use]
pub fn render_unified(patch: Option<&str>) -> String {
    let Some(text) = patch.filter(|value| !value.is_empty()) else {
        return NO_DIFF_UNIFIED.to_owned();
    };

    let mut html = String::new();
    for line in DiffLine::parse_patch(text) {
        let css_class = match line.kind() {
            DiffLineKind::Header | DiffLineKind::HunkHeader => "diff-line-header",
            DiffLineKind::Added => "diff-line-add",
            DiffLineKind::Removed => "diff-line-remove",
            DiffLineKind::Context => "diff-line-context",
        };
        push_line(&mut html, css_class, line.text());
    }
    html
}

/// Renders a [`SideBySideDiff`] as a header row plus two columns.
#[must_use]
pub fn render_side_by_side(diff: &SideBySideDiff) -> String {
    let Some(body) = diff.body() else {
        return NO_DIFF_SIDE_BY_SIDE.to_owned();
    };

    let mut html = String::from(r#"<div class="diff-side-by-side">"#);
    html.push_str(r#"<div class="diff-header-row">"#);
    for label in [diff.from_label(), diff.to_label()] {
        html.push_str(r#"<div class="diff-column"><strong>"#);
        html.push_str(&escape_html(label));
        html.push_str("</strong></div>");
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="diff-content-row"><div class="diff-column">"#);
    body.left().iter().for_each(|cell| push_cell(&mut html, cell));
    html.push_str(r#"</div><div class="diff-column">"#);
    body.right().iter().for_each(|cell| push_cell(&mut html, cell));
    html.push_str("</div></div></div>");
    html
}

fn push_cell(html: &mut String, cell: &DiffCell) {
    let (css_class, text) = match cell {
        DiffCell::Removed(text) => ("diff-del", text.as_str()),
        DiffCell::Added(text) => ("diff-add", text.as_str()),
        DiffCell::Context(text) => ("diff-context", text.as_str()),
        DiffCell::Empty => ("diff-empty", ""),
    };
    push_line(html, css_class, text);
}

fn push_line(html: &mut String, css_class: &str, text: &str) {
    html.push_str(r#"<div class="diff-line "#);
    html.push_str(css_class);
    html.push_str(r#"">"#);
    html.push_str(&escape_html(text));
    html.push_str("</div>");
}
