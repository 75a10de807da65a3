//! Search-term highlighting over rendered markup.
//!
//! Highlighting runs after markup generation. A term that spans a tag
//! boundary will not match, and a term found inside an attribute value will
//! be wrapped there too and can break the surrounding tag.

use regex::RegexBuilder;
use tracing::warn;

use super::html::escape_html;

/// Wraps every case-insensitive occurrence of `term` in `<mark>` tags.
///
/// The term is matched literally: pattern metacharacters such as `.`, `*`,
/// `+` or brackets carry no special meaning. Matches keep their original
/// casing. An empty term returns `markup` unchanged.
///
/// ```
/// use devlog::diff::highlight_term;
///
/// assert_eq!(highlight_term("a.b+c and aXbYc", "A.B+C"), "<mark>a.b+c</mark> and aXbYc");
/// ```
#[must_use]
pub fn highlight_term(markup: &str, term: &str) -> String {
    if term.is_empty() {
        return markup.to_owned();
    }

    match RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
    {
        Ok(pattern) => pattern.replace_all(markup, "<mark>$0</mark>").into_owned(),
        Err(error) => {
            warn!(%error, "search term could not be compiled; leaving markup unhighlighted");
            markup.to_owned()
        }
    }
}

/// Escapes raw `text` and then highlights `term` inside it.
#[must_use]
pub fn highlight_plain(text: &str, term: &str) -> String {
    highlight_term(&escape_html(text), term)
}
