//! Migration search form state and term suggestions.

use crate::api::query::MigrationQuery;
use crate::diff::highlight_plain;
use crate::error::DevlogError;
use crate::persistence::SearchHistory;

/// Trimmed term length at which option changes re-run the search.
pub const RETRIGGER_MIN_TERM_LEN: usize = 3;
/// Trimmed term length at which suggestions appear.
pub const SUGGESTION_MIN_TERM_LEN: usize = 2;
/// Most suggestions shown at once.
pub const MAX_SUGGESTIONS: usize = 8;

/// Field names commonly renamed between versions.
pub const COMMON_FIELDS: &[&str] = &[
    "invoice_id",
    "move_id",
    "partner_id",
    "product_id",
    "sale_order_id",
    "purchase_order_id",
    "account_id",
    "company_id",
    "user_id",
    "state",
    "date",
    "amount_total",
    "tax_ids",
    "line_ids",
    "payment_state",
    "currency_id",
];

/// Method prefixes and decorators commonly changed between versions.
pub const COMMON_METHODS: &[&str] = &[
    "def _compute_",
    "def _onchange_",
    "def action_",
    "def create",
    "def write",
    "def unlink",
    "@api.depends",
    "@api.onchange",
    "@api.model",
];

/// Editable migration search form.
///
/// The setters for versions and filters report whether the change should
/// re-run the current search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationForm {
    term: String,
    from_version: Option<String>,
    to_version: Option<String>,
    module: Option<String>,
    commit_type: Option<String>,
    use_regex: bool,
}

impl MigrationForm {
    /// Current raw term.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Replaces the term.
    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Sets the old version and reports whether to search again.
    pub fn set_from_version(&mut self, version: Option<String>) -> bool {
        self.from_version = version;
        self.should_retrigger()
    }

    /// Sets the new version and reports whether to search again.
    pub fn set_to_version(&mut self, version: Option<String>) -> bool {
        self.to_version = version;
        self.should_retrigger()
    }

    /// Sets the module filter and reports whether to search again.
    pub fn set_module(&mut self, module: Option<String>) -> bool {
        self.module = module;
        self.should_retrigger()
    }

    /// Sets the commit-type filter and reports whether to search again.
    pub fn set_commit_type(&mut self, commit_type: Option<String>) -> bool {
        self.commit_type = commit_type;
        self.should_retrigger()
    }

    /// Toggles pattern matching.
    pub const fn set_use_regex(&mut self, use_regex: bool) {
        self.use_regex = use_regex;
    }

    /// Returns true when the trimmed term is long enough to re-run on
    /// option changes.
    #[must_use]
    pub fn should_retrigger(&self) -> bool {
        self.term.trim().chars().count() >= RETRIGGER_MIN_TERM_LEN
    }

    /// Builds the request for the current form.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::InvalidQuery`] when the term is too short or a
    /// version is missing.
    pub fn build_query(&self) -> Result<MigrationQuery, DevlogError> {
        let query = MigrationQuery::new(
            self.term.clone(),
            self.from_version.clone().unwrap_or_default(),
            self.to_version.clone().unwrap_or_default(),
        )
        .with_module(self.module.clone())
        .with_commit_type(self.commit_type.clone())
        .with_regex(self.use_regex);
        query.validate()?;
        Ok(query)
    }
}

/// Suggests completions for `term` from well-known names and past searches.
///
/// Matching is a case-insensitive substring test. Duplicates keep their
/// first position.
#[must_use]
pub fn suggestions(term: &str, history: &SearchHistory) -> Vec<String> {
    let needle = term.trim().to_lowercase();
    if needle.chars().count() < SUGGESTION_MIN_TERM_LEN {
        return Vec::new();
    }

    let history_terms = history.terms();
    let candidates = COMMON_FIELDS
        .iter()
        .chain(COMMON_METHODS)
        .copied()
        .chain(history_terms.iter().copied());

    let mut matches: Vec<String> = Vec::with_capacity(MAX_SUGGESTIONS);
    for candidate in candidates {
        if matches.len() == MAX_SUGGESTIONS {
            break;
        }
        if candidate.to_lowercase().contains(&needle)
            && !matches.iter().any(|existing| existing == candidate)
        {
            matches.push(candidate.to_owned());
        }
    }
    matches
}

/// Suggestions as HTML fragments with the term marked.
#[must_use]
pub fn highlighted_suggestions(term: &str, history: &SearchHistory) -> Vec<String> {
    suggestions(term, history)
        .iter()
        .map(|suggestion| highlight_plain(suggestion, term.trim()))
        .collect()
}
