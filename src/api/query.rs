//! Request parameters for the filtered API endpoints.
//!
//! Each query type validates locally before any request is made and turns
//! itself into `(name, value)` pairs. Optional parameters are omitted when
//! blank.

use crate::error::DevlogError;

use super::pagination::OffsetPage;

/// Minimum trimmed length of a migration search term.
pub const MIN_TERM_LEN: usize = 2;
/// Default timeline window.
pub const DEFAULT_TIMELINE_DAYS: u32 = 30;
/// Largest timeline window the server accepts.
pub const MAX_TIMELINE_DAYS: u32 = 365;
/// Unique-commit cap used by branch comparison.
pub const DEFAULT_COMPARE_LIMIT: u32 = 100;
/// Default leaderboard length.
pub const DEFAULT_CONTRIBUTOR_LIMIT: u32 = 10;

/// Parameter list sent as a URL query string.
pub type QueryPairs = Vec<(&'static str, String)>;

fn push_optional(pairs: &mut QueryPairs, name: &'static str, value: Option<&str>) {
    if let Some(text) = value.map(str::trim).filter(|text| !text.is_empty()) {
        pairs.push((name, text.to_owned()));
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// Filters and page position for a branch commit listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitQuery {
    /// Page position.
    pub page: OffsetPage,
    /// Free-text search over messages.
    pub search: Option<String>,
    /// Author name filter.
    pub author: Option<String>,
    /// Module filter.
    pub module: Option<String>,
    /// Commit-type code filter.
    pub commit_type: Option<String>,
}

impl CommitQuery {
    /// Text sent as `search`.
    ///
    /// A commit-type filter becomes `[CODE]` and replaces any free-text
    /// search, since the server only searches messages.
    #[must_use]
    pub fn effective_search(&self) -> Option<String> {
        non_blank(self.commit_type.clone())
            .map(|code| format!("[{}]", code.trim().to_ascii_uppercase()))
            .or_else(|| non_blank(self.search.clone()))
    }

    /// Query pairs for `/branches/{id}/commits`.
    #[must_use]
    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs: QueryPairs = vec![
            ("limit", self.page.size().to_string()),
            ("offset", self.page.offset().to_string()),
        ];
        push_optional(&mut pairs, "search", self.effective_search().as_deref());
        push_optional(&mut pairs, "author", self.author.as_deref());
        push_optional(&mut pairs, "module", self.module.as_deref());
        pairs
    }
}

/// Branch pair to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareQuery {
    /// Repository both branches belong to.
    pub repo_id: u64,
    /// First branch name.
    pub branch1: String,
    /// Second branch name.
    pub branch2: String,
    /// Cap on unique commits listed per side.
    pub limit: u32,
}

impl CompareQuery {
    /// Creates a comparison with the default limit.
    #[must_use]
    pub fn new(repo_id: u64, branch1: impl Into<String>, branch2: impl Into<String>) -> Self {
        Self {
            repo_id,
            branch1: branch1.into(),
            branch2: branch2.into(),
            limit: DEFAULT_COMPARE_LIMIT,
        }
    }

    /// Checks both branches are set and differ.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::InvalidQuery`] otherwise.
    pub fn validate(&self) -> Result<(), DevlogError> {
        if self.branch1.trim().is_empty() || self.branch2.trim().is_empty() {
            return Err(DevlogError::InvalidQuery {
                message: "select two branches to compare".to_owned(),
            });
        }
        if self.branch1.trim() == self.branch2.trim() {
            return Err(DevlogError::InvalidQuery {
                message: "cannot compare a branch with itself".to_owned(),
            });
        }
        Ok(())
    }

    /// Query pairs for `/compare`.
    #[must_use]
    pub fn to_pairs(&self) -> QueryPairs {
        vec![
            ("repo_id", self.repo_id.to_string()),
            ("branch1", self.branch1.trim().to_owned()),
            ("branch2", self.branch2.trim().to_owned()),
            ("limit", self.limit.to_string()),
        ]
    }
}

/// A search for a term across a from/to version pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationQuery {
    /// Term to look for in patches.
    pub term: String,
    /// Old version branch name.
    pub from_version: String,
    /// New version branch name.
    pub to_version: String,
    /// Restrict to files under this module.
    pub module: Option<String>,
    /// Restrict to commits with this type code.
    pub commit_type: Option<String>,
    /// Treat the term as a pattern.
    pub use_regex: bool,
}

impl MigrationQuery {
    /// Creates an unfiltered literal search.
    #[must_use]
    pub fn new(
        term: impl Into<String>,
        from_version: impl Into<String>,
        to_version: impl Into<String>,
    ) -> Self {
        Self {
            term: term.into(),
            from_version: from_version.into(),
            to_version: to_version.into(),
            ..Self::default()
        }
    }

    /// Adds a module filter.
    #[must_use]
    pub fn with_module(mut self, module: Option<String>) -> Self {
        self.module = non_blank(module);
        self
    }

    /// Adds a commit-type filter.
    #[must_use]
    pub fn with_commit_type(mut self, commit_type: Option<String>) -> Self {
        self.commit_type = non_blank(commit_type);
        self
    }

    /// Switches pattern matching on or off.
    #[must_use]
    pub const fn with_regex(mut self, use_regex: bool) -> Self {
        self.use_regex = use_regex;
        self
    }

    /// Trimmed search term.
    #[must_use]
    pub fn trimmed_term(&self) -> &str {
        self.term.trim()
    }

    /// Checks the term is long enough and both versions are chosen.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::InvalidQuery`] naming the first problem.
    pub fn validate(&self) -> Result<(), DevlogError> {
        if self.trimmed_term().chars().count() < MIN_TERM_LEN {
            return Err(DevlogError::InvalidQuery {
                message: format!("search term must have at least {MIN_TERM_LEN} characters"),
            });
        }
        if self.from_version.trim().is_empty() || self.to_version.trim().is_empty() {
            return Err(DevlogError::InvalidQuery {
                message: "select both a from version and a to version".to_owned(),
            });
        }
        Ok(())
    }

    /// Query pairs for `/search/migration`.
    #[must_use]
    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs: QueryPairs = vec![
            ("term", self.trimmed_term().to_owned()),
            ("from_version", self.from_version.trim().to_owned()),
            ("to_version", self.to_version.trim().to_owned()),
        ];
        push_optional(&mut pairs, "module", self.module.as_deref());
        push_optional(&mut pairs, "commit_type", self.commit_type.as_deref());
        if self.use_regex {
            pairs.push(("use_regex", "true".to_owned()));
        }
        pairs
    }
}

/// Timeline window for one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineQuery {
    /// Branch identifier.
    pub branch_id: u64,
    /// Number of days back from today.
    pub days: u32,
}

impl TimelineQuery {
    /// Creates a window of [`DEFAULT_TIMELINE_DAYS`].
    #[must_use]
    pub const fn new(branch_id: u64) -> Self {
        Self {
            branch_id,
            days: DEFAULT_TIMELINE_DAYS,
        }
    }

    /// Overrides the window size.
    #[must_use]
    pub const fn with_days(mut self, days: u32) -> Self {
        self.days = days;
        self
    }

    /// Checks the window is within `1..=365` days.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::InvalidQuery`] for an out-of-range window.
    pub fn validate(&self) -> Result<(), DevlogError> {
        if (1..=MAX_TIMELINE_DAYS).contains(&self.days) {
            Ok(())
        } else {
            Err(DevlogError::InvalidQuery {
                message: format!(
                    "timeline days must be between 1 and {MAX_TIMELINE_DAYS}, got {}",
                    self.days
                ),
            })
        }
    }

    /// Query pairs for `/analytics/timeline`.
    #[must_use]
    pub fn to_pairs(&self) -> QueryPairs {
        vec![
            ("branch_id", self.branch_id.to_string()),
            ("days", self.days.to_string()),
        ]
    }
}

/// Branch and optional kind filter for detected-change analytics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedChangesQuery {
    /// Branch name.
    pub branch_name: String,
    /// Kind filter, such as `field_rename`.
    pub change_type: Option<String>,
}

impl DetectedChangesQuery {
    /// Query pairs for `/analytics/detected-changes`.
    #[must_use]
    pub fn to_pairs(&self) -> QueryPairs {
        let mut pairs: QueryPairs = vec![("branch_name", self.branch_name.clone())];
        push_optional(&mut pairs, "change_type", self.change_type.as_deref());
        pairs
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{CommitQuery, CompareQuery, DetectedChangesQuery, MigrationQuery, TimelineQuery};
    use crate::api::pagination::OffsetPage;
    use crate::error::DevlogError;

    fn pair(name: &'static str, value: &str) -> (&'static str, String) {
        (name, value.to_owned())
    }

    #[test]
    fn commit_query_sends_paging_and_filters() {
        let query = CommitQuery {
            page: OffsetPage::new(2, 100),
            search: Some("partner".to_owned()),
            author: Some("  ".to_owned()),
            module: Some("sale".to_owned()),
            commit_type: None,
        };

        assert_eq!(
            query.to_pairs(),
            vec![
                pair("limit", "100"),
                pair("offset", "200"),
                pair("search", "partner"),
                pair("module", "sale"),
            ]
        );
    }

    #[test]
    fn commit_type_replaces_free_text_search() {
        let query = CommitQuery {
            search: Some("partner".to_owned()),
            commit_type: Some("fix".to_owned()),
            ..CommitQuery::default()
        };

        assert_eq!(query.effective_search().as_deref(), Some("[FIX]"));
    }

    #[rstest]
    #[case::short_term("a", "14.0", "15.0")]
    #[case::padded_short_term("  a  ", "14.0", "15.0")]
    #[case::missing_from("partner", "", "15.0")]
    #[case::missing_to("partner", "14.0", " ")]
    fn migration_query_rejects_incomplete_forms(
        #[case] term: &str,
        #[case] from: &str,
        #[case] to: &str,
    ) {
        let result = MigrationQuery::new(term, from, to).validate();
        assert!(matches!(result, Err(DevlogError::InvalidQuery { .. })));
    }

    #[test]
    fn migration_query_pairs_omit_defaults() {
        let query = MigrationQuery::new(" partner_id ", "14.0", "15.0")
            .with_module(Some(String::new()))
            .with_commit_type(Some("FIX".to_owned()));

        assert!(query.validate().is_ok());
        assert_eq!(
            query.to_pairs(),
            vec![
                pair("term", "partner_id"),
                pair("from_version", "14.0"),
                pair("to_version", "15.0"),
                pair("commit_type", "FIX"),
            ]
        );
    }

    #[test]
    fn migration_query_sends_regex_flag_when_enabled() {
        let pairs = MigrationQuery::new("_compute_.*", "16.0", "17.0")
            .with_regex(true)
            .to_pairs();
        assert!(pairs.contains(&pair("use_regex", "true")));
    }

    #[rstest]
    #[case::same_branch("15.0", "15.0")]
    #[case::same_branch_padded("15.0", " 15.0 ")]
    #[case::missing_branch("", "15.0")]
    fn compare_query_requires_two_distinct_branches(#[case] first: &str, #[case] second: &str) {
        assert!(CompareQuery::new(1, first, second).validate().is_err());
    }

    #[test]
    fn compare_query_pairs() {
        let query = CompareQuery::new(3, "16.0", "17.0");
        assert!(query.validate().is_ok());
        assert_eq!(
            query.to_pairs(),
            vec![
                pair("repo_id", "3"),
                pair("branch1", "16.0"),
                pair("branch2", "17.0"),
                pair("limit", "100"),
            ]
        );
    }

    #[test]
    fn compare_query_pairs_trim_branch_names() {
        let query = CompareQuery::new(3, " 16.0", "17.0 ");
        let pairs = query.to_pairs();
        assert!(pairs.contains(&pair("branch1", "16.0")));
        assert!(pairs.contains(&pair("branch2", "17.0")));
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(30, true)]
    #[case(365, true)]
    #[case(366, false)]
    fn timeline_days_range(#[case] days: u32, #[case] valid: bool) {
        assert_eq!(TimelineQuery::new(1).with_days(days).validate().is_ok(), valid);
    }

    #[test]
    fn detected_changes_omits_blank_kind() {
        let query = DetectedChangesQuery {
            branch_name: "17.0".to_owned(),
            change_type: Some(String::new()),
        };
        assert_eq!(query.to_pairs(), vec![pair("branch_name", "17.0")]);
    }
}
