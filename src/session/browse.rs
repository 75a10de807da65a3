//! Commit browser selection, filters and page position.

use crate::api::pagination::OffsetPage;
use crate::api::query::CommitQuery;

/// Free-text and attribute filters applied to a commit listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitFilters {
    /// Message search.
    pub search: Option<String>,
    /// Author name.
    pub author: Option<String>,
    /// Module name.
    pub module: Option<String>,
    /// Commit-type code.
    pub commit_type: Option<String>,
}

/// State behind the repository / branch / commit listing.
///
/// Changing the repository clears the branch. Changing the branch or any
/// filter returns to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitBrowser {
    repo_id: Option<u64>,
    branch_id: Option<u64>,
    filters: CommitFilters,
    page: OffsetPage,
}

impl CommitBrowser {
    /// Creates an empty browser paging `page_size` commits at a time.
    #[must_use]
    pub const fn new(page_size: u32) -> Self {
        Self {
            repo_id: None,
            branch_id: None,
            filters: CommitFilters {
                search: None,
                author: None,
                module: None,
                commit_type: None,
            },
            page: OffsetPage::new(0, page_size),
        }
    }

    /// Selected repository.
    #[must_use]
    pub const fn repo_id(&self) -> Option<u64> {
        self.repo_id
    }

    /// Selected branch.
    #[must_use]
    pub const fn branch_id(&self) -> Option<u64> {
        self.branch_id
    }

    /// Active filters.
    #[must_use]
    pub const fn filters(&self) -> &CommitFilters {
        &self.filters
    }

    /// Current page position.
    #[must_use]
    pub const fn page(&self) -> OffsetPage {
        self.page
    }

    /// Selects a repository, clearing the branch when it changes.
    pub fn select_repository(&mut self, repo_id: Option<u64>) {
        if self.repo_id != repo_id {
            self.repo_id = repo_id;
            self.branch_id = None;
            self.reset_page();
        }
    }

    /// Selects a branch of the current repository.
    pub fn select_branch(&mut self, branch_id: Option<u64>) {
        if self.branch_id != branch_id {
            self.branch_id = branch_id;
            self.reset_page();
        }
    }

    /// Replaces all filters at once.
    pub fn set_filters(&mut self, filters: CommitFilters) {
        let normalised = CommitFilters {
            search: normalise(filters.search),
            author: normalise(filters.author),
            module: normalise(filters.module),
            commit_type: normalise(filters.commit_type),
        };
        if self.filters != normalised {
            self.filters = normalised;
            self.reset_page();
        }
    }

    /// Updates the message search.
    pub fn set_search(&mut self, search: Option<String>) {
        let filters = CommitFilters {
            search,
            ..self.filters.clone()
        };
        self.set_filters(filters);
    }

    /// Updates the author filter.
    pub fn set_author(&mut self, author: Option<String>) {
        let filters = CommitFilters {
            author,
            ..self.filters.clone()
        };
        self.set_filters(filters);
    }

    /// Updates the module filter.
    pub fn set_module(&mut self, module: Option<String>) {
        let filters = CommitFilters {
            module,
            ..self.filters.clone()
        };
        self.set_filters(filters);
    }

    /// Updates the commit-type filter.
    pub fn set_commit_type(&mut self, commit_type: Option<String>) {
        let filters = CommitFilters {
            commit_type,
            ..self.filters.clone()
        };
        self.set_filters(filters);
    }

    /// Moves to page `index`, keeping the page size.
    pub const fn go_to_page(&mut self, index: u32) {
        self.page = OffsetPage::new(index, self.page.size());
    }

    /// Branch and query for the next request, once a branch is selected.
    #[must_use]
    pub fn request(&self) -> Option<(u64, CommitQuery)> {
        let branch_id = self.branch_id?;
        Some((
            branch_id,
            CommitQuery {
                page: self.page,
                search: self.filters.search.clone(),
                author: self.filters.author.clone(),
                module: self.filters.module.clone(),
                commit_type: self.filters.commit_type.clone(),
            },
        ))
    }

    /// Records how many commits the current page returned.
    pub const fn record_results(&mut self, count: usize) {
        self.page = self.page.with_result_count(count);
    }

    /// Advances one page if the current page was full.
    pub fn next_page(&mut self) -> bool {
        self.page.next().map(|next| self.page = next).is_some()
    }

    /// Goes back one page unless on the first.
    pub fn previous_page(&mut self) -> bool {
        self.page.prev().map(|prev| self.page = prev).is_some()
    }

    fn reset_page(&mut self) {
        self.page = self.page.first();
    }
}

impl Default for CommitBrowser {
    fn default() -> Self {
        Self::new(crate::api::pagination::DEFAULT_PAGE_SIZE)
    }
}

fn normalise(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
