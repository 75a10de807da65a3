//! Branch comparison selection.

use crate::api::query::CompareQuery;

/// Repository and branch pair chosen for a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareSelection {
    /// Repository the branches belong to.
    pub repo_id: Option<u64>,
    /// First branch name.
    pub branch1: Option<String>,
    /// Second branch name.
    pub branch2: Option<String>,
}

impl CompareSelection {
    /// Creates a selection from optional parts.
    #[must_use]
    pub const fn new(repo_id: Option<u64>, branch1: Option<String>, branch2: Option<String>) -> Self {
        Self {
            repo_id,
            branch1,
            branch2,
        }
    }

    /// Returns true once a repository and two different branches are set.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.query().is_some()
    }

    /// The comparison request, when enabled.
    #[must_use]
    pub fn query(&self) -> Option<CompareQuery> {
        let repo_id = self.repo_id?;
        let branch1 = selected(self.branch1.as_deref())?;
        let branch2 = selected(self.branch2.as_deref())?;
        (branch1 != branch2).then(|| CompareQuery::new(repo_id, branch1, branch2))
    }
}

fn selected(branch: Option<&str>) -> Option<&str> {
    branch.map(str::trim).filter(|name| !name.is_empty())
}
