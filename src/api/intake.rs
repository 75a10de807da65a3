//! High-level facade composing gateway calls for the views.

use super::gateway::DevlogGateway;
use super::models::{CommitSummary, Contributor, SummaryStats};
use super::pagination::OffsetPage;
use super::query::CommitQuery;
use crate::error::DevlogError;

/// Totals plus leaderboard shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardOverview {
    /// Dashboard totals.
    pub summary: SummaryStats,
    /// Most active authors.
    pub contributors: Vec<Contributor>,
}

/// One page of commits together with its navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPage {
    /// Commits on this page.
    pub commits: Vec<CommitSummary>,
    /// Page position with next-page availability filled in.
    pub page: OffsetPage,
}

/// Composes gateway calls into what each view displays.
pub struct DashboardIntake<'client, Gateway>
where
    Gateway: DevlogGateway,
{
    client: &'client Gateway,
}

impl<'client, Gateway> DashboardIntake<'client, Gateway>
where
    Gateway: DevlogGateway,
{
    /// Create a new intake facade using the provided gateway.
    #[must_use]
    pub const fn new(client: &'client Gateway) -> Self {
        Self { client }
    }

    /// Loads the dashboard totals and the top `limit` contributors.
    ///
    /// # Errors
    ///
    /// Propagates the first gateway failure.
    pub async fn overview(&self, limit: u32) -> Result<DashboardOverview, DevlogError> {
        let summary = self.client.summary().await?;
        let contributors = self.client.top_contributors(limit).await?;
        Ok(DashboardOverview {
            summary,
            contributors,
        })
    }

    /// Loads one page of commits and records whether another page follows.
    ///
    /// # Errors
    ///
    /// Propagates gateway failures.
    pub async fn commit_page(
        &self,
        branch_id: u64,
        query: &CommitQuery,
    ) -> Result<CommitPage, DevlogError> {
        let commits = self.client.commits(branch_id, query).await?;
        let page = query.page.with_result_count(commits.len());
        Ok(CommitPage { commits, page })
    }
}
