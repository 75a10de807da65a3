//! `reqwest` implementation of [`DevlogGateway`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::DevlogGateway;
use super::error_mapping::{extract_detail, map_decode_error, map_http_error, map_transport_error};
use crate::api::models::{
    Branch, BranchComparison, CancelAck, CommitDetail, CommitSummary, CommitType, Contributor,
    DetectedChanges, MigrationResults, Module, ModuleAnalytics, Repository, RuntimeConfig,
    SummaryStats, SyncHistory, SyncLogChunk, SyncRequest, SyncRunning, SyncStarted, Timeline,
};
use crate::api::query::{
    CommitQuery, CompareQuery, DetectedChangesQuery, MigrationQuery, QueryPairs, TimelineQuery,
};
use crate::error::DevlogError;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway issuing JSON requests against a base URL.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Creates a gateway for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DevlogError::InvalidUrl`] when the URL does not parse or is
    /// not `http(s)`, and [`DevlogError::Configuration`] when the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DevlogError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| DevlogError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self {
            client,
            base_url: normalise_base_url(base_url)?,
        })
    }

    /// Base URL every endpoint path is joined to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, DevlogError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| DevlogError::InvalidUrl(format!("{path}: {error}")))
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        query: &QueryPairs,
    ) -> Result<RequestBuilder, DevlogError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, params = query.len(), "calling history API");
        Ok(self.client.request(method, url).query(query))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        query: &QueryPairs,
    ) -> Result<T, DevlogError> {
        let request = self.request(Method::GET, path, query)?;
        send_json(operation, request).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        operation: &str,
        path: &str,
        query: &QueryPairs,
        body: Option<&B>,
    ) -> Result<T, DevlogError> {
        let mut request = self.request(Method::POST, path, query)?;
        if let Some(payload) = body {
            request = request.json(payload);
        }
        send_json(operation, request).await
    }
}

fn normalise_base_url(base_url: &str) -> Result<Url, DevlogError> {
    let trimmed = base_url.trim();
    let mut url = Url::parse(trimmed)
        .map_err(|error| DevlogError::InvalidUrl(format!("{trimmed}: {error}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DevlogError::InvalidUrl(format!(
            "{trimmed}: expected an http or https URL"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn send_json<T: DeserializeOwned>(
    operation: &str,
    request: RequestBuilder,
) -> Result<T, DevlogError> {
    let response = request
        .send()
        .await
        .map_err(|error| map_transport_error(operation, &error))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|error| map_transport_error(operation, &error))?;

    if !status.is_success() {
        return Err(map_http_error(operation, status, extract_detail(&body)));
    }

    serde_json::from_str(&body).map_err(|error| map_decode_error(operation, &error))
}

const NO_BODY: Option<&()> = None;

#[async_trait]
impl DevlogGateway for HttpGateway {
    async fn summary(&self) -> Result<SummaryStats, DevlogError> {
        self.get_json("load summary", "stats/summary", &Vec::new())
            .await
    }

    async fn top_contributors(&self, limit: u32) -> Result<Vec<Contributor>, DevlogError> {
        self.get_json(
            "load top contributors",
            "stats/top-contributors",
            &vec![("limit", limit.to_string())],
        )
        .await
    }

    async fn repositories(&self) -> Result<Vec<Repository>, DevlogError> {
        self.get_json("list repositories", "repositories", &Vec::new())
            .await
    }

    async fn branches(&self, repo_id: u64) -> Result<Vec<Branch>, DevlogError> {
        self.get_json(
            "list branches",
            &format!("repositories/{repo_id}/branches"),
            &Vec::new(),
        )
        .await
    }

    async fn commits(
        &self,
        branch_id: u64,
        query: &CommitQuery,
    ) -> Result<Vec<CommitSummary>, DevlogError> {
        self.get_json(
            "list commits",
            &format!("branches/{branch_id}/commits"),
            &query.to_pairs(),
        )
        .await
    }

    async fn commit(&self, commit_id: u64) -> Result<CommitDetail, DevlogError> {
        self.get_json("load commit", &format!("commits/{commit_id}"), &Vec::new())
            .await
    }

    async fn compare(&self, query: &CompareQuery) -> Result<BranchComparison, DevlogError> {
        query.validate()?;
        self.get_json("compare branches", "compare", &query.to_pairs())
            .await
    }

    async fn migration_search(
        &self,
        query: &MigrationQuery,
    ) -> Result<MigrationResults, DevlogError> {
        query.validate()?;
        self.get_json("search migration changes", "search/migration", &query.to_pairs())
            .await
    }

    async fn commit_types(&self) -> Result<Vec<CommitType>, DevlogError> {
        self.get_json("load commit types", "commit-types", &Vec::new())
            .await
    }

    async fn modules(&self) -> Result<Vec<Module>, DevlogError> {
        self.get_json("list modules", "modules", &Vec::new()).await
    }

    async fn timeline(&self, query: &TimelineQuery) -> Result<Timeline, DevlogError> {
        query.validate()?;
        self.get_json("load timeline", "analytics/timeline", &query.to_pairs())
            .await
    }

    async fn module_analytics(&self, branch_name: &str) -> Result<ModuleAnalytics, DevlogError> {
        self.get_json(
            "load module analytics",
            "analytics/modules",
            &vec![("branch_name", branch_name.to_owned())],
        )
        .await
    }

    async fn detected_changes(
        &self,
        query: &DetectedChangesQuery,
    ) -> Result<DetectedChanges, DevlogError> {
        self.get_json(
            "load detected changes",
            "analytics/detected-changes",
            &query.to_pairs(),
        )
        .await
    }

    async fn runtime_config(&self) -> Result<RuntimeConfig, DevlogError> {
        self.get_json("load runtime config", "config", &Vec::new())
            .await
    }

    async fn start_sync(&self, request: &SyncRequest) -> Result<SyncStarted, DevlogError> {
        self.post_json(
            "start sync",
            "admin/fetch",
            &vec![("mode", request.mode.as_str().to_owned())],
            Some(request),
        )
        .await
    }

    async fn sync_logs(&self, last_position: u64) -> Result<SyncLogChunk, DevlogError> {
        self.get_json(
            "poll sync logs",
            "admin/fetch-logs",
            &vec![("last_position", last_position.to_string())],
        )
        .await
    }

    async fn sync_running(&self) -> Result<SyncRunning, DevlogError> {
        self.get_json("check sync status", "admin/fetch-running", &Vec::new())
            .await
    }

    async fn sync_history(&self) -> Result<SyncHistory, DevlogError> {
        self.get_json("load sync history", "admin/fetch-status", &Vec::new())
            .await
    }

    async fn cancel_sync(&self) -> Result<CancelAck, DevlogError> {
        self.post_json("cancel sync", "admin/cancel-fetch", &Vec::new(), NO_BODY)
            .await
    }
}
