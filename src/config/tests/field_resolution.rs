//! Tests for required values and the requests derived from configuration.

use std::time::Duration;

use rstest::rstest;

use crate::DevlogConfig;
use crate::api::models::SyncMode;
use crate::error::DevlogError;
use crate::export::ExportKind;

#[rstest]
fn missing_ids_name_their_flags() {
    let config = DevlogConfig::default();

    for (result, flag) in [
        (config.require_repo_id(), "--repo-id"),
        (config.require_branch_id(), "--branch-id"),
        (config.require_commit_id(), "--commit-id"),
    ] {
        match result {
            Err(DevlogError::Configuration { message }) => {
                assert!(message.contains(flag), "message should name {flag}: {message}");
            }
            other => panic!("expected configuration error, got {other:?}"),
        }
    }
}

#[rstest]
fn blank_branch_name_counts_as_missing() {
    let config = DevlogConfig {
        branch_name: Some("  ".to_owned()),
        ..Default::default()
    };
    assert!(config.require_branch_name().is_err());
    assert!(config.detected_changes_query().is_err());
}

#[rstest]
fn commit_browser_reflects_filters_and_page() {
    let config = DevlogConfig {
        repo_id: Some(1),
        branch_id: Some(7),
        page: 3,
        page_size: 50,
        commit_type: Some("fix".to_owned()),
        ..Default::default()
    };

    let (branch_id, query) = config
        .commit_browser()
        .request()
        .expect("branch is configured");

    assert_eq!(branch_id, 7);
    assert_eq!(query.page.offset(), 150);
    assert_eq!(query.effective_search().as_deref(), Some("[FIX]"));
}

#[rstest]
fn compare_selection_needs_distinct_branches() {
    let config = DevlogConfig {
        repo_id: Some(2),
        branch1: Some("17.0".to_owned()),
        branch2: Some("17.0".to_owned()),
        ..Default::default()
    };
    assert!(!config.compare_selection().is_enabled());
}

#[rstest]
fn migration_form_carries_term_and_versions() {
    let config = DevlogConfig {
        term: Some("partner_id".to_owned()),
        from_version: Some("16.0".to_owned()),
        to_version: Some("17.0".to_owned()),
        use_regex: true,
        ..Default::default()
    };

    let query = config
        .migration_form()
        .build_query()
        .expect("form is complete");
    assert_eq!(query.term, "partner_id");
    assert!(query.use_regex);
}

#[rstest]
#[case(0, false)]
#[case(90, true)]
#[case(400, false)]
fn timeline_query_checks_window(#[case] days: u32, #[case] valid: bool) {
    let config = DevlogConfig {
        branch_id: Some(1),
        days,
        ..Default::default()
    };
    assert_eq!(config.timeline_query().is_ok(), valid);
}

#[rstest]
fn sync_request_splits_restriction_lists() {
    let config = DevlogConfig {
        sync_mode: Some("FULL".to_owned()),
        sync_repositories: Some("odoo/odoo, odoo/enterprise ,".to_owned()),
        sync_branches: None,
        ..Default::default()
    };

    let request = config.sync_request().expect("mode is valid");
    assert_eq!(request.mode, SyncMode::Full);
    assert_eq!(request.repositories, vec!["odoo/odoo", "odoo/enterprise"]);
    assert!(request.branches.is_empty());
}

#[rstest]
fn poll_settings_and_timeout_come_from_config() {
    let config = DevlogConfig {
        poll_interval_ms: 250,
        max_poll_failures: 0,
        request_timeout_secs: 5,
        ..Default::default()
    };

    let settings = config.poll_settings();
    assert_eq!(settings.interval, Duration::from_millis(250));
    assert_eq!(settings.max_consecutive_failures, 1);
    assert_eq!(config.request_timeout(), Duration::from_secs(5));
}

#[rstest]
#[case(None, None)]
#[case(Some(""), None)]
#[case(Some("modules"), Some(ExportKind::ModuleAnalytics))]
fn export_kind_is_optional(#[case] export: Option<&str>, #[case] expected: Option<ExportKind>) {
    let config = DevlogConfig {
        export: export.map(str::to_owned),
        ..Default::default()
    };
    assert_eq!(config.export_kind(), Ok(expected));
}
