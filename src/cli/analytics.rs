//! Timeline, module and detected-change analytics views.

use std::io::Write;

use devlog::api::models::{
    DetectedChange, ModuleAnalytics, Timeline, display_date, display_timestamp, first_line,
    or_unknown, short_sha,
};
use devlog::export::{ExportKind, write_detected_changes_csv, write_module_csv};
use devlog::{DevlogConfig, DevlogError, DevlogGateway};

use super::export::{NO_DATA_TO_EXPORT, export_csv, requested};
use super::output::{blank, churn, group_thousands, line, timeline_bar};

/// Prints daily activity bars for the configured branch.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] without a branch id,
/// [`DevlogError::InvalidQuery`] for an out-of-range window, and propagates
/// gateway and output failures.
pub async fn timeline<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let query = config.timeline_query()?;
    let activity = gateway.timeline(&query).await?;
    write_timeline(writer, &activity, query.days)
}

fn write_timeline<W: Write>(
    writer: &mut W,
    activity: &Timeline,
    days: u32,
) -> Result<(), DevlogError> {
    line(writer, &format!("Activity over the last {days} days"))?;
    if activity.timeline.is_empty() {
        return line(writer, "  No data for this period");
    }
    let busiest = activity.busiest_day();
    let mut ordered: Vec<_> = activity.timeline.iter().collect();
    ordered.sort_by(|left, right| left.date.cmp(&right.date));
    for day in ordered {
        line(
            writer,
            &format!(
                "  {} {:>5} {}",
                display_date(day.date.as_deref()),
                day.commit_count,
                timeline_bar(day.commit_count, busiest)
            ),
        )?;
    }
    let commits: u64 = activity.timeline.iter().map(|day| day.commit_count).sum();
    let additions: u64 = activity.timeline.iter().map(|day| day.total_additions).sum();
    let deletions: u64 = activity.timeline.iter().map(|day| day.total_deletions).sum();
    blank(writer)?;
    line(
        writer,
        &format!(
            "Total: {} commits ({})",
            group_thousands(commits),
            churn(additions, deletions)
        ),
    )
}

/// Prints per-module rollups and optionally exports them.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] without a branch name and
/// propagates gateway, export and output failures.
pub async fn modules<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let branch = config.require_branch_name()?;
    let export = requested(config, ExportKind::ModuleAnalytics)?;
    let analytics = gateway.module_analytics(branch).await?;
    write_modules(writer, &analytics)?;
    if export {
        export_csv(
            config,
            ExportKind::ModuleAnalytics,
            analytics.modules.len(),
            writer,
            |file| write_module_csv(file, &analytics.modules),
        )?;
    }
    Ok(())
}

fn write_modules<W: Write>(writer: &mut W, analytics: &ModuleAnalytics) -> Result<(), DevlogError> {
    line(
        writer,
        &format!(
            "Modules on {} ({})",
            analytics.branch,
            analytics.modules.len()
        ),
    )?;
    if analytics.modules.is_empty() {
        return line(writer, "  No module activity");
    }
    for module in &analytics.modules {
        line(
            writer,
            &format!(
                "  {:<32} {:>6} commits {:>4} contributors ({}) last {}",
                module.module,
                group_thousands(module.commits),
                module.contributors,
                churn(module.additions, module.deletions),
                display_date(module.last_modified.as_deref())
            ),
        )?;
    }
    Ok(())
}

/// Prints changes the server classified by kind and optionally exports them.
///
/// # Errors
///
/// Returns [`DevlogError::Configuration`] without a branch name and
/// propagates gateway, export and output failures.
pub async fn detected_changes<G: DevlogGateway, W: Write>(
    gateway: &G,
    config: &DevlogConfig,
    writer: &mut W,
) -> Result<(), DevlogError> {
    let query = config.detected_changes_query()?;
    let export = requested(config, ExportKind::DetectedChanges)?;
    let detected = gateway.detected_changes(&query).await?;
    if detected.changes.is_empty() {
        line(writer, "No changes detected")?;
        return if export {
            line(writer, NO_DATA_TO_EXPORT)
        } else {
            Ok(())
        };
    }
    line(
        writer,
        &format!(
            "{} changes detected on {}",
            detected.changes.len(),
            detected.branch
        ),
    )?;
    for change in &detected.changes {
        blank(writer)?;
        write_change(writer, change)?;
    }
    if export {
        export_csv(
            config,
            ExportKind::DetectedChanges,
            detected.changes.len(),
            writer,
            |file| write_detected_changes_csv(file, &detected.changes),
        )?;
    }
    Ok(())
}

fn write_change<W: Write>(writer: &mut W, change: &DetectedChange) -> Result<(), DevlogError> {
    line(
        writer,
        &format!(
            "{} {} {} {}",
            change.change_type.replace('_', " "),
            short_sha(&change.commit_sha),
            display_timestamp(change.date.as_deref()),
            or_unknown(change.author.as_deref())
        ),
    )?;
    line(writer, &format!("  {}", change.filename))?;
    line(writer, &format!("  {}", first_line(&change.commit_message)))?;
    if let (Some(old), Some(new)) = (change.old_value.as_deref(), change.new_value.as_deref()) {
        line(writer, &format!("  {old} -> {new}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use devlog::{DevlogConfig, DevlogError};
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{detected_changes, modules, timeline};
    use crate::cli::test_utils::{gateway_for, mount_get, text};

    #[tokio::test]
    async fn timeline_orders_days_and_scales_bars() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/analytics/timeline"))
            .and(query_param("branch_id", "4"))
            .and(query_param("days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "branch_id": 4, "days": 7,
                "timeline": [
                    {"date": "2024-03-02", "commit_count": 2, "total_additions": 5},
                    {"date": "2024-03-01", "commit_count": 4, "total_deletions": 1}
                ]
            })))
            .mount(&server)
            .await;
        let config = DevlogConfig {
            branch_id: Some(4),
            days: 7,
            ..DevlogConfig::default()
        };

        let mut buffer = Vec::new();
        timeline(&gateway_for(&server), &config, &mut buffer)
            .await
            .expect("timeline should load");

        let output = text(buffer);
        let first = output.find("2024-03-01").expect("first day should be listed");
        let second = output.find("2024-03-02").expect("second day should be listed");
        assert!(first < second, "days should be oldest first: {output}");
        assert!(output.contains(&"█".repeat(40)), "output: {output}");
        assert!(output.contains("Total: 6 commits (+5/-1)"), "output: {output}");
    }

    #[tokio::test]
    async fn timeline_window_is_validated() {
        let server = MockServer::start().await;
        let config = DevlogConfig {
            branch_id: Some(4),
            days: 0,
            ..DevlogConfig::default()
        };

        let error = timeline(&gateway_for(&server), &config, &mut Vec::new())
            .await
            .expect_err("zero days is out of range");

        assert!(matches!(error, DevlogError::InvalidQuery { .. }));
    }

    #[tokio::test]
    async fn empty_timeline_says_so() {
        let server = MockServer::start().await;
        mount_get(&server, "/analytics/timeline", json!({"timeline": []})).await;
        let config = DevlogConfig {
            branch_id: Some(4),
            ..DevlogConfig::default()
        };

        let mut buffer = Vec::new();
        timeline(&gateway_for(&server), &config, &mut buffer)
            .await
            .expect("timeline should load");

        assert!(text(buffer).ends_with("  No data for this period\n"));
    }

    #[tokio::test]
    async fn module_analytics_exports_csv() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/analytics/modules"))
            .and(query_param("branch_name", "17.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "branch": "17.0",
                "modules": [{"module": "account", "commits": 1200, "additions": 9,
                             "deletions": 3, "contributors": 7,
                             "last_modified": "2024-04-01T12:00:00"}]
            })))
            .mount(&server)
            .await;
        let dir = TempDir::new().expect("temp dir should be created");
        let output_path = dir.path().join("modules.csv").to_string_lossy().to_string();
        let config = DevlogConfig {
            branch_name: Some("17.0".to_owned()),
            export: Some("modules".to_owned()),
            output: Some(output_path.clone()),
            ..DevlogConfig::default()
        };

        let mut buffer = Vec::new();
        modules(&gateway_for(&server), &config, &mut buffer)
            .await
            .expect("modules should load");

        let output = text(buffer);
        assert!(output.contains("Modules on 17.0 (1)"), "output: {output}");
        assert!(output.contains("1,200 commits"), "output: {output}");
        let csv = fs::read_to_string(&output_path).expect("CSV should be written");
        assert_eq!(
            csv,
            "Module;Commits;Contributors;Additions;Deletions;Last Modified\n\
             account;1200;7;9;3;2024-04-01\n"
        );
    }

    #[tokio::test]
    async fn empty_module_export_prints_notice() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "/analytics/modules",
            json!({"branch": "17.0", "modules": []}),
        )
        .await;
        let dir = TempDir::new().expect("temp dir should be created");
        let output_path = dir.path().join("modules.csv");
        let config = DevlogConfig {
            branch_name: Some("17.0".to_owned()),
            export: Some("modules".to_owned()),
            output: Some(output_path.to_string_lossy().into_owned()),
            ..DevlogConfig::default()
        };

        let mut buffer = Vec::new();
        modules(&gateway_for(&server), &config, &mut buffer)
            .await
            .expect("modules should load");

        assert!(text(buffer).ends_with("  No module activity\nNo data to export\n"));
        assert!(!output_path.exists());
    }

    #[tokio::test]
    async fn detected_changes_show_kind_and_values() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/analytics/detected-changes"))
            .and(query_param("branch_name", "17.0"))
            .and(query_param("change_type", "field_rename"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "branch": "17.0", "change_type": "field_rename",
                "changes": [{"commit_id": 5, "commit_sha": "0011223344", "commit_message": "[REF] rename",
                             "author": "Kim", "date": "2024-02-03T04:05:06",
                             "filename": "stock/models/move.py", "type": "field_rename",
                             "old_value": "product_qty", "new_value": "quantity"}]
            })))
            .mount(&server)
            .await;
        let config = DevlogConfig {
            branch_name: Some("17.0".to_owned()),
            change_type: Some("field_rename".to_owned()),
            ..DevlogConfig::default()
        };

        let mut buffer = Vec::new();
        detected_changes(&gateway_for(&server), &config, &mut buffer)
            .await
            .expect("changes should load");

        let output = text(buffer);
        assert!(
            output.contains("field rename 0011223 2024-02-03 04:05 Kim"),
            "output: {output}"
        );
        assert!(output.contains("  product_qty -> quantity"), "output: {output}");
    }

    #[tokio::test]
    async fn no_detected_changes() {
        let server = MockServer::start().await;
        mount_get(&server, "/analytics/detected-changes", json!({"changes": []})).await;
        let config = DevlogConfig {
            branch_name: Some("17.0".to_owned()),
            ..DevlogConfig::default()
        };

        let mut buffer = Vec::new();
        detected_changes(&gateway_for(&server), &config, &mut buffer)
            .await
            .expect("changes should load");

        assert_eq!(text(buffer), "No changes detected\n");
    }
}
