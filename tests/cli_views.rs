//! CLI integration tests running views against a mock history API.

mod support;

use std::process::Output;

use serde_json::json;
use wiremock::MockServer;

use support::{lossy, mount_get, run_devlog};

async fn run_against(server: &MockServer, args: &[&str]) -> Output {
    let mut owned: Vec<String> = vec!["--api-url".to_owned(), server.uri()];
    owned.extend(args.iter().map(|arg| (*arg).to_owned()));
    tokio::task::spawn_blocking(move || {
        let borrowed: Vec<&str> = owned.iter().map(String::as_str).collect();
        run_devlog(&borrowed, &[])
    })
    .await
    .expect("binary runner should not panic")
}

#[tokio::test(flavor = "multi_thread")]
async fn summary_prints_totals_and_leaderboard() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/stats/summary",
        json!({"total_repositories": 2, "total_commits": 12345, "unique_authors": 7}),
    )
    .await;
    mount_get(
        &server,
        "/stats/top-contributors",
        json!([{"author": "Alice", "commits": 1200, "additions": 4000, "deletions": 35}]),
    )
    .await;

    let output = run_against(&server, &["--view", "summary"]).await;

    let stdout = lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", lossy(&output.stderr));
    assert!(stdout.contains("  Commits       12,345"), "stdout: {stdout}");
    assert!(
        stdout.contains("  #1 Alice - 1,200 commits (+4,000/-35)"),
        "stdout: {stdout}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_view_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let output = run_against(&server, &["--view", "reviews"]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(lossy(&output.stderr).contains("unknown view 'reviews'"));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "no request expected: {received:?}");
}

#[tokio::test(flavor = "multi_thread")]
async fn view_failures_name_what_was_loading() {
    let server = MockServer::start().await;

    let output = run_against(&server, &["--view", "repositories"]).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = lossy(&output.stderr);
    assert!(
        stderr.contains("error loading repositories: not found"),
        "stderr: {stderr}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn commits_view_requires_a_branch() {
    let server = MockServer::start().await;

    let output = run_against(&server, &["--view", "commits"]).await;

    assert_eq!(output.status.code(), Some(1));
    let stderr = lossy(&output.stderr);
    assert!(
        stderr.contains("branch id is required (use --branch-id)"),
        "stderr: {stderr}"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn commits_view_lists_a_page() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/branches/4/commits",
        json!([{
            "id": 9, "sha": "0123456789abcdef", "message": "[IMP] sale: faster totals",
            "author_name": "Bob", "committed_date": "2024-03-01T10:00:00"
        }]),
    )
    .await;

    let output = run_against(&server, &["--view", "commits", "--branch-id", "4"]).await;

    let stdout = lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", lossy(&output.stderr));
    assert!(stdout.contains("Page 1 (1 commits)"), "stdout: {stdout}");
    assert!(stdout.contains("0123456"), "stdout: {stdout}");
    assert!(stdout.contains("[IMP] sale: faster totals"), "stdout: {stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn commits_view_labels_commit_types() {
    let server = MockServer::start().await;
    mount_get(
        &server,
        "/commit-types",
        json!([{"code": "IMP", "label": "Improvement", "color": "#3b82f6"}]),
    )
    .await;
    mount_get(
        &server,
        "/branches/4/commits",
        json!([{"id": 9, "sha": "0123456789abcdef", "message": "[IMP] sale: faster totals"}]),
    )
    .await;

    let output = run_against(&server, &["-v", "commits", "--branch-id", "4"]).await;

    let stdout = lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", lossy(&output.stderr));
    assert!(
        stdout.contains("[IMP Improvement] sale: faster totals"),
        "stdout: {stdout}"
    );
}
