//! CLI integration tests for the `--migrate-db` flag.
//!
//! These tests spawn the devlog binary as a subprocess to verify process exit
//! behaviour and ensure no API calls occur during migration-only runs.

mod support;

use std::process::Output;

use rstest::rstest;

use support::{create_temp_dir, database_path, lossy, run_devlog};

const SCHEMA_VERSION: &str = "20261019000000";

fn run_migrate_db(database_url: Option<&str>, env: &[(&str, Option<&str>)]) -> Output {
    let mut args = vec!["--migrate-db"];
    if let Some(database_url_value) = database_url {
        args.extend(["--database-url", database_url_value]);
    }

    run_devlog(&args, env)
}

fn assert_migrate_db_succeeds(database_url: &str) {
    let output = run_migrate_db(Some(database_url), &[]);
    assert!(
        output.status.success(),
        "expected successful exit, got: {:?}\nstderr: {}",
        output.status,
        lossy(&output.stderr)
    );
}

fn assert_migrate_db_fails(
    database_url: Option<&str>,
    env: &[(&str, Option<&str>)],
    expected_stderr_substring: &str,
) {
    let output = run_migrate_db(database_url, env);
    assert!(!output.status.success(), "expected failure exit status");

    let stderr = lossy(&output.stderr);
    assert!(
        stderr.contains(expected_stderr_substring),
        "expected stderr to contain {expected_stderr_substring:?}, got: {stderr}"
    );
}

#[test]
fn migrate_db_succeeds_with_in_memory_database() {
    assert_migrate_db_succeeds(":memory:");
}

#[test]
fn migrate_db_succeeds_with_file_database() {
    let temp_dir = create_temp_dir();
    let db_url = database_path(&temp_dir);

    assert_migrate_db_succeeds(&db_url);

    assert!(
        temp_dir.path().join("devlog.sqlite").exists(),
        "database file should be created at {db_url}"
    );
}

#[test]
fn migrate_db_reports_schema_version() {
    let output = run_migrate_db(Some(":memory:"), &[]);

    let stdout = lossy(&output.stdout);
    assert!(
        stdout.contains(&format!("schema version {SCHEMA_VERSION}")),
        "expected schema version on stdout, got: {stdout}"
    );
    let stderr = lossy(&output.stderr);
    assert!(
        stderr.contains("schema_version_recorded"),
        "expected telemetry on stderr, got: {stderr}"
    );
}

#[test]
fn migrate_db_does_not_call_the_api() {
    // The API URL points nowhere; migration must not touch it.
    let output = run_devlog(
        &[
            "--migrate-db",
            "--database-url",
            ":memory:",
            "--api-url",
            "http://127.0.0.1:9/",
        ],
        &[],
    );

    assert!(
        output.status.success(),
        "should succeed without a reachable API\nstderr: {}",
        lossy(&output.stderr)
    );
    assert!(
        !lossy(&output.stderr).contains("network error"),
        "should not contact the API"
    );
}

#[rstest]
#[case::missing_database_url(None, "database URL is required")]
#[case::blank_database_url(Some("   "), "database URL must not be blank")]
fn migrate_db_fails_with_invalid_database_url(
    #[case] database_url: Option<&str>,
    #[case] expected_stderr_substring: &str,
) {
    assert_migrate_db_fails(database_url, &[], expected_stderr_substring);
}

#[test]
fn migrate_db_fails_with_directory_path() {
    let temp_dir = create_temp_dir();
    let dir_path = temp_dir.path().to_string_lossy().to_string();

    assert_migrate_db_fails(
        Some(&dir_path),
        &[],
        "failed to connect to SQLite database",
    );
}

#[rstest]
#[case::success_with_in_memory_database(Some(":memory:"), 0)]
#[case::failure_without_database_url(None, 1)]
fn migrate_db_exits_with_expected_code(
    #[case] database_url: Option<&str>,
    #[case] expected_code: i32,
) {
    let output = run_migrate_db(database_url, &[]);
    assert_eq!(
        output.status.code(),
        Some(expected_code),
        "unexpected exit code: {:?}",
        output.status
    );
}

#[test]
fn migrate_db_succeeds_with_database_url_from_environment() {
    let output = run_migrate_db(None, &[("DEVLOG_DATABASE_URL", Some(":memory:"))]);

    assert!(
        output.status.success(),
        "expected migration to succeed when DEVLOG_DATABASE_URL is set\nstderr: {}",
        lossy(&output.stderr)
    );
}

#[test]
fn migrate_db_cli_database_url_overrides_environment() {
    let output = run_migrate_db(Some(":memory:"), &[("DEVLOG_DATABASE_URL", Some("   "))]);

    assert!(
        output.status.success(),
        "expected CLI --database-url to override DEVLOG_DATABASE_URL\nstderr: {}",
        lossy(&output.stderr)
    );
}

#[test]
fn migrate_db_is_idempotent() {
    let temp_dir = create_temp_dir();
    let db_url = database_path(&temp_dir);

    let first = run_migrate_db(Some(&db_url), &[]);
    assert!(first.status.success(), "first migration should succeed");

    let second = run_migrate_db(Some(&db_url), &[]);
    assert!(
        second.status.success(),
        "second migration should succeed (idempotent)"
    );
    assert!(
        lossy(&second.stdout).contains(SCHEMA_VERSION),
        "second run should report the same schema version"
    );
}
