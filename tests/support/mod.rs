//! Shared test utilities.

use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::Duration;

use devlog::HttpGateway;
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a temporary directory for database tests.
///
/// # Panics
///
/// Panics if the temporary directory cannot be created.
pub fn create_temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"))
}

/// Path of a `SQLite` file inside `dir`.
pub fn database_path(dir: &TempDir) -> String {
    dir.path().join("devlog.sqlite").to_string_lossy().to_string()
}

/// Gateway pointed at a mock server with a short timeout.
///
/// # Panics
///
/// Panics if the mock server URI cannot be used as a base URL.
pub fn gateway_for(server: &MockServer) -> HttpGateway {
    HttpGateway::new(&server.uri(), Duration::from_secs(5))
        .unwrap_or_else(|error| panic!("mock server URI should be usable: {error}"))
}

/// Serves `body` as JSON for `GET route`.
pub async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Returns the path to the built binary.
///
/// # Panics
///
/// Panics if the test executable path cannot be determined.
pub fn binary_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .unwrap_or_else(|error| panic!("failed to get current exe path: {error}"));
    path.pop(); // test binary name
    path.pop(); // deps
    path.push("devlog");
    path
}

/// Runs the binary with `args`, isolated from the developer's environment
/// and configuration files.
///
/// # Panics
///
/// Panics if the binary cannot be executed.
pub fn run_devlog(args: &[&str], env: &[(&str, Option<&str>)]) -> Output {
    let home = create_temp_dir();
    let mut command = Command::new(binary_path());
    command
        .args(args)
        .current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("DEVLOG_API_URL")
        .env_remove("DEVLOG_VIEW")
        .env_remove("DEVLOG_DATABASE_URL")
        .env_remove("DEVLOG_MIGRATE_DB")
        .env_remove("RUST_LOG");

    for (key, value) in env {
        match value {
            Some(env_value) => {
                command.env(key, env_value);
            }
            None => {
                command.env_remove(key);
            }
        }
    }

    command
        .output()
        .unwrap_or_else(|error| panic!("failed to execute binary: {error}"))
}

/// Decodes captured process output.
pub fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
