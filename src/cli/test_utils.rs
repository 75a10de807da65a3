//! Shared test utilities for CLI tests.

use std::time::Duration;

use devlog::HttpGateway;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Gateway pointed at a mock server.
pub fn gateway_for(server: &MockServer) -> HttpGateway {
    HttpGateway::new(&server.uri(), Duration::from_secs(5)).expect("mock server URI should parse")
}

/// Serves `body` as JSON for `GET route`.
pub async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Decodes captured output.
pub fn text(buffer: Vec<u8>) -> String {
    String::from_utf8(buffer).expect("output should be valid UTF-8")
}
