//! Error mapping helpers for the HTTP gateway.

use http::StatusCode;
use serde_json::Value;

use crate::error::DevlogError;

const MAX_BODY_IN_MESSAGE: usize = 160;

/// Checks if a status means the addressed resource does not exist.
pub(super) const fn is_not_found(status: StatusCode) -> bool {
    matches!(status, StatusCode::NOT_FOUND)
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> DevlogError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_not_found(status) {
        DevlogError::NotFound {
            message: format!("{operation}: {message}"),
        }
    } else {
        DevlogError::Api {
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> DevlogError {
    if error.is_timeout() {
        return DevlogError::Network {
            message: format!("{operation} timed out: {error}"),
        };
    }
    DevlogError::Network {
        message: format!("{operation} failed: {error}"),
    }
}

pub(super) fn map_decode_error(operation: &str, error: &serde_json::Error) -> DevlogError {
    DevlogError::Decode {
        message: format!("{operation}: {error}"),
    }
}

/// Pulls a readable message out of an error response body.
///
/// The server reports failures as `{"detail": "..."}`, or as a list of
/// validation problems each carrying a `msg`. Other bodies are returned
/// trimmed and shortened.
pub(super) fn extract_detail(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let detail = serde_json::from_str::<Value>(trimmed)
        .ok()
        .and_then(|value| value.get("detail").cloned());

    match detail {
        Some(Value::String(text)) => Some(text),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                Some(truncate(trimmed))
            } else {
                Some(messages.join("; "))
            }
        }
        _ => Some(truncate(trimmed)),
    }
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(MAX_BODY_IN_MESSAGE) {
        Some((index, _)) => format!("{}...", text.get(..index).unwrap_or(text)),
        None => text.to_owned(),
    }
}
