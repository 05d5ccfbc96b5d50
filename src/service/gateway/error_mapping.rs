//! Error mapping helpers for the HTTP loan gateway.

use http::StatusCode;

use crate::service::error::{LoanServiceError, ServiceOperation};

/// Longest body excerpt kept in an error message.
const MAX_MESSAGE_CHARS: usize = 160;

/// Classifies a `reqwest` failure as a decoding or transport error.
pub(super) fn map_transport_error(
    operation: ServiceOperation,
    error: &reqwest::Error,
) -> LoanServiceError {
    if error.is_decode() {
        LoanServiceError::Decode {
            operation,
            message: error.to_string(),
        }
    } else {
        LoanServiceError::Network {
            operation,
            message: error.to_string(),
        }
    }
}

/// Builds the error for a response whose status was not `200 OK`.
pub(super) fn map_status_error(
    operation: ServiceOperation,
    status: StatusCode,
    body: &str,
) -> LoanServiceError {
    let message = extract_service_message(body)
        .unwrap_or_else(|| truncate_for_message(body.trim(), MAX_MESSAGE_CHARS));
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_owned()
    } else {
        message
    };

    LoanServiceError::Status {
        operation,
        status: status.as_u16(),
        message,
    }
}

/// Pulls `message` (or `error`) out of a JSON error body.
fn extract_service_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    ["message", "error"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(serde_json::Value::as_str)
            .map(ToOwned::to_owned)
    })
}

fn truncate_for_message(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}...")
    } else {
        truncated
    }
}
