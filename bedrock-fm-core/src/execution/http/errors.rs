//! Bedrock runtime error classification.
//!
//! The runtime returns JSON error bodies shaped like
//! `{ "message": "...", "__type": "..." }` on non-success HTTP statuses, and
//! `exception` frames mid-stream once a streaming response has started. Both
//! map onto the same retry-friendly [`FmError`] variants.

use crate::error::FmError;
use crate::streaming::EventStreamMessage;
use base64::Engine;
use bytes::Bytes;
use serde_json::Value;

fn extract_message(json: &Value) -> Option<String> {
    let message = json
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| json.get("Message").and_then(Value::as_str))
        .or_else(|| json.get("errorMessage").and_then(Value::as_str))
        .or_else(|| {
            json.get("error")
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
        })
        .map(|s| s.trim().to_string())?;

    (!message.is_empty()).then_some(message)
}

fn extract_error_type(json: &Value) -> Option<String> {
    json.get("__type")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Map a non-success HTTP response onto an [`FmError`].
pub fn classify_bedrock_http_error(status: u16, body_text: &str) -> FmError {
    let json = serde_json::from_str::<Value>(body_text).ok();
    let message = json
        .as_ref()
        .and_then(extract_message)
        .unwrap_or_else(|| {
            if body_text.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body_text.to_string()
            }
        });
    let lower = message.to_lowercase();
    let err_type = json
        .as_ref()
        .and_then(extract_error_type)
        .unwrap_or_default()
        .to_lowercase();

    let looks_rate_limited = err_type.contains("throttl") || lower.contains("throttl");
    if status == 429 || looks_rate_limited {
        return FmError::RateLimitError(message);
    }

    match status {
        401 | 403 => FmError::AuthenticationError(message),
        404 => FmError::NotFound(message),
        400 | 413 | 415 => FmError::InvalidInput(message),
        _ => FmError::ApiError {
            code: status,
            message,
            details: json,
        },
    }
}

/// Map an `exception` frame (`:exception-type` header plus JSON payload).
pub fn classify_stream_exception(exception_type: &str, payload: &[u8]) -> FmError {
    let json = serde_json::from_slice::<Value>(payload).ok();
    let message = json
        .as_ref()
        .and_then(extract_message)
        .unwrap_or_else(|| exception_type.to_string());

    match exception_type {
        "throttlingException" | "serviceQuotaExceededException" => {
            FmError::RateLimitError(message)
        }
        "accessDeniedException" => FmError::AuthenticationError(message),
        "resourceNotFoundException" => FmError::NotFound(message),
        "validationException" => FmError::InvalidInput(message),
        "modelTimeoutException" => FmError::ApiError {
            code: 408,
            message,
            details: json,
        },
        "serviceUnavailableException" => FmError::ApiError {
            code: 503,
            message,
            details: json,
        },
        "internalServerException" | "modelStreamErrorException" => FmError::ApiError {
            code: 500,
            message,
            details: json,
        },
        other => FmError::StreamError(format!("{other}: {message}")),
    }
}

/// Unwrap one event-stream message into a chunk payload.
///
/// `chunk` events carry `{"bytes": "<base64 JSON>"}`; other events yield `None`.
pub fn chunk_payload(message: &EventStreamMessage) -> Result<Option<Bytes>, FmError> {
    match message.message_type() {
        Some("event") => {
            if message.event_type() != Some("chunk") {
                return Ok(None);
            }
            let envelope: Value = serde_json::from_slice(&message.payload)?;
            let encoded = envelope
                .get("bytes")
                .and_then(Value::as_str)
                .ok_or_else(|| FmError::parse("stream chunk without `bytes` field"))?;
            let decoded = base64::engine::general_purpose::STANDARD.decode(encoded)?;
            Ok(Some(Bytes::from(decoded)))
        }
        Some("exception") => Err(classify_stream_exception(
            message.exception_type().unwrap_or("unknownException"),
            &message.payload,
        )),
        Some("error") => Err(FmError::StreamError(format!(
            "{}: {}",
            message.header_str(":error-code").unwrap_or("error"),
            message.header_str(":error-message").unwrap_or_default()
        ))),
        other => Err(FmError::StreamError(format!(
            "unexpected event-stream message type {other:?}"
        ))),
    }
}
