//! Maps a raw HTTP outcome onto `Result<PredictionPayload, PredictionError>`.
//!
//! Kept free of any transport type so every HTTP client normalizes the same
//! way and the rules are testable without a network.

use super::error::PredictionError;
use super::model::PredictionPayload;
use serde_json::{Map, Value};

/// Normalizes a response status and body.
///
/// - 2xx with a JSON object without an `error` field: payload, unchanged
/// - 2xx with an `error` field: [`PredictionError::Remote`]
/// - 2xx with anything else: [`PredictionError::Malformed`]
/// - any other status: [`PredictionError::Status`]
pub fn normalize_response(status: u16, body: &str) -> Result<PredictionPayload, PredictionError> {
    if !(200..300).contains(&status) {
        return Err(PredictionError::status(status, status_message(status, body)));
    }

    let value: Value = serde_json::from_str(body)
        .map_err(|err| PredictionError::malformed(format!("invalid JSON: {err}")))?;

    let Value::Object(object) = &value else {
        return Err(PredictionError::malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    };

    if let Some(message) = error_indicator(object) {
        return Err(PredictionError::remote(message));
    }

    Ok(PredictionPayload::new(value))
}

/// Extracts the message of an `{"error": ..., "message": ...}` body.
///
/// Returns `None` when there is no error field or it is `null`/`false`.
pub fn error_indicator(object: &Map<String, Value>) -> Option<String> {
    let error = match object.get("error")? {
        Value::Null | Value::Bool(false) => return None,
        Value::String(s) if s.trim().is_empty() => "unknown error".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match object.get("message").and_then(Value::as_str) {
        Some(detail) if !detail.trim().is_empty() => Some(format!("{error}: {detail}")),
        _ => Some(error),
    }
}

fn status_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        if let Some(message) = error_indicator(&object) {
            return message;
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed with status {status}")
    } else {
        truncate(trimmed, 200)
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}…")
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
