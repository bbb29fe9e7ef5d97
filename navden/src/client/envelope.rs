//! Unwrapping of the backend's JSON response envelopes.
//!
//! Most endpoints answer `{"success": true, "<field>": ...}`. When the
//! simulator has not been created yet they answer `{"error": "...",
//! "<field>": null}` with a 200 status instead, and FastAPI errors come back
//! as `{"detail": "..."}` with a 4xx/5xx status.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ClientError;

/// Decode a successful response body.
///
/// With `field = Some(name)` the payload is taken from that member of the
/// envelope; with `None` the whole body is the payload.
pub(super) fn decode<T: DeserializeOwned>(
    body: &[u8],
    field: Option<&str>,
) -> Result<T, ClientError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ClientError::JsonError(e.to_string()))?;

    if let Some(message) = not_initialized_message(&value) {
        return Err(ClientError::NotInitialized(message));
    }

    let payload = match field {
        Some(name) => value
            .get(name)
            .cloned()
            .ok_or_else(|| ClientError::JsonError(format!("missing field '{}'", name)))?,
        None => value,
    };

    serde_json::from_value(payload).map_err(|e| ClientError::JsonError(e.to_string()))
}

/// Extract a readable message from an error response body.
pub(super) fn error_detail(body: &[u8]) -> String {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => value.to_string(),
        },
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    }
}

fn not_initialized_message(value: &Value) -> Option<String> {
    let succeeded = value.get("success").and_then(Value::as_bool).unwrap_or(false);
    if succeeded {
        return None;
    }
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}
