//! Per-operation response decoders.
//!
//! The API is inconsistent about where it puts payloads: single records come
//! back under `result`, lists under `items` (sometimes nested in `result`),
//! and a few methods use their own top-level member. Each decoder reads one
//! of those shapes and reports anything else as a malformed response.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::remote_call::{MalformedResponse, RawResponse};

/// Decodes the response body (`result` when present) as `T`.
pub fn result_body<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, MalformedResponse> {
    T::deserialize(raw.body())
        .map_err(|e| MalformedResponse::new(format!("unexpected response body: {}", e)))
}

/// Decodes the `items` list, looked up at the top level and then in `result`.
/// A missing list decodes as empty.
pub fn items<T: DeserializeOwned>(raw: &RawResponse) -> Result<Vec<T>, MalformedResponse> {
    match raw.get("items") {
        Some(value) if !value.is_null() => decode_list("items", value),
        _ => list_field(raw, "items"),
    }
}

/// Decodes the list under `field` in the response body. A missing list
/// decodes as empty.
pub fn list_field<T: DeserializeOwned>(
    raw: &RawResponse,
    field: &str,
) -> Result<Vec<T>, MalformedResponse> {
    match raw.body().get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(value) => decode_list(field, value),
    }
}

/// Decodes the member `field` of the response body as `T`.
pub fn data_field<T: DeserializeOwned>(
    raw: &RawResponse,
    field: &str,
) -> Result<T, MalformedResponse> {
    let value = raw
        .body()
        .get(field)
        .ok_or_else(|| MalformedResponse::new(format!("missing '{}' member", field)))?;
    T::deserialize(value)
        .map_err(|e| MalformedResponse::new(format!("invalid '{}' member: {}", field, e)))
}

/// Ignores the payload.
pub fn unit(_raw: &RawResponse) -> Result<(), MalformedResponse> {
    Ok(())
}

fn decode_list<T: DeserializeOwned>(field: &str, value: &Value) -> Result<Vec<T>, MalformedResponse> {
    Vec::<T>::deserialize(value)
        .map_err(|e| MalformedResponse::new(format!("invalid '{}' list: {}", field, e)))
}
