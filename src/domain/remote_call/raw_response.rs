//! Untyped API responses and their error envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// The response does not have the shape the client expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Malformed response: {0}")]
pub struct MalformedResponse(pub String);

impl MalformedResponse {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Error envelope reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RemoteErrorPayload {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
}

/// A response exactly as the transport delivered it.
///
/// The API mixes shapes: payloads appear under `result`, `items`,
/// `speakers`, `sessions` or at the top level, and failures carry an
/// `error` member with an optional `code` beside it. Typed decoding is
/// done per operation by `application::decode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawResponse(Value);

impl RawResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// An empty object, as returned by void operations.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Looks up a top-level member.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the body of a successful response.
    ///
    /// Prefers the `result` member when it is an object, falling back to
    /// the whole response.
    pub fn body(&self) -> &Value {
        match self.0.get("result") {
            Some(result @ Value::Object(_)) => result,
            _ => &self.0,
        }
    }

    /// Extracts the error envelope, if any.
    ///
    /// The code is read from `error.code` first, then from a top-level
    /// `code`. A bare string error becomes the message.
    pub fn error(&self) -> Result<Option<RemoteErrorPayload>, MalformedResponse> {
        let object = self
            .0
            .as_object()
            .ok_or_else(|| MalformedResponse::new("response is not a JSON object"))?;

        let top_level_code = object.get("code").and_then(Value::as_i64);

        let mut payload = match object.get("error") {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(message)) => RemoteErrorPayload {
                message: Some(message.clone()),
                code: None,
            },
            Some(value @ Value::Object(_)) => RemoteErrorPayload::deserialize(value)
                .map_err(|e| MalformedResponse::new(format!("invalid error member: {}", e)))?,
            Some(other) => {
                return Err(MalformedResponse::new(format!(
                    "unexpected error member: {}",
                    other
                )))
            }
        };

        if payload.code.is_none() {
            payload.code = top_level_code;
        }
        payload.message = payload.message.filter(|m| !m.trim().is_empty());
        Ok(Some(payload))
    }
}

impl From<Value> for RawResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
