//! HTTP RPC client - `RpcTransport` over the API's JSON-RPC endpoint.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpRpcConfig::from_api_config(&app_config.api)
//!     .with_timeout(Duration::from_secs(10));
//!
//! let transport = HttpRpcClient::new(config, identity_provider)?;
//! ```
//!
//! # Wire format
//!
//! Every method is a `POST {root}/rpc` with a JSON-RPC 2.0 body:
//!
//! ```json
//! {"jsonrpc": "2.0", "id": 1, "method": "conference.getProfile", "apiVersion": "v1", "params": {}}
//! ```
//!
//! Answers are reshaped the way the API's browser client exposes them: the
//! fields of `result` are lifted to the top level and `result` itself is
//! kept, so both `resp.items` and `resp.result.items` resolve. Errors come
//! back as `{"error": {..}, "code": n}`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::ApiConfig;
use crate::domain::remote_call::RawResponse;
use crate::ports::{IdentityProvider, RpcTransport, TransportError};

/// Configuration for the HTTP RPC client.
#[derive(Debug, Clone)]
pub struct HttpRpcConfig {
    /// API root, e.g. `https://my-app.appspot.com/_ah/api`.
    pub root_url: String,
    /// Method prefix, e.g. `conference`.
    pub api_name: String,
    pub version: String,
    pub timeout: Duration,
}

impl HttpRpcConfig {
    pub fn new(root_url: impl Into<String>) -> Self {
        Self {
            root_url: root_url.into(),
            api_name: "conference".to_string(),
            version: "v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_api_config(config: &ApiConfig) -> Self {
        Self {
            root_url: config.root_url.clone(),
            api_name: config.api_name.clone(),
            version: config.version.clone(),
            timeout: config.timeout(),
        }
    }

    pub fn with_api_name(mut self, api_name: impl Into<String>) -> Self {
        self.api_name = api_name.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: String,
    api_version: &'a str,
    params: Value,
}

/// JSON-RPC transport authenticated with the identity provider's token.
pub struct HttpRpcClient {
    config: HttpRpcConfig,
    client: Client,
    identity: Arc<dyn IdentityProvider>,
    next_id: AtomicU64,
}

impl HttpRpcClient {
    pub fn new(
        config: HttpRpcConfig,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TransportError::connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            client,
            identity,
            next_id: AtomicU64::new(0),
        })
    }

    fn rpc_url(&self) -> String {
        format!("{}/rpc", self.config.root_url.trim_end_matches('/'))
    }

    fn map_send_error(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            TransportError::connection(format!("Connection failed: {}", e))
        } else if e.is_builder() {
            TransportError::Encode(e.to_string())
        } else {
            TransportError::connection(e.to_string())
        }
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn execute(&self, method: &str, params: Value) -> Result<RawResponse, TransportError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed) + 1,
            method: format!("{}.{}", self.config.api_name, method),
            api_version: &self.config.version,
            params,
        };

        tracing::debug!(method = %request.method, id = request.id, "Sending RPC request");

        let mut builder = self.client.post(self.rpc_url()).json(&request);
        if let Some(token) = self.identity.token() {
            builder = builder.bearer_auth(token.secret());
        }

        let response = builder.send().await.map_err(|e| self.map_send_error(e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Decode(format!("Failed to read body: {}", e)))?;

        parse_rpc_body(status, &body)
    }
}

/// Members of a successful `result` that stay nested, since at the top
/// level they mark a failed call.
const RESERVED_KEYS: [&str; 2] = ["error", "code"];

/// Reshapes an HTTP answer into the response shape the core expects.
fn parse_rpc_body(status: StatusCode, body: &str) -> Result<RawResponse, TransportError> {
    let parsed = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => return Ok(http_error(status)),
        Err(e) => return Err(TransportError::Decode(e.to_string())),
    };

    // Batch answers carry one element per request; we send one request.
    let envelope = match parsed {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        Value::Array(_) => {
            return Err(TransportError::Decode("empty batch response".to_string()))
        }
        other => other,
    };

    let mut envelope = match envelope {
        Value::Object(envelope) => envelope,
        other if status.is_success() => return Ok(RawResponse::new(other)),
        _ => return Ok(http_error(status)),
    };

    if let Some(error) = envelope.remove("error") {
        return Ok(rpc_error(status, error));
    }

    if !status.is_success() {
        return Ok(http_error(status));
    }

    match envelope.remove("result") {
        Some(Value::Object(result)) => {
            let mut shaped: Map<String, Value> = result
                .iter()
                .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect();
            shaped.insert("result".to_string(), Value::Object(result));
            Ok(RawResponse::new(Value::Object(shaped)))
        }
        Some(result) => Ok(RawResponse::new(json!({ "result": result }))),
        None => {
            envelope.remove("jsonrpc");
            envelope.remove("id");
            Ok(RawResponse::new(Value::Object(envelope)))
        }
    }
}

fn rpc_error(status: StatusCode, error: Value) -> RawResponse {
    let code = error
        .get("code")
        .and_then(Value::as_i64)
        .or_else(|| (!status.is_success()).then(|| i64::from(status.as_u16())));

    let mut shaped = Map::new();
    shaped.insert("error".to_string(), error);
    if let Some(code) = code {
        shaped.insert("code".to_string(), json!(code));
    }
    RawResponse::new(Value::Object(shaped))
}

fn http_error(status: StatusCode) -> RawResponse {
    let code = i64::from(status.as_u16());
    let message = status.canonical_reason().unwrap_or("HTTP error");
    RawResponse::new(json!({
        "error": { "code": code, "message": message },
        "code": code,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::identity::MockIdentityProvider;

    #[test]
    fn result_fields_are_lifted() {
        let raw = parse_rpc_body(
            StatusCode::OK,
            r#"{"jsonrpc":"2.0","id":1,"result":{"items":[{"name":"DevCon"}]}}"#,
        )
        .unwrap();

        assert_eq!(raw.get("items"), Some(&json!([{"name": "DevCon"}])));
        assert_eq!(raw.body(), &json!({"items": [{"name": "DevCon"}]}));
        assert_eq!(raw.error(), Ok(None));
    }

    #[test]
    fn result_member_named_error_is_not_lifted() {
        let raw = parse_rpc_body(
            StatusCode::OK,
            r#"{"id":1,"result":{"name":"DevCon","error":"none","code":401}}"#,
        )
        .unwrap();

        assert_eq!(raw.error(), Ok(None));
        assert_eq!(raw.get("name"), Some(&json!("DevCon")));
        assert_eq!(raw.get("code"), None);
        assert_eq!(raw.body()["error"], json!("none"));
        assert_eq!(raw.body()["code"], json!(401));
    }

    #[test]
    fn scalar_result_is_wrapped() {
        let raw = parse_rpc_body(StatusCode::OK, r#"{"id":1,"result":true}"#).unwrap();
        assert_eq!(raw.as_value(), &json!({"result": true}));
    }

    #[test]
    fn rpc_error_keeps_code_at_top_level() {
        let raw = parse_rpc_body(
            StatusCode::UNAUTHORIZED,
            r#"{"error":{"code":401,"message":"Invalid credentials"},"id":1}"#,
        )
        .unwrap();

        let error = raw.error().unwrap().unwrap();
        assert_eq!(error.code, Some(401));
        assert_eq!(raw.get("code"), Some(&json!(401)));
    }

    #[test]
    fn rpc_error_without_code_uses_http_status() {
        let raw = parse_rpc_body(
            StatusCode::NOT_FOUND,
            r#"{"error":{"message":"No conference found"}}"#,
        )
        .unwrap();

        assert_eq!(raw.get("code"), Some(&json!(404)));
        assert_eq!(raw.error().unwrap().unwrap().code, Some(404));
    }

    #[test]
    fn non_json_error_status_is_synthesized() {
        let raw = parse_rpc_body(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").unwrap();

        let error = raw.error().unwrap().unwrap();
        assert_eq!(error.code, Some(502));
        assert_eq!(error.message.as_deref(), Some("Bad Gateway"));
    }

    #[test]
    fn json_error_status_without_rpc_error_is_synthesized() {
        let raw = parse_rpc_body(StatusCode::UNAUTHORIZED, r#"{"detail":"nope"}"#).unwrap();
        assert_eq!(raw.error().unwrap().unwrap().code, Some(401));
    }

    #[test]
    fn batch_response_uses_first_element() {
        let raw = parse_rpc_body(
            StatusCode::OK,
            r#"[{"id":1,"result":{"name":"DevCon"}},{"id":2,"result":{}}]"#,
        )
        .unwrap();

        assert_eq!(raw.get("name"), Some(&json!("DevCon")));
    }

    #[test]
    fn invalid_json_on_success_is_decode_error() {
        let err = parse_rpc_body(StatusCode::OK, "not json").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn empty_batch_is_decode_error() {
        assert!(parse_rpc_body(StatusCode::OK, "[]").is_err());
    }

    #[test]
    fn rpc_url_joins_root() {
        let client = HttpRpcClient::new(
            HttpRpcConfig::new("https://example.appspot.com/_ah/api/"),
            Arc::new(MockIdentityProvider::new()),
        )
        .unwrap();

        assert_eq!(client.rpc_url(), "https://example.appspot.com/_ah/api/rpc");
    }

    #[test]
    fn config_from_api_config() {
        let config = HttpRpcConfig::from_api_config(&ApiConfig::default()).with_version("v2");

        assert_eq!(config.api_name, "conference");
        assert_eq!(config.version, "v2");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn request_serializes_as_json_rpc() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 7,
            method: "conference.getProfile".to_string(),
            api_version: "v1",
            params: json!({}),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "conference.getProfile",
                "apiVersion": "v1",
                "params": {}
            })
        );
    }
}
