// Generic request wrapper
// Every endpoint call goes through ApiClient::request_value, which owns header
// defaults, response parsing and error normalization.

use crate::config::ClientConfig;
use crate::error::{status_message, ApiError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Lowercased substrings that mark a transport failure as connectivity-related
const NETWORK_MARKERS: &[&str] = &[
    "failed to fetch",
    "fetch",
    "network",
    "connect",
    "error sending request",
];

/// Request payload
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Pre-serialized JSON text
    Text(String),
    /// Multipart form; the transport owns the `Content-Type` boundary
    Multipart(Form),
}

/// Per-request options
#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: RequestBody::Empty,
            headers: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    /// POST with `value` serialized to JSON text
    pub fn post_json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let text = serde_json::to_string(value)
            .map_err(|e| ApiError::Unexpected(format!("Failed to serialize request: {}", e)))?;
        Ok(Self::post_text(text))
    }

    pub fn post_text(text: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::Text(text.into()),
            headers: Vec::new(),
        }
    }

    pub fn post_multipart(form: Form) -> Self {
        Self {
            method: Method::POST,
            body: RequestBody::Multipart(form),
            headers: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Merge caller headers with defaults for the given body
///
/// Header names compare case-insensitively. Non-empty text bodies get
/// `application/json` only when no content type was supplied; multipart
/// bodies never carry a caller or default content type.
pub fn merge_headers(headers: &[(String, String)], body: &RequestBody) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();

    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| ApiError::Unexpected(format!("Invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value).map_err(|e| {
            ApiError::Unexpected(format!("Invalid value for header '{}': {}", name, e))
        })?;
        map.insert(header_name, header_value);
    }

    match body {
        RequestBody::Text(text) if !text.is_empty() && !map.contains_key(CONTENT_TYPE) => {
            map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        RequestBody::Multipart(_) => {
            map.remove(CONTENT_TYPE);
        }
        _ => {}
    }

    Ok(map)
}

/// HTTP client bound to one resolved backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config: Arc::new(config),
        })
    }

    /// Client for the backend named by `DOCGENIUS_API_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a request and decode the JSON body into `T`
    ///
    /// No validation happens beyond deserialization; a body that does not fit
    /// `T` is reported as [`ApiError::Unexpected`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.request_value(endpoint, options).await?;
        serde_json::from_value(value).map_err(|e| {
            ApiError::Unexpected(format!("Failed to decode response from {}: {}", endpoint, e))
        })
    }

    /// Issue a request and return the parsed JSON body unchanged
    pub async fn request_value(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let RequestOptions {
            method,
            body,
            headers,
        } = options;

        let url = self.config.endpoint_url(endpoint);
        let headers = merge_headers(&headers, &body)?;

        let mut builder = self
            .http_client
            .request(method.clone(), &url)
            .headers(headers);

        if let Some(timeout) = self.config.request_timeout {
            builder = builder.timeout(timeout);
        }

        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Text(text) => builder.body(text),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        tracing::debug!(%method, %url, "Sending request");

        let response = builder
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        tracing::debug!(%method, %url, status = status.as_u16(), "Received response");

        interpret_response(status, &bytes)
    }
}

/// Turn a status plus raw body into the parsed value or a typed error
pub(crate) fn interpret_response(status: StatusCode, body: &[u8]) -> Result<Value> {
    let data = match serde_json::from_slice::<Value>(body) {
        Ok(data) => data,
        Err(_) if !status.is_success() => {
            return Err(ApiError::status_failure(status.as_u16()));
        }
        Err(_) => Value::Object(Map::new()),
    };

    if !status.is_success() {
        let message = error_message(&data).unwrap_or_else(|| status_message(status.as_u16()));
        let details = data.get("details").filter(|d| !d.is_null()).cloned();
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
            details,
        });
    }

    Ok(data)
}

/// First truthy of `error`, then `detail`
fn error_message(data: &Value) -> Option<String> {
    ["error", "detail"]
        .iter()
        .filter_map(|key| data.get(*key))
        .find_map(truthy_text)
}

fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

pub(crate) fn classify_transport_error(err: &reqwest::Error) -> ApiError {
    if err.is_connect() || err.is_timeout() {
        return ApiError::Network;
    }
    classify_failure_message(&err.to_string())
}

/// Map a transport failure message to [`ApiError::Network`] when it looks
/// like a connectivity problem, otherwise keep the message
pub fn classify_failure_message(message: &str) -> ApiError {
    let lowered = message.to_lowercase();
    if NETWORK_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        ApiError::Network
    } else {
        ApiError::Unexpected(message.to_string())
    }
}
