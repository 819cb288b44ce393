//! Transport abstraction
//!
//! The client never talks HTTP directly. It hands a [`RequestDescriptor`] to a
//! [`Transport`] and gets a [`RawResponse`] back. The reqwest-backed transport
//! lives in [`crate::common::HttpClient`]; tests use [`crate::mock::MockTransport`].

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::HeaderMap;
use tokio_util::sync::CancellationToken;

use crate::endpoint::{Endpoint, HttpMethod};
use crate::error::NetBoxError;

/// Transport-agnostic description of an outgoing request
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub operation_id: &'static str,
    pub method: HttpMethod,
    /// Rendered path relative to `/api`, or an absolute URL when following a
    /// pagination link
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl RequestDescriptor {
    /// Empty descriptor for an endpoint; the path still holds its placeholders
    pub fn for_endpoint(endpoint: &Endpoint) -> Self {
        Self {
            operation_id: endpoint.operation_id,
            method: endpoint.method,
            path: endpoint.path.to_string(),
            query: Vec::new(),
            body: None,
            timeout: None,
            cancellation: None,
        }
    }

    /// Descriptor that requests an absolute URL returned by the API
    pub fn follow(endpoint: &Endpoint, url: impl Into<String>) -> Self {
        Self {
            path: url.into(),
            ..Self::for_endpoint(endpoint)
        }
    }

    /// Encoded query string without the leading `?`
    pub fn query_string(&self) -> String {
        self.query
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A received response: status, headers and the fully read body
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Response with no headers
    pub fn from_status(status: u16, body: impl Into<Bytes>) -> Self {
        Self::new(status, HeaderMap::new(), body.into())
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, lossily decoded, for diagnostics
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Pluggable HTTP transport
///
/// Implementations own connection handling, TLS, authentication headers,
/// timeouts and cancellation. All methods must be `Send` to work with
/// Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Base URL of the NetBox instance
    fn base_url(&self) -> &str;

    /// Send one request and return the received response.
    ///
    /// A non-2xx status is not an error at this layer.
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, NetBoxError>;
}
