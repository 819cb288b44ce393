//! Common utilities for NetBox API client
//!
//! Provides the reqwest-backed transport and the pagination types shared by
//! every list endpoint.

pub mod query;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::NetBoxError;
use crate::transport::{RawResponse, RequestDescriptor, Transport};

/// Paginated response wrapper from NetBox API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Default for PaginatedResponse<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// One page of a list endpoint
pub type Page<T> = PaginatedResponse<T>;

/// HTTP transport with token authentication
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Build a client whose timeout applies to requests that do not set their own
    pub fn with_timeout(base_url: String, token: String, timeout: Duration) -> Result<Self, NetBoxError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(client, base_url, token))
    }

    /// Build a full URL from a path relative to `/api`
    ///
    /// Absolute URLs (pagination links) are used as-is.
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/api{}", self.base_url, path)
        }
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Token {}", self.token)
    }

    /// Get the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }

    async fn exchange(&self, request: RequestDescriptor) -> Result<RawResponse, NetBoxError> {
        let mut url = self.build_url(&request.path);
        let query = request.query_string();
        if !query.is_empty() {
            let separator = if url.contains('?') { '&' } else { '?' };
            url = format!("{}{}{}", url, separator, query);
        }
        debug!("{} {} ({})", request.method, url, request.operation_id);

        let mut builder = self
            .client
            .request(request.method.to_reqwest(), &url)
            .header(AUTHORIZATION, self.auth_header())
            .header(ACCEPT, "application/json");
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!("{} -> {} ({} bytes)", request.operation_id, status, body.len());

        Ok(RawResponse::new(status, headers, body))
    }
}

#[async_trait]
impl Transport for HttpClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, NetBoxError> {
        match request.cancellation.clone() {
            Some(token) => {
                let operation = request.operation_id;
                tokio::select! {
                    () = token.cancelled() => Err(NetBoxError::Cancelled(operation.to_string())),
                    result = self.exchange(request) => result,
                }
            }
            None => self.exchange(request).await,
        }
    }
}
