//! Mock transport for unit testing
//!
//! Serves queued responses in order and records every request it receives, so
//! tests can exercise the client without a running NetBox instance.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::Serialize;

use crate::error::NetBoxError;
use crate::transport::{RawResponse, RequestDescriptor, Transport};

/// In-memory [`Transport`]
///
/// Clones share the same queue and request log.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    base_url: String,
    responses: Arc<Mutex<VecDeque<RawResponse>>>,
    requests: Arc<Mutex<Vec<RequestDescriptor>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockTransport {
    /// Create a new mock transport
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Queue a response for the next request
    pub fn push_response(&self, response: RawResponse) {
        lock(&self.responses).push_back(response);
    }

    /// Queue a JSON response for the next request
    pub fn push_json<S: Serialize>(&self, status: u16, body: &S) {
        let body = serde_json::to_vec(body).unwrap_or_default();
        self.push_response(RawResponse::from_status(status, body));
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RequestDescriptor> {
        lock(&self.requests).clone()
    }

    /// Number of queued responses not yet served
    pub fn pending(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse, NetBoxError> {
        if let Some(token) = &request.cancellation
            && token.is_cancelled()
        {
            return Err(NetBoxError::Cancelled(request.operation_id.to_string()));
        }

        let operation = request.operation_id;
        lock(&self.requests).push(request);
        lock(&self.responses).pop_front().ok_or_else(|| {
            NetBoxError::InvalidRequest(format!("mock transport has no response queued for {}", operation))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::dcim;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_serves_responses_in_order() {
        let mock = MockTransport::new("http://test-netbox");
        mock.push_response(RawResponse::from_status(200, "first"));
        mock.push_response(RawResponse::from_status(204, ""));

        let request = RequestDescriptor::for_endpoint(&dcim::SITES.list);
        assert_eq!(mock.send(request.clone()).await.expect("first").text(), "first");
        assert_eq!(mock.send(request.clone()).await.expect("second").status(), 204);
        assert!(mock.send(request).await.is_err());
        assert_eq!(mock.requests().len(), 3);
        assert_eq!(mock.pending(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_request_is_not_recorded() {
        let mock = MockTransport::new("http://test-netbox");
        let token = CancellationToken::new();
        token.cancel();

        let mut request = RequestDescriptor::for_endpoint(&dcim::SITES.list);
        request.cancellation = Some(token);
        let err = mock.send(request).await.expect_err("cancelled");
        assert!(matches!(err, NetBoxError::Cancelled(_)));
        assert!(mock.requests().is_empty());
    }
}
