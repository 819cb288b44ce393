//! NetBox client errors

use std::fmt;

use thiserror::Error;

use crate::endpoint::{Endpoint, HttpMethod, camel_case};
use crate::transport::RawResponse;

/// Boxed error returned by pluggable payload decoders
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fixed diagnostic attached to every [`UnexpectedStatusError`]
pub const UNEXPECTED_STATUS_MESSAGE: &str =
    "response status code does not match any response statuses defined for this endpoint in the API schema";

/// Errors that can occur when interacting with the NetBox API
#[derive(Debug, Error)]
pub enum NetBoxError {
    /// Transport error, passed through unmodified
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// One or more request parameters could not be formatted
    #[error(transparent)]
    ParameterEncoding(#[from] ParameterEncodingError),

    /// Response status not in the endpoint's status table
    #[error(transparent)]
    UnexpectedStatus(Box<UnexpectedStatusError>),

    /// Response body did not decode into the variant's payload type
    #[error(transparent)]
    PayloadDecode(#[from] PayloadDecodeError),

    /// Request body serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (invalid token, expired, etc.)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The request was cancelled before a response arrived
    #[error("Request cancelled: {0}")]
    Cancelled(String),

    /// Invalid request (e.g., body sent to an endpoint that takes none)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NetBoxError {
    /// Status code carried by an [`UnexpectedStatusError`], if this is one
    pub fn unexpected_status(&self) -> Option<u16> {
        match self {
            NetBoxError::UnexpectedStatus(err) => Some(err.code()),
            _ => None,
        }
    }
}

impl From<UnexpectedStatusError> for NetBoxError {
    fn from(err: UnexpectedStatusError) -> Self {
        NetBoxError::UnexpectedStatus(Box::new(err))
    }
}

/// A single parameter that could not be written to the request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterError {
    pub name: String,
    pub reason: String,
}

impl ParameterError {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Every parameter failure of one request, collected before reporting
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid parameters for {operation}: {}", join(.errors))]
pub struct ParameterEncodingError {
    pub operation: &'static str,
    pub errors: Vec<ParameterError>,
}

impl ParameterEncodingError {
    pub fn new(operation: &'static str, errors: Vec<ParameterError>) -> Self {
        Self { operation, errors }
    }

    /// Names of the failing parameters, in the order they were attempted
    pub fn names(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.name.as_str()).collect()
    }
}

fn join(errors: &[ParameterError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Status code absent from the endpoint's table
///
/// Keeps the raw response so callers can inspect headers and body.
#[derive(Debug, Error)]
#[error("[{method} {path}][{}] {}: {message}", .response.status(), camel_case(.operation))]
pub struct UnexpectedStatusError {
    pub operation: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub message: &'static str,
    pub response: RawResponse,
}

impl UnexpectedStatusError {
    pub fn new(endpoint: &Endpoint, response: RawResponse) -> Self {
        Self {
            operation: endpoint.operation_id,
            method: endpoint.method,
            path: endpoint.path,
            message: UNEXPECTED_STATUS_MESSAGE,
            response,
        }
    }

    /// Numeric status code exactly as received
    pub fn code(&self) -> u16 {
        self.response.status()
    }

    pub fn response(&self) -> &RawResponse {
        &self.response
    }

    pub fn into_response(self) -> RawResponse {
        self.response
    }
}

/// Body present but not decodable into the expected payload type
#[derive(Debug, Error)]
#[error("[{method} {path}][{status}] failed to decode {operation} payload: {source}")]
pub struct PayloadDecodeError {
    pub operation: &'static str,
    pub method: HttpMethod,
    pub path: &'static str,
    pub status: u16,
    #[source]
    pub source: BoxError,
}
