//! Response dispatch
//!
//! Maps a received status code to the typed variant declared in the endpoint's
//! status table. The response is taken by value, so its body is read once and
//! released on every path.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::endpoint::{BodyKind, Endpoint, HttpMethod, StatusEntry, camel_case};
use crate::error::{BoxError, NetBoxError, PayloadDecodeError, UnexpectedStatusError};
use crate::transport::RawResponse;

/// Decodes a response body into a payload type
pub trait PayloadDecoder {
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, BoxError>;
}

/// Default JSON decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl PayloadDecoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T, BoxError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// The typed outcome of one response
///
/// Built once by the dispatcher and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseVariant<T> {
    operation: &'static str,
    method: HttpMethod,
    path: &'static str,
    status: u16,
    name: &'static str,
    payload: Option<T>,
}

impl<T> ResponseVariant<T> {
    fn new(endpoint: &Endpoint, entry: &'static StatusEntry, payload: Option<T>) -> Self {
        Self {
            operation: endpoint.operation_id,
            method: endpoint.method,
            path: endpoint.path,
            status: entry.code,
            name: entry.name,
            payload,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Variant name from the status table, e.g. `NoContent`
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn operation_id(&self) -> &'static str {
        self.operation
    }

    /// True for variants that declare no payload
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }
}

impl<T> fmt::Display for ResponseVariant<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} {}][{}] {}{}",
            self.method,
            self.path,
            self.status,
            camel_case(self.operation),
            self.name
        )
    }
}

/// Dispatch with the default JSON decoder
pub fn dispatch<T>(endpoint: &Endpoint, response: RawResponse) -> Result<ResponseVariant<T>, NetBoxError>
where
    T: DeserializeOwned + Default,
{
    dispatch_with(&JsonDecoder, endpoint, response)
}

/// Select and populate the variant for `response`.
///
/// - status in the table, payload variant: the body is decoded into `T`. An
///   empty body yields `T::default()`.
/// - status in the table, empty variant: the body is ignored.
/// - status not in the table: [`UnexpectedStatusError`] carrying the response.
pub fn dispatch_with<D, T>(
    decoder: &D,
    endpoint: &Endpoint,
    response: RawResponse,
) -> Result<ResponseVariant<T>, NetBoxError>
where
    D: PayloadDecoder,
    T: DeserializeOwned + Default,
{
    let status = response.status();
    let Some(entry) = endpoint.response_for(status) else {
        warn!(
            "{} returned undeclared status {}: {}",
            endpoint.operation_id,
            status,
            response.text().chars().take(500).collect::<String>()
        );
        return Err(UnexpectedStatusError::new(endpoint, response).into());
    };

    let payload = match entry.body {
        BodyKind::Empty => None,
        BodyKind::Payload => Some(decode_payload(decoder, endpoint, status, response.body())?),
    };

    debug!("{} dispatched to {} ({})", endpoint.operation_id, entry.name, status);
    Ok(ResponseVariant::new(endpoint, entry, payload))
}

fn decode_payload<D, T>(decoder: &D, endpoint: &Endpoint, status: u16, body: &[u8]) -> Result<T, NetBoxError>
where
    D: PayloadDecoder,
    T: DeserializeOwned + Default,
{
    // Empty body is accepted as a default payload; NetBox never sends one for a
    // payload status, so this can hide a schema violation upstream.
    if body.iter().all(u8::is_ascii_whitespace) {
        warn!("{} returned {} with an empty body, using default payload", endpoint.operation_id, status);
        return Ok(T::default());
    }

    decoder.decode(body).map_err(|source| {
        PayloadDecodeError {
            operation: endpoint.operation_id,
            method: endpoint.method,
            path: endpoint.path,
            status,
            source,
        }
        .into()
    })
}
