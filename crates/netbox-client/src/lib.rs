//! NetBox REST API Client
//!
//! A Rust client library for the NetBox REST API. Every route is described by
//! an [`Endpoint`] table; responses are dispatched through that table into a
//! typed [`ResponseVariant`] or an [`UnexpectedStatusError`] that keeps the raw
//! response for inspection.
//!
//! # Example
//!
//! ```no_run
//! use netbox_client::endpoints::{dcim, tenancy};
//! use netbox_client::{Contact, ListOptions, ModuleBay, NetBoxClient, RequestParams, ResponseVariant};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = NetBoxClient::new(
//!     "http://netbox:80".to_string(),
//!     "your-api-token".to_string(),
//! )?;
//!
//! // Low level: one endpoint, one dispatched response
//! let deleted: ResponseVariant<ModuleBay> = client
//!     .execute(&dcim::MODULE_BAYS.delete, &RequestParams::for_id(7))
//!     .await?;
//! assert_eq!(deleted.status(), 204);
//!
//! // Service level: get/list/create/update/delete over one resource
//! let contacts = client.service::<Contact>(&tenancy::CONTACTS);
//! let everyone = contacts.list_all(Some(&ListOptions::new().search("ada"))).await?;
//! # let _ = everyone;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Typed dispatch**: status codes map to named variants per endpoint
//! - **Parameter encoding**: path and query parameters validated before sending
//! - **Cancellation**: per-request timeout and cancellation token
//! - **Pagination**: follow `next` links or fetch every page
//! - **Testing**: `test-util` feature exposes an in-memory [`MockTransport`]

pub mod client;
pub mod common;
pub mod config;
pub mod dispatch;
pub mod endpoint;
pub mod endpoints;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod models;
pub mod params;
pub mod service;
pub mod transport;

pub use client::NetBoxClient;
pub use common::query::ListOptions;
pub use common::{HttpClient, Page, PaginatedResponse};
pub use config::ClientConfig;
pub use dispatch::{JsonDecoder, PayloadDecoder, ResponseVariant, dispatch, dispatch_with};
pub use endpoint::{
    BodyKind, Endpoint, HttpMethod, ParamKind, ParamSlot, ParamSpec, ResourceEndpoints, StatusEntry,
};
pub use error::{
    NetBoxError, ParameterEncodingError, ParameterError, PayloadDecodeError, UnexpectedStatusError,
};
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;
pub use models::*;
pub use params::{DEFAULT_TIMEOUT, ParamValue, RequestParams};
pub use service::ResourceService;
pub use transport::{RawResponse, RequestDescriptor, Transport};
