//! NetBox API client
//!
//! Runs one request/response cycle per call: encode the parameters into a
//! descriptor, hand it to the transport, dispatch the response through the
//! endpoint's status table.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::common::HttpClient;
use crate::config::ClientConfig;
use crate::dispatch::{ResponseVariant, dispatch};
use crate::endpoint::{Endpoint, ResourceEndpoints};
use crate::endpoints;
use crate::error::NetBoxError;
use crate::models::{NetBoxStatus, Resource};
use crate::params::RequestParams;
use crate::service::ResourceService;
use crate::transport::{RawResponse, RequestDescriptor, Transport};

/// NetBox API client
///
/// Holds no per-call state; share it freely across tasks.
#[derive(Debug, Clone)]
pub struct NetBoxClient<T = HttpClient> {
    transport: T,
}

impl NetBoxClient<HttpClient> {
    /// Create a new NetBox client
    ///
    /// # Arguments
    /// * `base_url` - NetBox base URL (e.g., "http://netbox:80")
    /// * `token` - API token for authentication
    pub fn new(base_url: String, token: String) -> Result<Self, NetBoxError> {
        Self::from_config(&ClientConfig::new(base_url, token))
    }

    /// Create a client from loaded configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, NetBoxError> {
        let http = HttpClient::with_timeout(config.base_url.clone(), config.token.clone(), config.timeout)?;
        Ok(Self::with_transport(http))
    }
}

impl<T: Transport> NetBoxClient<T> {
    /// Create a client over any transport
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the outgoing request for `endpoint` without sending it
    pub fn prepare(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
        body: Option<serde_json::Value>,
    ) -> Result<RequestDescriptor, NetBoxError> {
        if body.is_some() && !endpoint.accepts_body {
            return Err(NetBoxError::InvalidRequest(format!(
                "{} does not accept a request body",
                endpoint.operation_id
            )));
        }

        let mut request = RequestDescriptor::for_endpoint(endpoint);
        params.write_to_request(endpoint, &mut request)?;
        request.body = body;
        Ok(request)
    }

    /// Call an endpoint that takes no body and dispatch its response
    pub async fn execute<P>(&self, endpoint: &Endpoint, params: &RequestParams) -> Result<ResponseVariant<P>, NetBoxError>
    where
        P: DeserializeOwned + Default,
    {
        let request = self.prepare(endpoint, params, None)?;
        self.round_trip(endpoint, request).await
    }

    /// Call an endpoint with a JSON body and dispatch its response
    pub async fn execute_with_body<B, P>(
        &self,
        endpoint: &Endpoint,
        params: &RequestParams,
        body: &B,
    ) -> Result<ResponseVariant<P>, NetBoxError>
    where
        B: Serialize + ?Sized,
        P: DeserializeOwned + Default,
    {
        let body = serde_json::to_value(body)?;
        let request = self.prepare(endpoint, params, Some(body))?;
        self.round_trip(endpoint, request).await
    }

    /// Send a prepared request and dispatch its response through `endpoint`
    pub async fn round_trip<P>(&self, endpoint: &Endpoint, request: RequestDescriptor) -> Result<ResponseVariant<P>, NetBoxError>
    where
        P: DeserializeOwned + Default,
    {
        debug!("Sending {} {}", endpoint.operation_id, request.path);
        let response = self.transport.send(request).await?;
        dispatch(endpoint, response)
    }

    /// Send a prepared request and return the raw response without dispatch
    pub async fn send_raw(&self, request: RequestDescriptor) -> Result<RawResponse, NetBoxError> {
        self.transport.send(request).await
    }

    /// Typed service over one resource's routes
    pub fn service<R>(&self, endpoints: &'static ResourceEndpoints) -> ResourceService<'_, T, R>
    where
        R: Resource,
    {
        ResourceService::new(self, endpoints)
    }

    /// Typed service whose create/update responses decode into `W`
    pub fn service_with_update_type<R, W>(&self, endpoints: &'static ResourceEndpoints) -> ResourceService<'_, T, R, W>
    where
        R: Resource,
        W: Resource,
    {
        ResourceService::new(self, endpoints)
    }

    /// Fetch `GET /status/`
    pub async fn status(&self) -> Result<NetBoxStatus, NetBoxError> {
        let variant = self.execute(&endpoints::STATUS, &RequestParams::new()).await?;
        Ok(variant.into_payload().unwrap_or_default())
    }

    /// Validate the API token by making a simple authenticated request.
    ///
    /// # Returns
    /// * `Ok(())` - Token is valid and NetBox is reachable
    /// * `Err(NetBoxError::Authentication)` - Token was rejected (401/403)
    /// * `Err(NetBoxError)` - NetBox is unreachable or answered unexpectedly
    pub async fn validate_token(&self) -> Result<(), NetBoxError> {
        debug!("Validating NetBox token and connectivity");
        match self.status().await {
            Ok(status) => {
                debug!("Token validated successfully (NetBox {})", status.netbox_version);
                Ok(())
            }
            Err(NetBoxError::UnexpectedStatus(err)) if matches!(err.code(), 401 | 403) => Err(
                NetBoxError::Authentication(format!("Invalid token: {} - {}", err.code(), err.response().text())),
            ),
            Err(err) => Err(err),
        }
    }
}
