//! Resource services
//!
//! A [`ResourceService`] wraps the six routes of one NetBox resource behind
//! Get/List/Create/Update/Delete calls. `T` is the model read back from the
//! API; `W` is the model create and update responses are decoded into, which
//! lets writable representations differ from the read one.

use std::collections::HashSet;
use std::marker::PhantomData;

use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::NetBoxClient;
use crate::common::Page;
use crate::common::query::ListOptions;
use crate::endpoint::ResourceEndpoints;
use crate::error::NetBoxError;
use crate::models::Resource;
use crate::params::RequestParams;
use crate::transport::{RequestDescriptor, Transport};

/// Typed access to one resource's routes
#[derive(Debug)]
pub struct ResourceService<'c, Tr, T, W = T> {
    client: &'c NetBoxClient<Tr>,
    endpoints: &'static ResourceEndpoints,
    _models: PhantomData<fn() -> (T, W)>,
}

impl<Tr, T, W> Clone for ResourceService<'_, Tr, T, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tr, T, W> Copy for ResourceService<'_, Tr, T, W> {}

impl<'c, Tr, T, W> ResourceService<'c, Tr, T, W>
where
    Tr: Transport,
    T: Resource,
    W: Resource,
{
    pub fn new(client: &'c NetBoxClient<Tr>, endpoints: &'static ResourceEndpoints) -> Self {
        Self {
            client,
            endpoints,
            _models: PhantomData,
        }
    }

    pub fn endpoints(&self) -> &'static ResourceEndpoints {
        self.endpoints
    }
}

impl<Tr, T, W> ResourceService<'_, Tr, T, W>
where
    Tr: Transport,
    T: Resource + Serialize + DeserializeOwned + Default,
    W: Resource + DeserializeOwned + Default,
{
    /// Retrieve one object by ID
    pub async fn get(&self, id: i64) -> Result<T, NetBoxError> {
        let variant = self
            .client
            .execute(&self.endpoints.read, &RequestParams::for_id(id))
            .await?;
        Ok(variant.into_payload().unwrap_or_default())
    }

    /// Fetch the first page of the list route
    pub async fn list(&self, options: Option<&ListOptions>) -> Result<Page<T>, NetBoxError> {
        let params = match options {
            Some(options) => options.apply(RequestParams::new()),
            None => RequestParams::new(),
        };
        let variant = self.client.execute(&self.endpoints.list, &params).await?;
        Ok(variant.into_payload().unwrap_or_default())
    }

    /// Follow the `next` link of a page, if there is one
    ///
    /// The link must share the client's origin, since the request carries the
    /// API token.
    pub async fn next_page(&self, page: &Page<T>) -> Result<Option<Page<T>>, NetBoxError> {
        let Some(next) = &page.next else {
            return Ok(None);
        };
        self.check_origin(next)?;
        debug!("Fetching page: {}", next);
        let request = RequestDescriptor::follow(&self.endpoints.list, next.clone());
        let variant = self.client.round_trip(&self.endpoints.list, request).await?;
        Ok(Some(variant.into_payload().unwrap_or_default()))
    }

    /// Fetch every page of the list route
    ///
    /// Stops when a page has no `next` link or links back to a page already
    /// fetched.
    pub async fn list_all(&self, options: Option<&ListOptions>) -> Result<Vec<T>, NetBoxError> {
        let mut page = self.list(options).await?;
        let mut all_results = Vec::new();
        let mut seen = HashSet::new();
        loop {
            let repeated = page.next.as_ref().is_some_and(|next| !seen.insert(next.clone()));
            if repeated {
                debug!("Stopping pagination at repeated link: {:?}", page.next);
                all_results.extend(self.extract(page));
                break;
            }
            let next = self.next_page(&page).await?;
            all_results.extend(self.extract(page));
            match next {
                Some(next) => page = next,
                None => break,
            }
        }
        Ok(all_results)
    }

    fn check_origin(&self, link: &str) -> Result<(), NetBoxError> {
        let base = Url::parse(self.client.base_url())
            .map_err(|e| NetBoxError::InvalidRequest(format!("base URL is not a URL: {}", e)))?;
        let url = Url::parse(link)
            .map_err(|e| NetBoxError::InvalidRequest(format!("next link {} is not a URL: {}", link, e)))?;
        if url.origin() != base.origin() {
            return Err(NetBoxError::InvalidRequest(format!(
                "next link {} is not on {}",
                link,
                self.client.base_url()
            )));
        }
        Ok(())
    }

    /// Take the objects out of a page
    pub fn extract(&self, page: Page<T>) -> Vec<T> {
        page.results
    }

    /// Create an object and return the ID NetBox assigned
    pub async fn create(&self, data: &T) -> Result<i64, NetBoxError> {
        let variant = self
            .client
            .execute_with_body::<T, W>(&self.endpoints.create, &RequestParams::new(), data)
            .await?;
        Ok(variant.into_payload().unwrap_or_default().id())
    }

    /// Patch an existing object with the fields set in `data`
    pub async fn update(&self, data: &T) -> Result<i64, NetBoxError> {
        let variant = self
            .client
            .execute_with_body::<T, W>(&self.endpoints.partial_update, &RequestParams::for_id(data.id()), data)
            .await?;
        Ok(variant.into_payload().unwrap_or_default().id())
    }

    /// Replace an existing object with `data`
    pub async fn replace(&self, data: &T) -> Result<i64, NetBoxError> {
        let variant = self
            .client
            .execute_with_body::<T, W>(&self.endpoints.update, &RequestParams::for_id(data.id()), data)
            .await?;
        Ok(variant.into_payload().unwrap_or_default().id())
    }

    /// Delete an existing object
    pub async fn delete(&self, data: &T) -> Result<(), NetBoxError> {
        self.client
            .execute::<serde_json::Value>(&self.endpoints.delete, &RequestParams::for_id(data.id()))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::{circuits, tenancy};
    use crate::mock::MockTransport;
    use crate::models::{CircuitTermination, Contact, WritableCircuitTermination};
    use crate::transport::RawResponse;

    fn client() -> NetBoxClient<MockTransport> {
        NetBoxClient::with_transport(MockTransport::new("http://test-netbox"))
    }

    fn contact(id: i64, name: &str) -> Contact {
        Contact {
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_get_reads_by_id() {
        let client = client();
        client.transport().push_json(200, &contact(3, "Ada"));

        let contacts = client.service::<Contact>(&tenancy::CONTACTS);
        assert_eq!(contacts.get(3).await.expect("get"), contact(3, "Ada"));
        assert_eq!(client.transport().requests()[0].path, "/tenancy/contacts/3/");
    }

    #[tokio::test]
    async fn test_list_all_follows_next_links() {
        let client = client();
        client.transport().push_json(
            200,
            &Page {
                count: 3,
                next: Some("http://test-netbox/api/tenancy/contacts/?limit=2&offset=2".to_string()),
                previous: None,
                results: vec![contact(1, "Ada"), contact(2, "Grace")],
            },
        );
        client.transport().push_json(
            200,
            &Page {
                count: 3,
                next: None,
                previous: Some("http://test-netbox/api/tenancy/contacts/?limit=2".to_string()),
                results: vec![contact(3, "Edsger")],
            },
        );

        let contacts = client.service::<Contact>(&tenancy::CONTACTS);
        let all = contacts
            .list_all(Some(&ListOptions::new().limit(2)))
            .await
            .expect("list all");
        assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let sent = client.transport().requests();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].query, vec![("limit".to_string(), "2".to_string())]);
        assert_eq!(sent[1].path, "http://test-netbox/api/tenancy/contacts/?limit=2&offset=2");
    }

    #[tokio::test]
    async fn test_list_all_refuses_foreign_next_link() {
        let client = client();
        client.transport().push_json(
            200,
            &Page {
                count: 2,
                next: Some("http://elsewhere.example/api/tenancy/contacts/?offset=1".to_string()),
                previous: None,
                results: vec![contact(1, "Ada")],
            },
        );

        let contacts = client.service::<Contact>(&tenancy::CONTACTS);
        let err = contacts.list_all(None).await.expect_err("foreign host");
        assert!(matches!(err, NetBoxError::InvalidRequest(ref msg) if msg.contains("elsewhere.example")));
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_next_page_refuses_other_scheme_or_port() {
        let client = client();
        let contacts = client.service::<Contact>(&tenancy::CONTACTS);
        for next in [
            "https://test-netbox/api/tenancy/contacts/?offset=1",
            "http://test-netbox:8080/api/tenancy/contacts/?offset=1",
            "/api/tenancy/contacts/?offset=1",
        ] {
            let page = Page::<Contact> {
                next: Some(next.to_string()),
                ..Default::default()
            };
            assert!(contacts.next_page(&page).await.is_err(), "{}", next);
        }
        assert!(client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_list_all_stops_on_repeated_next_link() {
        let client = client();
        let looping = "http://test-netbox/api/tenancy/contacts/?offset=1".to_string();
        for id in 1..=2 {
            client.transport().push_json(
                200,
                &Page {
                    count: 2,
                    next: Some(looping.clone()),
                    previous: None,
                    results: vec![contact(id, "Ada")],
                },
            );
        }

        let contacts = client.service::<Contact>(&tenancy::CONTACTS);
        let all = contacts.list_all(None).await.expect("list all");
        assert_eq!(all.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(client.transport().requests().len(), 2);
        assert_eq!(client.transport().pending(), 0);
    }

    #[tokio::test]
    async fn test_create_returns_assigned_id() {
        let client = client();
        client.transport().push_json(201, &contact(42, "Ada"));

        let contacts = client.service::<Contact>(&tenancy::CONTACTS);
        let id = contacts.create(&contact(0, "Ada")).await.expect("create");
        assert_eq!(id, 42);

        let sent = client.transport().requests();
        assert_eq!(sent[0].method.as_str(), "POST");
        assert_eq!(sent[0].body, Some(serde_json::json!({"id": 0, "name": "Ada"})));
    }

    #[tokio::test]
    async fn test_update_patches_and_delete_expects_no_content() {
        let client = client();
        client.transport().push_json(200, &contact(5, "Ada L."));
        client.transport().push_response(RawResponse::from_status(204, ""));

        let contacts = client.service::<Contact>(&tenancy::CONTACTS);
        let updated = contact(5, "Ada L.");
        assert_eq!(contacts.update(&updated).await.expect("update"), 5);
        contacts.delete(&updated).await.expect("delete");

        let sent = client.transport().requests();
        assert_eq!(sent[0].method.as_str(), "PATCH");
        assert_eq!(sent[0].path, "/tenancy/contacts/5/");
        assert_eq!(sent[1].method.as_str(), "DELETE");
        assert_eq!(sent[1].path, "/tenancy/contacts/5/");
    }

    #[tokio::test]
    async fn test_delete_rejects_ok_status() {
        let client = client();
        client.transport().push_response(RawResponse::from_status(200, "{}"));

        let contacts = client.service::<Contact>(&tenancy::CONTACTS);
        let err = contacts.delete(&contact(5, "Ada")).await.expect_err("200 is not in the delete table");
        assert_eq!(err.unexpected_status(), Some(200));
    }

    #[tokio::test]
    async fn test_update_type_decodes_write_responses() {
        let client = client();
        client.transport().push_response(RawResponse::from_status(
            201,
            r#"{"id":8,"circuit":{"id":2,"cid":"C-2"},"term_side":"A"}"#,
        ));

        let terminations = client
            .service_with_update_type::<WritableCircuitTermination, CircuitTermination>(&circuits::CIRCUIT_TERMINATIONS);
        let id = terminations
            .create(&WritableCircuitTermination {
                circuit: 2,
                term_side: "A".to_string(),
                ..Default::default()
            })
            .await
            .expect("create");
        assert_eq!(id, 8);

        let sent = client.transport().requests();
        assert_eq!(sent[0].path, "/circuits/circuit-terminations/");
        assert_eq!(
            sent[0].body,
            Some(serde_json::json!({"id": 0, "circuit": 2, "term_side": "A", "mark_connected": false}))
        );
    }
}
