//! Endpoint registry
//!
//! Every route this client knows, grouped by NetBox app. The tables here are
//! the compatibility surface with the remote API.

pub mod circuits;
pub mod dcim;
pub mod tenancy;

use crate::endpoint::{Endpoint, HttpMethod, NO_PARAMS, OK, ResourceEndpoints};

/// `GET /status/`
pub static STATUS: Endpoint = Endpoint::new("status_list", HttpMethod::Get, "/status/", NO_PARAMS, false, OK);

/// Registered resources keyed by `app/service`
pub static RESOURCES: &[(&str, &ResourceEndpoints)] = &[
    ("circuits/circuits", &circuits::CIRCUITS),
    ("circuits/circuit-terminations", &circuits::CIRCUIT_TERMINATIONS),
    ("circuits/circuit-types", &circuits::CIRCUIT_TYPES),
    ("circuits/providers", &circuits::PROVIDERS),
    ("dcim/devices", &dcim::DEVICES),
    ("dcim/module-bays", &dcim::MODULE_BAYS),
    ("dcim/modules", &dcim::MODULES),
    ("dcim/sites", &dcim::SITES),
    ("tenancy/contacts", &tenancy::CONTACTS),
    ("tenancy/contact-groups", &tenancy::CONTACT_GROUPS),
    ("tenancy/contact-roles", &tenancy::CONTACT_ROLES),
    ("tenancy/tenants", &tenancy::TENANTS),
    ("tenancy/tenant-groups", &tenancy::TENANT_GROUPS),
];

/// Every registered endpoint
pub fn all() -> impl Iterator<Item = &'static Endpoint> {
    std::iter::once(&STATUS).chain(RESOURCES.iter().flat_map(|&(_, resource)| resource.iter()))
}

/// Look up an endpoint by operation id, e.g. `dcim_module_bays_delete`
pub fn find(operation_id: &str) -> Option<&'static Endpoint> {
    all().find(|endpoint| endpoint.operation_id == operation_id)
}

/// Look up a resource by app and service, e.g. `("tenancy", "contacts")`
pub fn resource(app: &str, service: &str) -> Option<&'static ResourceEndpoints> {
    RESOURCES
        .iter()
        .find(|(key, _)| key.split_once('/') == Some((app, service)))
        .map(|(_, resource)| *resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Page;
    use crate::dispatch::dispatch;
    use crate::endpoint::{BodyKind, ParamKind, ParamSlot};
    use crate::models::*;
    use crate::transport::RawResponse;
    use serde::Serialize;
    use serde::de::DeserializeOwned;
    use std::collections::HashSet;
    use std::fmt::Debug;

    #[test]
    fn test_operation_ids_are_unique() {
        let mut seen = HashSet::new();
        for endpoint in all() {
            assert!(seen.insert(endpoint.operation_id), "duplicate {}", endpoint.operation_id);
        }
        assert_eq!(seen.len(), 1 + RESOURCES.len() * 6);
    }

    #[test]
    fn test_circuit_termination_read_contract() {
        let endpoint = find("circuits_circuit_terminations_read").expect("registered");
        assert_eq!(endpoint.method, HttpMethod::Get);
        assert_eq!(endpoint.path, "/circuits/circuit-terminations/{id}/");
        assert_eq!(endpoint.params.len(), 1);
        assert_eq!(endpoint.params[0].name, "id");
        assert_eq!(endpoint.params[0].slot, ParamSlot::Path);
        assert_eq!(endpoint.params[0].kind, ParamKind::Int64);
        assert_eq!(endpoint.status_codes().collect::<Vec<_>>(), vec![200]);
        assert_eq!(endpoint.responses[0].body, BodyKind::Payload);
    }

    #[test]
    fn test_module_bay_delete_contract() {
        let endpoint = find("dcim_module_bays_delete").expect("registered");
        assert_eq!(endpoint.to_string(), "DELETE /dcim/module-bays/{id}/");
        assert_eq!(endpoint.status_codes().collect::<Vec<_>>(), vec![204]);
        assert_eq!(endpoint.responses[0].body, BodyKind::Empty);
        assert!(!endpoint.accepts_body);
    }

    #[test]
    fn test_contact_partial_update_contract() {
        let endpoint = &tenancy::CONTACTS.partial_update;
        assert_eq!(endpoint.to_string(), "PATCH /tenancy/contacts/{id}/");
        assert_eq!(endpoint.status_codes().collect::<Vec<_>>(), vec![200]);
        assert!(endpoint.accepts_body);
    }

    #[test]
    fn test_resource_lookup() {
        let contacts = resource("tenancy", "contacts").expect("contacts");
        assert_eq!(contacts.list.path, "/tenancy/contacts/");
        assert!(resource("tenancy", "widgets").is_none());
        assert!(resource("dcim", "contacts").is_none());
    }

    #[test]
    fn test_every_detail_route_takes_an_int_id() {
        for (_, resource) in RESOURCES {
            for endpoint in [&resource.read, &resource.update, &resource.partial_update, &resource.delete] {
                let id = endpoint.param("id").expect("id param");
                assert_eq!(id.kind, ParamKind::Int64, "{}", endpoint.operation_id);
                assert!(endpoint.path.ends_with("/{id}/"), "{}", endpoint.operation_id);
            }
        }
    }

    fn assert_round_trips<T>(key: &str, resource: &ResourceEndpoints, sample: T)
    where
        T: Serialize + DeserializeOwned + Default + PartialEq + Debug + Clone,
    {
        for endpoint in resource.iter() {
            for entry in endpoint.responses {
                let is_list = endpoint.operation_id.ends_with("_list");
                let body = if is_list {
                    let page = Page {
                        count: 1,
                        next: None,
                        previous: None,
                        results: vec![sample.clone()],
                    };
                    serde_json::to_vec(&page).expect("encode page")
                } else {
                    serde_json::to_vec(&sample).expect("encode")
                };
                let response = RawResponse::from_status(entry.code, body);

                match (entry.body, is_list) {
                    (BodyKind::Empty, _) => {
                        let variant = dispatch::<T>(endpoint, response).expect("dispatch");
                        assert!(variant.is_empty(), "{} {}", key, endpoint.operation_id);
                    }
                    (BodyKind::Payload, true) => {
                        let variant = dispatch::<Page<T>>(endpoint, response).expect("dispatch");
                        let page = variant.into_payload().expect("payload");
                        assert_eq!(page.results, vec![sample.clone()], "{} {}", key, endpoint.operation_id);
                    }
                    (BodyKind::Payload, false) => {
                        let variant = dispatch::<T>(endpoint, response).expect("dispatch");
                        assert_eq!(variant.into_payload(), Some(sample.clone()), "{} {}", key, endpoint.operation_id);
                    }
                }
            }
        }
    }

    fn tag() -> NestedTag {
        NestedTag {
            id: 9,
            ..Default::default()
        }
    }

    fn tenant() -> Option<NestedTenant> {
        Some(NestedTenant {
            id: 5,
            name: "Acme".to_string(),
            slug: "acme".to_string(),
            ..Default::default()
        })
    }

    fn site() -> Option<NestedSite> {
        Some(NestedSite {
            id: 6,
            name: "DC1".to_string(),
            slug: "dc1".to_string(),
            ..Default::default()
        })
    }

    fn device() -> Option<NestedDevice> {
        Some(NestedDevice {
            id: 7,
            name: Some("edge-1".to_string()),
            ..Default::default()
        })
    }

    fn active() -> Option<Choice> {
        Some(Choice {
            value: "active".to_string(),
            label: "Active".to_string(),
        })
    }

    #[test]
    fn test_every_registered_resource_round_trips_through_dispatch() {
        for &(key, resource) in RESOURCES {
            match key {
                "circuits/circuits" => assert_round_trips(key, resource, Circuit {
                    id: 1,
                    cid: "C-1".to_string(),
                    provider: Some(NestedProvider {
                        id: 2,
                        name: "Telco".to_string(),
                        ..Default::default()
                    }),
                    circuit_type: Some(NestedCircuitType {
                        id: 3,
                        slug: "transit".to_string(),
                        ..Default::default()
                    }),
                    status: active(),
                    tenant: tenant(),
                    commit_rate: Some(10_000),
                    tags: vec![tag()],
                    ..Default::default()
                }),
                "circuits/circuit-terminations" => assert_round_trips(key, resource, CircuitTermination {
                    id: 8,
                    circuit: Some(NestedCircuit {
                        id: 1,
                        cid: "C-1".to_string(),
                        ..Default::default()
                    }),
                    term_side: "A".to_string(),
                    site: site(),
                    port_speed: Some(1_000_000),
                    mark_connected: true,
                    ..Default::default()
                }),
                "circuits/circuit-types" => assert_round_trips(key, resource, CircuitType {
                    id: 3,
                    name: "Transit".to_string(),
                    slug: "transit".to_string(),
                    description: Some("IP transit".to_string()),
                    ..Default::default()
                }),
                "circuits/providers" => assert_round_trips(key, resource, Provider {
                    id: 2,
                    name: "Telco".to_string(),
                    slug: "telco".to_string(),
                    circuit_count: 4,
                    ..Default::default()
                }),
                "dcim/devices" => assert_round_trips(key, resource, Device {
                    id: 7,
                    name: Some("edge-1".to_string()),
                    site: site(),
                    tenant: tenant(),
                    status: active(),
                    serial: Some("SN123".to_string()),
                    tags: vec![tag()],
                    ..Default::default()
                }),
                "dcim/module-bays" => assert_round_trips(key, resource, ModuleBay {
                    id: 11,
                    device: device(),
                    name: "Slot 1".to_string(),
                    installed_module: Some(NestedModule {
                        id: 12,
                        device: device(),
                        ..Default::default()
                    }),
                    position: Some("1".to_string()),
                    ..Default::default()
                }),
                "dcim/modules" => assert_round_trips(key, resource, Module {
                    id: 12,
                    device: device(),
                    serial: Some("MOD-1".to_string()),
                    ..Default::default()
                }),
                "dcim/sites" => assert_round_trips(key, resource, Site {
                    id: 6,
                    name: "DC1".to_string(),
                    slug: "dc1".to_string(),
                    status: active(),
                    tenant: tenant(),
                    time_zone: Some("Europe/London".to_string()),
                    ..Default::default()
                }),
                "tenancy/contacts" => assert_round_trips(key, resource, Contact {
                    id: 3,
                    name: "Ada".to_string(),
                    group: Some(NestedContactGroup {
                        id: 4,
                        name: "NOC".to_string(),
                        ..Default::default()
                    }),
                    email: Some("ada@example.com".to_string()),
                    custom_fields: serde_json::json!({"pager": "555-0100"}),
                    tags: vec![tag()],
                    ..Default::default()
                }),
                "tenancy/contact-groups" => assert_round_trips(key, resource, ContactGroup {
                    id: 4,
                    name: "NOC".to_string(),
                    slug: "noc".to_string(),
                    parent: Some(NestedContactGroup {
                        id: 1,
                        name: "Ops".to_string(),
                        ..Default::default()
                    }),
                    contact_count: 12,
                    depth: 1,
                    ..Default::default()
                }),
                "tenancy/contact-roles" => assert_round_trips(key, resource, ContactRole {
                    id: 2,
                    name: "On call".to_string(),
                    slug: "on-call".to_string(),
                    ..Default::default()
                }),
                "tenancy/tenants" => assert_round_trips(key, resource, Tenant {
                    id: 5,
                    name: "Acme".to_string(),
                    slug: "acme".to_string(),
                    group: Some(NestedTenantGroup {
                        id: 1,
                        name: "Customers".to_string(),
                        ..Default::default()
                    }),
                    tags: vec![tag()],
                    ..Default::default()
                }),
                "tenancy/tenant-groups" => assert_round_trips(key, resource, TenantGroup {
                    id: 1,
                    name: "Customers".to_string(),
                    slug: "customers".to_string(),
                    tenant_count: 3,
                    ..Default::default()
                }),
                other => panic!("no round-trip sample for {}", other),
            }
        }
    }
}
