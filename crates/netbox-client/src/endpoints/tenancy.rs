//! Tenancy app routes

use crate::endpoint::ResourceEndpoints;
use crate::resource_endpoints;

pub static CONTACTS: ResourceEndpoints = resource_endpoints!("tenancy", "contacts", "tenancy_contacts");
pub static CONTACT_GROUPS: ResourceEndpoints =
    resource_endpoints!("tenancy", "contact-groups", "tenancy_contact_groups");
pub static CONTACT_ROLES: ResourceEndpoints =
    resource_endpoints!("tenancy", "contact-roles", "tenancy_contact_roles");
pub static TENANTS: ResourceEndpoints = resource_endpoints!("tenancy", "tenants", "tenancy_tenants");
pub static TENANT_GROUPS: ResourceEndpoints =
    resource_endpoints!("tenancy", "tenant-groups", "tenancy_tenant_groups");
