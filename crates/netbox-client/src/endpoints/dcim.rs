//! DCIM app routes

use crate::endpoint::ResourceEndpoints;
use crate::resource_endpoints;

pub static DEVICES: ResourceEndpoints = resource_endpoints!("dcim", "devices", "dcim_devices");
pub static MODULE_BAYS: ResourceEndpoints = resource_endpoints!("dcim", "module-bays", "dcim_module_bays");
pub static MODULES: ResourceEndpoints = resource_endpoints!("dcim", "modules", "dcim_modules");
pub static SITES: ResourceEndpoints = resource_endpoints!("dcim", "sites", "dcim_sites");
