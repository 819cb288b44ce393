//! Circuits app routes

use crate::endpoint::ResourceEndpoints;
use crate::resource_endpoints;

pub static CIRCUITS: ResourceEndpoints = resource_endpoints!("circuits", "circuits", "circuits_circuits");
pub static CIRCUIT_TERMINATIONS: ResourceEndpoints =
    resource_endpoints!("circuits", "circuit-terminations", "circuits_circuit_terminations");
pub static CIRCUIT_TYPES: ResourceEndpoints =
    resource_endpoints!("circuits", "circuit-types", "circuits_circuit_types");
pub static PROVIDERS: ResourceEndpoints = resource_endpoints!("circuits", "providers", "circuits_providers");
