//! NetBox service generator library.
//!
//! Stamps out a typed service for one NetBox resource: the resource's
//! endpoint table and a wrapper struct whose `get`, `list`, `extract`,
//! `create`, `update` and `delete` methods delegate to
//! `netbox_client::ResourceService`.
//!
//! ## Modules
//!
//! - [`template`] - Service template inputs and rendering
//! - [`output`] - Validation, formatting and file writing
//! - [`errors`] - Error types for the generator
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use netbox_gen::output::generate_and_write;
//! use netbox_gen::template::ServiceTemplate;
//!
//! let template = ServiceTemplate::new("TenantGroup", "TenantGroupsService", "tenancy", "tenant-groups");
//!
//! // dry_run=true returns the code without touching disk
//! let code = generate_and_write(&template, Path::new("src"), true).unwrap();
//! println!("{}", code);
//! ```

pub mod errors;
pub mod output;
pub mod template;
