//! Service template.
//!
//! A [`ServiceTemplate`] holds the generator's inputs for one resource and
//! renders them to a token stream containing:
//!
//! - the resource's `ResourceEndpoints` table (six routes, the standard NetBox
//!   status table for each)
//! - a `{ServiceName}<'c, Tr>` wrapper whose methods delegate to
//!   `ResourceService`
//!
//! ## Example
//!
//! For `--type-name TenantGroup --service-name TenantGroupsService
//! --endpoint tenancy --service tenant-groups`:
//!
//! ```text
//! pub static TENANT_GROUPS: ResourceEndpoints = ResourceEndpoints { ... };
//!
//! pub struct TenantGroupsService<'c, Tr> { ... }
//!
//! impl<'c, Tr: Transport> TenantGroupsService<'c, Tr> {
//!     pub fn new(client: &'c NetBoxClient<Tr>) -> Self;
//!     pub async fn get(&self, id: i64) -> Result<TenantGroup, NetBoxError>;
//!     pub async fn list(&self, options: Option<&ListOptions>) -> Result<Page<TenantGroup>, NetBoxError>;
//!     ...
//! }
//! ```

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};

use crate::errors::GeneratorError;

/// Crate the generated code imports the client from
pub const DEFAULT_CRATE_PATH: &str = "netbox_client";

/// Module the generated code imports model types from
pub const DEFAULT_MODELS_PATH: &str = "netbox_client::models";

/// Inputs for one generated service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceTemplate {
    /// Model read back from the API, e.g. `TenantGroup`
    pub type_name: String,
    /// Name of the generated wrapper, e.g. `TenantGroupsService`
    pub service_name: String,
    /// NetBox app, e.g. `tenancy`
    pub endpoint: String,
    /// Resource below the app, e.g. `tenant-groups`
    pub service: String,
    /// Model create and update responses decode into; `type_name` when unset
    pub update_type_name: Option<String>,
    /// Whether `list` takes `ListOptions`
    pub list_opts: bool,
    pub crate_path: String,
    pub models_path: String,
}

impl ServiceTemplate {
    pub fn new(
        type_name: impl Into<String>,
        service_name: impl Into<String>,
        endpoint: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            service_name: service_name.into(),
            endpoint: endpoint.into(),
            service: service.into(),
            update_type_name: None,
            list_opts: true,
            crate_path: DEFAULT_CRATE_PATH.to_string(),
            models_path: DEFAULT_MODELS_PATH.to_string(),
        }
    }

    pub fn with_update_type_name(mut self, name: impl Into<String>) -> Self {
        self.update_type_name = Some(name.into());
        self
    }

    pub fn with_list_opts(mut self, list_opts: bool) -> Self {
        self.list_opts = list_opts;
        self
    }

    pub fn with_crate_path(mut self, path: impl Into<String>) -> Self {
        self.crate_path = path.into();
        self
    }

    pub fn with_models_path(mut self, path: impl Into<String>) -> Self {
        self.models_path = path.into();
        self
    }

    /// Effective update type; an empty name falls back to `type_name`
    pub fn update_type_name(&self) -> &str {
        self.update_type_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.type_name)
    }

    /// Operation id prefix, e.g. `tenancy_tenant_groups`
    pub fn operation_prefix(&self) -> String {
        format!("{}_{}", self.endpoint, self.service).replace('-', "_")
    }

    /// Collection route, e.g. `/tenancy/tenant-groups/`
    pub fn collection_path(&self) -> String {
        format!("/{}/{}/", self.endpoint, self.service)
    }

    /// Detail route, e.g. `/tenancy/tenant-groups/{id}/`
    pub fn detail_path(&self) -> String {
        format!("/{}/{}/{{id}}/", self.endpoint, self.service)
    }

    /// Name of the generated endpoint table, e.g. `TENANT_GROUPS`
    pub fn table_name(&self) -> String {
        self.service.replace('-', "_").to_uppercase()
    }

    /// Output file name, e.g. `tenancy_tenant_groups.rs`
    ///
    /// Hyphens become underscores so the file can be declared as a module.
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.operation_prefix())
    }

    /// Render the service module
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unusable app or resource name and
    /// `RenderError` when a type, service or path input is not valid Rust.
    pub fn render(&self) -> Result<TokenStream, GeneratorError> {
        check_segment("endpoint", &self.endpoint)?;
        check_segment("service", &self.service)?;

        let type_ident = parse_ident("type-name", &self.type_name)?;
        let update_ident = parse_ident("update-type-name", self.update_type_name())?;
        let service_ident = parse_ident("service-name", &self.service_name)?;
        let krate = parse_path("crate-path", &self.crate_path)?;
        let models = parse_path("models-path", &self.models_path)?;

        let table = format_ident!("{}", self.table_name());
        let prefix = self.operation_prefix();
        let op = |suffix: &str| Literal::string(&format!("{}_{}", prefix, suffix));
        let (list_op, create_op, read_op) = (op("list"), op("create"), op("read"));
        let (update_op, patch_op, delete_op) = (op("update"), op("partial_update"), op("delete"));
        let collection = Literal::string(&self.collection_path());
        let detail = Literal::string(&self.detail_path());

        let resource = format!("{}/{}", self.endpoint, self.service);
        let module_doc = format!(" `{}` service.", resource);
        let table_doc = format!(" Routes of NetBox's {} API.", resource);
        let struct_doc = format!(
            " `{}` is used with a client to access NetBox's {} API methods.",
            self.service_name, resource
        );
        let get_doc = format!(" Get retrieves a {} object from NetBox by its ID.", self.type_name);
        let list_doc = format!(" List returns the first page of {} objects.", self.type_name);
        let extract_doc = format!(" Extract retrieves the {} objects from a page.", self.type_name);
        let create_doc = format!(
            " Create creates a new {} object in NetBox and returns the ID of the new object.",
            self.type_name
        );
        let update_doc = format!(
            " Update changes an existing {} object in NetBox, and returns the ID of the object.",
            self.type_name
        );
        let delete_doc = format!(" Delete deletes an existing {} object from NetBox.", self.type_name);

        let model_use = if type_ident == update_ident {
            quote!(use #models::#type_ident;)
        } else {
            quote!(use #models::{#type_ident, #update_ident};)
        };

        let (list_import, list_method) = if self.list_opts {
            (
                quote!(ListOptions,),
                quote! {
                    #[doc = #list_doc]
                    pub async fn list(&self, options: Option<&ListOptions>) -> Result<Page<#type_ident>, NetBoxError> {
                        self.inner.list(options).await
                    }
                },
            )
        } else {
            (
                quote!(),
                quote! {
                    #[doc = #list_doc]
                    pub async fn list(&self) -> Result<Page<#type_ident>, NetBoxError> {
                        self.inner.list(None).await
                    }
                },
            )
        };

        Ok(quote! {
            #![doc = #module_doc]

            use #krate::endpoint::{
                CREATED, Endpoint, HttpMethod, ID_PARAMS, LIST_PARAMS, NO_CONTENT, NO_PARAMS, OK, ResourceEndpoints,
            };
            use #krate::{#list_import NetBoxClient, NetBoxError, Page, ResourceService, Transport};
            #model_use

            #[doc = #table_doc]
            pub static #table: ResourceEndpoints = ResourceEndpoints {
                list: Endpoint::new(#list_op, HttpMethod::Get, #collection, LIST_PARAMS, false, OK),
                create: Endpoint::new(#create_op, HttpMethod::Post, #collection, NO_PARAMS, true, CREATED),
                read: Endpoint::new(#read_op, HttpMethod::Get, #detail, ID_PARAMS, false, OK),
                update: Endpoint::new(#update_op, HttpMethod::Put, #detail, ID_PARAMS, true, OK),
                partial_update: Endpoint::new(#patch_op, HttpMethod::Patch, #detail, ID_PARAMS, true, OK),
                delete: Endpoint::new(#delete_op, HttpMethod::Delete, #detail, ID_PARAMS, false, NO_CONTENT),
            };

            #[doc = #struct_doc]
            #[derive(Debug)]
            pub struct #service_ident<'c, Tr> {
                inner: ResourceService<'c, Tr, #type_ident, #update_ident>,
            }

            impl<'c, Tr: Transport> #service_ident<'c, Tr> {
                pub fn new(client: &'c NetBoxClient<Tr>) -> Self {
                    Self {
                        inner: client.service_with_update_type(&#table),
                    }
                }

                #[doc = #get_doc]
                pub async fn get(&self, id: i64) -> Result<#type_ident, NetBoxError> {
                    self.inner.get(id).await
                }

                #list_method

                #[doc = #extract_doc]
                pub fn extract(&self, page: Page<#type_ident>) -> Vec<#type_ident> {
                    self.inner.extract(page)
                }

                #[doc = #create_doc]
                pub async fn create(&self, data: &#type_ident) -> Result<i64, NetBoxError> {
                    self.inner.create(data).await
                }

                #[doc = #update_doc]
                pub async fn update(&self, data: &#type_ident) -> Result<i64, NetBoxError> {
                    self.inner.update(data).await
                }

                #[doc = #delete_doc]
                pub async fn delete(&self, data: &#type_ident) -> Result<(), NetBoxError> {
                    self.inner.delete(data).await
                }
            }
        })
    }
}

/// App and resource names must be lowercase URL segments starting with a letter
fn check_segment(flag: &str, value: &str) -> Result<(), GeneratorError> {
    let starts_with_letter = value.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let valid_chars = value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if starts_with_letter && valid_chars {
        Ok(())
    } else {
        Err(GeneratorError::ConfigError(format!(
            "--{} '{}' must be a lowercase path segment (e.g. tenancy, tenant-groups)",
            flag, value
        )))
    }
}

fn parse_ident(flag: &str, value: &str) -> Result<syn::Ident, GeneratorError> {
    syn::parse_str(value).map_err(|e| {
        GeneratorError::RenderError(format!("--{} '{}' is not a Rust identifier: {}", flag, value, e))
    })
}

fn parse_path(flag: &str, value: &str) -> Result<syn::Path, GeneratorError> {
    syn::parse_str(value)
        .map_err(|e| GeneratorError::RenderError(format!("--{} '{}' is not a Rust path: {}", flag, value, e)))
}
