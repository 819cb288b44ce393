//! Endpoint descriptors
//!
//! An [`Endpoint`] is the static contract of one verb + path on the NetBox API:
//! the parameters it declares and the table mapping each documented status code
//! to a response variant. Descriptors are built at compile time and never change.

use std::fmt;

/// HTTP verbs used by the NetBox API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Upper-case verb as sent on the wire
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Convert to the reqwest method type
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter is written in the outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSlot {
    /// Substituted into a `{name}` placeholder of the path template
    Path,
    /// Appended as a `name=value` query pair
    Query,
}

/// Declared type of a parameter, which also selects its formatting rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int64,
    Float64,
    Bool,
    String,
    DateTime,
    StringList,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Int64 => "int64",
            ParamKind::Float64 => "float64",
            ParamKind::Bool => "bool",
            ParamKind::String => "string",
            ParamKind::DateTime => "date-time",
            ParamKind::StringList => "string list",
        };
        f.write_str(name)
    }
}

/// A declared request parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub slot: ParamSlot,
    pub kind: ParamKind,
    pub required: bool,
}

impl ParamSpec {
    /// Path parameters are always required
    pub const fn path(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            slot: ParamSlot::Path,
            kind,
            required: true,
        }
    }

    /// Optional query parameter
    pub const fn query(name: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            slot: ParamSlot::Query,
            kind,
            required: false,
        }
    }

    /// Mark a query parameter as required
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Whether a response variant carries a decoded body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Payload,
    Empty,
}

/// One row of an endpoint's status table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: u16,
    /// Variant name, e.g. `OK` or `NoContent`
    pub name: &'static str,
    pub body: BodyKind,
}

impl StatusEntry {
    pub const fn payload(code: u16, name: &'static str) -> Self {
        Self {
            code,
            name,
            body: BodyKind::Payload,
        }
    }

    pub const fn empty(code: u16, name: &'static str) -> Self {
        Self {
            code,
            name,
            body: BodyKind::Empty,
        }
    }
}

/// `id` path parameter shared by every detail route
pub const ID_PARAMS: &[ParamSpec] = &[ParamSpec::path("id", ParamKind::Int64)];

/// Pagination and search parameters shared by every list route
pub const LIST_PARAMS: &[ParamSpec] = &[
    ParamSpec::query("limit", ParamKind::Int64),
    ParamSpec::query("offset", ParamKind::Int64),
    ParamSpec::query("q", ParamKind::String),
];

pub const NO_PARAMS: &[ParamSpec] = &[];

/// 200 with a body
pub const OK: &[StatusEntry] = &[StatusEntry::payload(200, "OK")];
/// 201 with a body
pub const CREATED: &[StatusEntry] = &[StatusEntry::payload(201, "Created")];
/// 204 without a body
pub const NO_CONTENT: &[StatusEntry] = &[StatusEntry::empty(204, "NoContent")];

/// Static contract of one verb + path on the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Schema operation id, e.g. `tenancy_contacts_partial_update`
    pub operation_id: &'static str,
    pub method: HttpMethod,
    /// Path template relative to `/api`, e.g. `/tenancy/contacts/{id}/`
    pub path: &'static str,
    pub params: &'static [ParamSpec],
    /// Whether a JSON request body is sent
    pub accepts_body: bool,
    pub responses: &'static [StatusEntry],
}

impl Endpoint {
    pub const fn new(
        operation_id: &'static str,
        method: HttpMethod,
        path: &'static str,
        params: &'static [ParamSpec],
        accepts_body: bool,
        responses: &'static [StatusEntry],
    ) -> Self {
        Self {
            operation_id,
            method,
            path,
            params,
            accepts_body,
            responses,
        }
    }

    /// Look up the status table row for a received status code
    pub fn response_for(&self, code: u16) -> Option<&'static StatusEntry> {
        self.responses.iter().find(|entry| entry.code == code)
    }

    /// Look up a declared parameter by name
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    /// Status codes documented for this endpoint, in table order
    pub fn status_codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.responses.iter().map(|entry| entry.code)
    }

    /// Operation id in the schema's camel case, e.g. `tenancyContactsPartialUpdate`
    pub fn operation_name(&self) -> String {
        camel_case(self.operation_id)
    }
}

/// `tenancy_contacts_partial_update` -> `tenancyContactsPartialUpdate`
pub fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' || c == '-' {
            upper = !out.is_empty();
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// The six routes NetBox exposes for a model resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEndpoints {
    pub list: Endpoint,
    pub create: Endpoint,
    pub read: Endpoint,
    pub update: Endpoint,
    pub partial_update: Endpoint,
    pub delete: Endpoint,
}

impl ResourceEndpoints {
    /// All routes of the resource
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        [
            &self.list,
            &self.create,
            &self.read,
            &self.update,
            &self.partial_update,
            &self.delete,
        ]
        .into_iter()
    }
}

/// Build the [`ResourceEndpoints`] table for one `app/service` pair.
///
/// ```
/// use netbox_client::resource_endpoints;
///
/// static CABLES: netbox_client::ResourceEndpoints =
///     resource_endpoints!("dcim", "cables", "dcim_cables");
/// assert_eq!(CABLES.read.path, "/dcim/cables/{id}/");
/// ```
#[macro_export]
macro_rules! resource_endpoints {
    ($app:literal, $service:literal, $operation:literal) => {
        $crate::endpoint::ResourceEndpoints {
            list: $crate::endpoint::Endpoint::new(
                concat!($operation, "_list"),
                $crate::endpoint::HttpMethod::Get,
                concat!("/", $app, "/", $service, "/"),
                $crate::endpoint::LIST_PARAMS,
                false,
                $crate::endpoint::OK,
            ),
            create: $crate::endpoint::Endpoint::new(
                concat!($operation, "_create"),
                $crate::endpoint::HttpMethod::Post,
                concat!("/", $app, "/", $service, "/"),
                $crate::endpoint::NO_PARAMS,
                true,
                $crate::endpoint::CREATED,
            ),
            read: $crate::endpoint::Endpoint::new(
                concat!($operation, "_read"),
                $crate::endpoint::HttpMethod::Get,
                concat!("/", $app, "/", $service, "/{id}/"),
                $crate::endpoint::ID_PARAMS,
                false,
                $crate::endpoint::OK,
            ),
            update: $crate::endpoint::Endpoint::new(
                concat!($operation, "_update"),
                $crate::endpoint::HttpMethod::Put,
                concat!("/", $app, "/", $service, "/{id}/"),
                $crate::endpoint::ID_PARAMS,
                true,
                $crate::endpoint::OK,
            ),
            partial_update: $crate::endpoint::Endpoint::new(
                concat!($operation, "_partial_update"),
                $crate::endpoint::HttpMethod::Patch,
                concat!("/", $app, "/", $service, "/{id}/"),
                $crate::endpoint::ID_PARAMS,
                true,
                $crate::endpoint::OK,
            ),
            delete: $crate::endpoint::Endpoint::new(
                concat!($operation, "_delete"),
                $crate::endpoint::HttpMethod::Delete,
                concat!("/", $app, "/", $service, "/{id}/"),
                $crate::endpoint::ID_PARAMS,
                false,
                $crate::endpoint::NO_CONTENT,
            ),
        }
    };
}
