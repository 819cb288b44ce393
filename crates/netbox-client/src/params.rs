//! Request parameter builder
//!
//! [`RequestParams`] holds the values for one call. Writing them into a
//! [`RequestDescriptor`] formats each value with the rule of its declared
//! [`ParamKind`] and places it into the declared slot. Every parameter is
//! attempted; failures are reported together as one [`ParameterEncodingError`].

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::endpoint::{Endpoint, ParamKind, ParamSlot, ParamSpec};
use crate::error::{ParameterEncodingError, ParameterError};
use crate::transport::RequestDescriptor;

/// Client timeout used when configuration does not set one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A typed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    DateTime(DateTime<Utc>),
    StrList(Vec<String>),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_) => ParamKind::Int64,
            ParamValue::Float(_) => ParamKind::Float64,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Str(_) => ParamKind::String,
            ParamValue::DateTime(_) => ParamKind::DateTime,
            ParamValue::StrList(_) => ParamKind::StringList,
        }
    }

    /// Render the value as one or more wire strings.
    ///
    /// Lists render one string per element so query slots repeat the key.
    fn render(&self) -> Result<Vec<String>, String> {
        match self {
            ParamValue::Int(v) => Ok(vec![v.to_string()]),
            ParamValue::Float(v) if !v.is_finite() => {
                Err(format!("{} is not a finite number", v))
            }
            ParamValue::Float(v) => Ok(vec![v.to_string()]),
            ParamValue::Bool(v) => Ok(vec![v.to_string()]),
            ParamValue::Str(v) => Ok(vec![v.clone()]),
            ParamValue::DateTime(v) => Ok(vec![v.to_rfc3339_opts(SecondsFormat::Millis, true)]),
            ParamValue::StrList(v) => Ok(v.clone()),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(v: DateTime<Utc>) -> Self {
        ParamValue::DateTime(v)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(v: Vec<String>) -> Self {
        ParamValue::StrList(v)
    }
}

/// Values, timeout and cancellation for a single call
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    values: BTreeMap<String, ParamValue>,
    timeout: Option<Duration>,
    cancellation: Option<CancellationToken>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Params with only the `id` path parameter set
    pub fn for_id(id: i64) -> Self {
        Self::new().with_id(id)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.set_timeout(timeout);
        self
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Timeout set for this call
    ///
    /// `None` leaves the transport's own timeout in force, which for
    /// [`crate::HttpClient`] is the configured client timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.set_cancellation(token);
        self
    }

    pub fn set_cancellation(&mut self, token: CancellationToken) {
        self.cancellation = Some(token);
    }

    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    pub fn with_id(self, id: i64) -> Self {
        self.with_value("id", id)
    }

    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set_value(name, value);
        self
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn value(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Write every parameter into `request`.
    ///
    /// Declared parameters go to their declared slot; undeclared values are
    /// forwarded as query filters. The descriptor is only modified when every
    /// parameter encodes.
    pub fn write_to_request(
        &self,
        endpoint: &Endpoint,
        request: &mut RequestDescriptor,
    ) -> Result<(), ParameterEncodingError> {
        let mut errors = Vec::new();
        let mut path = endpoint.path.to_string();
        let mut query = Vec::new();

        for spec in endpoint.params {
            let Some(value) = self.values.get(spec.name) else {
                if spec.required {
                    errors.push(ParameterError::new(spec.name, "required parameter is missing"));
                }
                continue;
            };

            match encode(spec, value) {
                Ok(rendered) => match spec.slot {
                    ParamSlot::Path => {
                        let placeholder = format!("{{{}}}", spec.name);
                        let segment = rendered.concat();
                        path = path.replace(&placeholder, &urlencoding::encode(&segment));
                    }
                    ParamSlot::Query => {
                        query.extend(rendered.into_iter().map(|v| (spec.name.to_string(), v)));
                    }
                },
                Err(reason) => errors.push(ParameterError::new(spec.name, reason)),
            }
        }

        for (name, value) in &self.values {
            if endpoint.param(name).is_some() {
                continue;
            }
            match value.render() {
                Ok(rendered) => query.extend(rendered.into_iter().map(|v| (name.clone(), v))),
                Err(reason) => errors.push(ParameterError::new(name.clone(), reason)),
            }
        }

        for name in unfilled_placeholders(&path) {
            if endpoint.param(&name).is_none() {
                errors.push(ParameterError::new(name, "path placeholder has no declared parameter"));
            }
        }

        if !errors.is_empty() {
            return Err(ParameterEncodingError::new(endpoint.operation_id, errors));
        }

        debug!("Encoded {} params: path={} query={:?}", endpoint.operation_id, path, query);
        request.path = path;
        request.query.extend(query);
        request.timeout = self.timeout;
        request.cancellation = self.cancellation.clone();
        Ok(())
    }
}

/// Format one declared parameter according to its kind and slot
fn encode(spec: &ParamSpec, value: &ParamValue) -> Result<Vec<String>, String> {
    let compatible = value.kind() == spec.kind
        || (spec.kind == ParamKind::Float64 && value.kind() == ParamKind::Int64)
        || (spec.kind == ParamKind::StringList && value.kind() == ParamKind::String);
    if !compatible {
        return Err(format!("expected {}, got {}", spec.kind, value.kind()));
    }

    let rendered = value.render()?;
    if spec.slot == ParamSlot::Path {
        match rendered.as_slice() {
            [single] if single.is_empty() => {
                return Err("path segment cannot be empty".to_string());
            }
            [_] => {}
            _ => return Err("path segment needs exactly one value".to_string()),
        }
    }
    Ok(rendered)
}

/// Names of `{placeholder}` segments still present in a rendered path
fn unfilled_placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}
