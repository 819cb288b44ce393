//! Query utilities for NetBox API
//!
//! Provides list options and their translation into request parameters.

use crate::params::{ParamValue, RequestParams};

/// Options accepted by every list endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Free-text search
    pub q: Option<String>,
    /// Additional filters, e.g. `("site", "dc1")`
    pub filters: Vec<(String, ParamValue)>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn filter(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.filters.push((name.into(), value.into()));
        self
    }

    /// Copy the options into request parameters
    pub fn apply(&self, mut params: RequestParams) -> RequestParams {
        if let Some(limit) = self.limit {
            params.set_value("limit", limit);
        }
        if let Some(offset) = self.offset {
            params.set_value("offset", offset);
        }
        if let Some(q) = &self.q {
            params.set_value("q", q.clone());
        }
        for (name, value) in &self.filters {
            params.set_value(name.clone(), value.clone());
        }
        params
    }
}
