//! Client configuration
//!
//! Loaded from environment variables in the same way the controllers read
//! their NetBox settings.

use std::env;
use std::time::Duration;

use crate::error::NetBoxError;
use crate::params::DEFAULT_TIMEOUT;

pub const DEFAULT_URL: &str = "http://localhost:8001";

/// Connection settings for a NetBox instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `NETBOX_URL`, `NETBOX_TOKEN` and `NETBOX_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, NetBoxError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` uses the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NetBoxError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("NETBOX_URL").unwrap_or_else(|| DEFAULT_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(NetBoxError::InvalidConfig(format!(
                "NETBOX_URL must be an http(s) URL, got {}",
                base_url
            )));
        }

        let token = lookup("NETBOX_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                NetBoxError::InvalidConfig("NETBOX_TOKEN environment variable is required".to_string())
            })?;

        let timeout = match lookup("NETBOX_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    NetBoxError::InvalidConfig(format!("NETBOX_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                if secs == 0 {
                    return Err(NetBoxError::InvalidConfig(
                        "NETBOX_TIMEOUT_SECS must be greater than zero".to_string(),
                    ));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            base_url,
            token,
            timeout,
        })
    }
}
