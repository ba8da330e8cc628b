//! Transport configuration.
//!
//! Plain config structs with sensible defaults. The node URL points at the
//! operator's own network-access node; the gateway list is ordered with the
//! local-preferred endpoint first, followed by fixed public fallbacks.

use url::Url;

use crate::error::StorageError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default local node API endpoint.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:1633";

/// Fixed public gateway fallbacks, tried in order after the local endpoint.
pub const DEFAULT_PUBLIC_GATEWAYS: [&str; 2] = [
    "https://gateway.gazette.press",
    "https://download.gateway.ethswarm.org",
];

/// Configuration for the write-side [`NodeClient`](crate::NodeClient).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Base URL of the node API (e.g. `http://127.0.0.1:1633`).
    pub api_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_secs: u64,
    /// Non-production mode: when no usable postage batch exists, fall back
    /// to the all-zero placeholder instead of failing hard.
    pub dev_mode: bool,
}

impl NodeConfig {
    /// Create a configuration with default timeout, production mode.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            dev_mode: false,
        }
    }

    /// Validate and normalize the base URL (trailing slash trimmed).
    pub(crate) fn base_url(&self) -> Result<String, StorageError> {
        Url::parse(&self.api_url)
            .map_err(|e| StorageError::Config(format!("invalid node URL {:?}: {e}", self.api_url)))?;
        Ok(self.api_url.trim_end_matches('/').to_string())
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_NODE_URL)
    }
}

/// Configuration for the read-side [`GatewayFetcher`](crate::GatewayFetcher).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Ordered gateway endpoints. The first entry is the local-preferred
    /// endpoint; later entries are fallbacks.
    pub endpoints: Vec<String>,
    /// Request timeout in seconds per gateway attempt (default: 30).
    pub timeout_secs: u64,
}

impl GatewayConfig {
    /// Create a configuration from an explicit ordered endpoint list.
    pub fn new(endpoints: Vec<String>) -> Self {
        Self {
            endpoints,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Validate the endpoint list and return normalized URLs.
    pub(crate) fn normalized_endpoints(&self) -> Result<Vec<String>, StorageError> {
        if self.endpoints.is_empty() {
            return Err(StorageError::Config("gateway endpoint list is empty".to_string()));
        }
        let mut out = Vec::with_capacity(self.endpoints.len());
        for ep in &self.endpoints {
            Url::parse(ep)
                .map_err(|e| StorageError::Config(format!("invalid gateway URL {ep:?}: {e}")))?;
            out.push(ep.trim_end_matches('/').to_string());
        }
        Ok(out)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        let mut endpoints = vec![DEFAULT_NODE_URL.to_string()];
        endpoints.extend(DEFAULT_PUBLIC_GATEWAYS.iter().map(|s| s.to_string()));
        Self::new(endpoints)
    }
}
