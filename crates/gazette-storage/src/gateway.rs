//! Multi-gateway content fetcher.
//!
//! Decentralized gateways are individually unreliable, so reads try an
//! ordered endpoint list — local-preferred first, then fixed public
//! fallbacks — and return the first success. Sequential fallback trades
//! latency for availability, which is acceptable because fetch sits on a
//! user-initiated action (opening an article), not a hot path.
//!
//! Per content category the fetcher picks an access path:
//!
//! - web-like content (markup, markdown, structured text) → manifest-style
//!   access `/manifest-access/{ref}/{path or index.html}`;
//! - binary or unknown content → direct byte access `/byte-access/{ref}`.
//!
//! Successful fetches populate the process-wide [`FetchCache`]; a repeat
//! fetch for the same reference makes zero network calls until the caller
//! invalidates it after a known re-publish.

use std::sync::Arc;

use gazette_core::StorageRef;

use crate::cache::{AccessKind, FetchCache};
use crate::config::GatewayConfig;
use crate::error::StorageError;

/// Path segment for manifest-style access.
pub const MANIFEST_ACCESS: &str = "manifest-access";

/// Path segment for direct byte access.
pub const BYTE_ACCESS: &str = "byte-access";

/// Document served when a manifest reference carries no embedded path.
pub const STANDARD_DOCUMENT_NAME: &str = "index.html";

/// Content type prefixes treated as web-like (manifest-style access).
const WEB_CONTENT_TYPES: [&str; 5] = [
    "text/html",
    "application/xhtml+xml",
    "text/markdown",
    "text/x-markdown",
    "text/plain",
];

/// Read-side fetcher over an ordered gateway list.
#[derive(Debug)]
pub struct GatewayFetcher {
    client: reqwest::Client,
    endpoints: Vec<String>,
    cache: FetchCache,
}

impl GatewayFetcher {
    /// Build a fetcher from configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, StorageError> {
        let endpoints = config.normalized_endpoints()?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| StorageError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoints,
            cache: FetchCache::new(),
        })
    }

    /// The configured endpoints, in attempt order.
    pub fn endpoints(&self) -> &[String] {
        &self.endpoints
    }

    /// Fetch the bytes for a reference, trying each gateway in order.
    ///
    /// Per-endpoint failures (network error, non-2xx, timeout) are logged
    /// and swallowed; only when every endpoint has failed does this raise
    /// [`StorageError::ContentUnavailable`] with the attempted list.
    pub async fn fetch(
        &self,
        reference: &StorageRef,
        declared_content_type: Option<&str>,
    ) -> Result<Arc<Vec<u8>>, StorageError> {
        let kind = access_kind(reference, declared_content_type);

        if let Some(cached) = self.cache.get(reference, kind) {
            tracing::debug!(reference = %reference, "fetch cache hit");
            return Ok(cached);
        }

        let mut attempted = Vec::with_capacity(self.endpoints.len());
        for endpoint in &self.endpoints {
            let url = access_url(endpoint, reference, kind);
            match self.client.get(&url).send().await {
                Ok(resp) if resp.status().is_success() => match resp.bytes().await {
                    Ok(bytes) => {
                        let bytes = Arc::new(bytes.to_vec());
                        self.cache.insert(reference, kind, bytes.clone());
                        tracing::debug!(endpoint, reference = %reference, "gateway fetch succeeded");
                        return Ok(bytes);
                    }
                    Err(e) => {
                        tracing::warn!(endpoint, "gateway body read failed: {e}");
                        attempted.push(url);
                    }
                },
                Ok(resp) => {
                    tracing::warn!(endpoint, status = resp.status().as_u16(), "gateway returned error status");
                    attempted.push(url);
                }
                Err(e) => {
                    tracing::warn!(endpoint, "gateway request failed: {e}");
                    attempted.push(url);
                }
            }
        }

        Err(StorageError::ContentUnavailable {
            reference: reference.clone(),
            attempted,
        })
    }

    /// Evict a reference from the cache. Required after a known re-publish;
    /// the cache never expires entries on its own.
    pub fn invalidate(&self, reference: &StorageRef) {
        self.cache.invalidate(reference);
    }

    /// Number of cached entries (diagnostics).
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}

/// Decide the access path for a reference and its declared content type.
///
/// Web-like declared types use manifest access; a reference with an
/// embedded path is necessarily a manifest lookup as well. Everything else
/// is fetched as raw bytes.
fn access_kind(reference: &StorageRef, declared_content_type: Option<&str>) -> AccessKind {
    if !reference.is_raw() && reference.path().is_some() {
        return AccessKind::Manifest;
    }
    match declared_content_type {
        Some(ct) => {
            let essence = ct.split(';').next().unwrap_or(ct).trim();
            if WEB_CONTENT_TYPES.iter().any(|w| essence.eq_ignore_ascii_case(w)) {
                AccessKind::Manifest
            } else {
                AccessKind::Bytes
            }
        }
        None => AccessKind::Bytes,
    }
}

/// Build the request URL for one endpoint attempt.
fn access_url(endpoint: &str, reference: &StorageRef, kind: AccessKind) -> String {
    match kind {
        AccessKind::Manifest => match reference.path() {
            Some(path) => format!("{endpoint}/{MANIFEST_ACCESS}/{}/{path}", reference.hash()),
            None => format!(
                "{endpoint}/{MANIFEST_ACCESS}/{}/{STANDARD_DOCUMENT_NAME}",
                reference.hash()
            ),
        },
        AccessKind::Bytes => format!("{endpoint}/{BYTE_ACCESS}/{}", reference.hash()),
    }
}
