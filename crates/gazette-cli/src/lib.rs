//! # gazette-cli — CLI Tool for Gazette
//!
//! Provides the `gazette` command-line interface over the publishing and
//! retrieval engine.
//!
//! ## Subcommands
//!
//! - `gazette batch` — Postage batch listing and resolution.
//! - `gazette keygen` — Ed25519 signing key generation for website pointers.
//! - `gazette publish` — Build the article document and upload it as a
//!   collection, optionally updating the signed website pointer.
//! - `gazette fetch` — Fetch a reference through the gateway chain and
//!   extract its article content.
//! - `gazette feed` — Preview the feed layout for a local article index.

pub mod batch;
pub mod fetch;
pub mod feed;
pub mod keygen;
pub mod publish;

use std::path::PathBuf;
use std::sync::Arc;

use gazette_storage::{
    BatchResolver, GatewayConfig, JsonFileStore, KeyValueStore, NodeClient, NodeConfig,
};

/// Shared transport context assembled from global CLI flags.
pub struct Context {
    /// Node configuration for the write path.
    pub node_config: NodeConfig,
    /// Gateway configuration for the read path.
    pub gateway_config: GatewayConfig,
    /// Local state store (last-known batch id).
    pub store: Arc<dyn KeyValueStore>,
}

impl Context {
    /// Build a context from global flag values.
    pub fn new(
        node_url: Option<String>,
        gateways: Vec<String>,
        state_file: Option<PathBuf>,
        dev_mode: bool,
    ) -> Self {
        let mut node_config = match node_url {
            Some(url) => NodeConfig::new(url),
            None => NodeConfig::default(),
        };
        node_config.dev_mode = dev_mode;

        let gateway_config = if gateways.is_empty() {
            GatewayConfig::default()
        } else {
            GatewayConfig::new(gateways)
        };

        let state_file = state_file.unwrap_or_else(default_state_file);
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(state_file));

        Self {
            node_config,
            gateway_config,
            store,
        }
    }

    /// Build the node client for this context.
    pub fn node(&self) -> anyhow::Result<Arc<NodeClient>> {
        Ok(Arc::new(NodeClient::new(&self.node_config)?))
    }

    /// Build a batch resolver over this context's node and store.
    pub fn resolver(&self, node: Arc<NodeClient>) -> BatchResolver {
        BatchResolver::new(node, self.store.clone(), self.node_config.dev_mode)
    }
}

/// Default local state file: `$HOME/.gazette/state.json`, falling back to
/// the working directory when no home is available.
fn default_state_file() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".gazette")
        .join("state.json")
}

/// Read a hex-encoded Ed25519 signing key from a file.
pub fn load_signing_key(path: &std::path::Path) -> anyhow::Result<ed25519_dalek::SigningKey> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read key file {}: {e}", path.display()))?;
    let bytes = hex::decode(raw.trim())
        .map_err(|e| anyhow::anyhow!("key file {} is not valid hex: {e}", path.display()))?;
    let seed: [u8; 32] = bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("key file {} must hold 32 hex-encoded bytes", path.display()))?;
    Ok(ed25519_dalek::SigningKey::from_bytes(&seed))
}
