//! # gazette-storage — Storage Network Transport for Gazette
//!
//! The write and read paths of the publishing engine:
//!
//! - **Write**: [`BatchResolver`] finds a usable postage batch, then
//!   [`Resource`], [`Collection`], and [`Website`] upload bytes, manifests,
//!   and signed pointers through a [`NodeClient`].
//! - **Read**: [`GatewayFetcher`] retrieves content-addressed bytes through
//!   an ordered list of gateways with sequential fallback and an in-memory
//!   [`FetchCache`].
//!
//! ## Failure Model
//!
//! Write errors propagate to the caller with a context tag and no retry —
//! retries, if any, are the caller's responsibility. The gateway fetcher
//! swallows per-endpoint failures and raises only once every endpoint has
//! failed, carrying the attempted endpoint list for diagnostics.
//!
//! ## Persisted Local State
//!
//! The engine treats local state (last-known batch id) as an external
//! key/value capability, modeled by the [`KeyValueStore`] trait. Tests use
//! [`MemoryStore`]; the CLI uses [`JsonFileStore`].

pub mod builders;
pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod node;
pub mod postage;
pub mod store;

pub use builders::{Collection, Resource, Website, WebsitePublish};
pub use cache::{AccessKind, FetchCache};
pub use config::{GatewayConfig, NodeConfig, DEFAULT_PUBLIC_GATEWAYS};
pub use error::StorageError;
pub use gateway::{GatewayFetcher, STANDARD_DOCUMENT_NAME};
pub use node::{ManifestEntry, NodeClient, PointerAddress};
pub use postage::{BatchResolver, PostageBatch, LAST_BATCH_KEY};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
