//! # gazette-core — Foundational Types for Gazette
//!
//! This crate provides the domain primitives shared by every other crate
//! in the workspace:
//!
//! - **Storage references** ([`StorageRef`]) — content-addressed identifiers
//!   into the storage network, with idempotent normalization and raw-vs-
//!   manifest classification.
//! - **Postage batch identifiers** ([`BatchId`]) — validated write-capacity
//!   voucher ids, including the all-zero development placeholder.
//! - **Article records** ([`ArticleRecord`], [`ArticleKind`]) — the
//!   presentation-facing article metadata produced by the write path and
//!   consumed by the feed layout engine.
//! - **Validation errors** ([`ValidationError`]) — structured errors for
//!   reference and identifier validation.
//!
//! ## Dependency Invariant
//!
//! `gazette-core` has no network, filesystem, or crypto dependencies. Every
//! type here is a plain value; transport and persistence live in
//! `gazette-storage`.

pub mod article;
pub mod error;
pub mod reference;

pub use article::{ArticleKind, ArticleRecord, BatchId, BATCH_ID_HEX_LEN};
pub use error::ValidationError;
pub use reference::{StorageRef, DIGEST_HEX_LEN, REFERENCE_SCHEMES};
