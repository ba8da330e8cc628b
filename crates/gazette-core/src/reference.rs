//! # Storage References
//!
//! Content-addressed references into the storage network. A reference is a
//! hex digest, optionally followed by `/path` segments into a manifest
//! (e.g. `ab12…ef/images/banner.png`).
//!
//! ## Normalization
//!
//! References arrive from many sources (pasted links, gateway URLs,
//! persisted drafts) and may carry a protocol scheme prefix or stray
//! whitespace. [`StorageRef::normalize`] cleans these up best-effort and is
//! idempotent: normalizing an already-normalized reference yields the same
//! value. Unparseable input is kept verbatim rather than rejected; callers
//! that need hard validation opt in via [`StorageRef::parse_strict`].
//!
//! ## Raw vs. manifest classification
//!
//! [`StorageRef::is_raw`] decides, without a network round trip, whether a
//! reference addresses raw bytes (direct-byte gateway access) or a manifest
//! (path-style gateway access): raw references contain no `/` and fit the
//! fixed digest length bound.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Length of a content digest in hex characters.
pub const DIGEST_HEX_LEN: usize = 64;

/// Protocol scheme prefixes stripped during normalization.
///
/// Matches are case-sensitive literals; anything else is left in place.
pub const REFERENCE_SCHEMES: [&str; 2] = ["swarm://", "bzz://"];

/// A normalized content-addressed storage reference.
///
/// Immutable once issued by the network: the same bytes always yield the
/// same reference. Construction always normalizes, so two `StorageRef`
/// values compare equal iff their cleaned forms are identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StorageRef(String);

impl StorageRef {
    /// Normalize a reference string: trim whitespace and strip known
    /// protocol scheme prefixes.
    ///
    /// Best-effort — unparseable input is returned unchanged. Idempotent:
    /// `normalize(normalize(r)) == normalize(r)`.
    pub fn normalize(input: &str) -> Self {
        let mut s = input.trim();
        // Loop so that stacked prefixes (e.g. a scheme pasted twice) cannot
        // survive one pass and break idempotence.
        loop {
            s = s.trim();
            let mut stripped = false;
            for scheme in REFERENCE_SCHEMES {
                if let Some(rest) = s.strip_prefix(scheme) {
                    s = rest;
                    stripped = true;
                }
            }
            if !stripped {
                break;
            }
        }
        Self(s.to_string())
    }

    /// Normalize, then require a structurally possible reference: a
    /// non-empty hash segment of exactly [`DIGEST_HEX_LEN`] hex characters.
    ///
    /// This is the opt-in strict mode; the engine itself only ever
    /// normalizes best-effort.
    pub fn parse_strict(input: &str) -> Result<Self, ValidationError> {
        let normalized = Self::normalize(input);
        let hash = normalized.hash();
        if hash.is_empty() {
            return Err(ValidationError::InvalidReference {
                input: input.to_string(),
                reason: "empty hash segment".to_string(),
            });
        }
        if hash.len() != DIGEST_HEX_LEN {
            return Err(ValidationError::InvalidReference {
                input: input.to_string(),
                reason: format!(
                    "hash segment must be {DIGEST_HEX_LEN} hex chars, got {}",
                    hash.len()
                ),
            });
        }
        if !hash.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidReference {
                input: input.to_string(),
                reason: "hash segment contains non-hex characters".to_string(),
            });
        }
        Ok(normalized)
    }

    /// The leading hash segment: everything before the first `/`.
    pub fn hash(&self) -> &str {
        match self.0.find('/') {
            Some(idx) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// The path segments after the hash, if any (no leading `/`).
    pub fn path(&self) -> Option<&str> {
        self.0.find('/').map(|idx| &self.0[idx + 1..])
    }

    /// Whether this reference addresses raw bytes rather than a manifest.
    ///
    /// True iff the reference contains no `/` and its length fits the
    /// digest length bound. Used to pick direct-byte vs. manifest-style
    /// gateway access without a network round trip.
    pub fn is_raw(&self) -> bool {
        !self.0.contains('/') && self.0.len() <= DIGEST_HEX_LEN
    }

    /// The normalized reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StorageRef {
    fn from(s: &str) -> Self {
        Self::normalize(s)
    }
}

impl From<String> for StorageRef {
    fn from(s: String) -> Self {
        Self::normalize(&s)
    }
}

// Deserialization routes through normalize() so that references loaded
// from persisted state or network payloads are always in cleaned form.
impl<'de> Deserialize<'de> for StorageRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::normalize(&raw))
    }
}
