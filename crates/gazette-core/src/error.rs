//! # Validation Error Types
//!
//! Structured errors for reference and identifier validation in
//! `gazette-core`. Uses `thiserror` for ergonomic error definitions with
//! diagnostic context.

use thiserror::Error;

/// Errors from validating Gazette domain primitives.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A storage reference failed strict structural validation.
    ///
    /// Only raised by [`StorageRef::parse_strict`](crate::StorageRef::parse_strict);
    /// best-effort normalization never fails.
    #[error("invalid storage reference {input:?}: {reason}")]
    InvalidReference {
        /// The input as given by the caller.
        input: String,
        /// Why the input is structurally impossible.
        reason: String,
    },

    /// A postage batch identifier is not 64 lowercase hex characters.
    #[error("invalid batch id: {0}")]
    InvalidBatchId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_reference_display() {
        let err = ValidationError::InvalidReference {
            input: "???".to_string(),
            reason: "hash segment is not hex".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("???"));
        assert!(msg.contains("not hex"));
    }

    #[test]
    fn invalid_batch_id_display() {
        let err = ValidationError::InvalidBatchId("expected 64 hex chars, got 3".to_string());
        assert!(format!("{err}").contains("64 hex chars"));
    }
}
