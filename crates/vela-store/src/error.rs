//! # Store Error Types
//!
//! Error types for cart persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Filesystem error (std::io::Error)                                      │
//! │  JSON error (serde_json::Error)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionError (vela-session) ← Surfaced to the embedding application   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Cart persistence errors.
///
/// These errors wrap I/O and serialization failures and provide
/// additional context for debugging and user feedback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Cart id contains characters the backend refuses to use.
    ///
    /// ## When This Occurs
    /// - Empty id
    /// - Id with path separators or other non `[A-Za-z0-9_-]` characters
    ///
    /// Ids become file names in the JSON backend, so anything that could
    /// escape the data directory is rejected before touching the disk.
    #[error("Invalid cart id '{id}': {reason}")]
    InvalidCartId { id: String, reason: String },

    /// Filesystem operation failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Cart document could not be encoded or decoded.
    ///
    /// ## When This Occurs
    /// - Stored document was hand-edited into invalid JSON
    /// - Document written by an incompatible version
    #[error("Cart serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Creates an InvalidCartId error.
    pub fn invalid_id(id: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::InvalidCartId {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_id_message() {
        let err = StoreError::invalid_id("../etc", "contains path separators");
        assert_eq!(
            err.to_string(),
            "Invalid cart id '../etc': contains path separators"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
