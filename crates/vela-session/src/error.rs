//! # Session Error Types
//!
//! Error types for cart session operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   User Input    │  │   Catalogs      │  │     System              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  Validation     │  │  UnknownCode    │  │  Store (I/O, JSON)      │ │
//! │  │  Core (caps,    │  │  NotEligible    │  │  ConfigLoadFailed       │ │
//! │  │   not found)    │  │  UnknownMethod  │  │  ConfigSaveFailed       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  User input and catalog errors map to 4xx-style responses; system      │
//! │  errors are the embedding application's problem to surface or retry.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use vela_core::{CoreError, ValidationError};
use vela_store::StoreError;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session error type covering all cart operation failures.
#[derive(Debug, Error)]
pub enum SessionError {
    // =========================================================================
    // User Input Errors
    // =========================================================================
    /// Input failed field validation before touching the cart.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Cart-level rule violation (unknown line, size caps).
    #[error(transparent)]
    Core(#[from] CoreError),

    // =========================================================================
    // Catalog Errors
    // =========================================================================
    /// Discount code is not in the catalog (or is inactive/expired).
    #[error("Unknown discount code: '{code}'")]
    UnknownDiscountCode { code: String },

    /// Discount exists but the cart does not qualify for it yet.
    #[error(
        "Discount '{code}' requires a subtotal of at least {minimum_cents} cents \
         (cart subtotal is {subtotal_cents} cents)"
    )]
    DiscountNotEligible {
        code: String,
        minimum_cents: i64,
        subtotal_cents: i64,
    },

    /// Shipping method id is not in the catalog.
    #[error("Unknown shipping method: '{method_id}'")]
    UnknownShippingMethod { method_id: String },

    // =========================================================================
    // System Errors
    // =========================================================================
    /// Cart persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid session configuration.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SessionError {
    fn from(err: toml::de::Error) -> Self {
        SessionError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SessionError {
    fn from(err: toml::ser::Error) -> Self {
        SessionError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl SessionError {
    /// Returns true if the error was caused by the caller's input and the
    /// operation can be retried with different input.
    ///
    /// The cart itself is untouched when these occur: operations validate
    /// before they mutate.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            SessionError::Validation(_)
                | SessionError::Core(_)
                | SessionError::UnknownDiscountCode { .. }
                | SessionError::DiscountNotEligible { .. }
                | SessionError::UnknownShippingMethod { .. }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidConfig(_)
                | SessionError::ConfigLoadFailed(_)
                | SessionError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        let err = SessionError::UnknownDiscountCode {
            code: "NOPE".into(),
        };
        assert!(err.is_user_error());
        assert!(!err.is_config_error());

        let err = SessionError::InvalidConfig("bad tax rate".into());
        assert!(!err.is_user_error());
        assert!(err.is_config_error());
    }

    #[test]
    fn test_eligibility_message_names_the_gap() {
        let err = SessionError::DiscountNotEligible {
            code: "BIG10".into(),
            minimum_cents: 5000,
            subtotal_cents: 3000,
        };
        let msg = err.to_string();
        assert!(msg.contains("BIG10"));
        assert!(msg.contains("5000"));
        assert!(msg.contains("3000"));
    }

    #[test]
    fn test_core_error_passes_through() {
        let core = CoreError::LineNotFound {
            product_id: "ghost".into(),
        };
        let err: SessionError = core.into();
        assert!(err.is_user_error());
        assert!(err.to_string().contains("ghost"));
    }
}
