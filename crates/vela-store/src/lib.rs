//! # Vela Store - Cart Persistence Layer
//!
//! This crate persists carts as JSON documents behind the [`CartStore`]
//! trait, so the session layer never touches the filesystem directly.
//!
//! ## Module Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          vela-store                                     │
//! │                                                                         │
//! │  ┌─────────────┐  ┌──────────────┐  ┌──────────────┐                   │
//! │  │  error.rs   │  │ json_file.rs │  │  memory.rs   │                   │
//! │  │             │  │              │  │              │                   │
//! │  │ StoreError  │  │ One file per │  │ HashMap of   │                   │
//! │  │ StoreResult │  │ cart under   │  │ JSON strings │                   │
//! │  │             │  │ a data dir   │  │ (tests)      │                   │
//! │  └─────────────┘  └──────────────┘  └──────────────┘                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//! ```text
//! vela-session                  vela-store                    Disk
//!      │                            │                           │
//!      │  save(&cart)               │                           │
//!      ├───────────────────────────►│  serde_json::to_string    │
//!      │                            ├──────────────────────────►│
//!      │                            │      cart-<id>.json       │
//!      │  load("abc")               │                           │
//!      ├───────────────────────────►│  read + deserialize       │
//!      │   Option<Cart>             │◄──────────────────────────┤
//!      │◄───────────────────────────┤                           │
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use vela_store::{CartStore, JsonFileStore};
//!
//! let store = JsonFileStore::new("/var/lib/vela/carts")?;
//! store.save(&cart)?;
//! let restored = store.load(cart.id())?;
//! ```

pub mod error;
pub mod json_file;
pub mod memory;

// Re-export main types for convenient access
pub use error::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use vela_core::Cart;

/// Storage backend for carts.
///
/// The session layer drives every mutation through [`save`](CartStore::save)
/// after recomputing totals, so a freshly loaded cart is always priced.
/// Implementations must treat carts as opaque documents: no partial updates,
/// no peeking inside lines.
///
/// ## Contract
/// - `save` overwrites any existing document for the same cart id
/// - `load` returns `Ok(None)` for unknown ids (absence is not an error)
/// - `delete` returns `Ok(false)` for unknown ids
/// - `list` returns stored cart ids in no guaranteed order
pub trait CartStore {
    /// Persists the cart, replacing any previous snapshot with the same id.
    fn save(&self, cart: &Cart) -> StoreResult<()>;

    /// Loads a cart by id. Returns `None` if no cart with that id is stored.
    fn load(&self, cart_id: &str) -> StoreResult<Option<Cart>>;

    /// Deletes a stored cart. Returns `true` if a cart was actually removed.
    fn delete(&self, cart_id: &str) -> StoreResult<bool>;

    /// Lists the ids of all stored carts.
    fn list(&self) -> StoreResult<Vec<String>>;
}

/// Validates that a cart id is safe to use as a storage key.
///
/// Ids become file names in the JSON backend, so path separators and
/// other special characters are rejected here, once, for every backend.
pub(crate) fn check_cart_id(cart_id: &str) -> StoreResult<()> {
    if cart_id.is_empty() {
        return Err(StoreError::invalid_id(cart_id, "id is empty"));
    }

    if !cart_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(StoreError::invalid_id(
            cart_id,
            "only ASCII letters, digits, '-' and '_' are allowed",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_cart_id_accepts_uuid_style() {
        assert!(check_cart_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(check_cart_id("cart_42").is_ok());
    }

    #[test]
    fn test_check_cart_id_rejects_empty() {
        assert!(matches!(
            check_cart_id(""),
            Err(StoreError::InvalidCartId { .. })
        ));
    }

    #[test]
    fn test_check_cart_id_rejects_path_traversal() {
        assert!(check_cart_id("../../etc/passwd").is_err());
        assert!(check_cart_id("a/b").is_err());
        assert!(check_cart_id("a\\b").is_err());
        assert!(check_cart_id("cart id").is_err());
    }
}
