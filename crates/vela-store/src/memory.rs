//! # In-Memory Store
//!
//! A `CartStore` backed by a mutex-guarded map, for tests and demos.
//!
//! Carts still round-trip through JSON on every save and load, so tests
//! exercising this backend catch the same serialization mistakes the file
//! backend would, minus the disk.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::debug;
use vela_core::Cart;

use crate::error::StoreResult;
use crate::{check_cart_id, CartStore};

/// Cart store that keeps JSON documents in memory.
#[derive(Default)]
pub struct MemoryStore {
    /// Cart id → serialized cart document.
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of carts currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().expect("cart store mutex poisoned").len()
    }

    /// Whether the store holds no carts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CartStore for MemoryStore {
    fn save(&self, cart: &Cart) -> StoreResult<()> {
        check_cart_id(&cart.id)?;

        let document = serde_json::to_string(cart)?;
        self.entries
            .lock()
            .expect("cart store mutex poisoned")
            .insert(cart.id.clone(), document);

        debug!(cart_id = %cart.id, "Saved cart to memory");
        Ok(())
    }

    fn load(&self, cart_id: &str) -> StoreResult<Option<Cart>> {
        check_cart_id(cart_id)?;

        let entries = self.entries.lock().expect("cart store mutex poisoned");
        match entries.get(cart_id) {
            Some(document) => Ok(Some(serde_json::from_str(document)?)),
            None => Ok(None),
        }
    }

    fn delete(&self, cart_id: &str) -> StoreResult<bool> {
        check_cart_id(cart_id)?;

        let removed = self
            .entries
            .lock()
            .expect("cart store mutex poisoned")
            .remove(cart_id)
            .is_some();
        Ok(removed)
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut ids: Vec<String> = self
            .entries
            .lock()
            .expect("cart store mutex poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        Ok(ids)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vela_core::{Money, PricingConfig};

    fn sample_cart(id: &str) -> Cart {
        let mut cart = Cart::with_id(id);
        cart.add_line("widget", "Widget", Money::from_cents(1999), 2)
            .unwrap();
        cart.refresh_totals(&PricingConfig::default());
        cart
    }

    #[test]
    fn test_round_trip() {
        let store = MemoryStore::new();
        let cart = sample_cart("cart-a");

        store.save(&cart).unwrap();
        assert_eq!(store.load("cart-a").unwrap().unwrap(), cart);
    }

    #[test]
    fn test_load_unknown_returns_none() {
        let store = MemoryStore::new();
        assert!(store.load("ghost").unwrap().is_none());
    }

    #[test]
    fn test_delete_and_list() {
        let store = MemoryStore::new();
        store.save(&sample_cart("b")).unwrap();
        store.save(&sample_cart("a")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["a", "b"]);
        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.list().unwrap(), vec!["b"]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_is_a_snapshot_not_a_reference() {
        let store = MemoryStore::new();
        let mut cart = sample_cart("cart-a");
        store.save(&cart).unwrap();

        // Mutating the live cart must not affect the stored snapshot
        cart.update_quantity("widget", 9).unwrap();

        let stored = store.load("cart-a").unwrap().unwrap();
        assert_eq!(stored.find_line("widget").unwrap().quantity, 2);
    }

    #[test]
    fn test_rejects_invalid_ids() {
        let store = MemoryStore::new();
        assert!(store.load("has space").is_err());
        assert!(store.delete("../nope").is_err());
    }
}
