//! # JSON File Store
//!
//! Stores each cart as one pretty-printed JSON document on disk.
//!
//! ## Layout
//! ```text
//! <data_dir>/
//! ├── cart-550e8400-e29b-41d4-a716-446655440000.json
//! ├── cart-7c9e6679-7425-40de-944b-e07fc1f90ae7.json
//! └── cart-checkout-demo.json
//! ```
//!
//! One file per cart keeps the backend trivial to inspect and debug:
//! `cat` a file to see exactly what the customer's cart holds, delete a
//! file to drop a cart. There is no index to rebuild and no schema to
//! migrate; unknown JSON fields are ignored on load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use vela_core::Cart;

use crate::error::StoreResult;
use crate::{check_cart_id, CartStore};

/// File name prefix for cart documents.
const FILE_PREFIX: &str = "cart-";

/// File name extension for cart documents.
const FILE_SUFFIX: &str = ".json";

/// Cart store backed by a directory of JSON files.
pub struct JsonFileStore {
    /// Directory holding one `cart-<id>.json` file per cart.
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Opens a store rooted at `data_dir`, creating the directory if needed.
    pub fn new(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        debug!("Opened cart store at {}", data_dir.display());
        Ok(JsonFileStore { data_dir })
    }

    /// The directory this store reads and writes.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Builds the document path for a cart id.
    fn path_for(&self, cart_id: &str) -> PathBuf {
        self.data_dir
            .join(format!("{}{}{}", FILE_PREFIX, cart_id, FILE_SUFFIX))
    }
}

impl CartStore for JsonFileStore {
    fn save(&self, cart: &Cart) -> StoreResult<()> {
        check_cart_id(&cart.id)?;

        let contents = serde_json::to_string_pretty(cart)?;
        fs::write(self.path_for(&cart.id), contents)?;

        debug!(cart_id = %cart.id, "Saved cart document");
        Ok(())
    }

    fn load(&self, cart_id: &str) -> StoreResult<Option<Cart>> {
        check_cart_id(cart_id)?;

        let contents = match fs::read_to_string(self.path_for(cart_id)) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let cart: Cart = serde_json::from_str(&contents)?;
        debug!(cart_id = %cart_id, lines = cart.line_count(), "Loaded cart document");
        Ok(Some(cart))
    }

    fn delete(&self, cart_id: &str) -> StoreResult<bool> {
        check_cart_id(cart_id)?;

        match fs::remove_file(self.path_for(cart_id)) {
            Ok(()) => {
                debug!(cart_id = %cart_id, "Deleted cart document");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn list(&self) -> StoreResult<Vec<String>> {
        let mut ids = Vec::new();

        for entry in fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                warn!("Skipping non-UTF8 file name in {}", self.data_dir.display());
                continue;
            };

            if let Some(id) = name
                .strip_prefix(FILE_PREFIX)
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
            {
                ids.push(id.to_string());
            }
        }

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
    use crate::error::StoreError;
    use vela_core::{Money, PricingConfig};

    fn sample_cart(id: &str) -> Cart {
        let mut cart = Cart::with_id(id);
        cart.add_line("widget", "Widget", Money::from_cents(1999), 2)
            .unwrap();
        cart.refresh_totals(&PricingConfig::default());
        cart
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let cart = sample_cart("cart-a");
        store.save(&cart).unwrap();

        let restored = store.load("cart-a").unwrap().unwrap();
        assert_eq!(restored, cart);
        assert_eq!(restored.totals.subtotal_cents, 3998);
    }

    #[test]
    fn test_load_unknown_id_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        assert!(store.load("nope").unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let mut cart = sample_cart("cart-a");
        store.save(&cart).unwrap();

        cart.update_quantity("widget", 5).unwrap();
        cart.refresh_totals(&PricingConfig::default());
        store.save(&cart).unwrap();

        let restored = store.load("cart-a").unwrap().unwrap();
        assert_eq!(restored.find_line("widget").unwrap().quantity, 5);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.save(&sample_cart("cart-a")).unwrap();
        assert!(store.delete("cart-a").unwrap());
        assert!(store.load("cart-a").unwrap().is_none());

        // Second delete is a no-op, not an error
        assert!(!store.delete("cart-a").unwrap());
    }

    #[test]
    fn test_list_returns_sorted_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.save(&sample_cart("zeta")).unwrap();
        store.save(&sample_cart("alpha")).unwrap();
        store.save(&sample_cart("mid")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_list_ignores_unrelated_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        store.save(&sample_cart("cart-a")).unwrap();
        fs::write(dir.path().join("README.txt"), "not a cart").unwrap();
        fs::write(dir.path().join("cart-broken.tmp"), "{}").unwrap();

        assert_eq!(store.list().unwrap(), vec!["cart-a"]);
    }

    #[test]
    fn test_rejects_path_traversal_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        let err = store.load("../outside").unwrap_err();
        assert!(matches!(err, StoreError::InvalidCartId { .. }));

        let cart = sample_cart("ok");
        let mut evil = cart.clone();
        evil.id = "../../escape".to_string();
        assert!(store.save(&evil).is_err());
    }

    #[test]
    fn test_corrupt_document_is_an_error_not_a_panic() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path()).unwrap();

        fs::write(dir.path().join("cart-bad.json"), "{ not json").unwrap();
        let err = store.load("bad").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
