//! # vela-session: Cart Controller for Vela Cart
//!
//! This crate provides the mutation layer for Vela Cart: an owned
//! [`CartSession`] that validates input, mutates the cart, re-checks the
//! applied discount, recomputes totals from scratch, and persists, in that
//! order, on every operation.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart Session Architecture                           │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  CartSession<S: CartStore>                       │  │
//! │  │                                                                  │  │
//! │  │  Owns the Cart plus its pricing context.                         │  │
//! │  │  Every mutation funnels through one commit path.                 │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ DiscountCatalog│  │ShippingCatalog │  │  SessionConfig         │    │
//! │  │                │  │                │  │                        │    │
//! │  │ code → rule    │  │ id → option    │  │ TOML file + env vars   │    │
//! │  │ (active?       │  │ (display       │  │ [pricing] [store]      │    │
//! │  │  expired?)     │  │  order kept)   │  │ [[discounts]]          │    │
//! │  └────────────────┘  └────────────────┘  │ [[shipping]]           │    │
//! │                                          └────────────────────────┘    │
//! │                                                                         │
//! │  DEPENDENCIES:                                                         │
//! │  • vela-core: Cart, Discount, compute_totals (pure, no I/O)            │
//! │  • vela-store: CartStore trait + JSON file / in-memory backends        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`session`] - The `CartSession` controller
//! - [`catalog`] - Discount code and shipping method catalogs
//! - [`config`] - Session configuration (TOML + environment)
//! - [`error`] - Session error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vela_session::{CartSession, SessionConfig};
//! use vela_store::JsonFileStore;
//!
//! let config = SessionConfig::load_or_default(None);
//! let store = JsonFileStore::new(config.data_dir().unwrap())?;
//!
//! let mut session = CartSession::load_or_create(store, "customer-42", &config)?;
//! session.add_item("sku-1", "Enamel Mug", 1250, 2)?;
//! session.apply_discount("SAVE10")?;
//! let totals = session.set_shipping("standard")?;
//!
//! println!("Total: {} cents", totals.total_cents);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{DiscountCatalog, DiscountRule, ShippingCatalog};
pub use config::{SessionConfig, StoreSettings};
pub use error::{SessionError, SessionResult};
pub use session::CartSession;
