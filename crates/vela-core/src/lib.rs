//! # vela-core: Pure Pricing Logic for Vela Cart
//!
//! This crate is the **heart** of Vela Cart. It contains all pricing and
//! cart logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vela Cart Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront (embedding application)              │   │
//! │  │     Product UI ──► Cart UI ──► Shipping UI ──► Checkout         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    vela-session (controller)                    │   │
//! │  │     add_item, update_item, apply_discount, set_shipping, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vela-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   cart    │  │ discount  │  │  pricing  │  │   │
//! │  │   │   Money   │  │   Cart    │  │ Discount  │  │  compute_ │  │   │
//! │  │   │   Rate    │  │ CartLine  │  │   kinds   │  │  totals   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK-DEPENDENT PRICING • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vela-store (persistence layer)                   │   │
//! │  │            CartStore trait, JSON documents on disk               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money and Rate types with integer arithmetic (no floats!)
//! - [`cart`] - The cart as an owned state object
//! - [`discount`] - Discount kinds and their math
//! - [`shipping`] - Shipping options and the threshold rule
//! - [`pricing`] - The pure totals engine
//! - [`error`] - Domain error types
//! - [`validation`] - Input rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every computation is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Recompute Everything**: Totals are always rebuilt from the full cart,
//!    never patched incrementally, so they cannot drift from their inputs
//!
//! ## Example Usage
//!
//! ```rust
//! use vela_core::cart::Cart;
//! use vela_core::money::{Money, Rate};
//! use vela_core::discount::Discount;
//! use vela_core::pricing::PricingConfig;
//!
//! let mut cart = Cart::new();
//! cart.add_line("sku-mug", "Camp Mug", Money::from_cents(1999), 2)?;
//! cart.apply_discount(Discount::percentage("SAVE10", Rate::from_percent(10)));
//!
//! let config = PricingConfig {
//!     tax_rate_bps: 825, // 8.25%
//!     ..PricingConfig::default()
//! };
//! cart.refresh_totals(&config);
//!
//! assert_eq!(cart.totals.subtotal_cents, 3998);
//! assert_eq!(cart.totals.discount_cents, 400);
//! assert_eq!(cart.totals.total_cents, 3895);
//! # Ok::<(), vela_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod discount;
pub mod error;
pub mod money;
pub mod pricing;
pub mod shipping;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vela_core::Cart` instead of
// `use vela_core::cart::Cart`

pub use cart::{Cart, CartLine};
pub use discount::{Discount, DiscountKind};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use pricing::{compute_totals, CartTotals, PricingConfig};
pub use shipping::ShippingOption;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and keeps recompute-everything pricing cheap.
/// Can be made configurable per-store in future versions.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in the cart
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-store in future versions.
pub const MAX_QUANTITY_PER_ITEM: i64 = 999;
