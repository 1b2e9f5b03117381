//! # Cart Session
//!
//! The owned cart controller. A session holds the cart, the pricing
//! configuration, the catalogs, and the store handle; it is the only
//! writer a cart ever has.
//!
//! ## Operation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Every Mutation, One Pipeline                           │
//! │                                                                         │
//! │  add_item / update_item / remove_item /                                 │
//! │  apply_discount / remove_discount /                                      │
//! │  set_shipping / clear_shipping / clear                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Validate input            (vela-core::validation, catalogs)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Mutate the cart           (vela-core::Cart methods)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. Re-check discount         (subtotal may have dropped below the      │
//! │       │                        discount's minimum: drop the code)       │
//! │       ▼                                                                 │
//! │  4. Recompute totals          (compute_totals, full recompute)          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  5. Persist                   (CartStore::save)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Return &CartTotals                                                     │
//! │                                                                         │
//! │  Steps 1-2 fail without touching storage; the stored cart always        │
//! │  matches the last successful mutation.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use vela_core::validation::{
    validate_discount_code, validate_product_id, validate_product_name, validate_quantity,
    validate_unit_price,
};
use vela_core::{Cart, CartTotals, Money, PricingConfig, ShippingOption};
use vela_store::CartStore;

use crate::catalog::{DiscountCatalog, ShippingCatalog};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};

/// A live cart with its pricing context and persistence handle.
pub struct CartSession<S: CartStore> {
    cart: Cart,
    pricing: PricingConfig,
    discounts: DiscountCatalog,
    shipping: ShippingCatalog,
    store: S,
}

impl<S: CartStore> CartSession<S> {
    /// Starts a session with a fresh, empty cart.
    ///
    /// The cart is persisted immediately so it exists from the moment the
    /// session does.
    pub fn new(store: S, config: &SessionConfig) -> SessionResult<Self> {
        Self::start(store, Cart::new(), config)
    }

    /// Resumes the stored cart with the given id, or starts a fresh cart
    /// under that id if nothing is stored.
    ///
    /// ## Behavior
    /// Totals are recomputed and re-persisted on resume: the tax rate or
    /// shipping threshold may have changed since the cart was stored, and
    /// the first render must already reflect the current configuration.
    pub fn load_or_create(store: S, cart_id: &str, config: &SessionConfig) -> SessionResult<Self> {
        let cart = match store.load(cart_id)? {
            Some(cart) => {
                info!(cart_id = %cart_id, lines = cart.line_count(), "Resumed stored cart");
                cart
            }
            None => {
                debug!(cart_id = %cart_id, "No stored cart, starting fresh");
                Cart::with_id(cart_id)
            }
        };
        Self::start(store, cart, config)
    }

    fn start(store: S, cart: Cart, config: &SessionConfig) -> SessionResult<Self> {
        let mut session = CartSession {
            cart,
            pricing: config.pricing.clone(),
            discounts: config.discount_catalog(),
            shipping: config.shipping_catalog(),
            store,
        };
        session.finish_mutation()?;
        Ok(session)
    }

    // =========================================================================
    // Item Operations
    // =========================================================================

    /// Adds a product to the cart, merging with an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity increases, price stays frozen
    /// - New product: added as a new line with the price frozen now
    ///
    /// ## Arguments
    /// * `product_id` - Catalog id of the product
    /// * `name` - Display name, frozen on the line
    /// * `unit_price_cents` - Current price in cents, frozen on the line
    /// * `quantity` - How many to add (1..=999)
    pub fn add_item(
        &mut self,
        product_id: &str,
        name: &str,
        unit_price_cents: i64,
        quantity: i64,
    ) -> SessionResult<&CartTotals> {
        validate_product_id(product_id)?;
        validate_product_name(name)?;
        validate_unit_price(unit_price_cents)?;
        validate_quantity(quantity)?;

        debug!(product_id = %product_id, quantity = %quantity, "add_item");
        self.cart
            .add_line(product_id, name, Money::from_cents(unit_price_cents), quantity)?;
        self.finish_mutation()
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - Quantity ≤ 0: removes the line (a cart never shows a zero row)
    /// - Unknown product: `LineNotFound`
    pub fn update_item(&mut self, product_id: &str, quantity: i64) -> SessionResult<&CartTotals> {
        validate_product_id(product_id)?;

        debug!(product_id = %product_id, quantity = %quantity, "update_item");
        self.cart.update_quantity(product_id, quantity)?;
        self.finish_mutation()
    }

    /// Removes a line from the cart.
    pub fn remove_item(&mut self, product_id: &str) -> SessionResult<&CartTotals> {
        validate_product_id(product_id)?;

        debug!(product_id = %product_id, "remove_item");
        self.cart.remove_line(product_id)?;
        self.finish_mutation()
    }

    /// Empties the cart: lines, discount, and shipping selection.
    pub fn clear(&mut self) -> SessionResult<&CartTotals> {
        debug!(cart_id = %self.cart.id, "clear");
        self.cart.clear();
        self.finish_mutation()
    }

    // =========================================================================
    // Discount Operations
    // =========================================================================

    /// Applies a discount code to the cart.
    ///
    /// ## Behavior
    /// - Code is trimmed and upper-cased before lookup ("save10" works)
    /// - Unknown, inactive, and expired codes: `UnknownDiscountCode`
    /// - Cart below the discount's minimum subtotal: `DiscountNotEligible`,
    ///   rather than attaching a code that silently does nothing
    /// - A previously applied discount is replaced wholesale
    pub fn apply_discount(&mut self, code: &str) -> SessionResult<&CartTotals> {
        let code = validate_discount_code(code)?;

        let discount = self
            .discounts
            .resolve(&code)
            .cloned()
            .ok_or_else(|| SessionError::UnknownDiscountCode { code: code.clone() })?;

        let subtotal = Money::from_cents(self.cart.subtotal_cents());
        if !discount.is_eligible(subtotal) {
            return Err(SessionError::DiscountNotEligible {
                code,
                minimum_cents: discount.minimum_subtotal_cents.unwrap_or(0),
                subtotal_cents: subtotal.cents(),
            });
        }

        if let Some(previous) = self.cart.apply_discount(discount) {
            debug!(replaced = %previous.code, "Previous discount replaced");
        }
        info!(code = %code, "Applied discount");
        self.finish_mutation()
    }

    /// Detaches the active discount. A no-op if none is applied.
    pub fn remove_discount(&mut self) -> SessionResult<&CartTotals> {
        if let Some(removed) = self.cart.remove_discount() {
            info!(code = %removed.code, "Removed discount");
        }
        self.finish_mutation()
    }

    // =========================================================================
    // Shipping Operations
    // =========================================================================

    /// Selects a shipping method from the catalog.
    ///
    /// ## Behavior
    /// Replaces any previous selection. The actual charge is decided at
    /// pricing time: the threshold and any free-shipping discount can still
    /// zero it.
    pub fn set_shipping(&mut self, method_id: &str) -> SessionResult<&CartTotals> {
        let option = self
            .shipping
            .resolve(method_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownShippingMethod {
                method_id: method_id.to_string(),
            })?;

        info!(method = %method_id, "Selected shipping method");
        self.cart.set_shipping(option);
        self.finish_mutation()
    }

    /// Deselects shipping. A no-op if none is selected.
    pub fn clear_shipping(&mut self) -> SessionResult<&CartTotals> {
        self.cart.clear_shipping();
        self.finish_mutation()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The cart in its current state.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The current totals breakdown.
    pub fn totals(&self) -> &CartTotals {
        &self.cart.totals
    }

    /// The cart's persistence id.
    pub fn cart_id(&self) -> &str {
        &self.cart.id
    }

    /// Shipping methods available to this session, in display order.
    pub fn shipping_methods(&self) -> &[ShippingOption] {
        self.shipping.options()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // The Commit Point
    // =========================================================================

    /// Steps 3-5 of every mutation: re-check the discount, recompute the
    /// totals from scratch, persist.
    fn finish_mutation(&mut self) -> SessionResult<&CartTotals> {
        if let Some(removed) = self.cart.revalidate_discount() {
            info!(code = %removed.code, "Discount no longer eligible, removed");
        }

        self.cart.refresh_totals(&self.pricing);
        self.store.save(&self.cart)?;

        Ok(&self.cart.totals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
