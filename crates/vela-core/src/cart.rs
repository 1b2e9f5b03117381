//! # Cart Module
//!
//! The cart as an explicit, owned state object.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Mutation Flow                                │
//! │                                                                         │
//! │  Storefront Action         Session Operation        Cart State Change   │
//! │  ─────────────────         ─────────────────        ─────────────────   │
//! │                                                                         │
//! │  Click Add ──────────────► add_item() ────────────► merge or push line  │
//! │                                                                         │
//! │  Change Quantity ────────► update_item() ─────────► qty = n (≤0 drops)  │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ─────────► retain others       │
//! │                                                                         │
//! │  Enter Code ─────────────► apply_discount() ──────► replace discount    │
//! │                                                                         │
//! │  Pick Shipping ──────────► set_shipping() ────────► replace selection   │
//! │                                                                         │
//! │  Every path ends in refresh_totals(): a full recompute over all lines.  │
//! │  There is no incremental totals update anywhere, so totals can never    │
//! │  drift from the lines that produced them.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::discount::Discount;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{compute_totals, CartTotals, PricingConfig};
use crate::shipping::ShippingOption;
use crate::{MAX_CART_LINES, MAX_QUANTITY_PER_ITEM};

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the cart.
///
/// ## Design Notes
/// - `product_id`: reference back to the catalog entry
/// - `name` and `unit_price_cents` are frozen copies taken when the line is
///   added. If the product is renamed or repriced afterwards, the cart keeps
///   showing (and charging) what the customer put in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Product/variant identifier.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Quantity in cart, always 1..=MAX_QUANTITY_PER_ITEM.
    pub quantity: i64,

    /// When this line was first added to the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    /// Creates a new cart line, freezing the price at this moment.
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> Self {
        CartLine {
            product_id: product_id.into(),
            name: name.into(),
            unit_price_cents: unit_price.cents(),
            quantity,
            added_at: Utc::now(),
        }
    }

    /// The frozen unit price as Money.
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// How much the customer saves on this line against a compare-at price.
    ///
    /// Used for "You save $4.00" rows in the cart UI. Clamped at zero: a
    /// line whose frozen price rose above the compare-at price shows no
    /// savings rather than negative ones.
    pub fn savings_cents(&self, original_unit_price: Money) -> i64 {
        let per_unit = (original_unit_price - self.unit_price()).max(Money::zero());
        per_unit.multiply_quantity(self.quantity).cents()
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product merges
///   quantity into the existing line)
/// - Line quantity is always positive (an update to ≤ 0 removes the line)
/// - At most MAX_CART_LINES distinct lines
/// - At most one discount; applying a code replaces the previous one
/// - `totals` always reflects the current lines/discount/shipping once
///   `refresh_totals` has run; mutation helpers alone do not touch it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Cart identifier (UUID v4), the persistence key.
    pub id: String,

    /// Lines in the cart.
    pub lines: Vec<CartLine>,

    /// The active discount, if any.
    #[serde(default)]
    pub discount: Option<Discount>,

    /// The selected shipping option, if any.
    #[serde(default)]
    pub shipping: Option<ShippingOption>,

    /// Totals recomputed from scratch after every mutation and persisted
    /// alongside the cart.
    #[serde(default)]
    pub totals: CartTotals,

    /// When the cart was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When totals were last recomputed.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart with a generated ID.
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    /// Creates a new empty cart with the given ID.
    pub fn with_id(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Cart {
            id: id.into(),
            lines: Vec::new(),
            discount: None,
            shipping: None,
            totals: CartTotals::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - If the product is already in the cart: merges quantity, keeping the
    ///   originally frozen name and price
    /// - Otherwise: pushes a new line with the price frozen now
    pub fn add_line(
        &mut self,
        product_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
    ) -> CoreResult<()> {
        let product_id = product_id.into();

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_QUANTITY_PER_ITEM {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_QUANTITY_PER_ITEM,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines
            .push(CartLine::new(product_id, name, unit_price, quantity));
        Ok(())
    }

    /// Updates the quantity of a line.
    ///
    /// ## Behavior
    /// - Quantity ≤ 0 removes the line entirely (never a zero-quantity row)
    /// - Unknown product: returns `LineNotFound`
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_line(product_id);
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_QUANTITY_PER_ITEM,
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
            Ok(())
        } else {
            Err(CoreError::LineNotFound {
                product_id: product_id.to_string(),
            })
        }
    }

    /// Removes a line from the cart by product ID.
    pub fn remove_line(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);

        if self.lines.len() == initial_len {
            Err(CoreError::LineNotFound {
                product_id: product_id.to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Empties the cart: lines, discount, and shipping selection.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.discount = None;
        self.shipping = None;
    }

    /// Attaches a discount, returning the one it replaced (at most one
    /// discount is ever active).
    pub fn apply_discount(&mut self, discount: Discount) -> Option<Discount> {
        self.discount.replace(discount)
    }

    /// Detaches the active discount, if any.
    pub fn remove_discount(&mut self) -> Option<Discount> {
        self.discount.take()
    }

    /// Selects a shipping option, replacing any previous selection.
    pub fn set_shipping(&mut self, option: ShippingOption) {
        self.shipping = Some(option);
    }

    /// Deselects shipping.
    pub fn clear_shipping(&mut self) -> Option<ShippingOption> {
        self.shipping.take()
    }

    /// Looks up a line by product ID.
    pub fn find_line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Checks if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the goods subtotal (before discount, shipping, tax).
    pub fn subtotal_cents(&self) -> i64 {
        self.lines.iter().map(|l| l.line_total_cents()).sum()
    }

    /// Drops the discount if the current subtotal no longer meets its
    /// minimum, returning what was removed.
    ///
    /// Run after every item mutation so a code earned at $60 does not keep
    /// discounting a cart that shrank to $20. The pricing engine would
    /// already compute it as zero; this removes the stale code outright so
    /// the customer sees it disappear instead of silently doing nothing.
    pub fn revalidate_discount(&mut self) -> Option<Discount> {
        let subtotal = Money::from_cents(self.subtotal_cents());
        match &self.discount {
            Some(discount) if !discount.is_eligible(subtotal) => self.discount.take(),
            _ => None,
        }
    }

    /// Recomputes `totals` from scratch over the full cart state.
    ///
    /// This is the commit point of every mutation: callers mutate lines,
    /// discount, or shipping, then call this exactly once before persisting.
    pub fn refresh_totals(&mut self, config: &PricingConfig) {
        self.totals = compute_totals(
            &self.lines,
            self.discount.as_ref(),
            self.shipping.as_ref(),
            config,
        );
        self.updated_at = Utc::now();
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
