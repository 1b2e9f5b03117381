//! # Pricing Module
//!
//! The pricing engine: one pure function from cart state to totals.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute_totals Pipeline                            │
//! │                                                                         │
//! │  lines ──► subtotal = Σ unit_price × quantity                           │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  discount ──► eligibility gate (minimum subtotal)                       │
//! │                │                                                        │
//! │                ├──► goods discount (percentage/fixed, capped)           │
//! │                │                                                        │
//! │                └──► free-shipping force                                 │
//! │                         │                                               │
//! │  shipping ──► base cost ─┴─► zeroed by threshold OR free-shipping       │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  tax = rate × max(0, subtotal - discount [+ shipping])                  │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  total = max(0, subtotal - discount + shipping + tax)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Purity
//! No I/O, no clock, no hidden state: identical inputs always produce
//! identical totals, so it is safe (and intended) to rerun the whole thing
//! after every cart mutation instead of patching totals incrementally.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartLine;
use crate::discount::Discount;
use crate::money::{Money, Rate};
use crate::shipping::ShippingOption;

// =============================================================================
// Pricing Configuration
// =============================================================================

/// Store-level pricing knobs, owned by the embedding application.
///
/// These are configuration, not cart state: two carts in the same store
/// share one `PricingConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingConfig {
    /// Sales tax rate in basis points (825 = 8.25%).
    #[serde(default)]
    pub tax_rate_bps: u32,

    /// Whether shipping cost is part of the taxable base.
    /// Jurisdiction-dependent; many US states tax shipping.
    #[serde(default)]
    pub tax_applies_to_shipping: bool,

    /// Subtotal at which threshold-based shipping methods become free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold_cents: i64,
}

fn default_free_shipping_threshold() -> i64 {
    5000 // $50.00
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax_rate_bps: 0,
            tax_applies_to_shipping: false,
            free_shipping_threshold_cents: default_free_shipping_threshold(),
        }
    }
}

impl PricingConfig {
    /// The tax rate as a typed Rate.
    pub fn tax_rate(&self) -> Rate {
        Rate::from_bps(self.tax_rate_bps)
    }

    /// The free-shipping threshold as typed Money.
    pub fn free_shipping_threshold(&self) -> Money {
        Money::from_cents(self.free_shipping_threshold_cents)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// The five-way totals breakdown, plus line counts for cart badges.
///
/// Derived data: always produced by [`compute_totals`] over the full cart,
/// never edited field-by-field. Persisted alongside the cart so a reload
/// shows the same numbers without recomputing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,

    /// Total quantity across all lines.
    pub total_quantity: i64,

    /// Goods subtotal before any adjustment.
    pub subtotal_cents: i64,

    /// Amount taken off the goods subtotal.
    pub discount_cents: i64,

    /// Shipping charge after threshold/free-shipping forcing.
    pub shipping_cents: i64,

    /// Tax on the clamped taxable base.
    pub tax_cents: i64,

    /// What the customer pays: max(0, subtotal - discount + shipping + tax).
    pub total_cents: i64,
}

// =============================================================================
// The Engine
// =============================================================================

/// Computes the full totals breakdown for a cart.
///
/// ## Algorithm
/// 1. Subtotal: sum of `unit_price × quantity` over all lines (exact integer
///    math, no rounding possible).
/// 2. Eligibility: a discount whose `minimum_subtotal_cents` exceeds the
///    subtotal contributes nothing, neither a goods amount nor a
///    free-shipping force. It is *not* removed here; that is the mutation
///    layer's call.
/// 3. Goods discount: percentage (half-up rounded, optionally capped) or
///    fixed amount (never more than the subtotal). Free-shipping discounts
///    take nothing off goods.
/// 4. Shipping: the selected option's base cost; zero when no selection,
///    when the option's threshold is met, or when an eligible free-shipping
///    discount forces it. The forcings stack without conflict.
/// 5. Tax: rate × max(0, subtotal - discount), with shipping included in the
///    base when configured.
/// 6. Total: max(0, subtotal - discount + shipping + tax).
///
/// ## No Failure Conditions
/// This function cannot error. Negative prices or quantities are a caller
/// contract violation (the validation module filters them upstream) and are
/// not defended against here.
///
/// ## Example
/// ```rust
/// use vela_core::cart::CartLine;
/// use vela_core::money::{Money, Rate};
/// use vela_core::pricing::{compute_totals, PricingConfig};
///
/// let lines = vec![CartLine::new("sku-1", "Mug", Money::from_cents(1000), 2)];
/// let config = PricingConfig {
///     tax_rate_bps: 825,
///     ..PricingConfig::default()
/// };
///
/// let totals = compute_totals(&lines, None, None, &config);
/// assert_eq!(totals.subtotal_cents, 2000);
/// assert_eq!(totals.tax_cents, 165); // 8.25% of $20.00
/// assert_eq!(totals.total_cents, 2165);
/// ```
pub fn compute_totals(
    lines: &[CartLine],
    discount: Option<&Discount>,
    shipping: Option<&ShippingOption>,
    config: &PricingConfig,
) -> CartTotals {
    let subtotal = Money::from_cents(lines.iter().map(CartLine::line_total_cents).sum());

    // An ineligible discount is inert: it neither reduces goods nor forces
    // free shipping. It stays attached to the cart for the session to prune.
    let active_discount = discount.filter(|d| d.is_eligible(subtotal));

    let discount_amount = active_discount.map_or(Money::zero(), |d| d.goods_discount(subtotal));

    let free_shipping_forced = active_discount.map_or(false, |d| d.is_free_shipping());
    let shipping_amount = if free_shipping_forced {
        Money::zero()
    } else {
        shipping.map_or(Money::zero(), |option| {
            option.cost(subtotal, config.free_shipping_threshold())
        })
    };

    // Clamp before taxing: an oversized discount must not produce negative tax
    let mut taxable = subtotal - discount_amount;
    if config.tax_applies_to_shipping {
        taxable += shipping_amount;
    }
    let tax = taxable.max(Money::zero()).apply_rate(config.tax_rate());

    let total = (subtotal - discount_amount + shipping_amount + tax).max(Money::zero());

    CartTotals {
        line_count: lines.len(),
        total_quantity: lines.iter().map(|line| line.quantity).sum(),
        subtotal_cents: subtotal.cents(),
        discount_cents: discount_amount.cents(),
        shipping_cents: shipping_amount.cents(),
        tax_cents: tax.cents(),
        total_cents: total.cents(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
