//! # Discount Module
//!
//! Code-driven cart discounts.
//!
//! ## Discount Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Percentage    "10% off your order"     amount = rate × subtotal        │
//! │  FixedAmount   "$5 off"                 amount = min(value, subtotal)   │
//! │  FreeShipping  "free shipping"          amount = 0, shipping forced 0   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A cart holds at most one discount; applying a new code replaces the old
//! one wholesale. Eligibility (`minimum_subtotal_cents`) gates the entire
//! effect: an ineligible discount contributes no goods amount AND no
//! free-shipping force.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Rate};

// =============================================================================
// Discount Kind
// =============================================================================

/// How a discount reduces the order.
///
/// Serialized with an internal `type` tag so cart snapshots and config files
/// read naturally: `{ "type": "percentage", "rate_bps": 1000 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case", tag = "type")]
#[ts(export)]
pub enum DiscountKind {
    /// Takes a fraction of the goods subtotal, expressed in basis points.
    Percentage { rate_bps: u32 },

    /// Takes a flat amount off the goods subtotal.
    FixedAmount { amount_cents: i64 },

    /// Leaves the goods subtotal untouched and zeroes the shipping cost
    /// instead.
    FreeShipping,
}

// =============================================================================
// Discount
// =============================================================================

/// A discount attached to a cart.
///
/// ## Fields
/// - `code`: what the customer typed, stored uppercase
/// - `kind`: how the amount is computed
/// - `minimum_subtotal_cents`: subtotal the cart must reach before the
///   discount takes effect
/// - `maximum_discount_cents`: cap on percentage discounts so "10% off"
///   doesn't become unbounded on large carts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Discount {
    pub code: String,

    pub kind: DiscountKind,

    #[serde(default)]
    pub minimum_subtotal_cents: Option<i64>,

    #[serde(default)]
    pub maximum_discount_cents: Option<i64>,
}

impl Discount {
    /// Creates a percentage discount ("10% off").
    pub fn percentage(code: impl Into<String>, rate: Rate) -> Self {
        Discount {
            code: code.into(),
            kind: DiscountKind::Percentage {
                rate_bps: rate.bps(),
            },
            minimum_subtotal_cents: None,
            maximum_discount_cents: None,
        }
    }

    /// Creates a fixed-amount discount ("$5 off").
    pub fn fixed_amount(code: impl Into<String>, amount: Money) -> Self {
        Discount {
            code: code.into(),
            kind: DiscountKind::FixedAmount {
                amount_cents: amount.cents(),
            },
            minimum_subtotal_cents: None,
            maximum_discount_cents: None,
        }
    }

    /// Creates a free-shipping discount.
    pub fn free_shipping(code: impl Into<String>) -> Self {
        Discount {
            code: code.into(),
            kind: DiscountKind::FreeShipping,
            minimum_subtotal_cents: None,
            maximum_discount_cents: None,
        }
    }

    /// Requires the cart subtotal to reach `minimum` before the discount
    /// takes effect.
    pub fn with_minimum_subtotal(mut self, minimum: Money) -> Self {
        self.minimum_subtotal_cents = Some(minimum.cents());
        self
    }

    /// Caps the computed amount (percentage discounts only).
    pub fn with_maximum_discount(mut self, maximum: Money) -> Self {
        self.maximum_discount_cents = Some(maximum.cents());
        self
    }

    /// Whether the discount takes effect at the given subtotal.
    ///
    /// A discount below its minimum stays attached to the cart but
    /// contributes nothing; whether to drop it entirely is the session's
    /// decision, not this type's.
    pub fn is_eligible(&self, subtotal: Money) -> bool {
        match self.minimum_subtotal_cents {
            Some(min) => subtotal >= Money::from_cents(min),
            None => true,
        }
    }

    /// The amount taken off the goods subtotal, before tax.
    ///
    /// Callers gate with [`Discount::is_eligible`] first; this computes the
    /// face value of the discount regardless of eligibility.
    ///
    /// - Percentage: half-up rounded fraction of the subtotal, capped at
    ///   `maximum_discount_cents` when set
    /// - FixedAmount: never more than the subtotal itself
    /// - FreeShipping: zero (its effect is on shipping, not goods)
    pub fn goods_discount(&self, subtotal: Money) -> Money {
        match self.kind {
            DiscountKind::Percentage { rate_bps } => {
                let amount = subtotal.apply_rate(Rate::from_bps(rate_bps));
                match self.maximum_discount_cents {
                    Some(cap) => amount.min(Money::from_cents(cap)),
                    None => amount,
                }
            }
            DiscountKind::FixedAmount { amount_cents } => {
                Money::from_cents(amount_cents).min(subtotal)
            }
            DiscountKind::FreeShipping => Money::zero(),
        }
    }

    /// Whether this discount zeroes the shipping cost.
    pub fn is_free_shipping(&self) -> bool {
        matches!(self.kind, DiscountKind::FreeShipping)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_discount() {
        let discount = Discount::percentage("SAVE10", Rate::from_percent(10));
        assert_eq!(
            discount.goods_discount(Money::from_cents(10000)).cents(),
            1000
        );
    }

    #[test]
    fn test_percentage_discount_rounds_half_up() {
        // 10% of 5¢ is 0.5¢, which rounds up
        let discount = Discount::percentage("SAVE10", Rate::from_percent(10));
        assert_eq!(discount.goods_discount(Money::from_cents(5)).cents(), 1);
    }

    #[test]
    fn test_percentage_discount_capped() {
        let discount = Discount::percentage("SAVE20", Rate::from_percent(20))
            .with_maximum_discount(Money::from_cents(1500));

        // 20% of $100.00 is $20.00, capped at $15.00
        assert_eq!(
            discount.goods_discount(Money::from_cents(10000)).cents(),
            1500
        );

        // Under the cap the full amount applies
        assert_eq!(
            discount.goods_discount(Money::from_cents(5000)).cents(),
            1000
        );
    }

    #[test]
    fn test_fixed_amount_capped_at_subtotal() {
        let discount = Discount::fixed_amount("TAKE20", Money::from_cents(2000));

        assert_eq!(
            discount.goods_discount(Money::from_cents(10000)).cents(),
            2000
        );

        // $20 off a $15 cart only removes $15
        assert_eq!(
            discount.goods_discount(Money::from_cents(1500)).cents(),
            1500
        );
    }

    #[test]
    fn test_free_shipping_has_no_goods_amount() {
        let discount = Discount::free_shipping("SHIPFREE");
        assert!(discount.is_free_shipping());
        assert_eq!(
            discount.goods_discount(Money::from_cents(10000)),
            Money::zero()
        );
    }

    #[test]
    fn test_eligibility() {
        let discount = Discount::percentage("BIG10", Rate::from_percent(10))
            .with_minimum_subtotal(Money::from_cents(5000));

        assert!(!discount.is_eligible(Money::from_cents(4999)));
        assert!(discount.is_eligible(Money::from_cents(5000)));
        assert!(discount.is_eligible(Money::from_cents(5001)));

        // No minimum means always eligible, even on an empty cart
        let unconditional = Discount::percentage("ANY", Rate::from_percent(10));
        assert!(unconditional.is_eligible(Money::zero()));
    }

    #[test]
    fn test_kind_serialization_tag() {
        let discount = Discount::percentage("SAVE10", Rate::from_percent(10));
        let json = serde_json::to_string(&discount.kind).unwrap();
        assert_eq!(json, r#"{"type":"percentage","rate_bps":1000}"#);

        let parsed: DiscountKind = serde_json::from_str(r#"{"type":"free_shipping"}"#).unwrap();
        assert_eq!(parsed, DiscountKind::FreeShipping);
    }
}
