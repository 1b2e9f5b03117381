//! # Shipping Module
//!
//! Shipping options and their cost rule.
//!
//! A shipping option is a flat base cost plus an optional free-shipping
//! threshold: when `free_above_threshold` is set and the cart subtotal
//! reaches the configured threshold, the cost drops to zero. Express-style
//! methods leave the flag off and always charge their base cost.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// A shipping method the customer can select for their cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShippingOption {
    /// Stable method identifier ("standard", "express").
    pub id: String,

    /// Display name shown at checkout.
    pub name: String,

    /// Flat cost in cents.
    pub base_cost_cents: i64,

    /// Whether this method becomes free once the subtotal reaches the
    /// configured free-shipping threshold.
    #[serde(default)]
    pub free_above_threshold: bool,
}

impl ShippingOption {
    /// Creates a shipping option that always charges its base cost.
    pub fn new(id: impl Into<String>, name: impl Into<String>, base_cost: Money) -> Self {
        ShippingOption {
            id: id.into(),
            name: name.into(),
            base_cost_cents: base_cost.cents(),
            free_above_threshold: false,
        }
    }

    /// Marks the option as free once the subtotal reaches the threshold.
    pub fn with_free_above_threshold(mut self) -> Self {
        self.free_above_threshold = true;
        self
    }

    /// The cost of this option for a cart at the given subtotal.
    ///
    /// The threshold comes from pricing configuration, not the option, so a
    /// store can move its free-shipping bar without editing every method.
    pub fn cost(&self, subtotal: Money, free_threshold: Money) -> Money {
        if self.free_above_threshold && subtotal >= free_threshold {
            Money::zero()
        } else {
            Money::from_cents(self.base_cost_cents)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> ShippingOption {
        ShippingOption::new("standard", "Standard Shipping", Money::from_cents(599))
            .with_free_above_threshold()
    }

    #[test]
    fn test_cost_below_threshold() {
        let option = standard();
        let threshold = Money::from_cents(5000);
        assert_eq!(
            option.cost(Money::from_cents(3000), threshold).cents(),
            599
        );
    }

    #[test]
    fn test_cost_at_and_above_threshold() {
        let option = standard();
        let threshold = Money::from_cents(5000);

        // The threshold is inclusive
        assert_eq!(option.cost(Money::from_cents(5000), threshold).cents(), 0);
        assert_eq!(option.cost(Money::from_cents(6000), threshold).cents(), 0);
    }

    #[test]
    fn test_flat_methods_ignore_threshold() {
        let express = ShippingOption::new("express", "Express", Money::from_cents(1499));
        let threshold = Money::from_cents(5000);
        assert_eq!(
            express.cost(Money::from_cents(9999), threshold).cents(),
            1499
        );
    }
}
