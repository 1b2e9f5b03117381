//! # Discount & Shipping Catalogs
//!
//! The configured universe of discount codes and shipping methods.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Code Resolution                                   │
//! │                                                                         │
//! │  Customer types "save10"                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Normalize (trim, uppercase)          "SAVE10"                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog lookup ──── not found ─────► UnknownDiscountCode              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Rule redeemable? ── inactive/expired ► treated as unknown             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Eligibility check ─ below minimum ──► DiscountNotEligible             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Attach to cart                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inactive and expired codes resolve exactly like unknown ones. The
//! storefront never learns whether "SUMMER24" once existed, only that it
//! does not work today.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vela_core::{Discount, ShippingOption};

// =============================================================================
// Discount Rules
// =============================================================================

/// A configured discount code with its activation window.
///
/// The embedded [`Discount`] is what ends up on the cart; `active` and
/// `expires_at` only control whether the code resolves at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountRule {
    /// The discount itself (code, kind, minimum, cap).
    #[serde(flatten)]
    pub discount: Discount,

    /// Kill switch. Inactive rules stay in the config but never resolve.
    #[serde(default = "default_true")]
    pub active: bool,

    /// Optional expiry, written as a quoted RFC 3339 string in the config
    /// file (e.g. `expires_at = "2026-12-31T23:59:59Z"`).
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl DiscountRule {
    /// Wraps a discount as an always-active rule.
    pub fn new(discount: Discount) -> Self {
        DiscountRule {
            discount,
            active: true,
            expires_at: None,
        }
    }

    /// Sets an expiry on the rule.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the rule can be redeemed at the given instant.
    pub fn is_redeemable(&self, now: DateTime<Utc>) -> bool {
        if !self.active {
            return false;
        }
        match self.expires_at {
            Some(expiry) => now < expiry,
            None => true,
        }
    }
}

// =============================================================================
// Discount Catalog
// =============================================================================

/// Lookup table of discount rules, keyed by upper-cased code.
#[derive(Debug, Clone, Default)]
pub struct DiscountCatalog {
    rules: HashMap<String, DiscountRule>,
}

impl DiscountCatalog {
    /// Builds a catalog from rules. Codes are keyed case-insensitively;
    /// on duplicates the last rule wins (config validation rejects
    /// duplicates before a catalog is ever built from a file).
    pub fn new(rules: impl IntoIterator<Item = DiscountRule>) -> Self {
        let rules = rules
            .into_iter()
            .map(|rule| (rule.discount.code.to_uppercase(), rule))
            .collect();
        DiscountCatalog { rules }
    }

    /// Resolves a code to its discount at the current instant.
    pub fn resolve(&self, code: &str) -> Option<&Discount> {
        self.resolve_at(code, Utc::now())
    }

    /// Resolves a code to its discount, skipping inactive and expired
    /// rules. Lookup is case-insensitive: "save10" finds "SAVE10".
    pub fn resolve_at(&self, code: &str, now: DateTime<Utc>) -> Option<&Discount> {
        self.rules
            .get(&code.trim().to_uppercase())
            .filter(|rule| rule.is_redeemable(now))
            .map(|rule| &rule.discount)
    }

    /// Number of configured rules (including inactive ones).
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the catalog has no rules at all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// =============================================================================
// Shipping Catalog
// =============================================================================

/// The shipping methods a customer can pick from, in display order.
#[derive(Debug, Clone, Default)]
pub struct ShippingCatalog {
    options: Vec<ShippingOption>,
}

impl ShippingCatalog {
    /// Builds a catalog preserving the configured order.
    pub fn new(options: Vec<ShippingOption>) -> Self {
        ShippingCatalog { options }
    }

    /// Resolves a method id to its shipping option.
    pub fn resolve(&self, method_id: &str) -> Option<&ShippingOption> {
        self.options.iter().find(|option| option.id == method_id)
    }

    /// All configured methods, in the order the storefront should list them.
    pub fn options(&self) -> &[ShippingOption] {
        &self.options
    }

    /// Number of configured methods.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether no shipping methods are configured.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use vela_core::{Money, Rate};

    fn save10() -> Discount {
        Discount::percentage("SAVE10", Rate::from_percent(10))
    }

    #[test]
    fn test_rule_redeemable_by_default() {
        let rule = DiscountRule::new(save10());
        assert!(rule.is_redeemable(Utc::now()));
    }

    #[test]
    fn test_inactive_rule_never_redeemable() {
        let mut rule = DiscountRule::new(save10());
        rule.active = false;
        assert!(!rule.is_redeemable(Utc::now()));
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        let rule = DiscountRule::new(save10()).with_expiry(now + Duration::hours(1));

        assert!(rule.is_redeemable(now));
        assert!(!rule.is_redeemable(now + Duration::hours(2)));
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let catalog = DiscountCatalog::new(vec![DiscountRule::new(save10())]);

        assert!(catalog.resolve("SAVE10").is_some());
        assert!(catalog.resolve("save10").is_some());
        assert!(catalog.resolve("  Save10 ").is_some());
        assert!(catalog.resolve("SAVE20").is_none());
    }

    #[test]
    fn test_resolve_skips_expired_and_inactive() {
        let now = Utc::now();
        let expired = DiscountRule::new(save10()).with_expiry(now - Duration::days(1));
        let mut disabled = DiscountRule::new(Discount::free_shipping("SHIPFREE"));
        disabled.active = false;

        let catalog = DiscountCatalog::new(vec![expired, disabled]);
        assert_eq!(catalog.len(), 2);
        assert!(catalog.resolve_at("SAVE10", now).is_none());
        assert!(catalog.resolve_at("SHIPFREE", now).is_none());
    }

    #[test]
    fn test_rule_parses_from_flat_toml() {
        let rule: DiscountRule = toml::from_str(
            r#"
            code = "SPRING25"
            minimum_subtotal_cents = 2500
            expires_at = "2026-12-31T23:59:59Z"

            [kind]
            type = "fixed_amount"
            amount_cents = 500
            "#,
        )
        .unwrap();

        assert_eq!(rule.discount.code, "SPRING25");
        assert_eq!(
            rule.discount.goods_discount(Money::from_cents(2500)),
            Money::from_cents(500)
        );
        assert!(rule.active);
        assert!(rule.expires_at.is_some());
    }

    #[test]
    fn test_shipping_resolve_and_order() {
        let catalog = ShippingCatalog::new(vec![
            ShippingOption::new("standard", "Standard", Money::from_cents(599))
                .with_free_above_threshold(),
            ShippingOption::new("express", "Express", Money::from_cents(1499)),
        ]);

        assert_eq!(catalog.resolve("express").unwrap().base_cost_cents, 1499);
        assert!(catalog.resolve("drone").is_none());

        let ids: Vec<&str> = catalog.options().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["standard", "express"]);
    }
}
