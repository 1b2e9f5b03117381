//! # Session Configuration
//!
//! Configuration management for the cart session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VELA_TAX_RATE_BPS=825                                               │
//! │     VELA_DATA_DIR=/var/lib/vela/carts                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/cart/session.toml (Linux)                                │
//! │     ~/Library/Application Support/com.vela.cart/session.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     No tax, $50.00 free-shipping threshold, empty catalogs             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # session.toml
//! [pricing]
//! tax_rate_bps = 825                    # 8.25%
//! tax_applies_to_shipping = false
//! free_shipping_threshold_cents = 5000  # $50.00
//!
//! [store]
//! data_dir = "/var/lib/vela/carts"
//!
//! [[discounts]]
//! code = "SAVE10"
//! minimum_subtotal_cents = 2500
//! [discounts.kind]
//! type = "percentage"
//! rate_bps = 1000
//!
//! [[discounts]]
//! code = "SHIPFREE"
//! expires_at = "2026-12-31T23:59:59Z"
//! [discounts.kind]
//! type = "free_shipping"
//!
//! [[shipping]]
//! id = "standard"
//! name = "Standard (3-5 days)"
//! base_cost_cents = 599
//! free_above_threshold = true
//!
//! [[shipping]]
//! id = "express"
//! name = "Express (1-2 days)"
//! base_cost_cents = 1499
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use vela_core::validation::{validate_discount_code, validate_rate_bps};
use vela_core::{DiscountKind, PricingConfig, ShippingOption};

use crate::catalog::{DiscountCatalog, DiscountRule, ShippingCatalog};
use crate::error::{SessionError, SessionResult};

// =============================================================================
// Store Settings
// =============================================================================

/// Persistence settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    /// Directory for cart documents.
    /// Defaults to the platform data directory when not set.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// Main Session Configuration
// =============================================================================

/// Complete session configuration: pricing knobs plus the discount and
/// shipping catalogs the store offers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Tax and threshold settings fed to the pricing engine.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Persistence settings.
    #[serde(default)]
    pub store: StoreSettings,

    /// Discount codes this store honors.
    #[serde(default)]
    pub discounts: Vec<DiscountRule>,

    /// Shipping methods this store offers, in display order.
    #[serde(default)]
    pub shipping: Vec<ShippingOption>,
}

impl SessionConfig {
    /// Creates a config with defaults and empty catalogs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (session.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading session config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load session config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SessionResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SessionError::ConfigSaveFailed("No config path available".into()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Session config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        // Tax rate must be a sane basis-point value
        if let Err(err) = validate_rate_bps(self.pricing.tax_rate_bps) {
            return Err(SessionError::InvalidConfig(format!("tax_rate_bps: {}", err)));
        }

        if self.pricing.free_shipping_threshold_cents < 0 {
            return Err(SessionError::InvalidConfig(
                "free_shipping_threshold_cents must not be negative".into(),
            ));
        }

        // Discount rules: well-formed codes, sane amounts, unique codes
        let mut seen_codes = HashSet::new();
        for rule in &self.discounts {
            let code = validate_discount_code(&rule.discount.code)
                .map_err(|err| SessionError::InvalidConfig(format!("discount code: {}", err)))?;

            if !seen_codes.insert(code.clone()) {
                return Err(SessionError::InvalidConfig(format!(
                    "duplicate discount code: '{}'",
                    code
                )));
            }

            match rule.discount.kind {
                DiscountKind::Percentage { rate_bps } => {
                    if let Err(err) = validate_rate_bps(rate_bps) {
                        return Err(SessionError::InvalidConfig(format!(
                            "discount '{}': {}",
                            code, err
                        )));
                    }
                }
                DiscountKind::FixedAmount { amount_cents } => {
                    if amount_cents < 0 {
                        return Err(SessionError::InvalidConfig(format!(
                            "discount '{}': amount must not be negative",
                            code
                        )));
                    }
                }
                DiscountKind::FreeShipping => {}
            }

            if rule.discount.minimum_subtotal_cents.unwrap_or(0) < 0 {
                return Err(SessionError::InvalidConfig(format!(
                    "discount '{}': minimum subtotal must not be negative",
                    code
                )));
            }
            if rule.discount.maximum_discount_cents.unwrap_or(0) < 0 {
                return Err(SessionError::InvalidConfig(format!(
                    "discount '{}': maximum discount must not be negative",
                    code
                )));
            }
        }

        // Shipping methods: non-empty unique ids, non-negative costs
        let mut seen_methods = HashSet::new();
        for option in &self.shipping {
            if option.id.trim().is_empty() {
                return Err(SessionError::InvalidConfig(
                    "shipping method id must not be empty".into(),
                ));
            }
            if !seen_methods.insert(option.id.clone()) {
                return Err(SessionError::InvalidConfig(format!(
                    "duplicate shipping method id: '{}'",
                    option.id
                )));
            }
            if option.base_cost_cents < 0 {
                return Err(SessionError::InvalidConfig(format!(
                    "shipping method '{}': base cost must not be negative",
                    option.id
                )));
            }
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // Tax rate
        if let Ok(rate) = std::env::var("VELA_TAX_RATE_BPS") {
            if let Ok(bps) = rate.parse::<u32>() {
                debug!(tax_rate_bps = bps, "Overriding tax rate from environment");
                self.pricing.tax_rate_bps = bps;
            }
        }

        // Shipping taxability
        if let Ok(flag) = std::env::var("VELA_TAX_APPLIES_TO_SHIPPING") {
            match flag.to_lowercase().as_str() {
                "true" | "1" => self.pricing.tax_applies_to_shipping = true,
                "false" | "0" => self.pricing.tax_applies_to_shipping = false,
                _ => warn!(flag = %flag, "Unknown shipping taxability flag in environment"),
            }
        }

        // Free-shipping threshold
        if let Ok(threshold) = std::env::var("VELA_FREE_SHIPPING_THRESHOLD_CENTS") {
            if let Ok(cents) = threshold.parse::<i64>() {
                debug!(
                    threshold_cents = cents,
                    "Overriding free-shipping threshold from environment"
                );
                self.pricing.free_shipping_threshold_cents = cents;
            }
        }

        // Cart data directory
        if let Ok(dir) = std::env::var("VELA_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data directory from environment");
            self.store.data_dir = Some(PathBuf::from(dir));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vela", "cart").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("session.toml")
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolves the cart data directory: the configured one, or the
    /// platform data directory.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.store.data_dir.clone().or_else(|| {
            directories::ProjectDirs::from("com", "vela", "cart")
                .map(|dirs| dirs.data_dir().join("carts"))
        })
    }

    /// Builds the discount catalog from the configured rules.
    pub fn discount_catalog(&self) -> DiscountCatalog {
        DiscountCatalog::new(self.discounts.iter().cloned())
    }

    /// Builds the shipping catalog from the configured methods.
    pub fn shipping_catalog(&self) -> ShippingCatalog {
        ShippingCatalog::new(self.shipping.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vela_core::{Discount, Money, Rate};

    fn config_with_catalogs() -> SessionConfig {
        SessionConfig {
            pricing: PricingConfig {
                tax_rate_bps: 825,
                ..PricingConfig::default()
            },
            store: StoreSettings::default(),
            discounts: vec![DiscountRule::new(Discount::percentage(
                "SAVE10",
                Rate::from_percent(10),
            ))],
            shipping: vec![ShippingOption::new(
                "standard",
                "Standard",
                Money::from_cents(599),
            )],
        }
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.pricing.tax_rate_bps, 0);
        assert_eq!(config.pricing.free_shipping_threshold_cents, 5000);
        assert!(config.discounts.is_empty());
        assert!(config.shipping.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_tax_rate() {
        let mut config = SessionConfig::default();
        config.pricing.tax_rate_bps = 15000; // 150%
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validation_rejects_duplicate_codes() {
        let mut config = config_with_catalogs();
        // Same code in different case still collides
        config.discounts.push(DiscountRule::new(Discount::percentage(
            "save10",
            Rate::from_percent(20),
        )));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_negative_discount_amount() {
        let mut config = SessionConfig::default();
        config.discounts.push(DiscountRule::new(Discount::fixed_amount(
            "BROKEN",
            Money::from_cents(-500),
        )));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_duplicate_shipping_ids() {
        let mut config = config_with_catalogs();
        config.shipping.push(ShippingOption::new(
            "standard",
            "Standard Again",
            Money::from_cents(799),
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parses_full_config_file() {
        let config: SessionConfig = toml::from_str(
            r#"
            [pricing]
            tax_rate_bps = 825
            free_shipping_threshold_cents = 5000

            [[discounts]]
            code = "SAVE10"
            minimum_subtotal_cents = 2500
            [discounts.kind]
            type = "percentage"
            rate_bps = 1000

            [[discounts]]
            code = "SHIPFREE"
            [discounts.kind]
            type = "free_shipping"

            [[shipping]]
            id = "standard"
            name = "Standard (3-5 days)"
            base_cost_cents = 599
            free_above_threshold = true

            [[shipping]]
            id = "express"
            name = "Express (1-2 days)"
            base_cost_cents = 1499
            "#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.pricing.tax_rate_bps, 825);
        assert_eq!(config.discounts.len(), 2);
        assert_eq!(config.shipping.len(), 2);

        let catalog = config.discount_catalog();
        let save10 = catalog.resolve("save10").unwrap();
        assert_eq!(save10.minimum_subtotal_cents, Some(2500));

        let shipping = config.shipping_catalog();
        assert!(shipping.resolve("standard").unwrap().free_above_threshold);
        assert!(!shipping.resolve("express").unwrap().free_above_threshold);
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.toml");

        let config = config_with_catalogs();
        config.save(Some(path.clone())).unwrap();

        let reloaded = SessionConfig::load(Some(path)).unwrap();
        assert_eq!(reloaded.pricing, config.pricing);
        assert_eq!(reloaded.discounts, config.discounts);
        assert_eq!(reloaded.shipping.len(), 1);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.toml");

        let config = SessionConfig::load(Some(path)).unwrap();
        assert_eq!(config.pricing.tax_rate_bps, 0);
    }
}
