//! # Money Module
//!
//! Provides the `Money` and `Rate` types for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a storefront, that artifact becomes a real complaint:               │
//! │    $19.99 × 3 = $59.969999999999999  → displayed as $59.96 or $59.97?  │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents × 3 = 5997 cents, exactly                                 │
//! │    Rounding happens in ONE place (Money::apply_rate) and nowhere else   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vela_core::money::{Money, Rate};
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1999); // $19.99
//!
//! // Line math is exact
//! let line_total = price.multiply_quantity(3); // $59.97
//!
//! // Fractional rates round half-up to the nearest cent
//! let tax = line_total.apply_rate(Rate::from_bps(825)); // 8.25% → $4.95
//! assert_eq!(tax.cents(), 495);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediates (subtotal minus an
///   oversized discount) before the final clamp
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serializes as a bare number
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CartLine.unit_price_cents ──► line totals ──► subtotal                │
/// │                                                    │                    │
/// │  subtotal ──► discount amount ──► shipping ──► tax ──► total           │
/// │                                                                         │
/// │  Stored fields stay raw i64 cents; every calculation passes through    │
/// │  this type so the arithmetic rules live in exactly one module          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    ///
    /// ## Why Cents?
    /// Using the smallest unit eliminates all floating-point concerns.
    /// Storage, calculations, and the storefront API all use cents.
    /// Only the UI converts to dollars for display.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Returns the given fraction of this amount, rounded half-up.
    ///
    /// This is the ONLY operation in the crate that can produce a fractional
    /// cent, so it is the only place rounding happens. Tax and percentage
    /// discounts both go through here.
    ///
    /// ## Rounding
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  HALF-UP ROUNDING                                                   │
    /// │                                                                     │
    /// │  $10.00 at 8.25%  = 82.5¢   → 83¢                                  │
    /// │  $0.05 at 10%     = 0.5¢    → 1¢                                   │
    /// │  $0.33 at 8.25%   = 2.72¢   → 3¢                                   │
    /// │                                                                     │
    /// │  Integer form: (cents × bps + 5000) / 10000                        │
    /// │  The +5000 is the half-cent that tips ties upward                  │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use vela_core::money::{Money, Rate};
    ///
    /// let subtotal = Money::from_cents(1000); // $10.00
    /// let tax = subtotal.apply_rate(Rate::from_bps(825)); // 8.25%
    /// assert_eq!(tax.cents(), 83); // $0.825 rounds up to $0.83
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // i128 intermediate prevents overflow on large amounts
        let portion = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(portion as i64)
    }
}

// =============================================================================
// Rate Type
// =============================================================================

/// A fractional rate in basis points (1 bps = 0.01%).
///
/// ## Why Basis Points?
/// A percentage like 8.25% cannot be represented exactly in binary floating
/// point, but 825 basis points is an exact integer. Tax rates and percentage
/// discounts are both expressed this way.
///
/// ## Example
/// ```rust
/// use vela_core::money::Rate;
///
/// let tax = Rate::from_bps(825);      // 8.25%
/// let tenth = Rate::from_percent(10); // 10.00%
///
/// assert_eq!(tax.percent(), 8.25);
/// assert_eq!(tenth.bps(), 1000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points (825 = 8.25%).
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from whole percentage points (10 = 10%).
    #[inline]
    pub const fn from_percent(percent: u32) -> Self {
        Rate(percent * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage for display (825 → 8.25).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns a zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use storefront formatting for actual UI
/// display to handle currency and locale properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        let result: Money = a * 3;
        assert_eq!(result.cents(), 3000);
    }

    #[test]
    fn test_ordering_gives_min_max() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        // Caps and clamps in the pricing engine lean on Ord
        assert_eq!(a.min(b), b);
        assert_eq!(a.max(Money::zero()), a);
        assert_eq!(Money::from_cents(-20).max(Money::zero()), Money::zero());
    }

    #[test]
    fn test_apply_rate_exact() {
        // $10.00 at 10% = $1.00, no rounding involved
        let amount = Money::from_cents(1000);
        assert_eq!(amount.apply_rate(Rate::from_percent(10)).cents(), 100);
    }

    #[test]
    fn test_apply_rate_rounds_half_up() {
        // $10.00 at 8.25% = $0.825 → $0.83
        let amount = Money::from_cents(1000);
        assert_eq!(amount.apply_rate(Rate::from_bps(825)).cents(), 83);

        // 5¢ at 10% = 0.5¢, the tie rounds up to 1¢
        assert_eq!(
            Money::from_cents(5).apply_rate(Rate::from_percent(10)).cents(),
            1
        );

        // 10¢ at 15% = 1.5¢ → 2¢
        assert_eq!(
            Money::from_cents(10).apply_rate(Rate::from_bps(1500)).cents(),
            2
        );

        // 33¢ at 8.25% = 2.72¢ → 3¢ (ordinary round, not a tie)
        assert_eq!(
            Money::from_cents(33).apply_rate(Rate::from_bps(825)).cents(),
            3
        );
    }

    #[test]
    fn test_apply_rate_zero_rate() {
        let amount = Money::from_cents(123_456);
        assert_eq!(amount.apply_rate(Rate::zero()), Money::zero());
    }

    #[test]
    fn test_apply_rate_large_amounts_no_overflow() {
        // A billion dollars at 8.25% stays exact through the i128 path
        let amount = Money::from_cents(100_000_000_000);
        assert_eq!(amount.apply_rate(Rate::from_bps(825)).cents(), 8_250_000_000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        let line_total = unit_price.multiply_quantity(3);
        assert_eq!(line_total.cents(), 897);
    }

    #[test]
    fn test_rate_constructors() {
        assert_eq!(Rate::from_percent(10), Rate::from_bps(1000));
        assert_eq!(Rate::from_bps(825).percent(), 8.25);
        assert!(Rate::zero().is_zero());
        assert_eq!(format!("{}", Rate::from_bps(825)), "8.25%");
    }
}
