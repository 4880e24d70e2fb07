//! # Money Module
//!
//! Provides the `Money` type for handling prices and cart totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point prices:                                            │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    $19.99 × 3 × 1.08 drifts off the cent grid                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents × 3 = 5997 cents, tax rounded once, explicitly            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use artvault_core::money::Money;
//!
//! let price = Money::from_major(450);          // $450.00
//! let doubled = price * 2;                     // $900.00
//! let total = price + Money::from_cents(50);   // $450.50
//! assert_eq!(total.cents(), 45050);
//! assert_eq!(doubled.dollars(), 900);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Listing.price ──┬──► CartLine.price × quantity ──► CartTotals.subtotal│
/// │                  │                                                      │
/// │                  └──► PriceBucket match (gallery filter)               │
/// │                                                                         │
/// │  CartTotals.subtotal ──► tax (8%) ──► CartTotals.total ──► Payment     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Serializes as a bare integer number of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use artvault_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use artvault_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(100).cents(), 10_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit (dollars) portion, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use artvault_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents_part(), 99);
    /// assert_eq!(Money::from_cents(-550).cents_part(), 50);
    /// ```
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half away from zero to the
    /// nearest cent.
    ///
    /// ## Implementation
    /// Integer math on `amount * rate`, in basis points scaled by 10000. Half
    /// a cent (5000) is added toward the sign of the product before the
    /// division truncates, so a refund line and a purchase line of the same
    /// size get taxes of equal magnitude.
    ///
    /// ## Example
    /// ```rust
    /// use artvault_core::money::Money;
    /// use artvault_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_major(250);
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
    /// assert_eq!(tax, Money::from_major(20));
    ///
    /// let refund = Money::from_major(-450);
    /// assert_eq!(refund.calculate_tax(TaxRate::from_bps(800)), Money::from_major(-36));
    /// ```
    ///
    /// ## User Workflow
    /// ```text
    /// Cart Subtotal: $250.00
    ///      │
    ///      ▼
    /// calculate_tax(8%) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Tax: $20.00  ──►  Grand Total: $270.00
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 prevents overflow on large amounts
        let scaled = self.0 as i128 * rate.bps() as i128;
        let tax_cents = (scaled + scaled.signum() * 5000) / 10000;
        Money::from_cents(i64::try_from(tax_cents).unwrap_or(if tax_cents < 0 {
            i64::MIN
        } else {
            i64::MAX
        }))
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// Quantities are not clamped here; a zero or negative quantity yields a
    /// zero or negative line total.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Multiplies money by a quantity, or `None` on overflow.
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: i64) -> Option<Self> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic operators saturate at the i64 bounds instead of panicking or
// wrapping. Callers that must reject out-of-range totals use the `checked_*`
// methods.

/// Debug-oriented rendering like `$10.99`.
///
/// Display formatting for users goes through the app configuration, which
/// knows the currency symbol.
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

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by i64 (for quantity calculations). Saturates like the
/// other operators.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
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
    fn test_from_major() {
        assert_eq!(Money::from_major(1500).cents(), 150_000);
        assert_eq!(Money::from_major(0), Money::zero());
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
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(a.multiply_quantity(-2).cents(), -2000);
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_major(100), Money::from_major(50)];
        let total: Money = prices.iter().sum();
        assert_eq!(total, Money::from_major(150));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_tax_at_marketplace_rate() {
        let rate = TaxRate::from_bps(800);
        assert_eq!(Money::from_major(250).calculate_tax(rate), Money::from_major(20));
        // $4.50 at 8% = $0.36
        assert_eq!(Money::from_cents(450).calculate_tax(rate).cents(), 36);
    }

    #[test]
    fn test_tax_rounds_to_nearest_cent() {
        // 6 cents at 8% = 0.48 cents -> 0, 7 cents at 8% = 0.56 cents -> 1
        let rate = TaxRate::from_bps(800);
        assert_eq!(Money::from_cents(6).calculate_tax(rate).cents(), 0);
        assert_eq!(Money::from_cents(7).calculate_tax(rate).cents(), 1);
    }

    #[test]
    fn test_tax_on_negative_amounts_mirrors_positive() {
        let rate = TaxRate::from_bps(800);
        assert_eq!(Money::from_cents(-45_000).calculate_tax(rate).cents(), -3600);
        assert_eq!(Money::from_cents(-7).calculate_tax(rate).cents(), -1);
        assert_eq!(Money::from_cents(-6).calculate_tax(rate).cents(), 0);

        // exactly half a cent rounds away from zero both ways
        let half = TaxRate::from_bps(5000);
        assert_eq!(Money::from_cents(1).calculate_tax(half).cents(), 1);
        assert_eq!(Money::from_cents(-1).calculate_tax(half).cents(), -1);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.multiply_quantity(2), max);
        assert_eq!(Money::from_cents(450).multiply_quantity(i64::MIN).cents(), i64::MIN);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(Money::from_cents(i64::MIN) - Money::from_cents(1), Money::from_cents(i64::MIN));

        let mut running = max;
        running += max;
        assert_eq!(running, max);
    }

    #[test]
    fn test_checked_arithmetic() {
        let price = Money::from_major(450);
        assert_eq!(price.checked_multiply_quantity(-2), Some(Money::from_major(-900)));
        assert_eq!(price.checked_multiply_quantity(i64::MAX), None);

        assert_eq!(price.checked_add(price), Some(Money::from_major(900)));
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_tax_on_saturated_amount_does_not_overflow() {
        let tax = Money::from_cents(i64::MAX).calculate_tax(TaxRate::from_bps(800));
        assert!(tax.cents() > 0);
        let tax = Money::from_cents(i64::MIN).calculate_tax(TaxRate::from_bps(800));
        assert!(tax.is_negative());
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(45000)).unwrap();
        assert_eq!(json, "45000");
        let back: Money = serde_json::from_str("320").unwrap();
        assert_eq!(back.cents(), 320);
    }
}
