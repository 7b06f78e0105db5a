//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In the front-end's native arithmetic:                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  A till runs thousands of line items a day; formatting errors away  │
//! │  with toFixed(2) only hides the drift, it does not remove it.       │
//! │                                                                     │
//! │  OUR SOLUTION: exact decimals, normalized to 2 places               │
//! │    Every value that leaves this type is a true 2-decimal amount,    │
//! │    so sums, discounts and balances reconcile to the cent.           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Quantities stay plain [`Decimal`] (weight-based items sell fractional
//! units); only monetary values get the 2-place normalization.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Monetary rounding: 2 decimal places, midpoint away from zero.
const MONEY_SCALE: u32 = 2;

fn canonical(value: Decimal) -> Decimal {
    let mut v = value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    v.rescale(MONEY_SCALE);
    v
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value, always carried at exactly 2 decimal places.
///
/// ## Design Decisions
/// - **Signed**: negative values represent returns and return balances
/// - **Single field tuple struct**: zero-cost wrapper over [`Decimal`]
/// - **Normalized on construction**: arithmetic can never leak extra scale
///
/// Every price, amount, discount and tender in the engine flows through
/// this type; quantities do not (they are plain decimals).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(#[ts(as = "String")] Decimal);

impl Money {
    /// Creates a Money value, rounding to 2 decimal places.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use till_core::money::Money;
    ///
    /// let price = Money::new(Decimal::new(10995, 3)); // 10.995
    /// assert_eq!(price.to_string(), "11.00");
    /// ```
    pub fn new(value: Decimal) -> Self {
        Money(canonical(value))
    }

    /// Creates a Money value from minor units (cents).
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_minor_units(1099);
    /// assert_eq!(price.to_string(), "10.99");
    /// ```
    pub fn from_minor_units(units: i64) -> Self {
        Money(canonical(Decimal::new(units, MONEY_SCALE)))
    }

    /// Returns the underlying decimal amount.
    #[inline]
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Zero money value.
    pub fn zero() -> Self {
        Money(canonical(Decimal::ZERO))
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly negative.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies a unit rate by a (possibly fractional) quantity.
    ///
    /// The result is rounded back to 2 places, so a weight-based line like
    /// `3.99 × 0.255 kg` lands on an exact chargeable amount.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use till_core::money::Money;
    ///
    /// let rate = Money::from_minor_units(399); // 3.99
    /// let amount = rate.multiply_quantity(Decimal::new(255, 3)); // 0.255
    /// assert_eq!(amount.to_string(), "1.02");
    /// ```
    pub fn multiply_quantity(&self, quantity: Decimal) -> Money {
        Money::new(self.0 * quantity)
    }

    /// Returns `percent` percent of this value, rounded to 2 places.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use till_core::money::Money;
    ///
    /// let gross = Money::from_minor_units(10000); // 100.00
    /// assert_eq!(gross.percent_of(Decimal::TEN).to_string(), "10.00");
    /// ```
    pub fn percent_of(&self, percent: Decimal) -> Money {
        Money::new(self.0 * percent / Decimal::ONE_HUNDRED)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display prints the plain 2-decimal amount ("10.99", "-5.50").
///
/// Currency symbols are a front-end concern (localization).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Negation, used when building return rows.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor_units() {
        let money = Money::from_minor_units(1099);
        assert_eq!(money.amount(), Decimal::new(1099, 2));
    }

    #[test]
    fn test_display_always_two_places() {
        assert_eq!(Money::from_minor_units(1099).to_string(), "10.99");
        assert_eq!(Money::from_minor_units(500).to_string(), "5.00");
        assert_eq!(Money::from_minor_units(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
        // A whole-number decimal still renders with the money scale.
        assert_eq!(Money::new(Decimal::from(25)).to_string(), "25.00");
    }

    #[test]
    fn test_construction_rounds_midpoint_away_from_zero() {
        assert_eq!(Money::new(Decimal::new(10995, 3)).to_string(), "11.00");
        assert_eq!(Money::new(Decimal::new(-10995, 3)).to_string(), "-11.00");
        assert_eq!(Money::new(Decimal::new(10994, 3)).to_string(), "10.99");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor_units(1000);
        let b = Money::from_minor_units(500);

        assert_eq!((a + b).to_string(), "15.00");
        assert_eq!((a - b).to_string(), "5.00");
        assert_eq!((-a).to_string(), "-10.00");
    }

    #[test]
    fn test_multiply_quantity_whole_and_fractional() {
        let rate = Money::from_minor_units(1000);
        assert_eq!(rate.multiply_quantity(Decimal::from(3)).to_string(), "30.00");

        // 3.99 × 0.255 = 1.01745 → 1.02
        let per_kg = Money::from_minor_units(399);
        assert_eq!(
            per_kg.multiply_quantity(Decimal::new(255, 3)).to_string(),
            "1.02"
        );
    }

    #[test]
    fn test_percent_of() {
        let gross = Money::from_minor_units(10000);
        assert_eq!(gross.percent_of(Decimal::TEN).to_string(), "10.00");
        assert_eq!(gross.percent_of(Decimal::new(825, 2)).to_string(), "8.25");
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_positive());
        assert!(!Money::zero().is_negative());

        assert!(Money::from_minor_units(100).is_positive());
        assert!(Money::from_minor_units(-100).is_negative());
        assert_eq!(Money::from_minor_units(-550).abs().to_string(), "5.50");
    }

    /// The classic drift case: ten additions of 0.10 reconcile exactly.
    #[test]
    fn test_no_accumulated_drift() {
        let dime = Money::from_minor_units(10);
        let mut total = Money::zero();
        for _ in 0..10 {
            total += dime;
        }
        assert_eq!(total, Money::from_minor_units(100));
    }
}
