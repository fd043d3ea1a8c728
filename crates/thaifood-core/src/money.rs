//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Menu prices arrive from the backend as decimals (฿45.50).              │
//! │  Summing them as floats drifts; summing satang does not.                │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units                                      │
//! │    ฿45.50 → 4550 satang, converted ONCE at the boundary                 │
//! │    All bill arithmetic then happens on i64                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use thaifood_core::money::Money;
//!
//! // Create from minor units (preferred)
//! let price = Money::from_minor(4550); // 45.50
//!
//! // Or convert a backend decimal exactly once
//! let same = Money::from_major(45.5);
//! assert_eq!(price, same);
//!
//! // Arithmetic operations
//! let doubled = price * 2;                       // 91.00
//! let total = price + Money::from_minor(500);    // 50.50
//! assert_eq!(doubled.minor(), 9100);
//! assert_eq!(total.minor(), 5050);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

/// Minor units per major unit (100 satang = 1 baht).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (satang).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never needs a separate type
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serializes as the raw minor-unit integer
/// - **Saturating arithmetic**: sums and products clamp at the i64 bounds,
///   so absurd prices never panic the bill
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  MenuItem.price (major, f64) ──► Money::from_major ──► × quantity       │
/// │                                                                         │
/// │  subtotal ──► discount ──► service charge ──► VAT ──► grand total       │
/// │                                                                         │
/// │  Receipt fields serialize back to major units (see `as_major`)          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use thaifood_core::money::Money;
    ///
    /// let price = Money::from_minor(4550); // Represents 45.50
    /// assert_eq!(price.minor(), 4550);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Converts a decimal amount in major units to minor units.
    ///
    /// The amount is multiplied by 100 and rounded to the nearest integer,
    /// ties away from zero. Non-finite input converts to zero.
    ///
    /// ## Example
    /// ```rust
    /// use thaifood_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(12.5).minor(), 1250);
    /// assert_eq!(Money::from_major(0.125).minor(), 13);  // 12.5 → 13
    /// assert_eq!(Money::from_major(-0.125).minor(), -13);
    /// assert_eq!(Money::from_major(f64::NAN).minor(), 0);
    /// ```
    pub fn from_major(amount: f64) -> Self {
        if !amount.is_finite() {
            return Money::zero();
        }
        Money(round_half_away(amount * MINOR_PER_MAJOR as f64))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the value in major units (for output only).
    ///
    /// ## Example
    /// ```rust
    /// use thaifood_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(117_700).to_major(), 1177.0);
    /// ```
    #[inline]
    pub fn to_major(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    /// Returns the whole major-unit portion.
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
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
    /// use thaifood_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(6000); // 60.00
    /// assert_eq!(unit_price.multiply_quantity(3).minor(), 18_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a fractional rate and rounds the result to whole minor units.
    ///
    /// Rounding is half away from zero. Used for percentage discounts,
    /// service charge and VAT.
    ///
    /// ## Example
    /// ```rust
    /// use thaifood_core::money::Money;
    /// use thaifood_core::types::Rate;
    ///
    /// let base = Money::from_minor(110_000);   // 1100.00
    /// let vat = base.apply_rate(Rate::new(0.07));
    /// assert_eq!(vat.minor(), 7_700);          // 77.00
    ///
    /// // 0.5 satang rounds up, never to even
    /// assert_eq!(Money::from_minor(25).apply_rate(Rate::new(0.1)).minor(), 3);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        if rate.is_zero() {
            return Money::zero();
        }
        Money(round_half_away(self.0 as f64 * rate.fraction()))
    }
}

/// Rounds to the nearest integer, ties away from zero.
///
/// `f64::round` already has these semantics; the cast saturates on overflow.
#[inline]
fn round_half_away(value: f64) -> i64 {
    value.round() as i64
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `major.minor` rendering, for logs and debugging.
///
/// No currency symbol: display formatting belongs to the front-end.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02}",
            sign,
            self.major_part().abs(),
            self.minor_part()
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

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by quantity.
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

// =============================================================================
// Major-Unit Serialization
// =============================================================================

/// Serde adapter that writes `Money` as a major-unit JSON number.
///
/// Receipts are consumed by the web front-end, which expects `1177.0`
/// rather than `117700`. Use with `#[serde(with = "crate::money::as_major")]`.
pub mod as_major {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(money.to_major())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Money, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Money::from_major)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_minor() {
        let money = Money::from_minor(4550);
        assert_eq!(money.minor(), 4550);
        assert_eq!(money.major_part(), 45);
        assert_eq!(money.minor_part(), 50);
    }

    #[test]
    fn test_from_major_rounds_half_away_from_zero() {
        assert_eq!(Money::from_major(60.0).minor(), 6000);
        assert_eq!(Money::from_major(0.125).minor(), 13);
        assert_eq!(Money::from_major(0.135).minor(), 14);
        assert_eq!(Money::from_major(-0.125).minor(), -13);
    }

    #[test]
    fn test_from_major_binary_representation() {
        // 1.005 is stored as 1.00499999..., so it lands on 100, not 101.
        assert_eq!(Money::from_major(1.005).minor(), 100);
    }

    #[test]
    fn test_from_major_non_finite() {
        assert!(Money::from_major(f64::NAN).is_zero());
        assert!(Money::from_major(f64::INFINITY).is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(4550).to_string(), "45.50");
        assert_eq!(Money::from_minor(500).to_string(), "5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_major(1e17);
        assert_eq!(max.minor(), i64::MAX);

        assert_eq!((max + Money::from_minor(1)).minor(), i64::MAX);
        assert_eq!(max.multiply_quantity(2).minor(), i64::MAX);
        assert_eq!((max * 3).minor(), i64::MAX);
        assert_eq!((Money::from_minor(i64::MIN) - Money::from_minor(1)).minor(), i64::MIN);

        let mut total = max;
        total += max;
        assert_eq!(total.minor(), i64::MAX);

        let sum: Money = [max, max, Money::from_minor(10)].into_iter().sum();
        assert_eq!(sum.minor(), i64::MAX);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_minor(1000);
        let b = Money::from_minor(500);

        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        assert_eq!((a * 3).minor(), 3000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.minor(), 2000);
    }

    #[test]
    fn test_apply_rate() {
        let base = Money::from_minor(100_000);
        assert_eq!(base.apply_rate(Rate::new(0.10)).minor(), 10_000);
        assert_eq!(base.apply_rate(Rate::zero()).minor(), 0);
        assert_eq!(Money::from_minor(15).apply_rate(Rate::new(0.1)).minor(), 2);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_minor(1).is_positive());
        assert!(Money::from_minor(-1).is_negative());
    }

    #[test]
    fn test_typescript_binding_is_number() {
        assert_eq!(Money::inline(), "number");
    }

    #[test]
    fn test_as_major_serialization() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            #[serde(with = "as_major")]
            total: Money,
        }

        let json = serde_json::to_string(&Wrapper {
            total: Money::from_minor(117_700),
        })
        .unwrap();
        assert_eq!(json, r#"{"total":1177.0}"#);

        let back: Wrapper = serde_json::from_str(r#"{"total":45.5}"#).unwrap();
        assert_eq!(back.total.minor(), 4550);
    }
}
