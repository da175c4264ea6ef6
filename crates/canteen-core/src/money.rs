//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004                                  │
//! │                                                                     │
//! │  Settlement compares the cash-tendered amount against the cart      │
//! │  total for equality, so monetary totals must be exact.              │
//! │                                                                     │
//! │  OUR SOLUTION: integer paisa. Rs. 60.00 is stored as 6000.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices cross the wire as 2-decimal strings (`"60.00"`); [`Money`]
//! parses and renders that form losslessly.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in paisa (the smallest currency unit, 1/100 rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: allows negative values for corrections/refunds
/// - **Single-field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paisa (the smallest currency unit).
    #[inline]
    pub const fn from_paisa(paisa: i64) -> Self {
        Money(paisa)
    }

    /// Creates a Money value from major and minor units (rupees and paisa).
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is Rs. -5.50, not Rs. -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in paisa.
    #[inline]
    pub const fn paisa(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (rupees) portion.
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn paisa_part(&self) -> i64 {
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
    /// Used for line totals: `unit_price.multiply_quantity(3)`.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Renders the amount as a plain 2-decimal string (`"60.00"`).
    ///
    /// This is the wire form the Transaction Service expects for
    /// `unit_price` fields.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.rupees().abs(), self.paisa_part())
    }

    /// Converts to a [`Decimal`] with 2 decimal places.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Creates a Money value from a [`Decimal`], rounding to 2 places.
    ///
    /// Returns `None` when the value does not fit in i64 paisa.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        use rust_decimal::prelude::ToPrimitive;
        let paisa = (value * Decimal::from(100)).round();
        paisa.to_i64().map(Money)
    }
}

// =============================================================================
// Parsing
// =============================================================================

/// Error produced when a decimal money string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid money amount: {0}")]
pub struct ParseMoneyError(pub String);

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses `"60"`, `"60.5"` or `"60.00"` (at most 2 fraction digits).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((m, f)) => (m, f),
            None => (digits, ""),
        };

        if major_str.is_empty() && minor_str.is_empty() {
            return Err(ParseMoneyError(s.to_string()));
        }
        if minor_str.len() > 2 {
            return Err(ParseMoneyError(s.to_string()));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse()
                .map_err(|_| ParseMoneyError(s.to_string()))?
        };

        // "60.5" means 50 paisa, not 5
        let minor: i64 = if minor_str.is_empty() {
            0
        } else {
            let parsed: i64 = minor_str
                .parse()
                .map_err(|_| ParseMoneyError(s.to_string()))?;
            if minor_str.len() == 1 {
                parsed * 10
            } else {
                parsed
            }
        };

        let paisa = major * 100 + minor;
        Ok(Money(if negative { -paisa } else { paisa }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money in a human-readable format (`Rs. 60.00`).
///
/// For wire payloads use [`Money::to_decimal_string`] instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rs. {}", self.to_decimal_string())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paisa() {
        let money = Money::from_paisa(6050);
        assert_eq!(money.paisa(), 6050);
        assert_eq!(money.rupees(), 60);
        assert_eq!(money.paisa_part(), 50);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(60, 50).paisa(), 6050);
        assert_eq!(Money::from_major_minor(-5, 50).paisa(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paisa(6000)), "Rs. 60.00");
        assert_eq!(format!("{}", Money::from_paisa(3550)), "Rs. 35.50");
        assert_eq!(format!("{}", Money::from_paisa(-550)), "Rs. -5.50");
        assert_eq!(format!("{}", Money::from_paisa(0)), "Rs. 0.00");
    }

    #[test]
    fn test_decimal_string_round_trip() {
        let price: Money = "60.00".parse().unwrap();
        assert_eq!(price.paisa(), 6000);
        assert_eq!(price.to_decimal_string(), "60.00");
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!("60".parse::<Money>().unwrap().paisa(), 6000);
        assert_eq!("60.5".parse::<Money>().unwrap().paisa(), 6050);
        assert_eq!(".50".parse::<Money>().unwrap().paisa(), 50);
        assert_eq!("-12.25".parse::<Money>().unwrap().paisa(), -1225);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("60.005".parse::<Money>().is_err());
        assert!("60.x".parse::<Money>().is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_paisa(1000);
        let b = Money::from_paisa(500);

        assert_eq!((a + b).paisa(), 1500);
        assert_eq!((a - b).paisa(), 500);
        assert_eq!((a * 3).paisa(), 3000);
        assert_eq!(a.multiply_quantity(2).paisa(), 2000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_paisa(6000), Money::from_paisa(3550)]
            .into_iter()
            .sum();
        assert_eq!(total.paisa(), 9550);
    }

    #[test]
    fn test_decimal_conversion() {
        let m = Money::from_paisa(8000);
        assert_eq!(m.to_decimal().to_string(), "80.00");
        assert_eq!(Money::from_decimal(m.to_decimal()), Some(m));
    }
}
