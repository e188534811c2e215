//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a cart in floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Prices are parsed once from the form ("12.50" → 1250)               │
//! │    Every cart total is exact integer arithmetic                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use suuq_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let doubled = price * 2i64;          // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//! assert_eq!(total.cents(), 1599);
//! assert_eq!(doubled.cents(), 2198);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartItem.line_total ──► Cart.total
///        ▲
///        └── parsed from the upload form ("25" / "25.5" / "25.50")
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use suuq_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use suuq_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a non-negative decimal price as typed into the upload form.
    ///
    /// ## Rules
    /// - Digits with an optional `.` and at most two fractional digits
    /// - No sign, no thousands separators
    /// - `"25"`, `"25.5"` and `"25.50"` are all accepted
    ///
    /// ## Example
    /// ```rust
    /// use suuq_core::money::Money;
    ///
    /// assert_eq!(Money::parse_decimal("25.5").unwrap().cents(), 2550);
    /// assert_eq!(Money::parse_decimal("0").unwrap().cents(), 0);
    /// assert!(Money::parse_decimal("-3").is_err());
    /// assert!(Money::parse_decimal("1.999").is_err());
    /// ```
    pub fn parse_decimal(input: &str) -> Result<Money, ValidationError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ValidationError::required("price"));
        }

        let (major, minor) = match input.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (input, ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if major.is_empty() || !all_digits(major) || !all_digits(minor) {
            return Err(ValidationError::invalid_format(
                "price",
                "must be a non-negative number",
            ));
        }

        if minor.len() > 2 {
            return Err(ValidationError::invalid_format(
                "price",
                "must have at most two decimal places",
            ));
        }

        let major: i64 = major.parse().map_err(|_| {
            ValidationError::invalid_format("price", "is too large")
        })?;
        // "5" → 50 cents, "05" → 5 cents
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().unwrap_or(0) * 10,
            _ => minor.parse::<i64>().unwrap_or(0),
        };

        major
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(minor))
            .map(Money)
            .ok_or_else(|| ValidationError::invalid_format("price", "is too large"))
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use suuq_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Adds two amounts, stopping at `i64::MAX` cents instead of wrapping.
    #[inline]
    pub const fn saturating_add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }

    /// Multiplies by a cart quantity, stopping at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use suuq_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(250).saturating_mul(4).cents(), 1000);
    /// assert_eq!(Money::from_cents(i64::MAX).saturating_mul(2).cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn saturating_mul(self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$12.34`. The storefront prices in dollars.
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

impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.saturating_mul(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Money::saturating_add)
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
        assert_eq!((a * 3i64).cents(), 3000);
        assert_eq!((a * 2u32).cents(), 2000);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 5].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 355);

        let empty: Money = std::iter::empty::<Money>().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_parse_decimal_accepts_form_input() {
        assert_eq!(Money::parse_decimal("25").unwrap().cents(), 2500);
        assert_eq!(Money::parse_decimal("25.5").unwrap().cents(), 2550);
        assert_eq!(Money::parse_decimal("25.05").unwrap().cents(), 2505);
        assert_eq!(Money::parse_decimal(" 0.99 ").unwrap().cents(), 99);
        assert_eq!(Money::parse_decimal("7.").unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_decimal_rejects_bad_input() {
        assert!(matches!(
            Money::parse_decimal(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(Money::parse_decimal("-1").is_err());
        assert!(Money::parse_decimal("abc").is_err());
        assert!(Money::parse_decimal(".5").is_err());
        assert!(Money::parse_decimal("1.234").is_err());
        assert!(Money::parse_decimal("1,000").is_err());
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_quantity_and_sum_saturate() {
        let big = Money::parse_decimal("100000000").unwrap();
        assert_eq!((big * u32::MAX).cents(), i64::MAX);

        let total: Money = vec![Money::from_cents(i64::MAX), Money::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), i64::MAX);
    }
}
