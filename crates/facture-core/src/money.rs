//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  An invoice must reconcile to the last millime:                         │
//! │    subtotal + tax + timbre == total, always, after every edit           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals (rust_decimal)                          │
//! │    100.000 × 0.19 = 19.000 exactly                                      │
//! │    Sums never drift, recomputing twice gives identical values           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are never rounded by the core. Rounding to millimes happens only
//! when a value is displayed.
//!
//! Arithmetic saturates at [`Money::MAX`] / [`Money::MIN`]. Hosts keep inputs
//! well below that with the validation limits.
//!
//! ## Usage
//! ```rust
//! use facture_core::money::Money;
//!
//! let price: Money = "12.500".parse().unwrap();
//! let doubled = price.multiply_quantity(2.into());
//! assert_eq!(doubled, Money::from_millimes(25_000));
//! assert_eq!(doubled.to_string(), "25.000");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::TaxRate;
use crate::CURRENCY_DECIMALS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in dinars, held as an exact decimal.
///
/// ## Design Decisions
/// - **Decimal (signed)**: exact base-10, allows negative values for credits
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Transparent serde**: serialises exactly like the inner decimal
///   (a JSON string such as `"119.00"`), numbers are accepted on input
///
/// ## Where Money is Used
/// ```text
/// LineItem.unit_price × quantity ──► LineItem.total ──► Invoice.totals.subtotal
///                                         │
///                                         └──► compute_tax ──► LineItem.tax_amount
///                                                                  │
///                                   Invoice.vat_breakdown ◄────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Largest representable amount.
    pub const MAX: Money = Money(Decimal::MAX);

    /// Smallest representable amount.
    pub const MIN: Money = Money(Decimal::MIN);

    /// Wraps a decimal amount in dinars.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from millimes (1/1000 dinar).
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// let fee = Money::from_millimes(1000);
    /// assert_eq!(fee.to_string(), "1.000");
    /// ```
    pub fn from_millimes(millimes: i64) -> Self {
        Money(Decimal::new(millimes, CURRENCY_DECIMALS))
    }

    /// Returns the exact decimal amount in dinars.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns the amount rounded to whole millimes (half away from zero).
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    ///
    /// let tax: Money = "0.0665".parse().unwrap();
    /// assert_eq!(tax.millimes(), 67);
    /// ```
    pub fn millimes(&self) -> i64 {
        self.rounded()
            .0
            .checked_mul(Decimal::from(1000))
            .and_then(|m| m.to_i64())
            .unwrap_or(if self.is_negative() { i64::MIN } else { i64::MAX })
    }

    /// Returns the amount rounded to display precision (3 decimals).
    pub fn rounded(&self) -> Money {
        Money(
            self.0
                .round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Applies a proportional tax rate. No rounding is performed.
    ///
    /// ## Example
    /// ```rust
    /// use facture_core::money::Money;
    /// use facture_core::types::TaxRate;
    ///
    /// let net: Money = "100".parse().unwrap();
    /// let tax = net.calculate_tax(TaxRate::from_bps(1900));
    /// assert_eq!(tax, "19".parse::<Money>().unwrap());
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_mul(rate.factor()))
    }

    /// Multiplies a unit price by a (possibly fractional) quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: Decimal) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Addition that reports overflow instead of saturating.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Line total that reports overflow instead of saturating.
    pub fn checked_multiply_quantity(&self, qty: Decimal) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount with exactly three decimals (millimes), no currency.
///
/// Currency symbols and localisation belong to the presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.rounded().0)
    }
}

impl FromStr for Money {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|_| CoreError::InvalidDecimal {
                field: "amount".to_string(),
                value: s.to_string(),
            })
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
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

/// Multiplication by a decimal quantity.
impl Mul<Decimal> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: Decimal) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
