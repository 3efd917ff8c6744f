//! # Tax Engine
//!
//! Maps an amount and a [`TaxCategory`] to the tax owed on it.
//!
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │ standard     │ amount × 19%                 │
//! │ reduced      │ amount × 7%                  │
//! │ timbre       │ 1.000 TND, whatever the amount│
//! │ exempt/other │ 0                            │
//! └──────────────┴──────────────────────────────┘
//! ```
//!
//! Pure and deterministic. No rounding beyond the decimal type's precision;
//! presentation rounds to millimes.

use rust_decimal::Decimal;

use crate::money::Money;
use crate::types::{TaxCategory, TaxRate};

/// Standard VAT rate (19%).
pub const STANDARD_RATE: TaxRate = TaxRate::from_bps(1900);

/// Reduced VAT rate (7%).
pub const REDUCED_RATE: TaxRate = TaxRate::from_bps(700);

/// Fixed stamp duty per timbre line (1.000 TND).
pub const TIMBRE_FEE: Money = Money::new(Decimal::ONE);

impl TaxCategory {
    /// Proportional rate of the category, `None` for the fixed stamp.
    pub const fn rate(&self) -> Option<TaxRate> {
        match self {
            TaxCategory::Standard => Some(STANDARD_RATE),
            TaxCategory::Reduced => Some(REDUCED_RATE),
            TaxCategory::Timbre => None,
            TaxCategory::Exempt => Some(TaxRate::zero()),
        }
    }

    /// Whether the category counts toward `totals.tax` (VAT proper).
    pub const fn is_vat(&self) -> bool {
        matches!(self, TaxCategory::Standard | TaxCategory::Reduced)
    }
}

/// Computes the tax for `amount` under `category`.
///
/// ## Example
/// ```rust
/// use facture_core::money::Money;
/// use facture_core::tax::{compute_tax, TIMBRE_FEE};
/// use facture_core::types::TaxCategory;
///
/// let amount: Money = "250".parse().unwrap();
/// assert_eq!(compute_tax(amount, TaxCategory::Reduced), "17.5".parse::<Money>().unwrap());
/// assert_eq!(compute_tax(amount, TaxCategory::Timbre), TIMBRE_FEE);
/// ```
pub fn compute_tax(amount: Money, category: TaxCategory) -> Money {
    match category {
        TaxCategory::Standard => amount.calculate_tax(STANDARD_RATE),
        TaxCategory::Reduced => amount.calculate_tax(REDUCED_RATE),
        TaxCategory::Timbre => TIMBRE_FEE,
        TaxCategory::Exempt => Money::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_and_reduced_rates() {
        let hundred = Money::new(dec!(100));
        assert_eq!(compute_tax(hundred, TaxCategory::Standard), Money::new(dec!(19)));
        assert_eq!(compute_tax(hundred, TaxCategory::Reduced), Money::new(dec!(7)));
    }

    #[test]
    fn test_timbre_ignores_amount() {
        for amount in [dec!(0), dec!(0.001), dec!(100), dec!(123456.789)] {
            assert_eq!(compute_tax(Money::new(amount), TaxCategory::Timbre), Money::new(dec!(1.0)));
        }
    }

    #[test]
    fn test_unknown_category_is_untaxed() {
        let category = TaxCategory::from_wire("luxury");
        assert_eq!(compute_tax(Money::new(dec!(100)), category), Money::zero());
    }

    #[test]
    fn test_zero_amount() {
        assert_eq!(compute_tax(Money::zero(), TaxCategory::Standard), Money::zero());
    }

    #[test]
    fn test_category_rates() {
        assert_eq!(TaxCategory::Standard.rate(), Some(STANDARD_RATE));
        assert_eq!(TaxCategory::Timbre.rate(), None);
        assert!(TaxCategory::Reduced.is_vat());
        assert!(!TaxCategory::Timbre.is_vat());
    }
}
