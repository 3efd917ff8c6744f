//! # Calculators
//!
//! Stand-alone VAT helpers. They never open the invoice database.
//!
//! ```text
//! facture vat 100            facture vat 119 --gross     facture price 100
//! Net    100.000 DT          Net    100.000 DT           Base   100.000 DT
//! VAT     19.000 DT          VAT     19.000 DT           19%    +19.000 = 119.000 DT
//! Gross  119.000 DT          Gross  119.000 DT           7%      +7.000 = 107.000 DT
//! ```

use std::io::Write;

use rust_decimal::Decimal;

use facture_core::calculator::{price_table, vat_from_gross, vat_from_net, PUBLISHED_RATES};
use facture_core::validation::validate_amount;
use facture_core::Money;

use crate::error::{CliError, CliResult};
use crate::state::ConfigState;

/// Computes VAT on a net amount, or splits a gross amount with `gross`.
pub fn vat(
    amount: Money,
    rate: u32,
    gross: bool,
    config: &ConfigState,
    out: &mut dyn Write,
) -> CliResult<()> {
    let published = PUBLISHED_RATES
        .iter()
        .find(|p| p.rate.percentage() == Decimal::from(rate))
        .copied()
        .ok_or_else(|| {
            CliError::validation(format!("Unsupported VAT rate {}%; use 19, 13 or 7", rate))
        })?;
    validate_amount(amount)?;

    let calc = if gross {
        vat_from_gross(amount, published.rate)
    } else {
        vat_from_net(amount, published.rate)
    };

    writeln!(out, "{} {}%: {}", published.label, rate, published.description)?;
    writeln!(out, "Net    {:>16}", config.format_currency(calc.net))?;
    writeln!(out, "VAT    {:>16}", config.format_currency(calc.vat))?;
    writeln!(out, "Gross  {:>16}", config.format_currency(calc.gross))?;
    Ok(())
}

/// Prints a base price with its 19% and 7% variants.
pub fn price(amount: Money, config: &ConfigState, out: &mut dyn Write) -> CliResult<()> {
    validate_amount(amount)?;

    let table = price_table(amount);
    writeln!(out, "Base   {}", config.format_currency(table.base))?;
    for row in [table.standard, table.reduced] {
        writeln!(
            out,
            "{:<6} +{} = {}",
            format!("{}%", row.rate.percentage().normalize()),
            config.format_currency(row.amount),
            config.format_currency(row.total)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::output;
    use crate::error::ErrorCode;
    use rust_decimal_macros::dec;

    #[test]
    fn test_vat_from_net_and_gross() {
        let config = ConfigState::default();

        let mut out = Vec::new();
        vat(Money::new(dec!(100)), 19, false, &config, &mut out).unwrap();
        let text = output(out);
        assert!(text.starts_with("Standard 19%"));
        assert!(text.contains("19.000 DT"));
        assert!(text.contains("119.000 DT"));

        let mut out = Vec::new();
        vat(Money::new(dec!(107)), 7, true, &config, &mut out).unwrap();
        let text = output(out);
        assert!(text.contains("100.000 DT"));
        assert!(text.contains("7.000 DT"));
    }

    #[test]
    fn test_vat_rejects_unpublished_rate() {
        let err = vat(Money::new(dec!(100)), 25, false, &ConfigState::default(), &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_amount_bounds() {
        let config = ConfigState::default();

        let err = vat(Money::MAX, 19, false, &config, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = vat(Money::new(dec!(-1)), 19, true, &config, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        let err = price(Money::MAX, &config, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_price_table() {
        let mut out = Vec::new();
        price(Money::new(dec!(100)), &ConfigState::default(), &mut out).unwrap();
        let text = output(out);
        assert!(text.contains("+19.000 DT = 119.000 DT"));
        assert!(text.contains("+7.000 DT = 107.000 DT"));
    }
}
