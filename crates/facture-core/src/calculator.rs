//! # Standalone Calculators
//!
//! Quick VAT and price tools that work without an invoice: "what is 19% on
//! 250 TND", "how much of this 119 TND receipt is VAT".
//!
//! These tools carry their own published rate list (19%, 13%, 7%) and do not
//! go through the invoice tax engine.
//!
//! ```text
//! net → gross:   vat = net × rate          gross = net + vat
//! gross → net:   net = gross / (1 + rate)  vat   = gross − net
//! ```

use rust_decimal::Decimal;
use serde::Serialize;

use crate::money::Money;
use crate::types::TaxRate;

/// A VAT rate offered by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublishedRate {
    pub rate: TaxRate,
    pub label: &'static str,
    pub description: &'static str,
}

/// Rates shown by the VAT calculator.
pub const PUBLISHED_RATES: [PublishedRate; 3] = [
    PublishedRate {
        rate: TaxRate::from_percent(19),
        label: "Standard",
        description: "Standard rate for most goods and services",
    },
    PublishedRate {
        rate: TaxRate::from_percent(13),
        label: "Reduced",
        description: "Reduced rate for specific products and services",
    },
    PublishedRate {
        rate: TaxRate::from_percent(7),
        label: "Reduced",
        description: "Lower reduced rate for essential items",
    },
];

/// Net / VAT / gross triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VatCalculation {
    pub net: Money,
    pub vat: Money,
    pub gross: Money,
}

/// Adds VAT to a net amount.
pub fn vat_from_net(net: Money, rate: TaxRate) -> VatCalculation {
    let vat = net.calculate_tax(rate);
    VatCalculation {
        net,
        vat,
        gross: net + vat,
    }
}

/// Splits a VAT-inclusive amount into net and VAT.
///
/// ## Example
/// ```rust
/// use facture_core::calculator::vat_from_gross;
/// use facture_core::money::Money;
/// use facture_core::types::TaxRate;
///
/// let calc = vat_from_gross("119".parse().unwrap(), TaxRate::from_percent(19));
/// assert_eq!(calc.net, "100".parse::<Money>().unwrap());
/// assert_eq!(calc.vat, "19".parse::<Money>().unwrap());
/// ```
pub fn vat_from_gross(gross: Money, rate: TaxRate) -> VatCalculation {
    let net = Money::new(gross.amount() / (Decimal::ONE + rate.factor()));
    VatCalculation {
        net,
        vat: gross - net,
        gross,
    }
}

/// One row of the price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRow {
    pub rate: TaxRate,
    pub amount: Money,
    pub total: Money,
}

/// Base price with its standard- and reduced-rate variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceTable {
    pub base: Money,
    pub standard: PriceRow,
    pub reduced: PriceRow,
}

/// Builds the price table for a base (net) price.
pub fn price_table(base: Money) -> PriceTable {
    let row = |rate: TaxRate| {
        let calc = vat_from_net(base, rate);
        PriceRow {
            rate,
            amount: calc.vat,
            total: calc.gross,
        }
    };
    PriceTable {
        base,
        standard: row(TaxRate::from_percent(19)),
        reduced: row(TaxRate::from_percent(7)),
    }
}
