//! # Invoice Aggregator
//!
//! Recomputes an invoice's derived money fields from its line items.
//!
//! ## Reconciliation Flow
//! ```text
//! items ──┬──► Σ item.total ─────────────────────────► subtotal
//!         │
//!         └──► group by category, Σ item.tax_amount ─► vat_breakdown
//!                                                        │
//!                    tax    = standard + reduced ◄───────┤
//!                    timbre = breakdown.timbre  ◄────────┘
//!
//!                    total  = subtotal + tax + timbre
//! ```
//!
//! Line-level fields (`total`, `tax_amount`) are trusted as stamped by the
//! item mutation handlers; this module only sums them. Only `vat_breakdown`
//! and `totals` are written. Calling [`recompute`] twice gives the same
//! result because decimal sums are exact.

use crate::money::Money;
use crate::types::{Invoice, InvoiceTotals, LineItem, TaxCategory, VatBreakdown};

/// Derived totals for a set of line items.
pub fn summarize(items: &[LineItem]) -> (VatBreakdown, InvoiceTotals) {
    let mut breakdown = VatBreakdown::default();
    let mut subtotal = Money::zero();

    for item in items {
        subtotal += item.total;
        match item.tax_category {
            TaxCategory::Standard => breakdown.standard += item.tax_amount,
            TaxCategory::Reduced => breakdown.reduced += item.tax_amount,
            TaxCategory::Timbre => breakdown.timbre += item.tax_amount,
            TaxCategory::Exempt => {}
        }
    }

    let tax = breakdown.standard + breakdown.reduced;
    let totals = InvoiceTotals {
        subtotal,
        tax,
        timbre: breakdown.timbre,
        total: subtotal + tax + breakdown.timbre,
    };
    (breakdown, totals)
}

/// Rewrites `vat_breakdown` and `totals` on `invoice`. Nothing else changes.
pub fn recompute(invoice: &mut Invoice) {
    let (breakdown, totals) = summarize(&invoice.items);
    invoice.vat_breakdown = breakdown;
    invoice.totals = totals;
}

/// Checks the invoice-level money invariants against the current items.
pub fn is_reconciled(invoice: &Invoice) -> bool {
    let (breakdown, totals) = summarize(&invoice.items);
    invoice.vat_breakdown == breakdown && invoice.totals == totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompanyDetails, LineItemDraft};
    use chrono::Utc;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn line(id: &str, qty: Decimal, price: Decimal, category: TaxCategory) -> LineItem {
        LineItem::from_draft(
            id,
            LineItemDraft {
                description: id.to_string(),
                quantity: qty,
                unit_price: Money::new(price),
                tax_category: category,
            },
        )
    }

    fn invoice_with(items: Vec<LineItem>) -> Invoice {
        let mut invoice = Invoice::new("inv", "INV-1", Utc::now(), 30, CompanyDetails::default(), "");
        invoice.items = items;
        invoice
    }

    #[test]
    fn test_empty_invoice_totals_are_zero() {
        let (breakdown, totals) = summarize(&[]);
        assert_eq!(breakdown, VatBreakdown::default());
        assert_eq!(totals, InvoiceTotals::default());
    }

    #[test]
    fn test_widget_plus_timbre_line() {
        let mut invoice = invoice_with(vec![
            line("a", dec!(2), dec!(50), TaxCategory::Standard),
            line("b", dec!(1), dec!(100), TaxCategory::Timbre),
        ]);
        recompute(&mut invoice);

        assert_eq!(invoice.vat_breakdown.standard, Money::new(dec!(19)));
        assert_eq!(invoice.vat_breakdown.timbre, Money::new(dec!(1)));
        assert_eq!(invoice.totals.subtotal, Money::new(dec!(200)));
        assert_eq!(invoice.totals.tax, Money::new(dec!(19)));
        assert_eq!(invoice.totals.timbre, Money::new(dec!(1)));
        assert_eq!(invoice.totals.total, Money::new(dec!(220)));
    }

    #[test]
    fn test_exempt_lines_count_in_subtotal_only() {
        let mut invoice = invoice_with(vec![line("a", dec!(1), dec!(40), TaxCategory::Exempt)]);
        recompute(&mut invoice);
        assert_eq!(invoice.totals.subtotal, Money::new(dec!(40)));
        assert_eq!(invoice.totals.tax, Money::zero());
        assert_eq!(invoice.totals.total, Money::new(dec!(40)));
    }

    #[test]
    fn test_recompute_leaves_other_fields_alone() {
        let mut invoice = invoice_with(vec![line("a", dec!(3), dec!(9.99), TaxCategory::Reduced)]);
        invoice.notes = "keep me".to_string();
        let before = invoice.clone();

        recompute(&mut invoice);

        assert_eq!(invoice.items, before.items);
        assert_eq!(invoice.notes, before.notes);
        assert_eq!(invoice.updated_at, before.updated_at);
    }

    #[test]
    fn test_sums_beyond_decimal_range_saturate() {
        let half = Decimal::MAX / dec!(2);
        let mut invoice = invoice_with(vec![
            line("a", dec!(1), half, TaxCategory::Standard),
            line("b", dec!(1), half, TaxCategory::Standard),
            line("c", dec!(1), half, TaxCategory::Standard),
            line("d", dec!(2), Decimal::MAX, TaxCategory::Reduced),
        ]);

        recompute(&mut invoice);
        assert_eq!(invoice.totals.subtotal, Money::MAX);
        assert_eq!(invoice.totals.total, Money::MAX);
        assert!(is_reconciled(&invoice));
        assert!(invoice.items.iter().all(LineItem::is_consistent));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut invoice = invoice_with(vec![
            line("a", dec!(3), dec!(0.1), TaxCategory::Standard),
            line("b", dec!(7), dec!(0.2), TaxCategory::Reduced),
        ]);
        recompute(&mut invoice);
        let once = (invoice.vat_breakdown, invoice.totals);
        recompute(&mut invoice);
        assert_eq!((invoice.vat_breakdown, invoice.totals), once);
        assert!(is_reconciled(&invoice));
    }

    fn category() -> impl Strategy<Value = TaxCategory> {
        prop_oneof![
            Just(TaxCategory::Standard),
            Just(TaxCategory::Reduced),
            Just(TaxCategory::Timbre),
            Just(TaxCategory::Exempt),
        ]
    }

    proptest! {
        #[test]
        fn prop_totals_reconcile(
            lines in prop::collection::vec((0i64..1_000, 0i64..10_000_000, category()), 0..20)
        ) {
            let items: Vec<LineItem> = lines
                .into_iter()
                .enumerate()
                .map(|(i, (qty, millimes, cat))| {
                    line(&i.to_string(), Decimal::from(qty), Decimal::new(millimes, 3), cat)
                })
                .collect();
            let mut invoice = invoice_with(items);
            recompute(&mut invoice);

            let subtotal: Money = invoice.items.iter().map(|i| i.total).sum();
            prop_assert_eq!(invoice.totals.subtotal, subtotal);
            prop_assert_eq!(
                invoice.totals.tax,
                invoice.vat_breakdown.standard + invoice.vat_breakdown.reduced
            );
            prop_assert_eq!(
                invoice.totals.total,
                invoice.totals.subtotal + invoice.totals.tax + invoice.totals.timbre
            );
            for cat in [TaxCategory::Standard, TaxCategory::Reduced, TaxCategory::Timbre] {
                let expected: Money = invoice
                    .items
                    .iter()
                    .filter(|i| i.tax_category == cat)
                    .map(|i| i.tax_amount)
                    .sum();
                let actual = match cat {
                    TaxCategory::Standard => invoice.vat_breakdown.standard,
                    TaxCategory::Reduced => invoice.vat_breakdown.reduced,
                    _ => invoice.vat_breakdown.timbre,
                };
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
