//! # Plain-Text Invoice Summary
//!
//! Read-only view of an invoice for the terminal. Never mutates the store.
//!
//! ```text
//! INVOICE INV-202610-042                                   [draft]
//! Date: 2026-10-19    Due: 2026-11-18
//!
//! From: Your Company Name            To: Client SARL
//! ───────────────────────────────────────────────────────────────
//! Description            Qty      Unit price   VAT        Total
//! Widget                   2      50.000 DT    standard   100.000 DT
//! ───────────────────────────────────────────────────────────────
//!                                     Subtotal        100.000 DT
//!                                     VAT 19%          19.000 DT
//!                                     TOTAL           119.000 DT
//! ```

use std::fmt::Write as _;

use facture_core::tax::{REDUCED_RATE, STANDARD_RATE};
use facture_core::{ClientDetails, Invoice};

use crate::state::ConfigState;

const RULE: &str = "────────────────────────────────────────────────────────────────────────";

/// Renders the invoice summary.
pub fn render_invoice(invoice: &Invoice, config: &ConfigState) -> String {
    let money = |m| config.format_currency(m);
    let mut out = String::new();

    let _ = writeln!(out, "INVOICE {:<48} [{}]", invoice.number, invoice.status);
    let _ = writeln!(out, "Id:   {}", invoice.id);
    let _ = writeln!(out, "Date: {}    Due: {}", invoice.date, invoice.due_date);
    let _ = writeln!(out);
    let _ = writeln!(out, "From: {}", invoice.company.name);
    if !invoice.company.matricule_fiscal.is_empty() {
        let _ = writeln!(out, "      MF {}", invoice.company.matricule_fiscal);
    }
    let _ = writeln!(out, "To:   {}", client_line(&invoice.client));
    let _ = writeln!(out, "{RULE}");

    let _ = writeln!(
        out,
        "{:<24} {:>8} {:>14} {:<9} {:>14}",
        "Description", "Qty", "Unit price", "VAT", "Total"
    );
    if invoice.items.is_empty() {
        let _ = writeln!(out, "(no line items)");
    }
    for item in &invoice.items {
        let _ = writeln!(
            out,
            "{:<24} {:>8} {:>14} {:<9} {:>14}",
            truncate(&item.description, 24),
            item.quantity.normalize(),
            money(item.unit_price),
            item.tax_category,
            money(item.total)
        );
        let _ = writeln!(out, "  id {}", item.id);
    }
    let _ = writeln!(out, "{RULE}");

    let totals = &invoice.totals;
    let breakdown = &invoice.vat_breakdown;
    let row = |out: &mut String, label: String, value: String| {
        let _ = writeln!(out, "{:>50} {:>20}", label, value);
    };
    row(&mut out, "Subtotal".into(), money(totals.subtotal));
    if !breakdown.standard.is_zero() {
        row(&mut out, format!("VAT {}%", STANDARD_RATE.percentage().normalize()), money(breakdown.standard));
    }
    if !breakdown.reduced.is_zero() {
        row(&mut out, format!("VAT {}%", REDUCED_RATE.percentage().normalize()), money(breakdown.reduced));
    }
    if !totals.timbre.is_zero() {
        row(&mut out, "Timbre fiscal".into(), money(totals.timbre));
    }
    row(&mut out, "TOTAL".into(), money(totals.total));

    if !invoice.notes.is_empty() {
        let _ = writeln!(out, "\nNotes: {}", invoice.notes);
    }
    if !invoice.terms.is_empty() {
        let _ = writeln!(out, "Terms: {}", invoice.terms);
    }
    out
}

/// One line per saved invoice: number, date, client, status, total.
pub fn render_invoice_list(invoices: &[Invoice], config: &ConfigState) -> String {
    if invoices.is_empty() {
        return "No saved invoices.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<16} {:<10} {:<24} {:<9} {:>16}  {}",
        "Number", "Date", "Client", "Status", "Total", "Id"
    );
    for invoice in invoices {
        let _ = writeln!(
            out,
            "{:<16} {:<10} {:<24} {:<9} {:>16}  {}",
            invoice.number,
            invoice.date,
            truncate(&invoice.client.name, 24),
            invoice.status,
            config.format_currency(invoice.totals.total),
            invoice.id
        );
    }
    out
}

pub fn render_client_list(clients: &[ClientDetails]) -> String {
    if clients.is_empty() {
        return "No clients.\n".to_string();
    }

    let mut out = String::new();
    for client in clients {
        let _ = writeln!(out, "{}  {}", client.id, client_line(client));
    }
    out
}

fn client_line(client: &ClientDetails) -> String {
    if client.name.is_empty() {
        return "(no client)".to_string();
    }
    let mut line = client.name.clone();
    if let Some(mf) = client.matricule_fiscal.as_deref().filter(|mf| !mf.is_empty()) {
        let _ = write!(line, " (MF {})", mf);
    }
    if !client.email.is_empty() {
        let _ = write!(line, " <{}>", client.email);
    }
    line
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
