//! # Invoice Commands
//!
//! Lifecycle of the current invoice.
//!
//! ```text
//! ┌──────────┐  new   ┌──────────┐  set / item ...  ┌──────────┐
//! │   none   │───────►│  draft   │─────────────────►│  edited  │
//! └──────────┘        └──────────┘                  └────┬─────┘
//!       ▲                   ▲                            │ save
//!       │ load <unknown>    │ load <id>                  ▼
//!       └───────────────────┴──────────────────── saved invoices
//! ```

use std::io::Write;

use facture_core::InvoicePatch;
use facture_store::InvoiceStore;

use crate::args::SetArgs;
use crate::error::{CliError, CliResult};
use crate::render::{render_invoice, render_invoice_list};
use crate::state::ConfigState;

/// Starts a new draft invoice.
pub fn new_invoice(store: &mut InvoiceStore, out: &mut dyn Write) -> CliResult<()> {
    let id = store.create_invoice()?;
    let number = store
        .current_invoice()
        .map(|i| i.number.clone())
        .ok_or_else(CliError::no_current_invoice)?;

    writeln!(out, "Created invoice {} ({})", number, id)?;
    Ok(())
}

/// Prints the current invoice as a summary or as JSON.
pub fn show(
    store: &InvoiceStore,
    config: &ConfigState,
    json: bool,
    out: &mut dyn Write,
) -> CliResult<()> {
    let invoice = store.current_invoice().ok_or_else(CliError::no_current_invoice)?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(invoice)?)?;
    } else {
        write!(out, "{}", render_invoice(invoice, config))?;
    }
    Ok(())
}

/// Shallow-merges header fields into the current invoice.
pub fn set(store: &mut InvoiceStore, args: SetArgs, out: &mut dyn Write) -> CliResult<()> {
    let invoice = store.current_invoice().ok_or_else(CliError::no_current_invoice)?;

    let patch = InvoicePatch {
        number: args.number,
        date: args.date,
        due_date: args.due_date,
        notes: args.notes,
        terms: args.terms,
        language: args.language,
        status: args.status,
        payment_method: args.payment_method,
        ..Default::default()
    };
    if patch == InvoicePatch::default() {
        return Err(CliError::usage("Nothing to change; pass at least one field"));
    }

    let date = patch.date.unwrap_or(invoice.date);
    let due_date = patch.due_date.unwrap_or(invoice.due_date);
    if due_date < date {
        return Err(CliError::validation(format!(
            "Due date {} is before issue date {}",
            due_date, date
        )));
    }
    if patch.number.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(CliError::validation("Invoice number must not be empty"));
    }

    store.update_invoice(patch)?;
    let number = store.current_invoice().map(|i| i.number.as_str()).unwrap_or_default();
    writeln!(out, "Updated invoice {}", number)?;
    Ok(())
}

/// Recomputes totals of the current invoice.
pub fn recalc(store: &mut InvoiceStore, config: &ConfigState, out: &mut dyn Write) -> CliResult<()> {
    if store.current_invoice().is_none() {
        return Err(CliError::no_current_invoice());
    }
    store.calculate_totals()?;

    if let Some(invoice) = store.current_invoice() {
        writeln!(out, "Total: {}", config.format_currency(invoice.totals.total))?;
    }
    Ok(())
}

/// Saves the current invoice and shows the next number.
pub fn save(store: &mut InvoiceStore, out: &mut dyn Write) -> CliResult<()> {
    let (id, number) = store
        .current_invoice()
        .map(|i| (i.id.clone(), i.number.clone()))
        .ok_or_else(CliError::no_current_invoice)?;

    store.save_invoice()?;
    writeln!(out, "Saved invoice {} ({})", number, id)?;
    writeln!(out, "Next invoice number: {}", store.next_invoice_number())?;
    Ok(())
}

/// Makes a saved invoice current.
///
/// An unknown id still clears the current invoice (store semantics) and is
/// then reported as `NOT_FOUND`.
pub fn load(store: &mut InvoiceStore, id: &str, out: &mut dyn Write) -> CliResult<()> {
    store.load_invoice(id)?;

    match store.current_invoice() {
        Some(invoice) => {
            writeln!(out, "Loaded invoice {}", invoice.number)?;
            Ok(())
        }
        None => Err(CliError::not_found("Invoice", id)),
    }
}

pub fn list(store: &InvoiceStore, config: &ConfigState, out: &mut dyn Write) -> CliResult<()> {
    write!(out, "{}", render_invoice_list(store.invoices(), config))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, store};
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use facture_core::InvoiceStatus;

    #[test]
    fn test_commands_need_current_invoice() {
        let mut store = store();
        let mut out = Vec::new();

        let err = show(&store, &ConfigState::default(), false, &mut out).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(save(&mut store, &mut out).is_err());
        assert!(recalc(&mut store, &ConfigState::default(), &mut out).is_err());
    }

    #[test]
    fn test_new_then_save() {
        let mut store = store();
        let mut out = Vec::new();

        new_invoice(&mut store, &mut out).unwrap();
        save(&mut store, &mut out).unwrap();

        let text = output(out);
        assert!(text.starts_with("Created invoice INV-"));
        assert!(text.contains("Saved invoice"));
        assert_eq!(store.invoices().len(), 1);
    }

    #[test]
    fn test_set_fields() {
        let mut store = store();
        new_invoice(&mut store, &mut Vec::new()).unwrap();

        let args = SetArgs {
            notes: Some("Merci".into()),
            status: Some(InvoiceStatus::Final),
            ..Default::default()
        };
        set(&mut store, args, &mut Vec::new()).unwrap();

        let invoice = store.current_invoice().unwrap();
        assert_eq!(invoice.notes, "Merci");
        assert_eq!(invoice.status, InvoiceStatus::Final);
    }

    #[test]
    fn test_set_rejects_due_before_issue() {
        let mut store = store();
        new_invoice(&mut store, &mut Vec::new()).unwrap();

        let args = SetArgs {
            date: NaiveDate::from_ymd_opt(2026, 5, 10),
            due_date: NaiveDate::from_ymd_opt(2026, 5, 1),
            ..Default::default()
        };
        let err = set(&mut store, args, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = set(&mut store, SetArgs::default(), &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::Usage);
    }

    #[test]
    fn test_load_unknown_clears_current() {
        let mut store = store();
        new_invoice(&mut store, &mut Vec::new()).unwrap();

        let err = load(&mut store, "missing", &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(store.current_invoice().is_none());
    }
}
