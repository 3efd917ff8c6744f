//! Line item commands on the current invoice.

use std::io::Write;

use facture_core::validation::{
    validate_description, validate_line_item, validate_quantity, validate_unit_price,
};
use facture_core::{LineItemDraft, LineItemPatch};
use facture_store::InvoiceStore;

use crate::args::ItemCommand;
use crate::error::{CliError, CliResult};
use crate::state::ConfigState;

pub fn run(
    command: ItemCommand,
    store: &mut InvoiceStore,
    config: &ConfigState,
    out: &mut dyn Write,
) -> CliResult<()> {
    match command {
        ItemCommand::Add {
            description,
            quantity,
            price,
            vat,
        } => {
            let draft = LineItemDraft {
                description: description.trim().to_string(),
                quantity,
                unit_price: price,
                tax_category: vat,
            };
            validate_line_item(&draft)?;

            let item_id = store
                .add_line_item(draft)?
                .ok_or_else(CliError::no_current_invoice)?;
            writeln!(out, "Added line item {}", item_id)?;
        }

        ItemCommand::Update {
            id,
            description,
            quantity,
            price,
            vat,
        } => {
            let patch = LineItemPatch {
                description: description.map(|d| d.trim().to_string()),
                quantity,
                unit_price: price,
                tax_category: vat,
            };
            if patch.is_empty() {
                return Err(CliError::usage("Nothing to change; pass at least one field"));
            }
            if let Some(description) = &patch.description {
                validate_description(description)?;
            }
            if let Some(quantity) = patch.quantity {
                validate_quantity(quantity)?;
            }
            if let Some(price) = patch.unit_price {
                validate_unit_price(price)?;
            }

            require_item(store, &id)?;
            store.update_line_item(&id, patch)?;
            writeln!(out, "Updated line item {}", id)?;
        }

        ItemCommand::Remove { id } => {
            require_item(store, &id)?;
            store.remove_line_item(&id)?;
            writeln!(out, "Removed line item {}", id)?;
        }
    }

    print_totals(store, config, out)
}

fn require_item(store: &InvoiceStore, id: &str) -> CliResult<()> {
    let invoice = store.current_invoice().ok_or_else(CliError::no_current_invoice)?;
    match invoice.item(id) {
        Some(_) => Ok(()),
        None => Err(CliError::not_found("Line item", id)),
    }
}

fn print_totals(store: &InvoiceStore, config: &ConfigState, out: &mut dyn Write) -> CliResult<()> {
    if let Some(invoice) = store.current_invoice() {
        let totals = &invoice.totals;
        writeln!(
            out,
            "Subtotal {} | VAT {} | Timbre {} | Total {}",
            config.format_currency(totals.subtotal),
            config.format_currency(totals.tax),
            config.format_currency(totals.timbre),
            config.format_currency(totals.total)
        )?;
    }
    Ok(())
}
