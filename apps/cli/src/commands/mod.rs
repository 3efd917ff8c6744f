//! # Commands
//!
//! One module per command group. Every command validates its input, calls
//! the store, and writes a short confirmation to `out`.
//!
//! ```text
//! facture new | show | set | recalc | save | load | list   → invoice.rs
//! facture item add | update | remove                      → item.rs
//! facture client add | update | remove | list | use       → client.rs
//! facture export | import                                 → data.rs
//! facture vat | price                                     → calc.rs (no store)
//! ```
//!
//! The store treats unknown ids as silent no-ops; commands check first and
//! report `NOT_FOUND` so the user gets a confirmation either way.

pub mod calc;
pub mod client;
pub mod data;
pub mod invoice;
pub mod item;

use std::io::Write;

use tracing::debug;

use facture_store::InvoiceStore;

use crate::args::Command;
use crate::error::CliResult;
use crate::state::ConfigState;

/// Runs one parsed command against an open store.
pub fn execute(
    command: Command,
    store: &mut InvoiceStore,
    config: &ConfigState,
    out: &mut dyn Write,
) -> CliResult<()> {
    debug!(?command, "Executing command");

    match command {
        Command::New => invoice::new_invoice(store, out),
        Command::Show { json } => invoice::show(store, config, json, out),
        Command::Set(args) => invoice::set(store, args, out),
        Command::Recalc => invoice::recalc(store, config, out),
        Command::Save => invoice::save(store, out),
        Command::Load { id } => invoice::load(store, &id, out),
        Command::List => invoice::list(store, config, out),
        Command::Item(cmd) => item::run(cmd, store, config, out),
        Command::Client(cmd) => client::run(cmd, store, out),
        Command::Export { output } => data::export(store, output.as_deref(), out),
        Command::Import { file } => data::import(store, &file, out),
        Command::Vat { amount, rate, gross } => calc::vat(amount, rate, gross, config, out),
        Command::Price { amount } => calc::price(amount, config, out),
    }
}
