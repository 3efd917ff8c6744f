//! Export and import of saved invoices and clients.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::info;

use facture_store::InvoiceStore;

use crate::error::CliResult;

/// Writes the export document to `output`, or to `out` when no file is given.
pub fn export(store: &InvoiceStore, output: Option<&Path>, out: &mut dyn Write) -> CliResult<()> {
    let data = store.export_data()?;

    match output {
        Some(path) => {
            fs::write(path, &data)?;
            info!(path = %path.display(), "Exported data");
            writeln!(
                out,
                "Exported {} invoices and {} clients to {}",
                store.invoices().len(),
                store.clients().len(),
                path.display()
            )?;
        }
        None => writeln!(out, "{}", data)?,
    }
    Ok(())
}

/// Replaces saved invoices and clients with the contents of `file` (`-` reads stdin).
///
/// A rejected document leaves the store unchanged.
pub fn import(store: &mut InvoiceStore, file: &Path, out: &mut dyn Write) -> CliResult<()> {
    let data = if file == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(file)?
    };

    let summary = store.import_data(&data)?;
    writeln!(
        out,
        "Imported {} invoices and {} clients",
        summary.invoices, summary.clients
    )?;
    Ok(())
}
