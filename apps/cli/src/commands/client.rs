//! # Client Commands
//!
//! The client list is independent from invoices: editing or removing a
//! client never touches invoices that already carry a copy of it.

use std::io::Write;

use facture_core::validation::{validate_client, validate_email};
use facture_core::{ClientDraft, ClientPatch, ValidationError};
use facture_store::InvoiceStore;

use crate::args::{ClientCommand, ClientFields};
use crate::error::{CliError, CliResult};
use crate::render::render_client_list;

pub fn run(command: ClientCommand, store: &mut InvoiceStore, out: &mut dyn Write) -> CliResult<()> {
    match command {
        ClientCommand::Add(fields) => add(store, fields, out),
        ClientCommand::Update { id, fields } => update(store, &id, fields, out),
        ClientCommand::Remove { id } => {
            require_client(store, &id)?;
            store.remove_client(&id)?;
            writeln!(out, "Removed client {}", id)?;
            Ok(())
        }
        ClientCommand::List => {
            write!(out, "{}", render_client_list(store.clients()))?;
            Ok(())
        }
        ClientCommand::Use { id } => {
            if store.current_invoice().is_none() {
                return Err(CliError::no_current_invoice());
            }
            require_client(store, &id)?;
            store.apply_client(&id)?;
            writeln!(out, "Invoice client set to {}", id)?;
            Ok(())
        }
    }
}

fn add(store: &mut InvoiceStore, fields: ClientFields, out: &mut dyn Write) -> CliResult<()> {
    let draft = ClientDraft {
        name: fields.name.map(|n| n.trim().to_string()).unwrap_or_default(),
        matricule_fiscal: fields.mf.filter(|mf| !mf.trim().is_empty()),
        email: fields.email.unwrap_or_default(),
        address: fields.address.unwrap_or_default(),
        phone: fields.phone.unwrap_or_default(),
        language: fields.language.unwrap_or_default(),
    };
    validate_client(&draft)?;

    let id = store.add_client(draft)?;
    writeln!(out, "Added client {}", id)?;
    Ok(())
}

/// An empty `--mf ""` clears the registration number.
fn update(
    store: &mut InvoiceStore,
    id: &str,
    fields: ClientFields,
    out: &mut dyn Write,
) -> CliResult<()> {
    let patch = ClientPatch {
        name: fields.name.map(|n| n.trim().to_string()),
        matricule_fiscal: fields.mf.map(|mf| Some(mf).filter(|mf| !mf.trim().is_empty())),
        email: fields.email,
        address: fields.address,
        phone: fields.phone,
        language: fields.language,
    };
    if patch == ClientPatch::default() {
        return Err(CliError::usage("Nothing to change; pass at least one field"));
    }
    if patch.name.as_deref().is_some_and(str::is_empty) {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        }
        .into());
    }
    if let Some(email) = &patch.email {
        validate_email(email)?;
    }

    require_client(store, id)?;
    store.update_client(id, patch)?;
    writeln!(out, "Updated client {}", id)?;
    Ok(())
}

fn require_client(store: &InvoiceStore, id: &str) -> CliResult<()> {
    match store.find_client(id) {
        Some(_) => Ok(()),
        None => Err(CliError::not_found("Client", id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, store};
    use crate::error::ErrorCode;

    fn fields(name: &str) -> ClientFields {
        ClientFields {
            name: Some(name.to_string()),
            mf: Some("1234567A".into()),
            email: Some("achat@client.tn".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_and_list() {
        let mut store = store();
        let mut out = Vec::new();

        run(ClientCommand::Add(fields("Client SARL")), &mut store, &mut out).unwrap();
        run(ClientCommand::List, &mut store, &mut out).unwrap();

        let text = output(out);
        assert!(text.starts_with("Added client "));
        assert!(text.contains("Client SARL (MF 1234567A) <achat@client.tn>"));
        assert_eq!(store.clients().len(), 1);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let mut store = store();

        let err = run(ClientCommand::Add(fields("  ")), &mut store, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let mut bad_email = fields("Client SARL");
        bad_email.email = Some("nope".into());
        let err = run(ClientCommand::Add(bad_email), &mut store, &mut Vec::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(store.clients().is_empty());
    }

    #[test]
    fn test_update_clears_matricule() {
        let mut store = store();
        run(ClientCommand::Add(fields("Client SARL")), &mut store, &mut Vec::new()).unwrap();
        let id = store.clients()[0].id.clone();

        let update = ClientCommand::Update {
            id: id.clone(),
            fields: ClientFields {
                mf: Some(String::new()),
                ..Default::default()
            },
        };
        run(update, &mut store, &mut Vec::new()).unwrap();
        assert_eq!(store.clients()[0].matricule_fiscal, None);
        assert_eq!(store.clients()[0].name, "Client SARL");
    }

    #[test]
    fn test_unknown_client_is_not_found() {
        let mut store = store();
        store.create_invoice().unwrap();

        let err = run(ClientCommand::Remove { id: "nope".into() }, &mut store, &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        let err = run(ClientCommand::Use { id: "nope".into() }, &mut store, &mut Vec::new())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_use_copies_client() {
        let mut store = store();
        store.create_invoice().unwrap();
        run(ClientCommand::Add(fields("Client SARL")), &mut store, &mut Vec::new()).unwrap();
        let id = store.clients()[0].id.clone();

        run(ClientCommand::Use { id: id.clone() }, &mut store, &mut Vec::new()).unwrap();
        assert_eq!(store.current_invoice().unwrap().client.id, id);

        run(ClientCommand::Remove { id }, &mut store, &mut Vec::new()).unwrap();
        assert_eq!(store.current_invoice().unwrap().client.name, "Client SARL");
    }
}
