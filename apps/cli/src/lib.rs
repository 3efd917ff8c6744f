//! # Facture CLI
//!
//! Command line host for the invoice store.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          facture (binary)                               │
//! │                                                                         │
//! │  argv ──► args::Cli ──► run()                                           │
//! │                          │                                              │
//! │                          ├── vat / price ──► commands::calc (no store)  │
//! │                          │                                              │
//! │                          └── everything else                            │
//! │                                │                                        │
//! │                                ▼                                        │
//! │   ConfigState (env) ──► SqliteStorage ──► InvoiceStore                  │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                                     commands::execute ──► stdout        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Logging
//! Logs go to stderr so stdout stays clean for `export` and `show --json`.
//! Default level is `warn` with `info` for the facture crates; override
//! with `RUST_LOG`.

pub mod args;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use facture_store::{InvoiceStore, SqliteStorage};

use crate::args::{Cli, Command};
use crate::error::{CliError, CliResult, ErrorCode};
use crate::state::ConfigState;

/// File name of the database inside the data directory.
pub const DATABASE_FILE: &str = "facture.db";

/// Initializes the tracing subscriber.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,facture=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolves the SQLite file.
///
/// ## Priority
/// 1. `--db` / `FACTURE_DB_PATH`
/// 2. Platform data directory:
///    - Linux: `~/.local/share/facture/facture.db`
///    - macOS: `~/Library/Application Support/tn.facture.facture/facture.db`
///    - Windows: `%APPDATA%\facture\facture\data\facture.db`
pub fn database_path(config: &ConfigState) -> CliResult<PathBuf> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    ProjectDirs::from("tn", "facture", "facture")
        .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
        .ok_or_else(|| {
            CliError::new(
                ErrorCode::StorageError,
                "Could not determine the data directory; pass --db",
            )
        })
}

/// Opens the store on the configured database.
pub fn open_store(config: &ConfigState) -> CliResult<InvoiceStore> {
    let path = database_path(config)?;
    info!(path = %path.display(), "Opening invoice database");

    let storage = SqliteStorage::open(&path)?;
    Ok(InvoiceStore::open(storage, config.store_config())?)
}

/// Runs a parsed command line, writing results to stdout.
pub fn run(cli: Cli) -> CliResult<()> {
    let mut config = ConfigState::from_env();
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Vat { amount, rate, gross } => {
            commands::calc::vat(amount, rate, gross, &config, &mut out)
        }
        Command::Price { amount } => commands::calc::price(amount, &config, &mut out),
        command => {
            let mut store = open_store(&config)?;
            commands::execute(command, &mut store, &config, &mut out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_path_override() {
        let config = ConfigState {
            db_path: Some(PathBuf::from("/tmp/custom.db")),
            ..Default::default()
        };
        assert_eq!(database_path(&config).unwrap(), PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn test_open_store_persists_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigState {
            db_path: Some(dir.path().join("nested").join("facture.db")),
            ..Default::default()
        };

        let mut store = open_store(&config).unwrap();
        let id = store.create_invoice().unwrap();
        store.save_invoice().unwrap();
        drop(store);

        let store = open_store(&config).unwrap();
        assert_eq!(store.current_invoice().unwrap().id, id);
        assert_eq!(store.invoices().len(), 1);
    }
}
