//! Command line definition.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use facture_core::{InvoiceStatus, Language, Money, TaxCategory};

#[derive(Debug, Parser)]
#[command(name = "facture")]
#[command(about = "Build, save and export invoices (TND, Tunisian VAT)")]
#[command(version)]
pub struct Cli {
    /// SQLite database file (defaults to the platform data directory)
    #[arg(long, global = true, env = "FACTURE_DB_PATH", value_name = "FILE")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a new draft invoice (replaces the current one)
    New,

    /// Show the current invoice
    Show {
        /// Print the invoice document as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit fields of the current invoice
    Set(SetArgs),

    /// Recompute totals of the current invoice
    Recalc,

    /// Save the current invoice into the invoice list
    Save,

    /// Make a saved invoice current
    Load {
        /// Invoice id (see `facture list`)
        id: String,
    },

    /// List saved invoices
    List,

    /// Manage line items of the current invoice
    #[command(subcommand)]
    Item(ItemCommand),

    /// Manage clients
    #[command(subcommand)]
    Client(ClientCommand),

    /// Write saved invoices and clients as JSON
    #[command(after_help = "\
Examples:
  facture export -o backup.json
  facture export > backup.json")]
    Export {
        /// Output file (stdout if omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Replace saved invoices and clients from a JSON export
    Import {
        /// Export file, or `-` for stdin
        file: PathBuf,
    },

    /// VAT calculator
    #[command(after_help = "\
Examples:
  facture vat 250            # 19% on top of 250
  facture vat 119 --gross    # split 119 into net + VAT
  facture vat 80 --rate 13")]
    Vat {
        amount: Money,

        /// Rate in percent (19, 13 or 7)
        #[arg(long, default_value_t = 19)]
        rate: u32,

        /// Treat the amount as VAT-inclusive
        #[arg(long)]
        gross: bool,
    },

    /// Price table at the standard and reduced rates
    Price { amount: Money },
}

#[derive(Debug, Args, Default)]
pub struct SetArgs {
    #[arg(long)]
    pub number: Option<String>,

    /// Issue date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due_date: Option<NaiveDate>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub terms: Option<String>,

    /// ar | fr
    #[arg(long)]
    pub language: Option<Language>,

    /// draft | final | paid | cancelled
    #[arg(long)]
    pub status: Option<InvoiceStatus>,

    #[arg(long)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ItemCommand {
    /// Append a line item
    Add {
        #[arg(long, short = 'd')]
        description: String,

        #[arg(long, short = 'q', default_value = "1")]
        quantity: Decimal,

        /// Unit price (TND)
        #[arg(long, short = 'p')]
        price: Money,

        /// standard | reduced | timbre
        #[arg(long, default_value = "standard")]
        vat: TaxCategory,
    },

    /// Change fields of a line item
    Update {
        id: String,

        #[arg(long, short = 'd')]
        description: Option<String>,

        #[arg(long, short = 'q')]
        quantity: Option<Decimal>,

        #[arg(long, short = 'p')]
        price: Option<Money>,

        #[arg(long)]
        vat: Option<TaxCategory>,
    },

    /// Remove a line item
    Remove { id: String },
}

#[derive(Debug, Args, Default)]
pub struct ClientFields {
    #[arg(long)]
    pub name: Option<String>,

    /// Matricule fiscal
    #[arg(long)]
    pub mf: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// ar | fr
    #[arg(long)]
    pub language: Option<Language>,
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Add a client
    Add(ClientFields),

    /// Change fields of a client
    Update {
        id: String,

        #[command(flatten)]
        fields: ClientFields,
    },

    /// Remove a client
    Remove { id: String },

    /// List clients
    List,

    /// Copy a client into the current invoice
    Use { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_item_add() {
        let cli = Cli::try_parse_from([
            "facture", "item", "add", "-d", "Widget", "-q", "2", "-p", "50", "--vat", "reduced",
        ])
        .unwrap();

        match cli.command {
            Command::Item(ItemCommand::Add { description, quantity, price, vat }) => {
                assert_eq!(description, "Widget");
                assert_eq!(quantity, Decimal::from(2));
                assert_eq!(price, "50".parse::<Money>().unwrap());
                assert_eq!(vat, TaxCategory::Reduced);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_vat_category() {
        let result = Cli::try_parse_from([
            "facture", "item", "add", "-d", "Widget", "-p", "50", "--vat", "luxury",
        ]);
        assert!(result.is_err());
    }
}
