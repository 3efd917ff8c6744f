//! # Facture
//!
//! ```text
//! facture new
//! facture item add -d "Widget" -q 2 -p 50
//! facture save
//! ```

use std::process::ExitCode;

use clap::Parser;

use facture_cli::args::Cli;
use facture_cli::error::EXIT_SUCCESS;

fn main() -> ExitCode {
    facture_cli::init_tracing();

    let cli = Cli::parse();
    match facture_cli::run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(err) => {
            eprintln!("error {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}
