//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--db`)
//! 2. Environment variables (`FACTURE_*`)
//! 3. Defaults (this file)

use std::path::PathBuf;

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize};

use facture_core::{
    CompanyDetails, Money, CURRENCY_CODE, CURRENCY_DECIMALS, DEFAULT_INVOICE_PREFIX,
    DEFAULT_PAYMENT_DUE_DAYS, MAX_PAYMENT_DUE_DAYS,
};
use facture_store::StoreConfig;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite file. `None` means the platform data directory.
    pub db_path: Option<PathBuf>,

    /// Prefix of generated invoice numbers.
    pub invoice_prefix: String,

    /// Days from issue to due date on new invoices.
    pub payment_due_days: i64,

    /// Issuer printed on new invoices.
    pub company: CompanyDetails,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u32,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Prefix: INV
    /// - Due: 30 days
    /// - Currency: TND (DT), 3 decimals
    /// - Company: placeholder profile
    fn default() -> Self {
        ConfigState {
            db_path: None,
            invoice_prefix: DEFAULT_INVOICE_PREFIX.to_string(),
            payment_due_days: DEFAULT_PAYMENT_DUE_DAYS,
            company: CompanyDetails::default(),
            currency_code: CURRENCY_CODE.to_string(),
            currency_symbol: "DT".to_string(),
            currency_decimals: CURRENCY_DECIMALS,
        }
    }
}

impl ConfigState {
    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `FACTURE_DB_PATH`: SQLite file
    /// - `FACTURE_INVOICE_PREFIX`: e.g. `FAC`
    /// - `FACTURE_DUE_DAYS`: e.g. `15` (0 to 3650)
    /// - `FACTURE_COMPANY_NAME`, `FACTURE_COMPANY_EMAIL`,
    ///   `FACTURE_COMPANY_PHONE`, `FACTURE_COMPANY_ADDRESS`
    /// - `FACTURE_MATRICULE_FISCAL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = var("FACTURE_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Some(prefix) = var("FACTURE_INVOICE_PREFIX") {
            config.invoice_prefix = prefix;
        }

        if let Some(days) = var("FACTURE_DUE_DAYS") {
            match days.trim().parse::<i64>() {
                Ok(days) if (0..=MAX_PAYMENT_DUE_DAYS).contains(&days) => {
                    config.payment_due_days = days
                }
                _ => tracing::warn!(value = %days, "Ignoring invalid FACTURE_DUE_DAYS"),
            }
        }

        if let Some(name) = var("FACTURE_COMPANY_NAME") {
            config.company.name = name;
        }
        if let Some(email) = var("FACTURE_COMPANY_EMAIL") {
            config.company.email = email;
        }
        if let Some(phone) = var("FACTURE_COMPANY_PHONE") {
            config.company.phone = phone;
        }
        if let Some(address) = var("FACTURE_COMPANY_ADDRESS") {
            config.company.address = address;
        }
        if let Some(mf) = var("FACTURE_MATRICULE_FISCAL") {
            config.company.matricule_fiscal = mf;
        }

        config
    }

    /// Store defaults derived from this configuration.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::default()
            .invoice_prefix(self.invoice_prefix.clone())
            .payment_due_days(self.payment_due_days)
            .default_terms(format!("Payment due within {} days", self.payment_due_days))
            .company(self.company.clone())
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use facture_cli::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency("119".parse().unwrap()), "119.000 DT");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let rounded = amount
            .amount()
            .round_dp_with_strategy(self.currency_decimals, RoundingStrategy::MidpointAwayFromZero);
        format!(
            "{:.prec$} {}",
            rounded,
            self.currency_symbol,
            prec = self.currency_decimals as usize
        )
    }
}
