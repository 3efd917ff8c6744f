//! # facture-core: Pure Invoice Logic
//!
//! This crate is the **heart** of Facture. It holds the invoice document
//! model and every calculation that derives money from it, as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Facture Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Hosts (CLI, web form, document renderer)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │     facture-store: InvoiceStore, import/export, SQLite          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ facture-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌────────────┐  ┌─────────┐        │   │
//! │  │   │  types  │  │   tax   │  │ aggregator │  │   ids   │        │   │
//! │  │   │ Invoice │  │ 19% 7%  │  │  subtotal  │  │  UUID   │        │   │
//! │  │   │LineItem │  │ timbre  │  │  breakdown │  │ INV-... │        │   │
//! │  │   └─────────┘  └─────────┘  └────────────┘  └─────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Invoice document types (Invoice, LineItem, ClientDetails, ...)
//! - [`money`] - Money type over an exact decimal (no floating point!)
//! - [`tax`] - Tax engine: category → tax amount
//! - [`aggregator`] - Recomputes subtotal, tax breakdown and grand total
//! - [`ids`] - Entity ids and human invoice numbers
//! - [`calculator`] - Standalone VAT / price calculators
//! - [`validation`] - Input rules applied by hosts before calling the store
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use facture_core::money::Money;
//! use facture_core::tax::compute_tax;
//! use facture_core::types::TaxCategory;
//!
//! let amount: Money = "100".parse().unwrap();
//! assert_eq!(compute_tax(amount, TaxCategory::Standard), "19".parse::<Money>().unwrap());
//! assert_eq!(compute_tax(amount, TaxCategory::Timbre), Money::from_millimes(1000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregator;
pub mod calculator;
pub mod error;
pub mod ids;
pub mod money;
pub mod tax;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Prefix used for human invoice numbers when none is configured.
pub const DEFAULT_INVOICE_PREFIX: &str = "INV";

/// ISO 4217 code of the invoicing currency (Tunisian dinar).
pub const CURRENCY_CODE: &str = "TND";

/// Fractional digits used when presenting amounts (1 TND = 1000 millimes).
pub const CURRENCY_DECIMALS: u32 = 3;

/// Days between issue date and due date on a new invoice.
pub const DEFAULT_PAYMENT_DUE_DAYS: i64 = 30;

/// Longest accepted payment term in days (ten years).
pub const MAX_PAYMENT_DUE_DAYS: i64 = 3650;

/// Maximum quantity accepted on a single line.
///
/// ## Business Reason
/// Catches typos like 10000 instead of 10 before they reach a printed invoice.
pub const MAX_ITEM_QUANTITY: i64 = 100_000;

/// Maximum unit price (and calculator amount) in dinars.
///
/// Together with [`MAX_ITEM_QUANTITY`] this keeps every line total, and any
/// realistic invoice sum, far from the decimal range limit.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000;

/// Maximum length of a line item description.
pub const MAX_DESCRIPTION_LEN: usize = 500;
