//! # Domain Types
//!
//! The invoice document and everything embedded in it.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Invoice Document                                │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │ Invoice  id, number, date, due_date, status, language, notes ...  │ │
//! │  │                                                                   │ │
//! │  │  ┌────────────────┐ ┌────────────────┐ ┌────────────────────────┐ │ │
//! │  │  │ ClientDetails  │ │ CompanyDetails │ │ items: Vec<LineItem>   │ │ │
//! │  │  │ (snapshot,     │ │ (issuer)       │ │  quantity × unit_price │ │ │
//! │  │  │  by value)     │ │                │ │  tax_category          │ │ │
//! │  │  └────────────────┘ └────────────────┘ └────────────────────────┘ │ │
//! │  │                                                                   │ │
//! │  │  derived: vat_breakdown {standard, reduced, timbre}               │ │
//! │  │           totals        {subtotal, tax, timbre, total}            │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names serialise in camelCase and keep the names used by the web
//! version of the invoice builder (`vatType`, `vatAmount`, `vatBreakdown`,
//! `totals.vat`), so data exported there imports here unchanged.
//!
//! ## Patches
//! Partial updates are explicit patch structs (`InvoicePatch`,
//! `LineItemPatch`, `ClientPatch`). Merges are shallow: a nested value such as
//! `InvoicePatch::client` replaces the whole nested object.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::Money;
use crate::tax::compute_tax;
use crate::MAX_PAYMENT_DUE_DAYS;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1900 bps = 19% (Tunisian standard VAT)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a whole percentage.
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        TaxRate(pct * 100)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the multiplication factor (1900 bps → 0.19).
    pub fn factor(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Returns the rate as a percentage (for display only).
    pub fn percentage(&self) -> Decimal {
        Decimal::new(self.0 as i64, 2)
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Tax Category
// =============================================================================

/// Which tax applies to a line item.
///
/// `Timbre` is the fixed stamp duty charged per line regardless of amount;
/// it is modelled as a category so every line flows through one code path.
///
/// ## Lenient Decoding
/// Any unknown category name in stored or imported data decodes as
/// `Exempt`, which carries no tax. Strict parsing for user input is
/// available through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, TS)]
#[ts(export, rename_all = "lowercase")]
pub enum TaxCategory {
    /// 19% VAT.
    #[default]
    Standard,
    /// 7% VAT.
    Reduced,
    /// Fixed 1.000 TND stamp duty.
    Timbre,
    /// No tax. Also the fallback for unrecognised categories.
    Exempt,
}

impl TaxCategory {
    /// Wire name of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TaxCategory::Standard => "standard",
            TaxCategory::Reduced => "reduced",
            TaxCategory::Timbre => "timbre",
            TaxCategory::Exempt => "exempt",
        }
    }

    /// Decodes a wire name, mapping anything unknown to `Exempt`.
    pub fn from_wire(name: &str) -> Self {
        name.parse().unwrap_or(TaxCategory::Exempt)
    }
}

impl fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(TaxCategory::Standard),
            "reduced" => Ok(TaxCategory::Reduced),
            "timbre" => Ok(TaxCategory::Timbre),
            "exempt" => Ok(TaxCategory::Exempt),
            other => Err(CoreError::UnknownTaxCategory(other.to_string())),
        }
    }
}

impl Serialize for TaxCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaxCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(TaxCategory::from_wire(&name))
    }
}

// =============================================================================
// Language / Status
// =============================================================================

/// Document language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Ar,
    #[default]
    Fr,
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ar" => Ok(Language::Ar),
            "fr" => Ok(Language::Fr),
            other => Err(CoreError::UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::Ar => "ar",
            Language::Fr => "fr",
        })
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Being edited.
    #[default]
    Draft,
    /// Issued to the client.
    Final,
    /// Settled.
    Paid,
    /// Withdrawn.
    Cancelled,
}

impl FromStr for InvoiceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "draft" => Ok(InvoiceStatus::Draft),
            "final" => Ok(InvoiceStatus::Final),
            "paid" => Ok(InvoiceStatus::Paid),
            "cancelled" => Ok(InvoiceStatus::Cancelled),
            other => Err(CoreError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Final => "final",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Cancelled => "cancelled",
        })
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One line of an invoice.
///
/// ## Invariants
/// - `total == quantity × unit_price`
/// - `tax_amount == compute_tax(total, tax_category)`
///
/// Both are re-established by [`LineItem::refresh`] whenever quantity, price
/// or category change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub description: String,
    #[ts(as = "String")]
    pub quantity: Decimal,
    #[ts(as = "String")]
    pub unit_price: Money,
    #[serde(rename = "vatType")]
    pub tax_category: TaxCategory,
    /// Derived: tax for this line.
    #[serde(rename = "vatAmount")]
    #[ts(as = "String")]
    pub tax_amount: Money,
    /// Derived: quantity × unit price.
    #[ts(as = "String")]
    pub total: Money,
}

impl LineItem {
    /// Builds a full line item from caller input, stamping derived fields.
    pub fn from_draft(id: impl Into<String>, draft: LineItemDraft) -> Self {
        let mut item = LineItem {
            id: id.into(),
            description: draft.description,
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            tax_category: draft.tax_category,
            tax_amount: Money::zero(),
            total: Money::zero(),
        };
        item.refresh();
        item
    }

    /// Recomputes `total` and `tax_amount` from the editable fields.
    pub fn refresh(&mut self) {
        self.total = self.unit_price.multiply_quantity(self.quantity);
        self.tax_amount = compute_tax(self.total, self.tax_category);
    }

    /// Checks the line-level invariants.
    pub fn is_consistent(&self) -> bool {
        self.total == self.unit_price.multiply_quantity(self.quantity)
            && self.tax_amount == compute_tax(self.total, self.tax_category)
    }
}

/// Caller input for a new line item: everything except id and derived fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDraft {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Money,
    #[serde(rename = "vatType")]
    pub tax_category: TaxCategory,
}

/// Partial update of a line item. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPatch {
    pub description: Option<String>,
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Money>,
    #[serde(rename = "vatType")]
    pub tax_category: Option<TaxCategory>,
}

impl LineItemPatch {
    /// Merges the patch into `item` and refreshes its derived fields.
    pub fn apply_to(self, item: &mut LineItem) {
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(unit_price) = self.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(tax_category) = self.tax_category {
            item.tax_category = tax_category;
        }
        item.refresh();
    }

    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.quantity.is_none()
            && self.unit_price.is_none()
            && self.tax_category.is_none()
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client record. Copied into invoices by value.
///
/// Updating a client never changes invoices that already embed it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    pub id: String,
    pub name: String,
    /// Tax registration number (matricule fiscal).
    pub matricule_fiscal: Option<String>,
    pub email: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub language: Language,
}

impl ClientDetails {
    /// Builds a client record from caller input.
    pub fn from_draft(id: impl Into<String>, draft: ClientDraft) -> Self {
        ClientDetails {
            id: id.into(),
            name: draft.name,
            matricule_fiscal: draft.matricule_fiscal,
            email: draft.email,
            address: draft.address,
            phone: draft.phone,
            language: draft.language,
        }
    }
}

/// Caller input for a new client: everything except the id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDraft {
    pub name: String,
    pub matricule_fiscal: Option<String>,
    pub email: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub language: Language,
}

/// Partial update of a client record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the registration number.
    pub matricule_fiscal: Option<Option<String>>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub language: Option<Language>,
}

impl ClientPatch {
    pub fn apply_to(self, client: &mut ClientDetails) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(matricule_fiscal) = self.matricule_fiscal {
            client.matricule_fiscal = matricule_fiscal;
        }
        if let Some(email) = self.email {
            client.email = email;
        }
        if let Some(address) = self.address {
            client.address = address;
        }
        if let Some(phone) = self.phone {
            client.phone = phone;
        }
        if let Some(language) = self.language {
            client.language = language;
        }
    }
}

// =============================================================================
// Company
// =============================================================================

/// The issuer printed on every invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    pub name: String,
    pub matricule_fiscal: String,
    /// Registre National des Entreprises number.
    pub rne: String,
    pub email: String,
    pub address: String,
    pub phone: String,
    pub logo: Option<String>,
    pub signature: Option<String>,
    pub website: Option<String>,
}

impl Default for CompanyDetails {
    /// Placeholder profile used until the issuer configures their own.
    fn default() -> Self {
        CompanyDetails {
            name: "Your Company Name".to_string(),
            matricule_fiscal: String::new(),
            rne: String::new(),
            email: "contact@company.tn".to_string(),
            address: "Company Address, Tunisia".to_string(),
            phone: "+216 00 000 000".to_string(),
            logo: None,
            signature: None,
            website: Some("www.company.tn".to_string()),
        }
    }
}

// =============================================================================
// Derived Totals
// =============================================================================

/// Sum of line tax amounts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatBreakdown {
    #[ts(as = "String")]
    pub standard: Money,
    #[ts(as = "String")]
    pub reduced: Money,
    #[ts(as = "String")]
    pub timbre: Money,
}

/// Invoice-level totals.
///
/// ## Invariants
/// - `tax == vat_breakdown.standard + vat_breakdown.reduced`
/// - `timbre == vat_breakdown.timbre`
/// - `total == subtotal + tax + timbre`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceTotals {
    #[ts(as = "String")]
    pub subtotal: Money,
    /// Proportional VAT (standard + reduced), excluding the stamp duty.
    #[serde(rename = "vat")]
    #[ts(as = "String")]
    pub tax: Money,
    #[ts(as = "String")]
    pub timbre: Money,
    #[ts(as = "String")]
    pub total: Money,
}

// =============================================================================
// Invoice
// =============================================================================

/// Payment method tag set on new invoices.
pub const DEFAULT_PAYMENT_METHOD: &str = "bank_transfer";

/// The invoice document.
///
/// `vat_breakdown` and `totals` are derived from `items` by
/// [`crate::aggregator::recompute`]; never edit them by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    /// Human invoice number, e.g. `INV-202610-042`. Not guaranteed unique.
    pub number: String,
    /// Issue date.
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[ts(as = "String")]
    pub due_date: NaiveDate,
    /// Client snapshot, copied by value.
    pub client: ClientDetails,
    pub company: CompanyDetails,
    /// Display order is insertion order.
    pub items: Vec<LineItem>,
    pub notes: String,
    pub terms: String,
    pub language: Language,
    pub status: InvoiceStatus,
    pub vat_breakdown: VatBreakdown,
    pub totals: InvoiceTotals,
    pub payment_method: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates an empty draft: no items, zero totals, blank client skeleton.
    ///
    /// `due_in_days` is clamped to `0..=MAX_PAYMENT_DUE_DAYS`.
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        now: DateTime<Utc>,
        due_in_days: i64,
        company: CompanyDetails,
        terms: impl Into<String>,
    ) -> Self {
        let today = now.date_naive();
        let due_date = today
            .checked_add_signed(Duration::days(due_in_days.clamp(0, MAX_PAYMENT_DUE_DAYS)))
            .unwrap_or(today);
        Invoice {
            id: id.into(),
            number: number.into(),
            date: today,
            due_date,
            client: ClientDetails::default(),
            company,
            items: Vec::new(),
            notes: String::new(),
            terms: terms.into(),
            language: Language::default(),
            status: InvoiceStatus::Draft,
            vat_breakdown: VatBreakdown::default(),
            totals: InvoiceTotals::default(),
            payment_method: DEFAULT_PAYMENT_METHOD.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Finds a line item by id.
    pub fn item(&self, id: &str) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }
}

/// Shallow partial update of an invoice.
///
/// Nested objects (`client`, `company`, `items`, `totals`, ...) are replaced
/// whole. Applying a patch does NOT recompute totals: a caller replacing
/// `items` must reconcile afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub number: Option<String>,
    pub date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub client: Option<ClientDetails>,
    pub company: Option<CompanyDetails>,
    pub items: Option<Vec<LineItem>>,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub language: Option<Language>,
    pub status: Option<InvoiceStatus>,
    pub vat_breakdown: Option<VatBreakdown>,
    pub totals: Option<InvoiceTotals>,
    pub payment_method: Option<String>,
}

impl InvoicePatch {
    pub fn apply_to(self, invoice: &mut Invoice) {
        if let Some(value) = self.number {
            invoice.number = value;
        }
        if let Some(value) = self.date {
            invoice.date = value;
        }
        if let Some(value) = self.due_date {
            invoice.due_date = value;
        }
        if let Some(value) = self.client {
            invoice.client = value;
        }
        if let Some(value) = self.company {
            invoice.company = value;
        }
        if let Some(value) = self.items {
            invoice.items = value;
        }
        if let Some(value) = self.notes {
            invoice.notes = value;
        }
        if let Some(value) = self.terms {
            invoice.terms = value;
        }
        if let Some(value) = self.language {
            invoice.language = value;
        }
        if let Some(value) = self.status {
            invoice.status = value;
        }
        if let Some(value) = self.vat_breakdown {
            invoice.vat_breakdown = value;
        }
        if let Some(value) = self.totals {
            invoice.totals = value;
        }
        if let Some(value) = self.payment_method {
            invoice.payment_method = value;
        }
    }

    /// True when the patch touches fields the totals depend on.
    pub fn touches_items(&self) -> bool {
        self.items.is_some()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn widget() -> LineItemDraft {
        LineItemDraft {
            description: "Widget".to_string(),
            quantity: dec!(2),
            unit_price: Money::new(dec!(50)),
            tax_category: TaxCategory::Standard,
        }
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1900);
        assert_eq!(rate.bps(), 1900);
        assert_eq!(rate.factor(), dec!(0.19));
        assert_eq!(rate.percentage(), dec!(19));
        assert_eq!(TaxRate::from_percent(7), TaxRate::from_bps(700));
    }

    #[test]
    fn test_tax_category_strict_parse() {
        assert_eq!("Standard".parse::<TaxCategory>().unwrap(), TaxCategory::Standard);
        assert_eq!("timbre".parse::<TaxCategory>().unwrap(), TaxCategory::Timbre);
        assert!(matches!(
            "luxury".parse::<TaxCategory>(),
            Err(CoreError::UnknownTaxCategory(_))
        ));
    }

    #[test]
    fn test_tax_category_lenient_decode() {
        let known: TaxCategory = serde_json::from_str("\"reduced\"").unwrap();
        assert_eq!(known, TaxCategory::Reduced);

        let unknown: TaxCategory = serde_json::from_str("\"luxury\"").unwrap();
        assert_eq!(unknown, TaxCategory::Exempt);

        assert_eq!(serde_json::to_string(&TaxCategory::Timbre).unwrap(), "\"timbre\"");
    }

    #[test]
    fn test_line_item_from_draft_stamps_derived_fields() {
        let item = LineItem::from_draft("item-1", widget());
        assert_eq!(item.total, Money::new(dec!(100)));
        assert_eq!(item.tax_amount, Money::new(dec!(19)));
        assert!(item.is_consistent());
    }

    #[test]
    fn test_line_item_patch_refreshes() {
        let mut item = LineItem::from_draft("item-1", widget());
        LineItemPatch {
            quantity: Some(dec!(3)),
            tax_category: Some(TaxCategory::Reduced),
            ..Default::default()
        }
        .apply_to(&mut item);

        assert_eq!(item.description, "Widget");
        assert_eq!(item.total, Money::new(dec!(150)));
        assert_eq!(item.tax_amount, Money::new(dec!(10.5)));
    }

    #[test]
    fn test_line_item_wire_names() {
        let item = LineItem::from_draft("item-1", widget());
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["vatType"], "standard");
        assert_eq!(json["unitPrice"], "50");
        assert!(json.get("vatAmount").is_some());
    }

    #[test]
    fn test_new_invoice_is_empty_draft() {
        let now = Utc::now();
        let invoice = Invoice::new("id-1", "INV-202610-001", now, 30, CompanyDetails::default(), "terms");

        assert!(invoice.items.is_empty());
        assert_eq!(invoice.status, InvoiceStatus::Draft);
        assert_eq!(invoice.totals, InvoiceTotals::default());
        assert_eq!(invoice.due_date - invoice.date, Duration::days(30));
        assert_eq!(invoice.client.language, Language::Fr);
        assert_eq!(invoice.payment_method, "bank_transfer");
    }

    #[test]
    fn test_due_days_are_clamped() {
        let now = Utc::now();
        let far = Invoice::new("id", "N", now, 1_000_000_000, CompanyDetails::default(), "");
        assert_eq!(far.due_date - far.date, Duration::days(MAX_PAYMENT_DUE_DAYS));

        let extreme = Invoice::new("id", "N", now, i64::MAX, CompanyDetails::default(), "");
        assert_eq!(extreme.due_date, far.due_date);

        let past = Invoice::new("id", "N", now, -5, CompanyDetails::default(), "");
        assert_eq!(past.due_date, past.date);
    }

    #[test]
    fn test_invoice_patch_is_shallow() {
        let mut invoice = Invoice::new("id-1", "N", Utc::now(), 30, CompanyDetails::default(), "");
        invoice.client.email = "old@client.tn".to_string();

        InvoicePatch {
            client: Some(ClientDetails {
                name: "Client SARL".to_string(),
                ..Default::default()
            }),
            notes: Some("Merci".to_string()),
            ..Default::default()
        }
        .apply_to(&mut invoice);

        // Whole nested client replaced, not merged
        assert_eq!(invoice.client.name, "Client SARL");
        assert_eq!(invoice.client.email, "");
        assert_eq!(invoice.notes, "Merci");
        assert_eq!(invoice.number, "N");
    }

    #[test]
    fn test_client_patch_can_clear_registration() {
        let mut client = ClientDetails {
            matricule_fiscal: Some("1234567/A".to_string()),
            ..Default::default()
        };
        ClientPatch {
            matricule_fiscal: Some(None),
            ..Default::default()
        }
        .apply_to(&mut client);
        assert_eq!(client.matricule_fiscal, None);
    }
}
