//! # Invoice Store
//!
//! Owns the current invoice, the saved invoices and the client list, and is
//! the only place they change.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    InvoiceStore Operations                              │
//! │                                                                         │
//! │  Host Action              Operation               State Change          │
//! │  ───────────              ─────────               ────────────          │
//! │                                                                         │
//! │  New invoice ───────────► create_invoice() ─────► current = draft      │
//! │                                                                         │
//! │  Edit header ───────────► update_invoice() ─────► shallow merge        │
//! │                                                                         │
//! │  Add line ──────────────► add_line_item() ──────► items.push + totals  │
//! │                                                                         │
//! │  Edit line ─────────────► update_line_item() ───► items[i] + totals    │
//! │                                                                         │
//! │  Remove line ───────────► remove_line_item() ───► items.retain + totals│
//! │                                                                         │
//! │  Save ──────────────────► save_invoice() ───────► upsert + new number  │
//! │                                                                         │
//! │  Open saved ────────────► load_invoice() ───────► current = copy       │
//! │                                                                         │
//! │  NOTE: every state change is persisted (full record overwrite) and     │
//! │        then announced to subscribers.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Absent Targets
//! Operating on an id that does not exist, or on items while there is no
//! current invoice, changes nothing: no write, no event, `Ok(())`.
//!
//! ## Persistence Failures
//! The in-memory mutation always happens first. If the write then fails the
//! operation returns `Err(StoreError::Storage)`, subscribers are still
//! notified, and the in-memory state stays authoritative.

use chrono::Utc;
use tracing::{debug, error, info, warn};

use facture_core::aggregator;
use facture_core::ids::{new_id, new_invoice_number};
use facture_core::{
    ClientDetails, ClientDraft, ClientPatch, CompanyDetails, Invoice, InvoicePatch, LineItem,
    LineItemDraft, LineItemPatch, DEFAULT_INVOICE_PREFIX, DEFAULT_PAYMENT_DUE_DAYS,
};

use crate::codec::{self, ImportSummary, StoreState};
use crate::error::StoreResult;
use crate::events::{StoreEvent, SubscriptionId, Subscribers};
use crate::storage::StateStorage;

/// Name of the persisted record when none is configured.
pub const DEFAULT_RECORD_NAME: &str = "invoice-storage";

/// Suffix of the key that keeps a copy of an unreadable record.
pub const CORRUPT_RECORD_SUFFIX: &str = ".corrupt";

/// Terms printed on new invoices when none are configured.
pub const DEFAULT_TERMS: &str = "Payment due within 30 days";

// =============================================================================
// Configuration
// =============================================================================

/// Defaults the store stamps onto new invoices.
///
/// ## Example
/// ```rust
/// use facture_store::StoreConfig;
///
/// let config = StoreConfig::default().invoice_prefix("FAC").payment_due_days(15);
/// assert_eq!(config.record_name, "invoice-storage");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Storage key of the persisted record.
    pub record_name: String,

    /// Prefix of generated invoice numbers (`INV` → `INV-202610-042`).
    pub invoice_prefix: String,

    /// Due date offset from the issue date.
    /// Default: 30
    pub payment_due_days: i64,

    pub default_terms: String,

    /// Issuer copied into every new invoice.
    pub company: CompanyDetails,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            record_name: DEFAULT_RECORD_NAME.to_string(),
            invoice_prefix: DEFAULT_INVOICE_PREFIX.to_string(),
            payment_due_days: DEFAULT_PAYMENT_DUE_DAYS,
            default_terms: DEFAULT_TERMS.to_string(),
            company: CompanyDetails::default(),
        }
    }
}

impl StoreConfig {
    /// Key under which an unreadable record is preserved, e.g.
    /// `invoice-storage.corrupt`.
    pub fn corrupt_record_name(&self) -> String {
        format!("{}{}", self.record_name, CORRUPT_RECORD_SUFFIX)
    }

    pub fn record_name(mut self, name: impl Into<String>) -> Self {
        self.record_name = name.into();
        self
    }

    pub fn invoice_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.invoice_prefix = prefix.into();
        self
    }

    pub fn payment_due_days(mut self, days: i64) -> Self {
        self.payment_due_days = days;
        self
    }

    pub fn default_terms(mut self, terms: impl Into<String>) -> Self {
        self.default_terms = terms.into();
        self
    }

    pub fn company(mut self, company: CompanyDetails) -> Self {
        self.company = company;
        self
    }
}

// =============================================================================
// Store
// =============================================================================

/// The invoice state store.
///
/// ## Invariants
/// After every item operation (and `calculate_totals`) the current invoice's
/// `vat_breakdown` and `totals` match its items. `update_invoice` is the one
/// exception: it merges as told and leaves reconciliation to the caller.
pub struct InvoiceStore {
    storage: Box<dyn StateStorage>,
    config: StoreConfig,
    state: StoreState,
    subscribers: Subscribers,
}

impl InvoiceStore {
    /// Seeds the store from the persisted record.
    ///
    /// ## Startup Cases
    /// - No record: fresh, empty state
    /// - Unreadable record: copied to [`StoreConfig::corrupt_record_name`],
    ///   logged at `warn`, fresh state
    /// - Storage failure (including the backup write): `Err(StoreError::Storage)`
    pub fn open(storage: impl StateStorage + 'static, config: StoreConfig) -> StoreResult<Self> {
        let mut storage: Box<dyn StateStorage> = Box::new(storage);

        let mut state = match storage.read(&config.record_name)? {
            None => {
                info!(record = %config.record_name, "No persisted state, starting fresh");
                StoreState::default()
            }
            Some(raw) => match codec::decode_record(&raw) {
                Ok(state) => {
                    info!(
                        record = %config.record_name,
                        invoices = state.invoices.len(),
                        clients = state.clients.len(),
                        "Loaded persisted state"
                    );
                    state
                }
                Err(e) => {
                    let backup = config.corrupt_record_name();
                    storage.write(&backup, &raw)?;
                    warn!(
                        record = %config.record_name,
                        backup = %backup,
                        error = %e,
                        "Unreadable persisted state moved aside, starting fresh"
                    );
                    StoreState::default()
                }
            },
        };

        if state.next_invoice_number.is_empty() {
            state.next_invoice_number = new_invoice_number(&config.invoice_prefix);
        }

        Ok(InvoiceStore {
            storage,
            config,
            state,
            subscribers: Subscribers::default(),
        })
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn current_invoice(&self) -> Option<&Invoice> {
        self.state.current_invoice.as_ref()
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.state.invoices
    }

    pub fn clients(&self) -> &[ClientDetails] {
        &self.state.clients
    }

    pub fn next_invoice_number(&self) -> &str {
        &self.state.next_invoice_number
    }

    pub fn find_invoice(&self, id: &str) -> Option<&Invoice> {
        self.state.invoices.iter().find(|i| i.id == id)
    }

    pub fn find_client(&self, id: &str) -> Option<&ClientDetails> {
        self.state.clients.iter().find(|c| c.id == id)
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Registers a callback run after every state change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent, &StoreState) + Send + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    // -------------------------------------------------------------------------
    // Invoice Operations
    // -------------------------------------------------------------------------

    /// Replaces the current invoice with an empty draft and returns its id.
    ///
    /// The draft takes `next_invoice_number`; the number itself only rotates
    /// on save, and the saved collection is not touched.
    pub fn create_invoice(&mut self) -> StoreResult<String> {
        let invoice = Invoice::new(
            new_id(),
            self.state.next_invoice_number.clone(),
            Utc::now(),
            self.config.payment_due_days,
            self.config.company.clone(),
            self.config.default_terms.clone(),
        );
        let invoice_id = invoice.id.clone();
        debug!(invoice_id = %invoice_id, number = %invoice.number, "Invoice created");

        self.state.current_invoice = Some(invoice);
        self.commit(StoreEvent::InvoiceCreated {
            invoice_id: invoice_id.clone(),
        })?;
        Ok(invoice_id)
    }

    /// Shallow-merges `patch` into the current invoice.
    ///
    /// Nested values (`client`, `company`, `items`, `totals`) are replaced
    /// whole. Totals are NOT recomputed: after replacing `items` call
    /// [`InvoiceStore::calculate_totals`].
    pub fn update_invoice(&mut self, patch: InvoicePatch) -> StoreResult<()> {
        let Some(invoice) = self.state.current_invoice.as_mut() else {
            debug!("update_invoice without a current invoice");
            return Ok(());
        };

        if patch.touches_items() {
            debug!(invoice_id = %invoice.id, "Items replaced; totals left for calculate_totals");
        }
        patch.apply_to(invoice);
        let invoice_id = invoice.id.clone();

        self.commit(StoreEvent::InvoiceUpdated { invoice_id })
    }

    /// Appends a line item built from `draft` and returns its id.
    ///
    /// Returns `Ok(None)` when there is no current invoice.
    pub fn add_line_item(&mut self, draft: LineItemDraft) -> StoreResult<Option<String>> {
        let Some(invoice) = self.state.current_invoice.as_mut() else {
            debug!("add_line_item without a current invoice");
            return Ok(None);
        };

        let item = LineItem::from_draft(new_id(), draft);
        let item_id = item.id.clone();
        debug!(
            invoice_id = %invoice.id,
            item_id = %item_id,
            total = %item.total,
            tax = %item.tax_amount,
            "Line item added"
        );
        invoice.items.push(item);
        reconcile(invoice);

        let event = StoreEvent::LineItemAdded {
            invoice_id: invoice.id.clone(),
            item_id: item_id.clone(),
        };
        self.commit(event)?;
        Ok(Some(item_id))
    }

    /// Removes the line item with `item_id`. Absent ids are ignored.
    pub fn remove_line_item(&mut self, item_id: &str) -> StoreResult<()> {
        let Some(invoice) = self.state.current_invoice.as_mut() else {
            debug!(item_id, "remove_line_item without a current invoice");
            return Ok(());
        };

        let before = invoice.items.len();
        invoice.items.retain(|i| i.id != item_id);
        if invoice.items.len() == before {
            debug!(invoice_id = %invoice.id, item_id, "No such line item");
            return Ok(());
        }
        reconcile(invoice);

        let event = StoreEvent::LineItemRemoved {
            invoice_id: invoice.id.clone(),
            item_id: item_id.to_string(),
        };
        self.commit(event)
    }

    /// Merges `patch` into the line item with `item_id` and refreshes its
    /// `total` and `tax_amount`. Absent ids are ignored.
    pub fn update_line_item(&mut self, item_id: &str, patch: LineItemPatch) -> StoreResult<()> {
        let Some(invoice) = self.state.current_invoice.as_mut() else {
            debug!(item_id, "update_line_item without a current invoice");
            return Ok(());
        };

        let Some(item) = invoice.items.iter_mut().find(|i| i.id == item_id) else {
            debug!(invoice_id = %invoice.id, item_id, "No such line item");
            return Ok(());
        };
        patch.apply_to(item);
        reconcile(invoice);

        let event = StoreEvent::LineItemUpdated {
            invoice_id: invoice.id.clone(),
            item_id: item_id.to_string(),
        };
        self.commit(event)
    }

    /// Recomputes the current invoice's breakdown and totals on demand.
    pub fn calculate_totals(&mut self) -> StoreResult<()> {
        let Some(invoice) = self.state.current_invoice.as_mut() else {
            return Ok(());
        };
        reconcile(invoice);

        let invoice_id = invoice.id.clone();
        self.commit(StoreEvent::TotalsCalculated { invoice_id })
    }

    /// Copies the current invoice into the saved collection.
    ///
    /// ## Behavior
    /// - Stamps `updated_at`
    /// - Upsert by id: any earlier copy is dropped and the new one appended
    /// - Rotates `next_invoice_number`
    pub fn save_invoice(&mut self) -> StoreResult<()> {
        let Some(invoice) = self.state.current_invoice.as_mut() else {
            debug!("save_invoice without a current invoice");
            return Ok(());
        };

        invoice.updated_at = Utc::now();
        let saved = invoice.clone();

        self.state.invoices.retain(|i| i.id != saved.id);
        self.state.invoices.push(saved.clone());
        self.state.next_invoice_number = new_invoice_number(&self.config.invoice_prefix);

        info!(
            invoice_id = %saved.id,
            number = %saved.number,
            total = %saved.totals.total,
            "Invoice saved"
        );
        self.commit(StoreEvent::InvoiceSaved {
            invoice_id: saved.id,
            number: saved.number,
        })
    }

    /// Makes a copy of the saved invoice with `invoice_id` current.
    ///
    /// When nothing matches the current invoice becomes empty; this is not
    /// an error.
    pub fn load_invoice(&mut self, invoice_id: &str) -> StoreResult<()> {
        let found = self.find_invoice(invoice_id).cloned();
        if found.is_none() {
            debug!(invoice_id, "No saved invoice with this id; current cleared");
        }
        let loaded_id = found.as_ref().map(|i| i.id.clone());

        self.state.current_invoice = found;
        self.commit(StoreEvent::InvoiceLoaded {
            invoice_id: loaded_id,
        })
    }

    // -------------------------------------------------------------------------
    // Client Operations
    // -------------------------------------------------------------------------

    /// Adds a client record and returns its generated id.
    pub fn add_client(&mut self, draft: ClientDraft) -> StoreResult<String> {
        let client = ClientDetails::from_draft(new_id(), draft);
        let client_id = client.id.clone();
        debug!(client_id = %client_id, name = %client.name, "Client added");

        self.state.clients.push(client);
        self.commit(StoreEvent::ClientAdded {
            client_id: client_id.clone(),
        })?;
        Ok(client_id)
    }

    /// Merges `patch` into a client record. Invoices that already embed the
    /// client keep their snapshot.
    pub fn update_client(&mut self, client_id: &str, patch: ClientPatch) -> StoreResult<()> {
        let Some(client) = self.state.clients.iter_mut().find(|c| c.id == client_id) else {
            debug!(client_id, "No such client");
            return Ok(());
        };
        patch.apply_to(client);

        self.commit(StoreEvent::ClientUpdated {
            client_id: client_id.to_string(),
        })
    }

    pub fn remove_client(&mut self, client_id: &str) -> StoreResult<()> {
        let before = self.state.clients.len();
        self.state.clients.retain(|c| c.id != client_id);
        if self.state.clients.len() == before {
            debug!(client_id, "No such client");
            return Ok(());
        }

        self.commit(StoreEvent::ClientRemoved {
            client_id: client_id.to_string(),
        })
    }

    /// Copies a stored client into the current invoice by value.
    ///
    /// Goes through [`InvoiceStore::update_invoice`] with the full client as
    /// the nested replacement. No-op if the client or the current invoice is
    /// missing.
    pub fn apply_client(&mut self, client_id: &str) -> StoreResult<()> {
        let Some(client) = self.find_client(client_id).cloned() else {
            debug!(client_id, "No such client");
            return Ok(());
        };
        let language = client.language;

        self.update_invoice(InvoicePatch {
            client: Some(client),
            language: Some(language),
            ..Default::default()
        })
    }

    // -------------------------------------------------------------------------
    // Import / Export
    // -------------------------------------------------------------------------

    /// Serializes the saved invoices and clients as a JSON export document.
    pub fn export_data(&self) -> StoreResult<String> {
        let data = codec::encode_bundle(&self.state.invoices, &self.state.clients)?;
        info!(
            invoices = self.state.invoices.len(),
            clients = self.state.clients.len(),
            "Data exported"
        );
        Ok(data)
    }

    /// Replaces the saved invoices and clients with those in `data`.
    ///
    /// On malformed input nothing changes and `Err(StoreError::Codec)` is
    /// returned. The current invoice and the next number are not touched.
    pub fn import_data(&mut self, data: &str) -> StoreResult<ImportSummary> {
        let bundle = match codec::decode_bundle(data) {
            Ok(bundle) => bundle,
            Err(e) => {
                error!(error = %e, "Failed to import data");
                return Err(e.into());
            }
        };

        let summary = ImportSummary::from(&bundle);
        self.state.invoices = bundle.invoices;
        self.state.clients = bundle.clients;
        info!(
            invoices = summary.invoices,
            clients = summary.clients,
            "Data imported"
        );

        self.commit(StoreEvent::DataImported { summary })?;
        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Persists the full state, then notifies subscribers.
    fn commit(&mut self, event: StoreEvent) -> StoreResult<()> {
        let result = self.persist();
        if let Err(e) = &result {
            error!(event = %event, error = %e, "Failed to persist store state");
        }
        self.subscribers.notify(&event, &self.state);
        result
    }

    fn persist(&mut self) -> StoreResult<()> {
        let record = codec::encode_record(&self.state)?;
        self.storage.write(&self.config.record_name, &record)?;
        Ok(())
    }
}

impl std::fmt::Debug for InvoiceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoiceStore")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("subscribers", &self.subscribers)
            .finish_non_exhaustive()
    }
}

/// Re-establishes the money invariants after an item change.
fn reconcile(invoice: &mut Invoice) {
    aggregator::recompute(invoice);
    debug_assert!(aggregator::is_reconciled(invoice));
    debug_assert!(invoice.items.iter().all(LineItem::is_consistent));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStorage;
    use facture_core::{Money, TaxCategory};
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    fn store() -> (InvoiceStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = InvoiceStore::open(storage.clone(), StoreConfig::default()).unwrap();
        (store, storage)
    }

    fn widget() -> LineItemDraft {
        LineItemDraft {
            description: "Widget".to_string(),
            quantity: dec!(2),
            unit_price: Money::new(dec!(50)),
            tax_category: TaxCategory::Standard,
        }
    }

    #[test]
    fn test_open_fresh() {
        let (store, storage) = store();
        assert!(store.current_invoice().is_none());
        assert!(store.invoices().is_empty());
        assert!(store.next_invoice_number().starts_with("INV-"));
        // Opening alone does not write
        assert!(storage.get(DEFAULT_RECORD_NAME).is_none());
    }

    #[test]
    fn test_open_ignores_corrupt_record() {
        let storage = MemoryStorage::with_record(DEFAULT_RECORD_NAME, "{{{ garbage");
        let store = InvoiceStore::open(storage, StoreConfig::default()).unwrap();
        assert!(store.invoices().is_empty());
        assert!(!store.next_invoice_number().is_empty());
    }

    #[test]
    fn test_corrupt_record_is_kept_after_overwrite() {
        let storage = MemoryStorage::with_record(DEFAULT_RECORD_NAME, "{{{ garbage");
        let mut store = InvoiceStore::open(storage.clone(), StoreConfig::default()).unwrap();
        store.create_invoice().unwrap();

        assert_eq!(
            storage.get("invoice-storage.corrupt").as_deref(),
            Some("{{{ garbage")
        );
        let current = storage.get(DEFAULT_RECORD_NAME).unwrap();
        assert!(current.contains("currentInvoice"));
    }

    #[test]
    fn test_corrupt_record_backup_failure_is_reported() {
        let storage = MemoryStorage::with_record(DEFAULT_RECORD_NAME, "{{{ garbage");
        storage.set_fail_writes(true);
        let result = InvoiceStore::open(storage.clone(), StoreConfig::default());
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert_eq!(storage.get(DEFAULT_RECORD_NAME).as_deref(), Some("{{{ garbage"));
    }

    #[test]
    fn test_create_invoice_defaults() {
        let (mut store, _) = store();
        let number = store.next_invoice_number().to_string();
        let id = store.create_invoice().unwrap();

        let invoice = store.current_invoice().unwrap();
        assert_eq!(invoice.id, id);
        assert_eq!(invoice.number, number);
        assert_eq!(invoice.due_date - invoice.date, chrono::Duration::days(30));
        assert_eq!(invoice.terms, DEFAULT_TERMS);
        assert!(invoice.items.is_empty());
        assert!(invoice.client.name.is_empty());
        // Number rotates only on save
        assert_eq!(store.next_invoice_number(), number);
        assert!(store.invoices().is_empty());
    }

    #[test]
    fn test_item_ops_without_invoice_are_noops() {
        let (mut store, storage) = store();
        assert_eq!(store.add_line_item(widget()).unwrap(), None);
        store.remove_line_item("x").unwrap();
        store.update_line_item("x", LineItemPatch::default()).unwrap();
        store.calculate_totals().unwrap();
        store.save_invoice().unwrap();
        assert!(storage.get(DEFAULT_RECORD_NAME).is_none());
    }

    #[test]
    fn test_update_invoice_does_not_recompute() {
        let (mut store, _) = store();
        store.create_invoice().unwrap();
        let item = LineItem::from_draft("manual", widget());

        store
            .update_invoice(InvoicePatch {
                items: Some(vec![item]),
                notes: Some("rush order".into()),
                ..Default::default()
            })
            .unwrap();

        let invoice = store.current_invoice().unwrap();
        assert_eq!(invoice.notes, "rush order");
        assert_eq!(invoice.totals.total, Money::zero());

        store.calculate_totals().unwrap();
        assert_eq!(store.current_invoice().unwrap().totals.total, Money::new(dec!(119)));
    }

    #[test]
    fn test_update_line_item_refreshes_derived_fields() {
        let (mut store, _) = store();
        store.create_invoice().unwrap();
        let item_id = store.add_line_item(widget()).unwrap().unwrap();

        store
            .update_line_item(
                &item_id,
                LineItemPatch {
                    tax_category: Some(TaxCategory::Reduced),
                    quantity: Some(dec!(3)),
                    ..Default::default()
                },
            )
            .unwrap();

        let invoice = store.current_invoice().unwrap();
        let item = invoice.item(&item_id).unwrap();
        assert_eq!(item.total, Money::new(dec!(150)));
        assert_eq!(item.tax_amount, Money::new(dec!(10.5)));
        assert_eq!(invoice.vat_breakdown.reduced, Money::new(dec!(10.5)));
        assert_eq!(invoice.vat_breakdown.standard, Money::zero());
        assert_eq!(invoice.totals.total, Money::new(dec!(160.5)));
    }

    #[test]
    fn test_save_upserts_and_rotates_number() {
        let (mut store, _) = store();
        store.create_invoice().unwrap();
        let first_number = store.current_invoice().unwrap().number.clone();

        store.save_invoice().unwrap();
        store.add_line_item(widget()).unwrap();
        store.save_invoice().unwrap();

        assert_eq!(store.invoices().len(), 1);
        assert_eq!(store.invoices()[0].items.len(), 1);
        assert_eq!(store.invoices()[0].number, first_number);
        assert!(store.next_invoice_number().starts_with("INV-"));
    }

    #[test]
    fn test_load_invoice() {
        let (mut store, _) = store();
        let id = store.create_invoice().unwrap();
        store.save_invoice().unwrap();
        store.create_invoice().unwrap();

        store.load_invoice(&id).unwrap();
        assert_eq!(store.current_invoice().unwrap().id, id);

        store.load_invoice("missing").unwrap();
        assert!(store.current_invoice().is_none());
    }

    #[test]
    fn test_client_crud_and_snapshot() {
        let (mut store, _) = store();
        store.create_invoice().unwrap();
        let client_id = store
            .add_client(ClientDraft {
                name: "Client SARL".into(),
                ..Default::default()
            })
            .unwrap();

        store.apply_client(&client_id).unwrap();
        store
            .update_client(
                &client_id,
                ClientPatch {
                    name: Some("Client SA".into()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(store.find_client(&client_id).unwrap().name, "Client SA");
        assert_eq!(store.current_invoice().unwrap().client.name, "Client SARL");

        store.update_client("missing", ClientPatch::default()).unwrap();
        store.remove_client(&client_id).unwrap();
        assert!(store.clients().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let (mut store, storage) = store();
        store.create_invoice().unwrap();
        storage.set_fail_writes(true);

        let result = store.add_line_item(widget());
        assert!(matches!(result, Err(StoreError::Storage(_))));
        assert_eq!(store.current_invoice().unwrap().items.len(), 1);
        assert_eq!(store.current_invoice().unwrap().totals.total, Money::new(dec!(119)));
    }

    #[test]
    fn test_subscribers_see_reconciled_state() {
        let (mut store, _) = store();
        let totals = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&totals);
        let id = store.subscribe(move |event, state| {
            if let StoreEvent::LineItemAdded { .. } = event {
                let invoice = state.current_invoice.as_ref().unwrap();
                sink.lock().unwrap().push(invoice.totals.total);
            }
        });

        store.create_invoice().unwrap();
        store.add_line_item(widget()).unwrap();
        assert!(store.unsubscribe(id));
        store.add_line_item(widget()).unwrap();

        assert_eq!(*totals.lock().unwrap(), vec![Money::new(dec!(119))]);
    }
}
