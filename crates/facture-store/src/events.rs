//! # Store Events
//!
//! Observer interface of the store. After every mutation has been reconciled
//! and persisted, each subscriber is called with the event and a read-only
//! view of the new state.
//!
//! ```text
//! operation ──► mutate ──► recompute ──► persist ──► notify(event, &state)
//!                                                      │
//!                                   ┌──────────────────┼──────────────┐
//!                                   ▼                  ▼              ▼
//!                               form view         summary view     logger
//! ```
//!
//! Subscribers run synchronously, in subscription order, on the thread that
//! ran the operation.

use std::fmt;

use crate::codec::{ImportSummary, StoreState};

/// What just happened to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    InvoiceCreated { invoice_id: String },
    InvoiceUpdated { invoice_id: String },
    LineItemAdded { invoice_id: String, item_id: String },
    LineItemRemoved { invoice_id: String, item_id: String },
    LineItemUpdated { invoice_id: String, item_id: String },
    TotalsCalculated { invoice_id: String },
    InvoiceSaved { invoice_id: String, number: String },
    /// `invoice_id` is `None` when no saved invoice matched.
    InvoiceLoaded { invoice_id: Option<String> },
    ClientAdded { client_id: String },
    ClientUpdated { client_id: String },
    ClientRemoved { client_id: String },
    DataImported { summary: ImportSummary },
}

impl StoreEvent {
    /// Stable snake_case name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            StoreEvent::InvoiceCreated { .. } => "invoice_created",
            StoreEvent::InvoiceUpdated { .. } => "invoice_updated",
            StoreEvent::LineItemAdded { .. } => "line_item_added",
            StoreEvent::LineItemRemoved { .. } => "line_item_removed",
            StoreEvent::LineItemUpdated { .. } => "line_item_updated",
            StoreEvent::TotalsCalculated { .. } => "totals_calculated",
            StoreEvent::InvoiceSaved { .. } => "invoice_saved",
            StoreEvent::InvoiceLoaded { .. } => "invoice_loaded",
            StoreEvent::ClientAdded { .. } => "client_added",
            StoreEvent::ClientUpdated { .. } => "client_updated",
            StoreEvent::ClientRemoved { .. } => "client_removed",
            StoreEvent::DataImported { .. } => "data_imported",
        }
    }
}

impl fmt::Display for StoreEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback type stored by the registry.
pub type Subscriber = Box<dyn Fn(&StoreEvent, &StoreState) + Send>;

/// Ordered list of subscribers.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Subscriber)>,
}

impl Subscribers {
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent, &StoreState) + Send + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&self, event: &StoreEvent, state: &StoreState) {
        for (_, callback) in &self.entries {
            callback(event, state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
