//! # facture-store: Invoice State Store
//!
//! Owns the canonical invoice state, runs every mutation, keeps totals
//! reconciled and writes the whole state to durable storage after each
//! change.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         facture-store                                   │
//! │                                                                         │
//! │  Host (CLI, UI)                                                        │
//! │       │  create_invoice / add_line_item / save_invoice / ...           │
//! │       ▼                                                                 │
//! │  ┌─────────────────┐   recompute   ┌──────────────────────────┐        │
//! │  │  InvoiceStore   │──────────────►│ facture-core aggregator  │        │
//! │  │  (store.rs)     │               └──────────────────────────┘        │
//! │  └──┬───────────┬──┘                                                   │
//! │     │ encode    │ notify                                               │
//! │     ▼           ▼                                                       │
//! │  ┌────────┐  ┌─────────────┐                                            │
//! │  │ codec  │  │ subscribers │                                            │
//! │  └───┬────┘  └─────────────┘                                            │
//! │      │ write(record)                                                    │
//! │      ▼                                                                  │
//! │  ┌──────────────────────────────┐                                       │
//! │  │ StateStorage                 │                                       │
//! │  │  SqliteStorage | Memory...   │                                       │
//! │  └──────────────────────────────┘                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use facture_store::{InvoiceStore, MemoryStorage, StoreConfig};
//! use facture_core::{LineItemDraft, Money, TaxCategory};
//!
//! let mut store = InvoiceStore::open(MemoryStorage::new(), StoreConfig::default()).unwrap();
//! store.create_invoice().unwrap();
//! store
//!     .add_line_item(LineItemDraft {
//!         description: "Widget".into(),
//!         quantity: 2.into(),
//!         unit_price: "50".parse().unwrap(),
//!         tax_category: TaxCategory::Standard,
//!     })
//!     .unwrap();
//!
//! let totals = store.current_invoice().unwrap().totals;
//! assert_eq!(totals.total, "119".parse::<Money>().unwrap());
//! ```

pub mod codec;
pub mod error;
pub mod events;
pub mod handle;
pub mod storage;
pub mod store;

pub use codec::{ExportBundle, ImportSummary, StoreState};
pub use error::{CodecError, StorageError, StoreError, StoreResult};
pub use events::{StoreEvent, SubscriptionId};
pub use handle::SharedStore;
pub use storage::{MemoryStorage, SqliteStorage, StateStorage};
pub use store::{InvoiceStore, StoreConfig};
