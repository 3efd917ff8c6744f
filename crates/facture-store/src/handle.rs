//! # Shared Store Handle
//!
//! `Arc<Mutex<InvoiceStore>>` for hosts that reach the store from more than
//! one place (UI callbacks, background export).
//!
//! ## Thread Safety
//! The mutex only serializes access: one operation at a time, each running
//! to completion. The store itself stays single-threaded and synchronous.

use std::sync::{Arc, Mutex, PoisonError};

use crate::store::InvoiceStore;

/// Cloneable handle to one store.
#[derive(Debug, Clone)]
pub struct SharedStore {
    store: Arc<Mutex<InvoiceStore>>,
}

impl SharedStore {
    pub fn new(store: InvoiceStore) -> Self {
        SharedStore {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = shared.with_store(|s| s.current_invoice().map(|i| i.totals.total));
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&InvoiceStore) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// shared.with_store_mut(|s| s.add_line_item(draft))?;
    /// ```
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut InvoiceStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }
}

impl From<InvoiceStore> for SharedStore {
    fn from(store: InvoiceStore) -> Self {
        SharedStore::new(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::store::StoreConfig;
    use std::thread;

    #[test]
    fn test_handles_share_one_store() {
        let store = InvoiceStore::open(MemoryStorage::new(), StoreConfig::default()).unwrap();
        let shared = SharedStore::new(store);

        let worker = shared.clone();
        thread::spawn(move || {
            worker.with_store_mut(|s| s.create_invoice()).unwrap();
        })
        .join()
        .unwrap();

        assert!(shared.with_store(|s| s.current_invoice().is_some()));
    }
}
