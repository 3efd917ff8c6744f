//! # State Module
//!
//! Process-wide state for one CLI invocation.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────────┐  │
//! │  │    ConfigState       │        │    InvoiceStore (facture-store)  │  │
//! │  │                      │ builds │                                  │  │
//! │  │  • db path           │───────►│  • current invoice               │  │
//! │  │  • invoice prefix    │ Store- │  • saved invoices, clients       │  │
//! │  │  • company profile   │ Config │  • SQLite record                 │  │
//! │  │  • currency display  │        │                                  │  │
//! │  └──────────────────────┘        └──────────────────────────────────┘  │
//! │                                                                         │
//! │  ConfigState is read-only after startup.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::ConfigState;
