//! # Madina Persistence
//!
//! JSON document store for the Madina ledger.
//!
//! ## Layout
//!
//! ```text
//! data/
//! ├── accounts.json       snapshot, rewritten on change
//! ├── employees.json      snapshot
//! ├── users.json          snapshot
//! ├── loans.json          append-only log
//! └── transactions.json   append-only log
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use madina_persistence::{DocumentStore, StoreConfig};
//!
//! let store = DocumentStore::new(StoreConfig::in_dir("data"))?;
//! let accounts = store.load_accounts()?;
//! store.save_transaction(&Transaction::deposit("MDBSCE24001", dec!(500)))?;
//! ```

pub mod collections;
pub mod config;
pub mod document;
pub mod error;
pub mod events;
pub mod records;

pub use config::{Collection, StoreConfig};
pub use document::DocumentStore;
pub use error::{PersistenceError, PersistenceResult};
pub use events::TransactionFilter;
