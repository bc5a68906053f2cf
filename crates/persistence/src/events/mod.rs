//! Transaction and loan logs
//!
//! Append-only collections: records are added, never edited or removed.

pub mod replay;
pub mod store;

pub use replay::TransactionFilter;
