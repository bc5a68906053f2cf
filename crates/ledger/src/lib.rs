//! # Madina Ledger
//!
//! Ledger layer - the account registry and the operations run against it.
//!
//! - `registry`: `Ledger`, accounts, Zakat, saving maintenance, persistence
//! - `banking`: deposit, withdraw, transfer, loans, transaction history
//! - `payroll`: employees and salary payouts
//! - `users`: registration and authentication
//!
//! ```rust,ignore
//! use madina_ledger::{Ledger, LedgerConfig};
//!
//! let mut ledger = Ledger::open(&LedgerConfig::default())?;
//! ledger.create_account("MDBSCE24001", dec!(0), "Saving", info)?;
//! ledger.deposit("MDBSCE24001", dec!(25000))?;
//! ledger.process_zakat("MDBSCE24001")?;
//! ```

pub mod banking;
pub mod config;
pub mod error;
pub mod payroll;
pub mod registry;
pub mod users;

pub use config::{BankConfig, ConfigError, LedgerConfig};
pub use error::{LedgerError, LedgerResult};
pub use registry::{AccountServices, Ledger};
