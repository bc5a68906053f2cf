//! # Madina Core
//!
//! Domain types of the Madina ledger manager.
//!
//! - `account`: Account trait, SavingAccount, BusinessAccount, BankAccount
//! - `person`: PersonalInfo of account holders
//! - `user`, `employee`: login identities and payroll staff
//! - `event`: Transaction and Loan records
//! - `zakat`, `services`, `money`: rules and helpers

pub mod account;
pub mod employee;
pub mod error;
pub mod event;
pub mod money;
pub mod person;
pub mod services;
pub mod user;
pub mod zakat;

pub use account::{
    Account, AccountCore, AccountKind, BankAccount, BusinessAccount, SavingAccount,
    DEFAULT_LINKED_SYSTEM,
};
pub use employee::Employee;
pub use error::{CoreError, CoreResult};
pub use event::{
    total_loans, Loan, LoanStatus, Transaction, TransactionStatus, TransactionType,
    BANK_COUNTERPARTY,
};
pub use person::PersonalInfo;
pub use user::{Role, User, ADMIN_ACCOUNT_PLACEHOLDER};
pub use zakat::{NISAB, ZAKAT_RATE};
