//! Store configuration - where each collection document lives

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Persisted collections, one JSON document each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Accounts,
    Employees,
    Users,
    Loans,
    Transactions,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Accounts => "accounts",
            Collection::Employees => "employees",
            Collection::Users => "users",
            Collection::Loans => "loans",
            Collection::Transactions => "transactions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Store configuration (`[store]` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding every document
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_accounts_file")]
    pub accounts_file: String,

    #[serde(default = "default_employees_file")]
    pub employees_file: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_loans_file")]
    pub loans_file: String,

    #[serde(default = "default_transactions_file")]
    pub transactions_file: String,

    /// Write documents with four-space indentation
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_accounts_file() -> String {
    "accounts.json".to_string()
}

fn default_employees_file() -> String {
    "employees.json".to_string()
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_loans_file() -> String {
    "loans.json".to_string()
}

fn default_transactions_file() -> String {
    "transactions.json".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            accounts_file: default_accounts_file(),
            employees_file: default_employees_file(),
            users_file: default_users_file(),
            loans_file: default_loans_file(),
            transactions_file: default_transactions_file(),
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Default file names under `data_dir`
    pub fn in_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn file_name(&self, collection: Collection) -> &str {
        match collection {
            Collection::Accounts => &self.accounts_file,
            Collection::Employees => &self.employees_file,
            Collection::Users => &self.users_file,
            Collection::Loans => &self.loans_file,
            Collection::Transactions => &self.transactions_file,
        }
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.data_dir.join(self.file_name(collection))
    }
}
