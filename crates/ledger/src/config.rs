//! Ledger configuration (`madina.toml`)
//!
//! ```toml
//! log_level = "info"
//!
//! [store]
//! data_dir = "data"
//!
//! [bank]
//! account_prefix = "MDBSCE"
//! first_account_serial = 24001
//! ```

use madina_persistence::StoreConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub bank: BankConfig,

    /// Default tracing filter; `RUST_LOG` wins when set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            bank: BankConfig::default(),
            log_level: default_log_level(),
        }
    }
}

/// Bank-wide settings (`[bank]` table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Admin created when no users exist
    #[serde(default = "default_admin_username")]
    pub default_admin_username: String,

    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,

    /// Generated account numbers are `<prefix><serial>`
    #[serde(default = "default_account_prefix")]
    pub account_prefix: String,

    #[serde(default = "default_first_account_serial")]
    pub first_account_serial: u64,

    #[serde(default = "default_loan_prefix")]
    pub loan_prefix: String,

    /// Linked management system for new business accounts
    #[serde(default = "default_linked_system")]
    pub linked_management_system: String,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            default_admin_username: default_admin_username(),
            default_admin_password: default_admin_password(),
            account_prefix: default_account_prefix(),
            first_account_serial: default_first_account_serial(),
            loan_prefix: default_loan_prefix(),
            linked_management_system: default_linked_system(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin123".to_string()
}

fn default_account_prefix() -> String {
    "MDBSCE".to_string()
}

fn default_first_account_serial() -> u64 {
    24001
}

fn default_loan_prefix() -> String {
    "LN".to_string()
}

fn default_linked_system() -> String {
    madina_core::DEFAULT_LINKED_SYSTEM.to_string()
}

impl LedgerConfig {
    /// Load configuration from file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from string
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let config: LedgerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults when `path` does not exist, the parsed file otherwise
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load_file(path) {
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn with_data_dir<P: AsRef<Path>>(mut self, data_dir: P) -> Self {
        self.store.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation("store.data_dir is empty".to_string()));
        }

        let bank = &self.bank;
        if bank.default_admin_username.trim().is_empty() {
            return Err(ConfigError::Validation(
                "bank.default_admin_username is empty".to_string(),
            ));
        }
        if bank.account_prefix.is_empty() || bank.loan_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "account and loan prefixes cannot be empty".to_string(),
            ));
        }
        if bank.account_prefix.chars().any(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "bank.account_prefix '{}' must not contain digits",
                bank.account_prefix
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_defaults_from_empty_string() {
        let config = LedgerConfig::load_str("").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert_eq!(config.bank.account_prefix, "MDBSCE");
        assert_eq!(config.bank.first_account_serial, 24001);
        assert_eq!(config.store.data_dir, PathBuf::from("data"));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_string() {
        let config_str = r#"
log_level = "debug"

[store]
data_dir = "/var/lib/madina"
pretty = false

[bank]
account_prefix = "MDB"
first_account_serial = 100
"#;

        let config = LedgerConfig::load_str(config_str).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.store.data_dir, PathBuf::from("/var/lib/madina"));
        assert!(!config.store.pretty);
        assert_eq!(config.store.accounts_file, "accounts.json");
        assert_eq!(config.bank.account_prefix, "MDB");
        assert_eq!(config.bank.loan_prefix, "LN");
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            LedgerConfig::load_str("[bank]\naccount_prefix = \"\"\n"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            LedgerConfig::load_str("[bank]\naccount_prefix = \"MD9\"\n"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            LedgerConfig::load_str("[bank]\ndefault_admin_username = \" \"\n"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            LedgerConfig::load_str("log_level = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("madina.toml");

        assert!(matches!(
            LedgerConfig::load_file(&path),
            Err(ConfigError::NotFound(_))
        ));
        assert_eq!(
            LedgerConfig::load_or_default(&path).unwrap(),
            LedgerConfig::default()
        );

        std::fs::write(&path, "[bank]\nloan_prefix = \"LOAN\"\n").unwrap();
        assert_eq!(LedgerConfig::load_file(&path).unwrap().bank.loan_prefix, "LOAN");
    }
}
