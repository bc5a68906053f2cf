//! # User Module
//!
//! Login identities. Passwords are stored and compared in plain text; hashing
//! is out of scope for this ledger.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Associated account recorded for admins
pub const ADMIN_ACCOUNT_PLACEHOLDER: &str = "default_account";

/// Role of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Bank staff: accounts, employees, payroll, reports
    Admin,
    /// Account holder: deposit, withdraw, transfer, loans
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A login identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    password: String,
    pub role: Role,
    /// Account number for customers, placeholder for admins
    pub associated_account: String,
}

impl User {
    pub fn new(username: &str, password: &str, role: Role, associated_account: &str) -> CoreResult<Self> {
        if username.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Username cannot be empty".to_string(),
            ));
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
            role,
            associated_account: associated_account.to_string(),
        })
    }

    /// Admin bound to the placeholder account
    pub fn admin(username: &str, password: &str) -> CoreResult<Self> {
        Self::new(username, password, Role::Admin, ADMIN_ACCOUNT_PLACEHOLDER)
    }

    /// Customer bound to an account number
    pub fn customer(username: &str, password: &str, account_number: &str) -> CoreResult<Self> {
        Self::new(username, password, Role::Customer, account_number)
    }

    /// Plain equality check
    pub fn verify_password(&self, password: &str) -> bool {
        self.password == password
    }

    /// Stored credential, for persistence only
    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_str() {
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::from_str("CUSTOMER"), Some(Role::Customer));
        assert_eq!(Role::from_str("auditor"), None);
    }

    #[test]
    fn test_verify_password() {
        let user = User::customer("fatima", "s3cret", "MDBSCE24001").unwrap();
        assert!(user.verify_password("s3cret"));
        assert!(!user.verify_password("S3cret"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_admin_placeholder_account() {
        let admin = User::admin("admin", "admin123").unwrap();
        assert!(admin.is_admin());
        assert_eq!(admin.associated_account, ADMIN_ACCOUNT_PLACEHOLDER);
    }

    #[test]
    fn test_empty_username_rejected() {
        assert!(User::admin("  ", "x").is_err());
    }

    #[test]
    fn test_display_hides_password() {
        let user = User::customer("fatima", "s3cret", "MDBSCE24001").unwrap();
        let text = format!("{}", user);
        assert_eq!(text, "fatima (customer)");
        assert!(!text.contains("s3cret"));
    }
}
