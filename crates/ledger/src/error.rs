//! Ledger errors
//!
//! Wraps core and persistence failures and adds the registry's own kinds.

use thiserror::Error;

/// Ledger operation errors
#[derive(Debug, Error)]
pub enum LedgerError {
    // === Validation errors ===
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Account number already exists: {0}")]
    DuplicateAccount(String),

    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    #[error("Employee ID already exists: {0}")]
    DuplicateEmployee(String),

    // === Not found errors ===
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Not a saving account: {0}")]
    NotSavingAccount(String),

    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    // === Refusals ===
    #[error("Withdrawals are disabled for account {0}")]
    WithdrawalsDisabled(String),

    #[error("Invalid username or password")]
    AuthenticationFailure,

    // === Wrapped errors ===
    #[error(transparent)]
    Core(#[from] madina_core::CoreError),

    #[error(transparent)]
    Persistence(#[from] madina_persistence::PersistenceError),
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;

impl LedgerError {
    /// Bad input: rejected before anything changed
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_)
            | Self::DuplicateAccount(_)
            | Self::DuplicateUser(_)
            | Self::DuplicateEmployee(_) => true,
            Self::Core(e) => e.is_validation(),
            _ => false,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_) | Self::NotSavingAccount(_) | Self::EmployeeNotFound(_)
        )
    }

    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_insufficient_funds())
    }

    /// The in-memory change stands but did not reach disk
    pub fn is_file_io(&self) -> bool {
        matches!(self, Self::Persistence(e) if e.is_file_io())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use madina_core::CoreError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_classification() {
        assert!(LedgerError::DuplicateAccount("A1".into()).is_validation());
        assert!(LedgerError::AccountNotFound("A1".into()).is_not_found());
        assert!(LedgerError::NotSavingAccount("B1".into()).is_not_found());

        let err: LedgerError = CoreError::InsufficientFunds {
            needed: dec!(100),
            available: dec!(50),
        }
        .into();
        assert!(err.is_insufficient_funds());
        assert!(!err.is_validation());

        let err: LedgerError = CoreError::InvalidAmount("zero".into()).into();
        assert!(err.is_validation());
    }

    #[test]
    fn test_auth_failure_leaks_nothing() {
        assert_eq!(
            LedgerError::AuthenticationFailure.to_string(),
            "Invalid username or password"
        );
    }
}
