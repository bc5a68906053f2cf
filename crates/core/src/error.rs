//! # Error Module
//!
//! Domain errors for Madina, built with thiserror.

use rust_decimal::Decimal;
use thiserror::Error;

/// Core domain errors.
///
/// Business-rule failures only; nothing here touches storage.
#[derive(Debug, Error)]
pub enum CoreError {
    // === Money errors ===
    #[error("Insufficient funds: need {needed}, available {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount overflow: adding {0} exceeds the representable range")]
    AmountOverflow(Decimal),

    // === Account errors ===
    #[error("Account number cannot be empty")]
    EmptyAccountNumber,

    #[error("Initial balance cannot be negative: {0}")]
    NegativeBalance(Decimal),

    #[error("Invalid account type: {0}")]
    InvalidAccountType(String),

    // === Person errors ===
    #[error("Employee ID and name cannot be empty")]
    EmptyEmployeeIdentity,

    #[error("Salary cannot be negative: {0}")]
    NegativeSalary(Decimal),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    // === Validation errors ===
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Result type alias with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Insufficient funds check
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, CoreError::InsufficientFunds { .. })
    }

    /// Everything except insufficient funds is an input validation failure
    pub fn is_validation(&self) -> bool {
        !self.is_insufficient_funds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_display() {
        let err = CoreError::InsufficientFunds {
            needed: dec!(1000),
            available: dec!(500),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: need 1000, available 500"
        );

        let err = CoreError::InvalidAccountType("Checking".to_string());
        assert_eq!(err.to_string(), "Invalid account type: Checking");
    }

    #[test]
    fn test_error_checks() {
        let err = CoreError::InsufficientFunds {
            needed: dec!(10),
            available: dec!(1),
        };
        assert!(err.is_insufficient_funds());
        assert!(!err.is_validation());

        assert!(CoreError::EmptyAccountNumber.is_validation());
        assert!(CoreError::NegativeBalance(dec!(-1)).is_validation());
        assert!(CoreError::AmountOverflow(dec!(1)).is_validation());
    }
}
