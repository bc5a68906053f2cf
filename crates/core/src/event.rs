//! # Event Module
//!
//! Write-once records of the ledger: `Transaction` and `Loan`.
//! Both are appended to their logs and only ever read back for display.

use crate::error::CoreResult;
use crate::money::{ensure_positive, format_amount};
use crate::person::now_seconds;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counterparty name for cash entering or leaving the bank
pub const BANK_COUNTERPARTY: &str = "Bank";

/// Loans issued by this process (never decremented)
static TOTAL_LOANS: AtomicU64 = AtomicU64::new(0);

/// Number of loans issued since the process started
pub fn total_loans() -> u64 {
    TOTAL_LOANS.load(Ordering::SeqCst)
}

// ============================================================================
// TRANSACTION
// ============================================================================

/// Kind of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "Deposit",
            TransactionType::Withdrawal => "Withdrawal",
            TransactionType::Transfer => "Transfer",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome recorded with a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded money movement.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub from_account: String,
    pub to_account: String,
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        from_account: &str,
        to_account: &str,
        amount: Decimal,
        transaction_type: TransactionType,
    ) -> Self {
        Self {
            from_account: from_account.to_string(),
            to_account: to_account.to_string(),
            amount,
            status: TransactionStatus::Completed,
            transaction_type,
            timestamp: now_seconds(),
        }
    }

    // === Factory methods ===

    /// Cash in: Bank -> account
    pub fn deposit(account: &str, amount: Decimal) -> Self {
        Self::new(BANK_COUNTERPARTY, account, amount, TransactionType::Deposit)
    }

    /// Cash out: account -> Bank
    pub fn withdrawal(account: &str, amount: Decimal) -> Self {
        Self::new(account, BANK_COUNTERPARTY, amount, TransactionType::Withdrawal)
    }

    pub fn transfer(from: &str, to: &str, amount: Decimal) -> Self {
        Self::new(from, to, amount, TransactionType::Transfer)
    }

    // === Builder methods ===

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Does this transaction touch the account on either side?
    pub fn involves(&self, account: &str) -> bool {
        self.from_account == account || self.to_account == account
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From: {} | To: {} | Amount: {} | Type: {} | Status: {} | Date: {}",
            self.from_account,
            self.to_account,
            format_amount(self.amount),
            self.transaction_type,
            self.status,
            self.timestamp.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

// ============================================================================
// LOAN
// ============================================================================

/// Loan lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Closed,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "Pending",
            LoanStatus::Approved => "Approved",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A loan application
#[derive(Debug, Clone, PartialEq)]
pub struct Loan {
    pub loan_id: String,
    pub amount: Decimal,
    pub status: LoanStatus,
    pub loan_type: String,
}

impl Loan {
    /// Issue a new loan application (Pending). Counts towards `total_loans()`.
    pub fn apply(loan_id: &str, amount: Decimal, loan_type: &str) -> CoreResult<Self> {
        ensure_positive(amount, "Loan")?;
        TOTAL_LOANS.fetch_add(1, Ordering::SeqCst);
        Ok(Self::restore(loan_id, amount, LoanStatus::Pending, loan_type))
    }

    /// Rebuild a stored loan; does not count as issued
    pub fn restore(loan_id: &str, amount: Decimal, status: LoanStatus, loan_type: &str) -> Self {
        Self {
            loan_id: loan_id.to_string(),
            amount,
            status,
            loan_type: loan_type.to_string(),
        }
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loan ID: {}, Amount: {}, Status: {}, Type: {}",
            self.loan_id,
            format_amount(self.amount),
            self.status,
            self.loan_type
        )
    }
}
