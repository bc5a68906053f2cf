//! Wire records - the JSON shape of every persisted collection
//!
//! Field names follow the documents written by earlier versions of the bank
//! (`accountNumber`, `customerInfo`, `employeeID`, ...). Optional fields added
//! later default when missing so old documents keep loading.

use chrono::{DateTime, Utc};
use madina_core::person::{self, from_epoch_seconds, now_seconds, parse_formatted};
use madina_core::{
    Account, BankAccount, CoreError, CoreResult, Employee, Loan, LoanStatus, PersonalInfo, Role,
    Transaction, TransactionStatus, TransactionType, User,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// TIMESTAMPS
// ============================================================================

/// Timestamp from a stored value: epoch seconds (number or numeric string),
/// a `YYYY-MM-DD HH:MM:SS` string, otherwise now.
pub fn lenient_timestamp(value: &Value) -> DateTime<Utc> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(from_epoch_seconds),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(from_epoch_seconds)
            .or_else(|| parse_formatted(s)),
        _ => None,
    };
    parsed.unwrap_or_else(now_seconds)
}

/// `openingDate`: written as a formatted string, read leniently
mod opening_date {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(person::OPENING_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(lenient_timestamp(&value))
    }
}

/// Transaction `date`: written as epoch seconds, read leniently
mod epoch_date {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(lenient_timestamp(&value))
    }
}

// ============================================================================
// ACCOUNTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfoRecord {
    pub name: String,
    pub dob: String,
    pub cnic: String,
    pub address: String,
    #[serde(rename = "openingDate", default = "now_seconds", with = "opening_date")]
    pub opening_date: DateTime<Utc>,
}

impl From<&PersonalInfo> for CustomerInfoRecord {
    fn from(info: &PersonalInfo) -> Self {
        Self {
            name: info.name.clone(),
            dob: info.date_of_birth.clone(),
            cnic: info.national_id.clone(),
            address: info.address.clone(),
            opening_date: info.opened_at,
        }
    }
}

impl From<CustomerInfoRecord> for PersonalInfo {
    fn from(record: CustomerInfoRecord) -> Self {
        PersonalInfo::new(&record.name, &record.dob, &record.cnic, &record.address)
            .opened_at(record.opening_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub account_number: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(rename = "type")]
    pub account_type: String,
    pub customer_info: CustomerInfoRecord,

    // === Saving ===
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub zakat_accrued: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_held: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub withdrawals_enabled: Option<bool>,

    // === Business ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_management_system_id: Option<String>,
}

impl From<&BankAccount> for AccountRecord {
    fn from(account: &BankAccount) -> Self {
        let mut record = Self {
            account_number: account.account_number().to_string(),
            balance: account.balance(),
            account_type: account.classify().to_string(),
            customer_info: CustomerInfoRecord::from(account.info()),
            zakat_accrued: None,
            years_held: None,
            withdrawals_enabled: None,
            linked_management_system_id: None,
        };

        match account {
            BankAccount::Saving(saving) => {
                record.zakat_accrued = Some(saving.zakat_accrued());
                record.years_held = Some(saving.years_held());
                record.withdrawals_enabled = Some(saving.withdrawals_enabled());
            }
            BankAccount::Business(business) => {
                record.linked_management_system_id = Some(business.linked_system().to_string());
            }
        }

        record
    }
}

impl AccountRecord {
    /// Rebuild the account variant named by `type`
    pub fn into_account(self) -> CoreResult<BankAccount> {
        let account = BankAccount::open_labeled(
            &self.account_type,
            &self.account_number,
            self.balance,
            self.customer_info.into(),
        )?;

        Ok(match account {
            BankAccount::Saving(saving) => BankAccount::Saving(saving.with_state(
                self.zakat_accrued.unwrap_or(Decimal::ZERO),
                self.years_held.unwrap_or(0),
                self.withdrawals_enabled.unwrap_or(true),
            )),
            BankAccount::Business(mut business) => {
                if let Some(system) = &self.linked_management_system_id {
                    business.set_linked_system(system);
                }
                BankAccount::Business(business)
            }
        })
    }
}

// ============================================================================
// EMPLOYEES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(rename = "employeeID")]
    pub employee_id: String,
    pub name: String,
    pub designation: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub salary: Decimal,
    #[serde(rename = "accountNumber")]
    pub account_number: String,
}

impl From<&Employee> for EmployeeRecord {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id().to_string(),
            name: employee.name().to_string(),
            designation: employee.designation.clone(),
            salary: employee.salary(),
            account_number: employee.payout_account.clone(),
        }
    }
}

impl EmployeeRecord {
    pub fn into_employee(self) -> CoreResult<Employee> {
        Employee::new(
            &self.employee_id,
            &self.name,
            &self.designation,
            self.salary,
            &self.account_number,
        )
    }
}

// ============================================================================
// USERS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub role: String,
    #[serde(default)]
    pub associated_account: String,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: user.password().to_string(),
            role: user.role.as_str().to_string(),
            associated_account: user.associated_account.clone(),
        }
    }
}

impl UserRecord {
    pub fn into_user(self) -> CoreResult<User> {
        let role = Role::from_str(&self.role).ok_or(CoreError::InvalidRole(self.role.clone()))?;
        User::new(&self.username, &self.password, role, &self.associated_account)
    }
}

// ============================================================================
// LOANS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub loan_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: LoanStatus,
    pub loan_type: String,
}

impl From<&Loan> for LoanRecord {
    fn from(loan: &Loan) -> Self {
        Self {
            loan_id: loan.loan_id.clone(),
            amount: loan.amount,
            status: loan.status,
            loan_type: loan.loan_type.clone(),
        }
    }
}

impl From<LoanRecord> for Loan {
    fn from(record: LoanRecord) -> Self {
        Loan::restore(&record.loan_id, record.amount, record.status, &record.loan_type)
    }
}

// ============================================================================
// TRANSACTIONS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub from_account: String,
    pub to_account: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: TransactionStatus,
    pub transaction_type: TransactionType,
    #[serde(default = "now_seconds", with = "epoch_date")]
    pub date: DateTime<Utc>,
}

impl From<&Transaction> for TransactionRecord {
    fn from(tx: &Transaction) -> Self {
        Self {
            from_account: tx.from_account.clone(),
            to_account: tx.to_account.clone(),
            amount: tx.amount,
            status: tx.status,
            transaction_type: tx.transaction_type,
            date: tx.timestamp,
        }
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Transaction::new(
            &record.from_account,
            &record.to_account,
            record.amount,
            record.transaction_type,
        )
        .with_status(record.status)
        .with_timestamp(record.date)
    }
}
