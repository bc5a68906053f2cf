//! # Employee Module
//!
//! Bank staff on the payroll. Salary is paid into `payout_account`.

use crate::error::{CoreError, CoreResult};
use crate::money::format_amount;
use rust_decimal::Decimal;
use std::fmt;

/// A bank member on the payroll
#[derive(Debug, Clone, PartialEq)]
pub struct Employee {
    id: String,
    name: String,
    pub designation: String,
    salary: Decimal,
    pub payout_account: String,
}

impl Employee {
    /// Create an employee. Id and name must be non-empty, salary non-negative.
    pub fn new(
        id: &str,
        name: &str,
        designation: &str,
        salary: Decimal,
        payout_account: &str,
    ) -> CoreResult<Self> {
        if id.trim().is_empty() || name.trim().is_empty() {
            return Err(CoreError::EmptyEmployeeIdentity);
        }
        if salary < Decimal::ZERO {
            return Err(CoreError::NegativeSalary(salary));
        }
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            designation: designation.to_string(),
            salary,
            payout_account: payout_account.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn salary(&self) -> Decimal {
        self.salary
    }

    pub fn set_salary(&mut self, salary: Decimal) -> CoreResult<()> {
        if salary < Decimal::ZERO {
            return Err(CoreError::NegativeSalary(salary));
        }
        self.salary = salary;
        Ok(())
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}), salary {} -> {}",
            self.id,
            self.name,
            self.designation,
            format_amount(self.salary),
            self.payout_account
        )
    }
}
