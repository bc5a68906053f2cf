//! Payroll - bank staff and salary payouts

use crate::error::{LedgerError, LedgerResult};
use crate::registry::Ledger;
use madina_core::{Account, Employee};
use madina_persistence::Collection;
use rust_decimal::Decimal;

impl Ledger {
    /// Register an employee; ids are unique
    pub fn add_employee(&mut self, employee: Employee) -> LedgerResult<()> {
        if self.employees.iter().any(|e| e.id() == employee.id()) {
            return Err(LedgerError::DuplicateEmployee(employee.id().to_string()));
        }

        tracing::info!(employee = employee.id(), name = employee.name(), "employee added");
        self.employees.push(employee);
        self.persist(Collection::Employees)
    }

    pub fn find_employee(&self, employee_id: &str) -> LedgerResult<&Employee> {
        self.employees
            .iter()
            .find(|e| e.id() == employee_id)
            .ok_or_else(|| LedgerError::EmployeeNotFound(employee_id.to_string()))
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Credit one salary to the employee's payout account.
    ///
    /// Returns the payout account's new balance. No Transaction is logged.
    /// A failed save restores the payout account.
    pub fn pay_employee_salary(&mut self, employee_id: &str) -> LedgerResult<Decimal> {
        let employee = self.find_employee(employee_id)?;
        let salary = employee.salary();
        let payout = employee.payout_account.clone();

        let position = self.position_of(&payout)?;
        let undo = vec![(position, self.accounts[position].clone())];

        let balance = self.accounts[position].update_balance(salary)?;
        tracing::info!(employee = employee_id, account = %payout, salary = %salary, "salary paid");

        self.persist_accounts_or_undo(undo)?;
        Ok(balance)
    }
}
