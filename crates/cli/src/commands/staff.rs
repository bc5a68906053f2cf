//! Employee and payroll commands

use anyhow::Result;
use madina_core::money::format_amount;
use madina_core::Employee;
use madina_ledger::Ledger;

use crate::EmployeeAction;

/// Handle employee subcommands
pub fn handle(ledger: &mut Ledger, action: EmployeeAction) -> Result<()> {
    match action {
        EmployeeAction::Add {
            id,
            name,
            designation,
            salary,
            account,
        } => {
            let employee = Employee::new(&id, &name, &designation, salary, &account)?;
            ledger.add_employee(employee)?;
            println!("✅ Employee {} added", id);
        }

        EmployeeAction::List => {
            let employees = ledger.employees();
            if employees.is_empty() {
                println!("No employees found.");
                return Ok(());
            }
            for employee in employees {
                println!("{}", employee);
            }
        }

        EmployeeAction::Show { id } => {
            println!("{}", ledger.find_employee(&id)?);
        }

        EmployeeAction::Pay { id } => {
            let balance = ledger.pay_employee_salary(&id)?;
            let employee = ledger.find_employee(&id)?;
            println!("✅ Salary of {} paid to {}", format_amount(employee.salary()), employee.name());
            println!("   Account: {}", employee.payout_account);
            println!("   Balance: {}", format_amount(balance));
        }
    }
    Ok(())
}
