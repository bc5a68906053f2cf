//! Money movement, loans and history

use anyhow::{anyhow, Result};
use madina_core::money::format_amount;
use madina_ledger::Ledger;
use rust_decimal::Decimal;

use crate::ids;
use crate::LoanAction;

pub fn deposit(ledger: &mut Ledger, account: &str, amount: Decimal) -> Result<()> {
    let balance = ledger.deposit(account, amount)?;

    println!("✅ Deposit successful!");
    println!("   Account: {}", account);
    println!("   Amount:  {}", format_amount(amount));
    println!("   Balance: {}", format_amount(balance));
    Ok(())
}

pub fn withdraw(ledger: &mut Ledger, account: &str, amount: Decimal) -> Result<()> {
    let balance = ledger.withdraw(account, amount)?;

    println!("✅ Withdrawal successful!");
    println!("   Account: {}", account);
    println!("   Amount:  {}", format_amount(amount));
    println!("   Balance: {}", format_amount(balance));
    Ok(())
}

pub fn transfer(ledger: &mut Ledger, from: &str, to: &str, amount: Decimal) -> Result<()> {
    ledger.transfer(from, to, amount)?;

    println!("✅ Transfer successful!");
    println!("   From:   {}", from);
    println!("   To:     {}", to);
    println!("   Amount: {}", format_amount(amount));
    Ok(())
}

/// Handle loan subcommands
pub fn loans(ledger: &mut Ledger, action: LoanAction) -> Result<()> {
    match action {
        LoanAction::Apply {
            account,
            loan_type,
            amount,
        } => {
            let existing = ledger.loans()?;
            let loan_id = ids::loan_id(&ledger.bank_config().loan_prefix, &existing)
                .ok_or_else(|| anyhow!("No free loan id left"))?;

            let loan = ledger.apply_for_loan(&account, &loan_type, amount, &loan_id)?;
            println!("✅ Loan application submitted");
            println!("   {}", loan);
        }

        LoanAction::List => {
            let loans = ledger.loans()?;
            if loans.is_empty() {
                println!("No loans found.");
            }
            for loan in loans {
                println!("{}", loan);
            }
            println!("\nLoans issued this session: {}", ledger.total_loans_issued());
        }
    }
    Ok(())
}

pub fn transactions(ledger: &Ledger, account: Option<&str>) -> Result<()> {
    let txs = match account {
        Some(number) => {
            ledger.find_account(number)?;
            ledger.transactions_for(number)?
        }
        None => ledger.transactions()?,
    };

    if txs.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    for tx in &txs {
        println!("{}", tx);
    }
    println!("\nTotal: {} transaction(s)", txs.len());
    Ok(())
}
