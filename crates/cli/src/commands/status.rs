//! Ledger status

use madina_core::money::format_amount;
use madina_core::{Account, BankAccount};
use madina_ledger::{Ledger, LedgerConfig};
use madina_persistence::Collection;
use rust_decimal::Decimal;

pub fn show(ledger: &Ledger, config: &LedgerConfig) {
    println!("📊 Ledger Status");
    println!("   Data dir: {}", config.store.data_dir.display());
    println!();

    let holdings = total_funds(ledger.accounts())
        .map_or_else(|| "overflow".to_string(), format_amount);

    println!("   Accounts:     {}", ledger.accounts().len());
    println!("   Employees:    {}", ledger.employees().len());
    println!("   Users:        {}", ledger.users().count());
    println!("   Total funds:  {}", holdings);
    println!();

    for collection in [
        Collection::Accounts,
        Collection::Employees,
        Collection::Users,
        Collection::Loans,
        Collection::Transactions,
    ] {
        let path = ledger.store().path(collection);
        let state = if path.exists() { "present" } else { "missing" };
        println!("   {:<13} {} ({})", collection.as_str(), path.display(), state);
    }
}

/// Sum of all balances, `None` when it leaves the Decimal range
fn total_funds(accounts: &[BankAccount]) -> Option<Decimal> {
    accounts
        .iter()
        .try_fold(Decimal::ZERO, |total, a| total.checked_add(a.balance()))
}
