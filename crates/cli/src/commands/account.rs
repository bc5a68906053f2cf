//! Account management commands

use anyhow::Result;
use madina_core::money::format_amount;
use madina_core::services::PREMIUM_FEATURES;
use madina_core::Account;
use madina_ledger::Ledger;

use crate::{AccountAction, ToggleArg};

/// Handle account subcommands
pub fn handle(ledger: &mut Ledger, action: AccountAction) -> Result<()> {
    match action {
        AccountAction::Create {
            kind,
            holder,
            balance,
            number,
        } => {
            let number = number.unwrap_or_else(|| ledger.next_account_number());
            let account = ledger.create_account(
                &number,
                balance,
                kind.to_core_kind().as_str(),
                holder.to_personal_info(),
            )?;

            println!("✅ Created {} account:", account.classify());
            println!("   Account Number: {}", account.account_number());
            println!("   Holder:         {}", account.info().name);
            println!("   Balance:        {}", format_amount(account.balance()));
        }

        AccountAction::List => list_accounts(ledger),

        AccountAction::Show { account } => {
            let account = ledger.find_account(&account)?;
            println!("📋 Account Details");
            println!("{}", account);
            if let Some(saving) = account.as_saving() {
                println!("Zakat Paid: {}", format_amount(saving.zakat_accrued()));
                println!("Years Held: {}", saving.years_held());
                println!(
                    "Withdrawals: {}",
                    if saving.withdrawals_enabled() { "enabled" } else { "disabled" }
                );
            }
            if let Some(business) = account.as_business() {
                println!("Linked System: {}", business.linked_system());
            }
        }

        AccountAction::Remove { account } => {
            if ledger.remove_account(&account)? {
                println!("🗑️  Removed account {}", account);
            } else {
                println!("Account '{}' not found, nothing removed", account);
            }
        }

        AccountAction::UpdateInfo { account, holder } => {
            ledger.update_customer_info(&account, holder.to_personal_info())?;
            println!("✅ Customer info updated for {}", account);
        }

        AccountAction::Withdrawals { account, state } => {
            let enabled = matches!(state, ToggleArg::On);
            ledger.set_withdrawals_enabled(&account, enabled)?;
            println!(
                "✅ Withdrawals {} for {}",
                if enabled { "enabled" } else { "disabled" },
                account
            );
        }

        AccountAction::Year { account } => {
            let years = ledger.record_saving_year(&account)?;
            println!("✅ {} held for {} year(s)", account, years);
        }
    }

    Ok(())
}

fn list_accounts(ledger: &Ledger) {
    let accounts = ledger.accounts();
    if accounts.is_empty() {
        println!("No accounts found.");
        return;
    }

    println!("{:<14} {:<20} {:<10} {:>16}", "ACCOUNT", "HOLDER", "TYPE", "BALANCE");
    println!("{}", "-".repeat(63));
    for account in accounts {
        println!(
            "{:<14} {:<20} {:<10} {:>16}",
            account.account_number(),
            account.info().name,
            account.classify(),
            format_amount(account.balance())
        );
    }
}

/// Deduct Zakat
pub fn zakat(ledger: &mut Ledger, number: &str) -> Result<()> {
    match ledger.process_zakat(number)? {
        Some(amount) => {
            let balance = ledger.find_account(number)?.balance();
            println!("✅ Zakat of {} deducted from {}", format_amount(amount), number);
            println!("   New balance: {}", format_amount(balance));
        }
        None => println!("Balance below Nisab, no Zakat due for {}", number),
    }
    Ok(())
}

/// Services on offer
pub fn services(ledger: &Ledger, number: &str) -> Result<()> {
    let offer = ledger.account_services(number)?;

    println!("{} Account Services:", offer.kind);
    for service in offer.displayed {
        println!("- {}", service);
    }

    println!("\nAvailable for activation:");
    for service in offer.available {
        println!("- {}", service);
    }

    if offer.premium {
        println!("\n⭐ Premium features unlocked: {}", PREMIUM_FEATURES.join(", "));
    }
    Ok(())
}
