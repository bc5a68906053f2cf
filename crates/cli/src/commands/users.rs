//! User registration and login

use anyhow::Result;
use madina_core::{Account, User};
use madina_ledger::Ledger;

use crate::UserAction;

/// Handle user subcommands
pub fn handle(ledger: &mut Ledger, action: UserAction) -> Result<()> {
    match action {
        UserAction::RegisterAdmin { username, password } => {
            ledger.add_user(User::admin(&username, &password)?)?;
            println!("✅ Admin '{}' registered", username);
        }

        UserAction::RegisterCustomer {
            username,
            password,
            holder,
        } => {
            let number = ledger.next_account_number();
            let account =
                ledger.register_customer(holder.to_personal_info(), &username, &password, &number)?;
            println!("✅ Customer '{}' registered", username);
            println!("   Account Number: {}", account.account_number());
        }

        UserAction::Login { username, password } => {
            let user = ledger.authenticate_user(&username, &password)?;
            println!("✅ Logged in as {}", user);
            if !user.is_admin() {
                println!("   Account: {}", user.associated_account);
            }
        }

        UserAction::List => {
            for user in ledger.users() {
                println!("{}", user);
            }
        }
    }
    Ok(())
}
