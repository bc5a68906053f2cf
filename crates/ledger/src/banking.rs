//! Customer operations - deposit, withdraw, transfer, loans
//!
//! Money moves in memory first, then the accounts document is rewritten, then
//! the matching Transaction is appended to the log. A Transaction is only
//! logged once the balances it describes have been saved. When either write
//! fails the touched accounts are restored, so balances never drift from the
//! log.

use crate::error::{LedgerError, LedgerResult};
use crate::registry::Ledger;
use madina_core::money::ensure_positive;
use madina_core::{total_loans, Account, BankAccount, CoreError, Loan, Transaction};
use madina_persistence::{Collection, TransactionFilter};
use rust_decimal::Decimal;

impl Ledger {
    /// Credit `amount` from the bank. Returns the new balance.
    pub fn deposit(&mut self, number: &str, amount: Decimal) -> LedgerResult<Decimal> {
        ensure_positive(amount, "Deposit")?;

        let position = self.position_of(number)?;
        let undo = vec![(position, self.accounts[position].clone())];

        let balance = self.accounts[position].update_balance(amount)?;
        tracing::info!(account = number, amount = %amount, balance = %balance, "deposit");

        self.commit_logged(undo, Transaction::deposit(number, amount))?;
        Ok(balance)
    }

    /// Debit `amount` to the bank. Returns the new balance.
    ///
    /// Saving accounts with withdrawals disabled refuse with
    /// `WithdrawalsDisabled`; nothing is logged for a refused withdrawal.
    pub fn withdraw(&mut self, number: &str, amount: Decimal) -> LedgerResult<Decimal> {
        ensure_positive(amount, "Withdrawal")?;

        let position = self.position_of(number)?;
        let undo = vec![(position, self.accounts[position].clone())];

        let account = &mut self.accounts[position];
        if account.withdraw(amount)?.is_zero() {
            return Err(LedgerError::WithdrawalsDisabled(number.to_string()));
        }
        let balance = account.balance();
        tracing::info!(account = number, amount = %amount, balance = %balance, "withdrawal");

        self.commit_logged(undo, Transaction::withdrawal(number, amount))?;
        Ok(balance)
    }

    /// Move `amount` between two distinct accounts.
    ///
    /// Both legs are applied in memory before the single accounts write, so
    /// the document never holds a half-done transfer.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> LedgerResult<()> {
        ensure_positive(amount, "Transfer")?;
        if from == to {
            return Err(LedgerError::Validation(format!(
                "cannot transfer from account {} to itself",
                from
            )));
        }

        let source = self.position_of(from)?;
        let target = self.position_of(to)?;
        if self.accounts[target].balance().checked_add(amount).is_none() {
            return Err(CoreError::AmountOverflow(amount).into());
        }
        let undo = vec![
            (source, self.accounts[source].clone()),
            (target, self.accounts[target].clone()),
        ];

        if self.accounts[source].withdraw(amount)?.is_zero() {
            return Err(LedgerError::WithdrawalsDisabled(from.to_string()));
        }
        self.accounts[target].update_balance(amount)?;
        tracing::info!(from, to, amount = %amount, "transfer");

        self.commit_logged(undo, Transaction::transfer(from, to, amount))?;
        Ok(())
    }

    /// Save the accounts, then log `tx`. Either failure restores `undo`.
    fn commit_logged(
        &mut self,
        undo: Vec<(usize, BankAccount)>,
        tx: Transaction,
    ) -> LedgerResult<()> {
        let was_dirty = self.is_collection_dirty(Collection::Accounts);
        self.persist_accounts_or_undo(undo.clone())?;

        if let Err(e) = self.store.save_transaction(&tx) {
            self.restore_accounts(undo, was_dirty);
            // a failed rewrite leaves Accounts dirty, so flush writes the restored state
            let _ = self.persist(Collection::Accounts);
            return Err(e.into());
        }
        Ok(())
    }

    /// File a Pending loan against an existing account
    pub fn apply_for_loan(
        &mut self,
        number: &str,
        loan_type: &str,
        amount: Decimal,
        loan_id: &str,
    ) -> LedgerResult<Loan> {
        self.find_account(number)?;
        if loan_id.trim().is_empty() {
            return Err(LedgerError::Validation("loan id cannot be empty".to_string()));
        }

        let loan = Loan::apply(loan_id, amount, loan_type)?;
        tracing::info!(account = number, loan_id, amount = %amount, loan_type, "loan applied");

        self.store.save_loan(&loan)?;
        Ok(loan)
    }

    // === Queries ===

    pub fn transactions(&self) -> LedgerResult<Vec<Transaction>> {
        Ok(self.store.load_transactions()?)
    }

    /// Transactions with `number` on either side
    pub fn transactions_for(&self, number: &str) -> LedgerResult<Vec<Transaction>> {
        let filter = TransactionFilter::new().account(number);
        Ok(filter.apply(self.store.load_transactions()?))
    }

    pub fn loans(&self) -> LedgerResult<Vec<Loan>> {
        Ok(self.store.load_loans()?)
    }

    /// Loans applied for since this process started
    pub fn total_loans_issued(&self) -> u64 {
        total_loans()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use madina_core::{LoanStatus, PersonalInfo, TransactionStatus, TransactionType};
    use rust_decimal_macros::dec;
    use tempfile::tempdir;

    fn holder(name: &str) -> PersonalInfo {
        PersonalInfo::new(name, "1988-03-03", "42101-7654321-9", "Karachi")
    }

    fn ledger_with(dir: &std::path::Path, accounts: &[(&str, Decimal, &str)]) -> Ledger {
        let mut ledger = Ledger::open(&LedgerConfig::default().with_data_dir(dir)).unwrap();
        for (number, balance, kind) in accounts {
            ledger.create_account(number, *balance, kind, holder(number)).unwrap();
        }
        ledger
    }

    #[test]
    fn test_deposit_logs_transaction() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(dir.path(), &[("A1", dec!(0), "Saving")]);

        assert_eq!(ledger.deposit("A1", dec!(25000)).unwrap(), dec!(25000));

        let txs = ledger.transactions().unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].from_account, "Bank");
        assert_eq!(txs[0].to_account, "A1");
        assert_eq!(txs[0].transaction_type, TransactionType::Deposit);
    }

    #[test]
    fn test_deposit_rejects_non_positive() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(dir.path(), &[("A1", dec!(10), "Saving")]);

        assert!(ledger.deposit("A1", dec!(0)).unwrap_err().is_validation());
        assert!(ledger.deposit("A1", dec!(-5)).unwrap_err().is_validation());
        assert!(ledger.deposit("ZZ", dec!(5)).unwrap_err().is_not_found());
        assert!(ledger.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_withdraw_rules() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(
            dir.path(),
            &[("A1", dec!(300), "Saving"), ("B1", dec!(300), "Business")],
        );

        assert_eq!(ledger.withdraw("A1", dec!(100)).unwrap(), dec!(200));
        assert_eq!(ledger.withdraw("B1", dec!(300)).unwrap(), dec!(0));

        let err = ledger.withdraw("A1", dec!(201)).unwrap_err();
        assert!(err.is_insufficient_funds());
        assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(200));

        assert!(ledger.withdraw("B1", dec!(0.01)).unwrap_err().is_insufficient_funds());
        assert_eq!(ledger.transactions().unwrap().len(), 2);
    }

    #[test]
    fn test_withdraw_disabled_saving() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(dir.path(), &[("A1", dec!(500), "Saving")]);
        ledger.set_withdrawals_enabled("A1", false).unwrap();

        assert!(matches!(
            ledger.withdraw("A1", dec!(10)),
            Err(LedgerError::WithdrawalsDisabled(_))
        ));
        assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(500));
        assert!(ledger.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_transfer() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(
            dir.path(),
            &[("A1", dec!(500), "Saving"), ("A2", dec!(0), "Saving")],
        );

        ledger.transfer("A1", "A2", dec!(100)).unwrap();

        assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(400));
        assert_eq!(ledger.find_account("A2").unwrap().balance(), dec!(100));

        let txs = ledger.transactions().unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].transaction_type, TransactionType::Transfer);
        assert_eq!(txs[0].status, TransactionStatus::Completed);
        assert_eq!(ledger.transactions_for("A2").unwrap().len(), 1);
    }

    #[test]
    fn test_transfer_failures_leave_balances() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(
            dir.path(),
            &[("A1", dec!(50), "Saving"), ("A2", dec!(0), "Saving")],
        );

        assert!(ledger.transfer("A1", "A2", dec!(51)).unwrap_err().is_insufficient_funds());
        assert!(ledger.transfer("A1", "A1", dec!(1)).unwrap_err().is_validation());
        assert!(ledger.transfer("A1", "ZZ", dec!(1)).unwrap_err().is_not_found());
        assert!(ledger.transfer("ZZ", "A1", dec!(1)).unwrap_err().is_not_found());

        assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(50));
        assert_eq!(ledger.find_account("A2").unwrap().balance(), dec!(0));
        assert!(ledger.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_business_transfer_reports_success() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(
            dir.path(),
            &[("B1", dec!(1000), "Business"), ("A1", dec!(0), "Saving")],
        );

        ledger.transfer("B1", "A1", dec!(250)).unwrap();
        assert_eq!(ledger.find_account("B1").unwrap().balance(), dec!(750));
        assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(250));
    }

    #[test]
    fn test_overflowing_credit_changes_nothing() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(
            dir.path(),
            &[("A1", Decimal::MAX, "Saving"), ("A2", dec!(10), "Business")],
        );

        assert!(ledger.deposit("A1", dec!(1)).unwrap_err().is_validation());
        assert!(ledger.transfer("A2", "A1", dec!(1)).unwrap_err().is_validation());

        assert_eq!(ledger.find_account("A1").unwrap().balance(), Decimal::MAX);
        assert_eq!(ledger.find_account("A2").unwrap().balance(), dec!(10));
        assert!(ledger.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_failed_accounts_save_rolls_back_deposit() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(dir.path(), &[("A1", dec!(100), "Saving")]);

        // a non-empty directory where accounts.json lives blocks the rename
        let accounts = ledger.store().path(Collection::Accounts);
        std::fs::remove_file(&accounts).unwrap();
        std::fs::create_dir(&accounts).unwrap();
        std::fs::write(accounts.join("keep"), "x").unwrap();

        assert!(ledger.deposit("A1", dec!(50)).unwrap_err().is_file_io());
        assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(100));
        assert!(!ledger.is_dirty());

        std::fs::remove_dir_all(&accounts).unwrap();
        ledger.flush().unwrap();
        ledger.save_accounts().unwrap();
        drop(ledger);

        let reopened = Ledger::open(&LedgerConfig::default().with_data_dir(dir.path())).unwrap();
        assert_eq!(reopened.find_account("A1").unwrap().balance(), dec!(100));
        assert!(reopened.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_failed_log_append_rolls_back_transfer() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(
            dir.path(),
            &[("A1", dec!(500), "Saving"), ("A2", dec!(0), "Saving")],
        );

        let log = ledger.store().path(Collection::Transactions);
        std::fs::create_dir(&log).unwrap();
        std::fs::write(log.join("keep"), "x").unwrap();

        assert!(ledger.transfer("A1", "A2", dec!(100)).unwrap_err().is_file_io());
        assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(500));
        assert_eq!(ledger.find_account("A2").unwrap().balance(), dec!(0));

        std::fs::remove_dir_all(&log).unwrap();
        drop(ledger);

        let reopened = Ledger::open(&LedgerConfig::default().with_data_dir(dir.path())).unwrap();
        assert_eq!(reopened.find_account("A1").unwrap().balance(), dec!(500));
        assert_eq!(reopened.find_account("A2").unwrap().balance(), dec!(0));
        assert!(reopened.transactions().unwrap().is_empty());
    }

    #[test]
    fn test_apply_for_loan() {
        let dir = tempdir().unwrap();
        let mut ledger = ledger_with(dir.path(), &[("A1", dec!(0), "Saving")]);
        let before = ledger.total_loans_issued();

        let loan = ledger.apply_for_loan("A1", "Home", dec!(150000), "LN4821").unwrap();
        assert_eq!(loan.status, LoanStatus::Pending);
        assert!(ledger.total_loans_issued() >= before + 1);

        assert!(ledger.apply_for_loan("ZZ", "Home", dec!(1), "LN0001").unwrap_err().is_not_found());
        assert!(ledger.apply_for_loan("A1", "Home", dec!(0), "LN0002").unwrap_err().is_validation());

        let loans = ledger.loans().unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].loan_id, "LN4821");
    }
}
