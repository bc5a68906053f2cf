//! Read side of the transaction and loan logs

use crate::config::Collection;
use crate::document::DocumentStore;
use crate::error::PersistenceResult;
use crate::records::{LoanRecord, TransactionRecord};
use madina_core::{Loan, Transaction, TransactionType};
use rust_decimal::Decimal;

impl DocumentStore {
    /// Every stored transaction, in log order
    pub fn load_transactions(&self) -> PersistenceResult<Vec<Transaction>> {
        let records: Vec<TransactionRecord> = self.read_lenient(Collection::Transactions)?;
        Ok(records.into_iter().map(Transaction::from).collect())
    }

    /// Every stored loan, in log order
    pub fn load_loans(&self) -> PersistenceResult<Vec<Loan>> {
        let records: Vec<LoanRecord> = self.read_lenient(Collection::Loans)?;
        Ok(records.into_iter().map(Loan::from).collect())
    }
}

/// Filter for transaction history
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Either side of the transfer
    pub account: Option<String>,
    pub transaction_types: Option<Vec<TransactionType>>,
    pub min_amount: Option<Decimal>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(mut self, account: &str) -> Self {
        self.account = Some(account.to_string());
        self
    }

    pub fn transaction_types(mut self, types: Vec<TransactionType>) -> Self {
        self.transaction_types = Some(types);
        self
    }

    pub fn min_amount(mut self, amount: Decimal) -> Self {
        self.min_amount = Some(amount);
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(ref account) = self.account {
            if !tx.involves(account) {
                return false;
            }
        }

        if let Some(ref types) = self.transaction_types {
            if !types.contains(&tx.transaction_type) {
                return false;
            }
        }

        if let Some(min) = self.min_amount {
            if tx.amount < min {
                return false;
            }
        }

        true
    }

    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        transactions.into_iter().filter(|tx| self.matches(tx)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use madina_core::LoanStatus;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_log_appends_in_order() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(StoreConfig::in_dir(dir.path())).unwrap();

        store.save_transaction(&Transaction::deposit("A1", dec!(500))).unwrap();
        store.save_transaction(&Transaction::transfer("A1", "A2", dec!(100))).unwrap();

        let txs = store.load_transactions().unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].transaction_type, TransactionType::Deposit);
        assert_eq!(txs[0].from_account, "Bank");
        assert_eq!(txs[1].to_account, "A2");
    }

    #[test]
    fn test_loans_reload_without_counting() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(StoreConfig::in_dir(dir.path())).unwrap();

        let loan = Loan::restore("LN1234", dec!(5000), LoanStatus::Pending, "Car");
        store.save_loan(&loan).unwrap();

        assert_eq!(store.load_loans().unwrap(), vec![loan]);
    }

    #[test]
    fn test_unknown_status_skipped() {
        let dir = tempdir().unwrap();
        let store = DocumentStore::new(StoreConfig::in_dir(dir.path())).unwrap();

        let doc = json!([
            {"fromAccount": "A1", "toAccount": "A2", "amount": 10, "status": "Completed",
             "transactionType": "Transfer", "date": 1700000000},
            {"fromAccount": "A1", "toAccount": "A2", "amount": 10, "status": "Lost",
             "transactionType": "Transfer", "date": 1700000000}
        ]);
        fs::write(dir.path().join("transactions.json"), doc.to_string()).unwrap();

        assert_eq!(store.load_transactions().unwrap().len(), 1);
    }

    #[test]
    fn test_filter() {
        let txs = vec![
            Transaction::deposit("A1", dec!(500)),
            Transaction::withdrawal("A2", dec!(50)),
            Transaction::transfer("A2", "A1", dec!(100)),
        ];

        assert_eq!(TransactionFilter::new().account("A1").apply(txs.clone()).len(), 2);
        assert_eq!(
            TransactionFilter::new()
                .transaction_types(vec![TransactionType::Withdrawal])
                .apply(txs.clone())
                .len(),
            1
        );
        assert_eq!(TransactionFilter::new().min_amount(dec!(100)).apply(txs).len(), 2);
    }
}
