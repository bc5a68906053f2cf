//! Append side of the transaction and loan logs

use crate::config::Collection;
use crate::document::DocumentStore;
use crate::error::PersistenceResult;
use crate::records::{LoanRecord, TransactionRecord};
use madina_core::{Loan, Transaction};

impl DocumentStore {
    /// Append one transaction to the log
    pub fn save_transaction(&self, tx: &Transaction) -> PersistenceResult<()> {
        self.append_record(Collection::Transactions, &TransactionRecord::from(tx))?;
        tracing::info!(
            tx_type = tx.transaction_type.as_str(),
            from = %tx.from_account,
            to = %tx.to_account,
            amount = %tx.amount,
            "transaction logged"
        );
        Ok(())
    }

    /// Append one loan application to the log
    pub fn save_loan(&self, loan: &Loan) -> PersistenceResult<()> {
        self.append_record(Collection::Loans, &LoanRecord::from(loan))?;
        tracing::info!(loan_id = %loan.loan_id, amount = %loan.amount, "loan logged");
        Ok(())
    }
}
