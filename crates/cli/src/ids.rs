//! Identifier generation for records created from the CLI

use madina_core::Loan;
use uuid::Uuid;

/// Attempts before giving up on a collision-free loan id
const MAX_ATTEMPTS: usize = 32;

/// `<prefix><4 random digits>`, avoiding ids already in the loan log
pub fn loan_id(prefix: &str, existing: &[Loan]) -> Option<String> {
    (0..MAX_ATTEMPTS)
        .map(|_| random_loan_id(prefix))
        .find(|id| existing.iter().all(|loan| &loan.loan_id != id))
}

fn random_loan_id(prefix: &str) -> String {
    let digits = Uuid::new_v4().as_u128() % 10_000;
    format!("{}{:04}", prefix, digits)
}
