//! # Money Module
//!
//! Amount helpers on top of `rust_decimal::Decimal`. Every balance, salary,
//! loan and transaction amount in the ledger is a `Decimal` so that Zakat and
//! transfers stay exact.

use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;

/// Currency symbol used when rendering amounts
pub const CURRENCY_SYMBOL: &str = "$";

/// Reject zero and negative amounts for the given operation
///
/// # Examples
/// ```
/// use madina_core::money::ensure_positive;
/// use rust_decimal::Decimal;
///
/// assert!(ensure_positive(Decimal::ONE, "Deposit").is_ok());
/// assert!(ensure_positive(Decimal::ZERO, "Deposit").is_err());
/// ```
pub fn ensure_positive(amount: Decimal, operation: &str) -> CoreResult<()> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::InvalidAmount(format!(
            "{} amount must be positive: {}",
            operation, amount
        )));
    }
    Ok(())
}

/// Render an amount the way the console shows balances: `$1234.50`
pub fn format_amount(amount: Decimal) -> String {
    format!("{}{:.2}", CURRENCY_SYMBOL, amount.round_dp(2))
}
