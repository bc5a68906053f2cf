//! # Zakat Module
//!
//! Zakat is 2.5% of a Saving balance once it reaches the Nisab threshold.
//! It is only ever applied on explicit request.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Balance threshold from which Zakat is due
pub const NISAB: Decimal = dec!(20000);

/// Zakat rate (2.5%)
pub const ZAKAT_RATE: Decimal = dec!(0.025);

/// Is Zakat due on this balance?
pub fn is_applicable(balance: Decimal) -> bool {
    balance >= NISAB
}

/// Zakat owed on a balance, `None` below Nisab
pub fn zakat_due(balance: Decimal) -> Option<Decimal> {
    if is_applicable(balance) {
        Some(balance * ZAKAT_RATE)
    } else {
        None
    }
}
