//! # Services Module
//!
//! Banking services catalogue keyed by account type.

use crate::account::{Account, AccountKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Saving balance from which premium features unlock
pub const PREMIUM_THRESHOLD: Decimal = dec!(50000);

/// Features unlocked for premium saving accounts
pub const PREMIUM_FEATURES: &[&str] = &["Credit Card", "Investment Advisory"];

/// Services shown to the account holder
pub fn displayed_services(kind: AccountKind) -> &'static [&'static str] {
    match kind {
        AccountKind::Saving => &["Mobile Banking", "Zakat Calculation", "ATM Card"],
        AccountKind::Business => &["Merchant Services", "Business Loans"],
    }
}

/// Everything that can be activated for the account type
pub fn available_services(kind: AccountKind) -> &'static [&'static str] {
    match kind {
        AccountKind::Saving => &[
            "Mobile Banking",
            "Online Banking",
            "ATM Access",
            "Debit Card",
            "Credit Card",
            "Investment Advisory",
        ],
        AccountKind::Business => &[
            "Business Online Banking",
            "Merchant Services",
            "Business Credit Card",
            "Payroll Services",
            "Commercial Loans",
        ],
    }
}

/// Premium features only apply to saving accounts at or above the threshold
pub fn qualifies_for_premium(account: &dyn Account) -> bool {
    account.kind() == AccountKind::Saving && account.balance() >= PREMIUM_THRESHOLD
}
