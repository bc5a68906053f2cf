//! # Account Module
//!
//! Account model of the ledger:
//! - `AccountCore`: number, balance and holder shared by every variant
//! - `Account`: capability trait (withdraw, update_balance, classify, describe)
//! - `SavingAccount`: Zakat, years held, withdrawal gate
//! - `BusinessAccount`: linked management system, quirky withdraw return
//! - `BankAccount`: tagged variant owned by the ledger, built by `BankAccount::open`

use crate::error::{CoreError, CoreResult};
use crate::money::{ensure_positive, format_amount};
use crate::person::PersonalInfo;
use crate::zakat;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Linked system recorded on new business accounts
pub const DEFAULT_LINKED_SYSTEM: &str = "LinkedSystem";

/// Account variant tag.
///
/// The literal (`"Saving"` / `"Business"`) is both the persisted `type` field
/// and the key of the services catalogue, so it must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Saving,
    Business,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Saving => "Saving",
            AccountKind::Business => "Business",
        }
    }

    /// Parse the stored type literal
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "Saving" => Some(AccountKind::Saving),
            "Business" => Some(AccountKind::Business),
            _ => None,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State shared by every account variant.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountCore {
    number: String,
    balance: Decimal,
    holder: PersonalInfo,
}

impl AccountCore {
    /// Validate and build. Empty numbers and negative balances are rejected.
    pub fn new(number: &str, balance: Decimal, holder: PersonalInfo) -> CoreResult<Self> {
        if number.trim().is_empty() {
            return Err(CoreError::EmptyAccountNumber);
        }
        if balance < Decimal::ZERO {
            return Err(CoreError::NegativeBalance(balance));
        }
        Ok(Self {
            number: number.to_string(),
            balance,
            holder,
        })
    }

    /// Base withdrawal rule: positive amount, never below zero
    fn debit(&mut self, amount: Decimal) -> CoreResult<()> {
        ensure_positive(amount, "Withdrawal")?;
        if amount > self.balance {
            return Err(CoreError::InsufficientFunds {
                needed: amount,
                available: self.balance,
            });
        }
        self.balance -= amount;
        Ok(())
    }

    /// Credit `amount`; the balance is untouched when the sum overflows
    fn credit(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(CoreError::AmountOverflow(amount))?;
        Ok(self.balance)
    }
}

/// Capabilities every account offers to the ledger.
pub trait Account {
    fn core(&self) -> &AccountCore;

    fn core_mut(&mut self) -> &mut AccountCore;

    fn kind(&self) -> AccountKind;

    fn account_number(&self) -> &str {
        &self.core().number
    }

    fn balance(&self) -> Decimal {
        self.core().balance
    }

    fn info(&self) -> &PersonalInfo {
        &self.core().holder
    }

    /// Replace holder details. The opening timestamp is kept.
    fn update_info(&mut self, info: PersonalInfo) {
        let opened_at = self.core().holder.opened_at;
        self.core_mut().holder = info.opened_at(opened_at);
    }

    /// Stable type literal
    fn classify(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Debit `amount`.
    ///
    /// # Returns
    /// - `Ok(amount)` on success (base rule)
    /// - `Err(InvalidAmount)` for zero/negative amounts
    /// - `Err(InsufficientFunds)` when `amount > balance`, balance untouched
    ///
    /// Variants may report success differently; callers must treat any
    /// nonzero return as success and zero as "refused".
    fn withdraw(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        self.core_mut().debit(amount)?;
        Ok(amount)
    }

    /// Credit without rules, returns the new balance. Fails only on overflow.
    fn update_balance(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        self.core_mut().credit(amount)
    }

    /// Console rendering of the account
    fn describe(&self) -> String {
        format!(
            "{}\nAccount Number: {}\nAccount Type: {}\nCurrent Balance: {}",
            self.info(),
            self.account_number(),
            self.classify(),
            format_amount(self.balance())
        )
    }
}

// ============================================================================
// SAVING ACCOUNT
// ============================================================================

/// Saving account: Zakat bookkeeping and a withdrawal gate.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingAccount {
    core: AccountCore,
    zakat_accrued: Decimal,
    years_held: u32,
    withdrawals_enabled: bool,
}

impl SavingAccount {
    pub fn new(number: &str, balance: Decimal, holder: PersonalInfo) -> CoreResult<Self> {
        Ok(Self {
            core: AccountCore::new(number, balance, holder)?,
            zakat_accrued: Decimal::ZERO,
            years_held: 0,
            withdrawals_enabled: true,
        })
    }

    /// Restore persisted saving state
    pub fn with_state(
        mut self,
        zakat_accrued: Decimal,
        years_held: u32,
        withdrawals_enabled: bool,
    ) -> Self {
        self.zakat_accrued = zakat_accrued;
        self.years_held = years_held;
        self.withdrawals_enabled = withdrawals_enabled;
        self
    }

    pub fn zakat_accrued(&self) -> Decimal {
        self.zakat_accrued
    }

    pub fn years_held(&self) -> u32 {
        self.years_held
    }

    pub fn withdrawals_enabled(&self) -> bool {
        self.withdrawals_enabled
    }

    pub fn set_withdrawals_enabled(&mut self, enabled: bool) {
        self.withdrawals_enabled = enabled;
    }

    /// One more year held
    pub fn update_years(&mut self) {
        self.years_held = self.years_held.saturating_add(1);
    }

    pub fn set_years(&mut self, years: u32) {
        self.years_held = years;
    }

    pub fn is_zakat_applicable(&self) -> bool {
        zakat::is_applicable(self.core.balance)
    }

    /// Deduct Zakat if the balance is at or above Nisab.
    ///
    /// Returns the deducted amount, `None` when below Nisab (no change).
    /// Fails without change when the running total would overflow.
    pub fn calculate_zakat(&mut self) -> CoreResult<Option<Decimal>> {
        let Some(due) = zakat::zakat_due(self.core.balance) else {
            return Ok(None);
        };
        let accrued = self
            .zakat_accrued
            .checked_add(due)
            .ok_or(CoreError::AmountOverflow(due))?;
        self.core.balance -= due;
        self.zakat_accrued = accrued;
        Ok(Some(due))
    }
}

impl Account for SavingAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Saving
    }

    /// Disabled withdrawals return zero without touching the balance
    fn withdraw(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        if !self.withdrawals_enabled {
            return Ok(Decimal::ZERO);
        }
        self.core.debit(amount)?;
        Ok(amount)
    }
}

// ============================================================================
// BUSINESS ACCOUNT
// ============================================================================

/// Business account linked to an external management system.
///
/// The link is informational; nothing checks that the system exists.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessAccount {
    core: AccountCore,
    linked_system: String,
}

impl BusinessAccount {
    pub fn new(
        number: &str,
        balance: Decimal,
        holder: PersonalInfo,
        linked_system: &str,
    ) -> CoreResult<Self> {
        Ok(Self {
            core: AccountCore::new(number, balance, holder)?,
            linked_system: linked_system.to_string(),
        })
    }

    pub fn linked_system(&self) -> &str {
        &self.linked_system
    }

    pub fn set_linked_system(&mut self, system: &str) {
        self.linked_system = system.to_string();
    }
}

impl Account for BusinessAccount {
    fn core(&self) -> &AccountCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut AccountCore {
        &mut self.core
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Business
    }

    /// Success is reported as exactly one unit, not the withdrawn amount
    fn withdraw(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        self.core.debit(amount)?;
        Ok(Decimal::ONE)
    }
}

// ============================================================================
// BANK ACCOUNT (tagged variant)
// ============================================================================

/// An account as owned by the ledger.
#[derive(Debug, Clone, PartialEq)]
pub enum BankAccount {
    Saving(SavingAccount),
    Business(BusinessAccount),
}

impl BankAccount {
    /// Factory: build the variant for `kind`
    pub fn open(
        kind: AccountKind,
        number: &str,
        balance: Decimal,
        holder: PersonalInfo,
    ) -> CoreResult<Self> {
        match kind {
            AccountKind::Saving => Ok(BankAccount::Saving(SavingAccount::new(
                number, balance, holder,
            )?)),
            AccountKind::Business => Ok(BankAccount::Business(BusinessAccount::new(
                number,
                balance,
                holder,
                DEFAULT_LINKED_SYSTEM,
            )?)),
        }
    }

    /// Factory keyed by the type literal; unknown literals are rejected
    pub fn open_labeled(
        label: &str,
        number: &str,
        balance: Decimal,
        holder: PersonalInfo,
    ) -> CoreResult<Self> {
        let kind = AccountKind::from_str(label)
            .ok_or_else(|| CoreError::InvalidAccountType(label.to_string()))?;
        Self::open(kind, number, balance, holder)
    }

    pub fn as_saving(&self) -> Option<&SavingAccount> {
        match self {
            BankAccount::Saving(acc) => Some(acc),
            BankAccount::Business(_) => None,
        }
    }

    pub fn as_saving_mut(&mut self) -> Option<&mut SavingAccount> {
        match self {
            BankAccount::Saving(acc) => Some(acc),
            BankAccount::Business(_) => None,
        }
    }

    pub fn as_business(&self) -> Option<&BusinessAccount> {
        match self {
            BankAccount::Business(acc) => Some(acc),
            BankAccount::Saving(_) => None,
        }
    }

    pub fn as_business_mut(&mut self) -> Option<&mut BusinessAccount> {
        match self {
            BankAccount::Business(acc) => Some(acc),
            BankAccount::Saving(_) => None,
        }
    }
}

impl Account for BankAccount {
    fn core(&self) -> &AccountCore {
        match self {
            BankAccount::Saving(acc) => acc.core(),
            BankAccount::Business(acc) => acc.core(),
        }
    }

    fn core_mut(&mut self) -> &mut AccountCore {
        match self {
            BankAccount::Saving(acc) => acc.core_mut(),
            BankAccount::Business(acc) => acc.core_mut(),
        }
    }

    fn kind(&self) -> AccountKind {
        match self {
            BankAccount::Saving(acc) => acc.kind(),
            BankAccount::Business(acc) => acc.kind(),
        }
    }

    fn withdraw(&mut self, amount: Decimal) -> CoreResult<Decimal> {
        match self {
            BankAccount::Saving(acc) => acc.withdraw(amount),
            BankAccount::Business(acc) => acc.withdraw(amount),
        }
    }
}

impl fmt::Display for BankAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
