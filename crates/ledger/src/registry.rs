//! Ledger registry - the in-memory bank and its snapshot collections
//!
//! The `Ledger` owns every account, employee and user for the lifetime of the
//! process. Each mutating operation updates memory first, then rewrites the
//! affected document. A failed write leaves the collection marked dirty;
//! `flush()` (and `Drop`) retries it.

use crate::config::{BankConfig, LedgerConfig};
use crate::error::{LedgerError, LedgerResult};
use madina_core::services::{available_services, displayed_services, qualifies_for_premium};
use madina_core::{Account, AccountKind, BankAccount, Employee, PersonalInfo, User};
use madina_persistence::{Collection, DocumentStore};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};

/// The bank: accounts, employees and users backed by a document store
pub struct Ledger {
    pub(crate) bank: BankConfig,
    pub(crate) store: DocumentStore,
    /// Creation order
    pub(crate) accounts: Vec<BankAccount>,
    /// Account number -> position in `accounts`
    index: HashMap<String, usize>,
    pub(crate) employees: Vec<Employee>,
    pub(crate) users: BTreeMap<String, User>,
    dirty: HashSet<Collection>,
}

/// Services on offer for one account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountServices {
    pub kind: AccountKind,
    pub displayed: &'static [&'static str],
    pub available: &'static [&'static str],
    pub premium: bool,
}

impl Ledger {
    /// Open the store and load every snapshot collection
    pub fn open(config: &LedgerConfig) -> LedgerResult<Self> {
        let store = DocumentStore::new(config.store.clone())?;

        let mut ledger = Self {
            bank: config.bank.clone(),
            store,
            accounts: Vec::new(),
            index: HashMap::new(),
            employees: Vec::new(),
            users: BTreeMap::new(),
            dirty: HashSet::new(),
        };
        ledger.load_accounts()?;
        ledger.load_employees()?;
        ledger.load_users()?;

        tracing::info!(
            accounts = ledger.accounts.len(),
            employees = ledger.employees.len(),
            users = ledger.users.len(),
            data_dir = %config.store.data_dir.display(),
            "ledger opened"
        );
        Ok(ledger)
    }

    pub fn bank_config(&self) -> &BankConfig {
        &self.bank
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    // ========================================================================
    // ACCOUNTS
    // ========================================================================

    /// Register a new account and persist the account collection.
    ///
    /// Rejects empty numbers, negative balances, unknown types and numbers
    /// already in use. The account stays registered even if the write fails.
    pub fn create_account(
        &mut self,
        number: &str,
        initial_balance: Decimal,
        account_type: &str,
        info: PersonalInfo,
    ) -> LedgerResult<&BankAccount> {
        if self.index.contains_key(number) {
            return Err(LedgerError::DuplicateAccount(number.to_string()));
        }

        let mut account = BankAccount::open_labeled(account_type, number, initial_balance, info)?;
        if let Some(business) = account.as_business_mut() {
            business.set_linked_system(&self.bank.linked_management_system);
        }

        let position = self.accounts.len();
        self.index.insert(number.to_string(), position);
        self.accounts.push(account);

        tracing::info!(
            account = number,
            kind = account_type,
            balance = %initial_balance,
            "account created"
        );

        self.persist(Collection::Accounts)?;
        Ok(&self.accounts[position])
    }

    pub fn find_account(&self, number: &str) -> LedgerResult<&BankAccount> {
        self.index
            .get(number)
            .map(|&i| &self.accounts[i])
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))
    }

    pub(crate) fn find_account_mut(&mut self, number: &str) -> LedgerResult<&mut BankAccount> {
        match self.index.get(number) {
            Some(&i) => Ok(&mut self.accounts[i]),
            None => Err(LedgerError::AccountNotFound(number.to_string())),
        }
    }

    pub(crate) fn position_of(&self, number: &str) -> LedgerResult<usize> {
        self.index
            .get(number)
            .copied()
            .ok_or_else(|| LedgerError::AccountNotFound(number.to_string()))
    }

    pub fn contains_account(&self, number: &str) -> bool {
        self.index.contains_key(number)
    }

    /// Remove an account. Absent numbers are a no-op (`Ok(false)`).
    pub fn remove_account(&mut self, number: &str) -> LedgerResult<bool> {
        let Some(position) = self.index.remove(number) else {
            return Ok(false);
        };

        self.accounts.remove(position);
        self.reindex();
        tracing::info!(account = number, "account removed");

        self.persist(Collection::Accounts)?;
        Ok(true)
    }

    /// All accounts in creation order
    pub fn accounts(&self) -> &[BankAccount] {
        &self.accounts
    }

    /// Replace holder details; the opening date is kept
    pub fn update_customer_info(&mut self, number: &str, info: PersonalInfo) -> LedgerResult<()> {
        self.find_account_mut(number)?.update_info(info);
        tracing::info!(account = number, "customer info updated");
        self.persist(Collection::Accounts)
    }

    /// Next free generated number: `<prefix><serial>` after the highest in use.
    ///
    /// When the highest serial cannot be incremented, the lowest free serial
    /// from `first_account_serial` upwards is used instead.
    pub fn next_account_number(&self) -> String {
        let prefix = &self.bank.account_prefix;
        let first = self.bank.first_account_serial;
        let used: HashSet<u64> = self
            .accounts
            .iter()
            .filter_map(|acc| acc.account_number().strip_prefix(prefix.as_str()))
            .filter_map(|serial| serial.parse::<u64>().ok())
            .collect();

        let serial = match used.iter().max() {
            None => first,
            Some(&highest) => match highest.checked_add(1) {
                Some(next) => next.max(first),
                None => (first..=u64::MAX)
                    .find(|candidate| !used.contains(candidate))
                    .unwrap_or(first),
            },
        };
        format!("{}{}", prefix, serial)
    }

    // ========================================================================
    // SAVING ACCOUNT MAINTENANCE
    // ========================================================================

    fn saving_mut(&mut self, number: &str) -> LedgerResult<&mut madina_core::SavingAccount> {
        self.find_account_mut(number)?
            .as_saving_mut()
            .ok_or_else(|| LedgerError::NotSavingAccount(number.to_string()))
    }

    /// Deduct Zakat from a saving account.
    ///
    /// Returns the deducted amount, `None` when the balance is below Nisab.
    pub fn process_zakat(&mut self, number: &str) -> LedgerResult<Option<Decimal>> {
        let deducted = self.saving_mut(number)?.calculate_zakat()?;

        match deducted {
            Some(amount) => {
                tracing::info!(account = number, zakat = %amount, "zakat deducted");
                self.persist(Collection::Accounts)?;
            }
            None => tracing::debug!(account = number, "balance below nisab, no zakat"),
        }
        Ok(deducted)
    }

    pub fn set_withdrawals_enabled(&mut self, number: &str, enabled: bool) -> LedgerResult<()> {
        self.saving_mut(number)?.set_withdrawals_enabled(enabled);
        tracing::info!(account = number, enabled, "withdrawals toggled");
        self.persist(Collection::Accounts)
    }

    /// Count one more year held; returns the new total
    pub fn record_saving_year(&mut self, number: &str) -> LedgerResult<u32> {
        let saving = self.saving_mut(number)?;
        saving.update_years();
        let years = saving.years_held();
        self.persist(Collection::Accounts)?;
        Ok(years)
    }

    pub fn account_services(&self, number: &str) -> LedgerResult<AccountServices> {
        let account = self.find_account(number)?;
        let kind = account.kind();
        Ok(AccountServices {
            kind,
            displayed: displayed_services(kind),
            available: available_services(kind),
            premium: qualifies_for_premium(account),
        })
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    pub fn save_accounts(&mut self) -> LedgerResult<()> {
        self.persist(Collection::Accounts)
    }

    pub fn save_employees(&mut self) -> LedgerResult<()> {
        self.persist(Collection::Employees)
    }

    pub fn save_users(&mut self) -> LedgerResult<()> {
        self.persist(Collection::Users)
    }

    /// Replace in-memory accounts with the stored ones.
    ///
    /// Duplicate numbers keep the first occurrence.
    pub fn load_accounts(&mut self) -> LedgerResult<()> {
        let loaded = self.store.load_accounts()?;

        self.accounts.clear();
        self.index.clear();
        for account in loaded {
            let number = account.account_number().to_string();
            if self.index.contains_key(&number) {
                tracing::warn!(account = %number, "duplicate account number in store; record skipped");
                continue;
            }
            self.index.insert(number, self.accounts.len());
            self.accounts.push(account);
        }
        self.dirty.remove(&Collection::Accounts);
        Ok(())
    }

    pub fn load_employees(&mut self) -> LedgerResult<()> {
        self.employees = self.store.load_employees()?;
        self.dirty.remove(&Collection::Employees);
        Ok(())
    }

    pub fn load_users(&mut self) -> LedgerResult<()> {
        self.users.clear();
        for user in self.store.load_users()? {
            if self.users.contains_key(&user.username) {
                tracing::warn!(user = %user.username, "duplicate username in store; record skipped");
                continue;
            }
            self.users.insert(user.username.clone(), user);
        }
        self.dirty.remove(&Collection::Users);
        Ok(())
    }

    /// Rewrite one snapshot collection; on failure mark it dirty
    pub(crate) fn persist(&mut self, collection: Collection) -> LedgerResult<()> {
        let result = match collection {
            Collection::Accounts => self.store.save_accounts(&self.accounts),
            Collection::Employees => self.store.save_employees(&self.employees),
            Collection::Users => self.store.save_users(self.users.values()),
            Collection::Loans | Collection::Transactions => Ok(()),
        };

        match result {
            Ok(()) => {
                self.dirty.remove(&collection);
                Ok(())
            }
            Err(e) => {
                self.dirty.insert(collection);
                tracing::warn!(
                    collection = collection.as_str(),
                    error = %e,
                    "save failed; changes kept in memory"
                );
                Err(e.into())
            }
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Retry every collection whose last save failed
    pub fn flush(&mut self) -> LedgerResult<()> {
        let mut pending: Vec<Collection> = self.dirty.iter().copied().collect();
        pending.sort_by_key(|c| c.as_str());

        let mut first_error = None;
        for collection in pending {
            if let Err(e) = self.persist(collection) {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Save the accounts document; on failure put back the `undo` snapshots
    /// so memory matches what is on disk.
    pub(crate) fn persist_accounts_or_undo(
        &mut self,
        undo: Vec<(usize, BankAccount)>,
    ) -> LedgerResult<()> {
        let was_dirty = self.dirty.contains(&Collection::Accounts);
        if let Err(e) = self.persist(Collection::Accounts) {
            self.restore_accounts(undo, was_dirty);
            return Err(e);
        }
        Ok(())
    }

    /// Put back account snapshots taken before a change
    pub(crate) fn restore_accounts(&mut self, undo: Vec<(usize, BankAccount)>, was_dirty: bool) {
        for (position, account) in undo {
            tracing::warn!(account = account.account_number(), "change rolled back");
            self.accounts[position] = account;
        }
        if !was_dirty {
            self.dirty.remove(&Collection::Accounts);
        }
    }

    /// Drop an account from memory only, after its creation could not be saved
    pub(crate) fn discard_account(&mut self, number: &str, was_dirty: bool) {
        if let Some(position) = self.index.remove(number) {
            self.accounts.remove(position);
            self.reindex();
            tracing::warn!(account = number, "account creation rolled back");
        }
        if !was_dirty {
            self.dirty.remove(&Collection::Accounts);
        }
    }

    pub(crate) fn is_collection_dirty(&self, collection: Collection) -> bool {
        self.dirty.contains(&collection)
    }

    fn reindex(&mut self) {
        self.index = self
            .accounts
            .iter()
            .enumerate()
            .map(|(i, acc)| (acc.account_number().to_string(), i))
            .collect();
    }
}

impl Drop for Ledger {
    fn drop(&mut self) {
        if !self.is_dirty() {
            return;
        }
        if let Err(e) = self.flush() {
            tracing::error!(error = %e, "unsaved ledger state lost at shutdown");
        }
    }
}
