//! Login identities - registration and authentication
//!
//! Passwords are stored and compared as plain text.

use crate::error::{LedgerError, LedgerResult};
use crate::registry::Ledger;
use madina_core::{BankAccount, PersonalInfo, User};
use madina_persistence::Collection;
use rust_decimal::Decimal;

impl Ledger {
    /// Register a user. Customers must be bound to an existing account.
    pub fn add_user(&mut self, user: User) -> LedgerResult<()> {
        if self.users.contains_key(&user.username) {
            return Err(LedgerError::DuplicateUser(user.username.clone()));
        }
        if !user.is_admin() {
            self.find_account(&user.associated_account)?;
        }

        tracing::info!(user = %user.username, role = user.role.as_str(), "user registered");
        self.users.insert(user.username.clone(), user);
        self.persist(Collection::Users)
    }

    /// Same failure for an unknown user and a wrong password
    pub fn authenticate_user(&self, username: &str, password: &str) -> LedgerResult<&User> {
        match self.users.get(username) {
            Some(user) if user.verify_password(password) => Ok(user),
            _ => {
                tracing::warn!("authentication failed");
                Err(LedgerError::AuthenticationFailure)
            }
        }
    }

    /// Users ordered by username
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Open a zero-balance saving account and bind a new customer login to it
    pub fn register_customer(
        &mut self,
        info: PersonalInfo,
        username: &str,
        password: &str,
        number: &str,
    ) -> LedgerResult<&BankAccount> {
        if self.users.contains_key(username) {
            return Err(LedgerError::DuplicateUser(username.to_string()));
        }
        let user = User::customer(username, password, number)?;

        // no user may point at it, so an account that could not be saved is dropped
        let was_dirty = self.is_collection_dirty(Collection::Accounts);
        if let Err(e) = self.create_account(number, Decimal::ZERO, "Saving", info) {
            if e.is_file_io() {
                self.discard_account(number, was_dirty);
            }
            return Err(e);
        }
        self.add_user(user)?;
        self.find_account(number)
    }

    /// Create the configured admin when nobody can log in yet.
    ///
    /// Returns `true` if the admin was created.
    pub fn ensure_default_admin(&mut self) -> LedgerResult<bool> {
        if !self.users.is_empty() {
            return Ok(false);
        }

        let admin = User::admin(
            &self.bank.default_admin_username,
            &self.bank.default_admin_password,
        )?;
        self.add_user(admin)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use madina_core::{Account, Role, ADMIN_ACCOUNT_PLACEHOLDER};
    use tempfile::tempdir;

    fn open(dir: &std::path::Path) -> Ledger {
        Ledger::open(&LedgerConfig::default().with_data_dir(dir)).unwrap()
    }

    #[test]
    fn test_default_admin_once() {
        let dir = tempdir().unwrap();
        let mut ledger = open(dir.path());

        assert!(ledger.ensure_default_admin().unwrap());
        assert!(!ledger.ensure_default_admin().unwrap());

        let admin = ledger.authenticate_user("admin", "admin123").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.associated_account, ADMIN_ACCOUNT_PLACEHOLDER);

        assert_eq!(open(dir.path()).users().count(), 1);
    }

    #[test]
    fn test_authentication_failures_are_identical() {
        let dir = tempdir().unwrap();
        let mut ledger = open(dir.path());
        ledger.ensure_default_admin().unwrap();

        let wrong_password = ledger.authenticate_user("admin", "nope").unwrap_err();
        let unknown_user = ledger.authenticate_user("ghost", "admin123").unwrap_err();
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, LedgerError::AuthenticationFailure));
    }

    #[test]
    fn test_register_customer() {
        let dir = tempdir().unwrap();
        let mut ledger = open(dir.path());

        let info = PersonalInfo::new("Ayesha", "2000-07-07", "35201-5555555-5", "Multan");
        let account = ledger
            .register_customer(info, "ayesha", "secret", "MDBSCE24001")
            .unwrap();
        assert_eq!(account.classify(), "Saving");
        assert_eq!(account.balance(), Decimal::ZERO);

        let user = ledger.authenticate_user("ayesha", "secret").unwrap();
        assert_eq!(user.associated_account, "MDBSCE24001");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_register_customer_duplicate_username_opens_nothing() {
        let dir = tempdir().unwrap();
        let mut ledger = open(dir.path());
        ledger.ensure_default_admin().unwrap();

        let info = PersonalInfo::new("X", "", "", "");
        let err = ledger.register_customer(info, "admin", "pw", "A9").unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateUser(_)));
        assert!(!ledger.contains_account("A9"));
    }

    #[test]
    fn test_register_customer_unsaved_account_is_dropped() {
        let dir = tempdir().unwrap();
        let mut ledger = open(dir.path());

        let accounts = ledger.store().path(Collection::Accounts);
        std::fs::create_dir(&accounts).unwrap();
        std::fs::write(accounts.join("keep"), "x").unwrap();

        let info = PersonalInfo::new("Ayesha", "2000-07-07", "35201-5555555-5", "Multan");
        let err = ledger.register_customer(info, "ayesha", "secret", "MDBSCE24001").unwrap_err();
        assert!(err.is_file_io());
        assert!(!ledger.contains_account("MDBSCE24001"));
        assert_eq!(ledger.users().count(), 0);
        assert!(!ledger.is_dirty());

        std::fs::remove_dir_all(&accounts).unwrap();
        drop(ledger);
        assert!(open(dir.path()).accounts().is_empty());
    }

    #[test]
    fn test_customer_needs_account() {
        let dir = tempdir().unwrap();
        let mut ledger = open(dir.path());

        let user = User::customer("bilal", "pw", "MISSING").unwrap();
        assert!(ledger.add_user(user).unwrap_err().is_not_found());
        assert_eq!(ledger.users().count(), 0);
    }
}
