//! Snapshot collections - accounts, employees, users
//!
//! Saved as whole documents on every change; loaded leniently so a single
//! bad record never blocks startup.

use crate::config::Collection;
use crate::document::DocumentStore;
use crate::error::{PersistenceError, PersistenceResult};
use crate::records::{AccountRecord, EmployeeRecord, UserRecord};
use madina_core::{BankAccount, CoreResult, Employee, User};

impl DocumentStore {
    // === Accounts ===

    pub fn save_accounts(&self, accounts: &[BankAccount]) -> PersistenceResult<()> {
        let records: Vec<AccountRecord> = accounts.iter().map(AccountRecord::from).collect();
        self.write_records(Collection::Accounts, &records)
    }

    pub fn load_accounts(&self) -> PersistenceResult<Vec<BankAccount>> {
        let records: Vec<(usize, AccountRecord)> = self.read_lenient_indexed(Collection::Accounts)?;
        Ok(convert_lenient(Collection::Accounts, records, AccountRecord::into_account).0)
    }

    // === Employees ===

    pub fn save_employees(&self, employees: &[Employee]) -> PersistenceResult<()> {
        let records: Vec<EmployeeRecord> = employees.iter().map(EmployeeRecord::from).collect();
        self.write_records(Collection::Employees, &records)
    }

    pub fn load_employees(&self) -> PersistenceResult<Vec<Employee>> {
        let records: Vec<(usize, EmployeeRecord)> =
            self.read_lenient_indexed(Collection::Employees)?;
        Ok(convert_lenient(Collection::Employees, records, EmployeeRecord::into_employee).0)
    }

    // === Users ===

    pub fn save_users<'a, I>(&self, users: I) -> PersistenceResult<()>
    where
        I: IntoIterator<Item = &'a User>,
    {
        let records: Vec<UserRecord> = users.into_iter().map(UserRecord::from).collect();
        self.write_records(Collection::Users, &records)
    }

    pub fn load_users(&self) -> PersistenceResult<Vec<User>> {
        let records: Vec<(usize, UserRecord)> = self.read_lenient_indexed(Collection::Users)?;
        Ok(convert_lenient(Collection::Users, records, UserRecord::into_user).0)
    }
}

/// Apply a fallible record conversion, logging and dropping failures.
///
/// Indices are document positions, so skipped records are reported where
/// they sit in the file.
fn convert_lenient<R, T>(
    collection: Collection,
    records: Vec<(usize, R)>,
    convert: impl Fn(R) -> CoreResult<T>,
) -> (Vec<T>, Vec<PersistenceError>) {
    let mut out = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for (index, record) in records {
        match convert(record) {
            Ok(value) => out.push(value),
            Err(e) => {
                let err = PersistenceError::malformed(collection.as_str(), index, e);
                tracing::warn!("{}; record skipped", err);
                skipped.push(err);
            }
        }
    }
    (out, skipped)
}
