//! End-to-end ledger scenarios against a temporary data directory

use madina_core::{Account, Employee, PersonalInfo, TransactionStatus, TransactionType};
use madina_ledger::{Ledger, LedgerConfig, LedgerError};
use rust_decimal_macros::dec;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn open(dir: &Path) -> Ledger {
    Ledger::open(&LedgerConfig::default().with_data_dir(dir)).unwrap()
}

fn holder(name: &str) -> PersonalInfo {
    PersonalInfo::new(name, "1991-04-14", "35202-9876543-2", "Islamabad")
}

#[test]
fn zakat_after_deposit() {
    let dir = tempdir().unwrap();
    let mut ledger = open(dir.path());

    ledger.create_account("A1", dec!(0), "Saving", holder("Ali")).unwrap();
    ledger.deposit("A1", dec!(25000)).unwrap();
    ledger.process_zakat("A1").unwrap();

    let saving = ledger.find_account("A1").unwrap().as_saving().unwrap();
    assert_eq!(saving.zakat_accrued(), dec!(625.0));
    assert_eq!(saving.balance(), dec!(24375.0));

    // Persisted as JSON numbers
    let doc: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("accounts.json")).unwrap())
            .unwrap();
    assert_eq!(doc[0]["balance"].as_f64(), Some(24375.0));
    assert_eq!(doc[0]["zakatAccrued"].as_f64(), Some(625.0));
}

#[test]
fn transfer_between_accounts() {
    let dir = tempdir().unwrap();
    let mut ledger = open(dir.path());

    ledger.create_account("A1", dec!(500), "Saving", holder("Ali")).unwrap();
    ledger.create_account("A2", dec!(0), "Saving", holder("Sara")).unwrap();
    ledger.transfer("A1", "A2", dec!(100)).unwrap();
    drop(ledger);

    let ledger = open(dir.path());
    assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(400));
    assert_eq!(ledger.find_account("A2").unwrap().balance(), dec!(100));

    let txs = ledger.transactions().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].transaction_type, TransactionType::Transfer);
    assert_eq!(txs[0].status, TransactionStatus::Completed);
    assert_eq!(txs[0].from_account, "A1");
    assert_eq!(txs[0].to_account, "A2");
}

#[test]
fn wrong_password_reveals_nothing() {
    let dir = tempdir().unwrap();
    let mut ledger = open(dir.path());
    ledger.ensure_default_admin().unwrap();

    let err = ledger.authenticate_user("admin", "guess").unwrap_err();
    assert!(matches!(err, LedgerError::AuthenticationFailure));
    let message = err.to_string();
    assert!(!message.contains("admin"));
    assert!(!message.contains("default_account"));
}

#[test]
fn disabled_saving_never_moves_money() {
    let dir = tempdir().unwrap();
    let mut ledger = open(dir.path());
    ledger.create_account("A1", dec!(1000), "Saving", holder("Ali")).unwrap();
    ledger.create_account("A2", dec!(0), "Saving", holder("Sara")).unwrap();
    ledger.set_withdrawals_enabled("A1", false).unwrap();

    for amount in [dec!(1), dec!(999), dec!(1000), dec!(5000)] {
        assert!(ledger.withdraw("A1", amount).is_err());
        assert!(ledger.transfer("A1", "A2", amount).is_err());
    }
    assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(1000));
    assert_eq!(ledger.find_account("A2").unwrap().balance(), dec!(0));
}

#[test]
fn balances_never_go_negative() {
    let dir = tempdir().unwrap();
    let mut ledger = open(dir.path());
    ledger.create_account("A1", dec!(10), "Saving", holder("Ali")).unwrap();
    ledger.create_account("B1", dec!(10), "Business", holder("Sara")).unwrap();

    for amount in [dec!(3), dec!(4), dec!(5), dec!(3), dec!(10)] {
        let _ = ledger.withdraw("A1", amount);
        let _ = ledger.withdraw("B1", amount);
    }

    for account in ledger.accounts() {
        assert!(account.balance() >= dec!(0));
    }
    assert_eq!(ledger.find_account("A1").unwrap().balance(), dec!(0));
}

#[test]
fn full_bank_round_trip() {
    let dir = tempdir().unwrap();
    {
        let mut ledger = open(dir.path());
        ledger.ensure_default_admin().unwrap();
        ledger
            .register_customer(holder("Ayesha"), "ayesha", "pw", "MDBSCE24001")
            .unwrap();
        ledger.create_account("MDBSCE24002", dec!(5000), "Business", holder("Kamran")).unwrap();
        ledger
            .add_employee(
                Employee::new("EMP01", "Kamran", "Cashier", dec!(30000), "MDBSCE24002").unwrap(),
            )
            .unwrap();
        ledger.pay_employee_salary("EMP01").unwrap();
        ledger.apply_for_loan("MDBSCE24001", "Car", dec!(800000), "LN0420").unwrap();
    }

    let ledger = open(dir.path());
    assert_eq!(ledger.users().count(), 2);
    assert_eq!(ledger.employees().len(), 1);
    assert_eq!(ledger.find_account("MDBSCE24002").unwrap().balance(), dec!(35000));
    assert_eq!(ledger.loans().unwrap()[0].loan_id, "LN0420");
    assert_eq!(ledger.next_account_number(), "MDBSCE24003");
    assert!(ledger.authenticate_user("ayesha", "pw").is_ok());
}

#[test]
fn malformed_records_are_skipped_on_open() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("accounts.json"),
        r#"[
            {"accountNumber": "A1", "balance": 10.5, "type": "Saving",
             "customerInfo": {"name": "Ali", "dob": "", "cnic": "", "address": "",
                              "openingDate": "2023-01-02 03:04:05"}},
            {"accountNumber": "A2", "balance": 1, "type": "Current",
             "customerInfo": {"name": "?", "dob": "", "cnic": "", "address": ""}},
            {"accountNumber": "A3"}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("users.json"),
        r#"[{"username": "admin", "password": "x", "role": "admin"},
            {"username": "eve", "password": "x", "role": "auditor"}]"#,
    )
    .unwrap();

    let ledger = open(dir.path());
    assert_eq!(ledger.accounts().len(), 1);
    let account = ledger.find_account("A1").unwrap();
    assert_eq!(account.balance(), dec!(10.5));
    assert_eq!(account.info().formatted_opening_date(), "2023-01-02 03:04:05");
    assert_eq!(ledger.users().count(), 1);
}

#[test]
fn corrupt_document_fails_open() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("employees.json"), "not json at all").unwrap();

    let err = Ledger::open(&LedgerConfig::default().with_data_dir(dir.path()))
        .err()
        .unwrap();
    assert!(err.is_file_io());
}
