use std::fs;

use chrono::NaiveDate;
use madbudget_core::{SettingsService, SettingsStore, TransactionService, TransactionStore};
use madbudget_domain::{BudgetSettings, NewTransaction, TransactionKind};
use madbudget_storage_json::{JsonStore, StoragePaths};
use tempfile::tempdir;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn empty_store_has_no_transactions_or_settings() {
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(dir.path().join("data")).expect("create store");

    assert!(store.load_transactions().expect("load").is_empty());
    assert!(store.load_setting("pay_start").expect("load").is_none());
}

#[test]
fn transactions_survive_a_new_store_instance() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path().join("data");
    {
        let store = JsonStore::new(root.clone()).expect("create store");
        TransactionService::add(&store, NewTransaction::spend(date(2024, 1, 3), "Netto", 89.5))
            .expect("add spend");
        TransactionService::add(
            &store,
            NewTransaction::new(date(2024, 1, 4), "Salary bonus", "Andet", TransactionKind::Topup, 500.0),
        )
        .expect("add topup");
    }

    let reopened = JsonStore::new(root).expect("reopen store");
    let rows = reopened.load_transactions().expect("load");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[1].id, 2);
    assert_eq!(rows[1].kind, TransactionKind::Topup);

    let next = reopened
        .insert_transaction(NewTransaction::spend(date(2024, 1, 5), "Lidl", 12.0))
        .expect("insert");
    assert_eq!(next.id, 3);
}

#[test]
fn transactions_file_uses_type_tags() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::in_dir(dir.path());
    let store = JsonStore::with_paths(paths.clone()).expect("create store");
    store
        .insert_transaction(NewTransaction::spend(date(2024, 1, 3), "Netto", 10.0))
        .expect("insert");

    let raw = fs::read_to_string(&paths.transactions).expect("read file");
    assert!(raw.contains("\"type\": \"spend\""));
    assert!(raw.contains("\"date\": \"2024-01-03\""));
    assert!(!dir.path().join("transactions.json.tmp").exists());
}

#[test]
fn settings_round_trip_through_the_settings_service() {
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(dir.path().to_path_buf()).expect("create store");
    let settings = BudgetSettings {
        pay_start: date(2024, 3, 25),
        pay_end: date(2024, 4, 24),
        weekly_budget: 1800.0,
    };
    SettingsService::save(&store, &settings).expect("save settings");

    let reopened = JsonStore::new(dir.path().to_path_buf()).expect("reopen store");
    let loaded = SettingsService::load(&reopened, date(2025, 6, 1)).expect("load settings");
    assert_eq!(loaded, settings);
}

#[test]
fn corrupt_transactions_file_reports_serde_error() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::in_dir(dir.path());
    fs::write(&paths.transactions, "{ not json").expect("write");
    let store = JsonStore::with_paths(paths).expect("create store");

    let err = store.load_transactions().expect_err("corrupt file");
    assert!(err.to_string().contains("Serialization error"));
}
