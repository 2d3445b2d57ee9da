use chrono::NaiveDate;

use crate::{
    aggregate, partition, partition_period, Clock, FixedClock, InMemoryStore, SettingsService,
    TransactionService, TransactionStore,
};
use madbudget_domain::{BudgetSettings, NewTransaction, TransactionKind};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn stored_history_is_narrowed_to_the_configured_period() {
    let store = InMemoryStore::new();
    let clock = FixedClock::new(date(2024, 1, 9));
    SettingsService::save(
        &store,
        &BudgetSettings {
            pay_start: date(2024, 1, 1),
            pay_end: date(2024, 1, 10),
            weekly_budget: 700.0,
        },
    )
    .unwrap();

    for draft in [
        NewTransaction::spend(date(2023, 12, 28), "Last period", 999.0),
        NewTransaction::new(date(2024, 1, 2), "Refund", "Andet", TransactionKind::Topup, 50.0),
        NewTransaction::new(date(2024, 1, 9), "Rema 1000", "Dagligvarer", TransactionKind::Spend, 150.0),
    ] {
        TransactionService::add(&store, draft).unwrap();
    }

    let settings = SettingsService::load(&store, clock.today()).unwrap();
    let period = settings.period().unwrap();
    let bins = partition_period(&period);
    let history = store.load_transactions().unwrap();
    let summary = aggregate(&bins, settings.weekly_budget, true, &history, clock.today()).unwrap();

    assert_eq!(summary.weeks.len(), 2);
    assert!((summary.weeks[0].remaining - 750.0).abs() < 1e-9);
    assert!((summary.weeks[1].remaining - 150.0).abs() < 1e-9);
    assert!((summary.totals.remaining - 900.0).abs() < 1e-9);
    assert_eq!(summary.days_left, 2);
    assert!((summary.daily_projection - 450.0).abs() < 1e-9);
    assert!(summary.excluded.is_empty());

    let listed = TransactionService::in_period(&history, &period);
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].text, "Rema 1000");
}

#[test]
fn default_settings_partition_the_current_month() {
    let store = InMemoryStore::new();
    let today = date(2024, 2, 14);
    let settings = SettingsService::load(&store, today).unwrap();
    let bins = partition(settings.pay_start, settings.pay_end).unwrap();
    assert_eq!(bins.len(), 5);
    assert_eq!(bins[4].day_count, 1);

    let summary = aggregate(&bins, settings.weekly_budget, true, &[], today).unwrap();
    assert!((summary.totals.budget - 2500.0 * 29.0 / 7.0).abs() < 1e-6);
    assert_eq!(summary.days_left, 16);
}
