//! Allocates the weekly budget across week bins and folds transactions into them.

use std::cmp::Ordering;

use chrono::NaiveDate;
use madbudget_domain::{
    PeriodAllocation, PeriodSummary, PeriodTotals, Transaction, TransactionKind, WeekBin,
    DAYS_PER_WEEK,
};
use tracing::{debug, warn};

use crate::CoreError;

/// Budget assigned to a single bin. Pro-ration keeps the per-day rate constant.
pub fn allocated_budget(bin: &WeekBin, weekly_budget: f64, prorate: bool) -> f64 {
    if prorate {
        weekly_budget * f64::from(bin.day_count) / f64::from(DAYS_PER_WEEK)
    } else {
        weekly_budget
    }
}

pub fn validate_weekly_budget(weekly_budget: f64) -> Result<(), CoreError> {
    if !weekly_budget.is_finite() || weekly_budget < 0.0 {
        return Err(CoreError::InvalidBudget(weekly_budget));
    }
    Ok(())
}

/// Rejects records whose amount is negative or not a number.
pub fn validate_transaction(txn: &Transaction) -> Result<(), CoreError> {
    if !txn.amount.is_finite() || txn.amount < 0.0 {
        return Err(CoreError::InvalidTransaction {
            id: txn.id,
            amount: txn.amount,
        });
    }
    Ok(())
}

/// Position of the bin containing `date`. `bins` must be sorted and non-overlapping.
pub fn locate_bin(bins: &[WeekBin], date: NaiveDate) -> Option<usize> {
    bins.binary_search_by(|bin| {
        if bin.end < date {
            Ordering::Less
        } else if bin.start > date {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    })
    .ok()
}

/// Days from `max(today, period_start)` through `period_end`, or 0 once the period is over.
pub fn days_left(period_start: NaiveDate, period_end: NaiveDate, today: NaiveDate) -> i64 {
    if today > period_end {
        return 0;
    }
    (period_end - today.max(period_start)).num_days() + 1
}

/// Average amount that can be spent per remaining day.
pub fn daily_projection(total_remaining: f64, days_left: i64) -> f64 {
    if days_left > 0 {
        total_remaining / days_left as f64
    } else {
        0.0
    }
}

/// Aggregates `transactions` into `bins` and computes the period totals and projection.
///
/// Transactions dated outside every bin are ignored. A transaction with a negative
/// or non-finite amount inside the period is skipped and its id reported in
/// [`PeriodSummary::excluded`]; the rest of the batch is still aggregated.
pub fn aggregate(
    bins: &[WeekBin],
    weekly_budget: f64,
    prorate: bool,
    transactions: &[Transaction],
    today: NaiveDate,
) -> Result<PeriodSummary, CoreError> {
    validate_weekly_budget(weekly_budget)?;

    let mut buckets = vec![Bucket::default(); bins.len()];
    let mut excluded = Vec::new();

    for txn in transactions {
        let Some(position) = locate_bin(bins, txn.date) else {
            continue;
        };
        if let Err(err) = validate_transaction(txn) {
            warn!(transaction = txn.id, error = %err, "skipping transaction");
            excluded.push(txn.id);
            continue;
        }
        let bucket = &mut buckets[position];
        match txn.kind {
            TransactionKind::Spend => bucket.spend += txn.amount,
            TransactionKind::Topup => bucket.topups += txn.amount,
        }
    }

    let mut totals = PeriodTotals::default();
    let weeks: Vec<PeriodAllocation> = bins
        .iter()
        .zip(buckets)
        .map(|(bin, bucket)| {
            let allocation = PeriodAllocation::new(
                *bin,
                allocated_budget(bin, weekly_budget, prorate),
                bucket.topups,
                bucket.spend,
            );
            totals.add(&allocation);
            allocation
        })
        .collect();

    let days_left = match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => days_left(first.start, last.end, today),
        _ => 0,
    };
    let daily_projection = daily_projection(totals.remaining, days_left);

    debug!(
        weeks = weeks.len(),
        remaining = totals.remaining,
        days_left,
        "aggregated pay period"
    );

    Ok(PeriodSummary {
        weeks,
        totals,
        days_left,
        daily_projection,
        excluded,
    })
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    topups: f64,
    spend: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition;
    use madbudget_domain::NewTransaction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(id: u64, draft: NewTransaction) -> Transaction {
        Transaction::from_draft(id, draft)
    }

    #[test]
    fn full_weeks_get_the_whole_budget() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 14)).unwrap();
        let summary = aggregate(&bins, 2000.0, false, &[], date(2024, 1, 1)).unwrap();
        assert_eq!(summary.weeks.len(), 2);
        assert!(summary.weeks.iter().all(|week| week.budget == 2000.0));
        assert_eq!(summary.totals.budget, 4000.0);
    }

    #[test]
    fn prorating_full_weeks_changes_nothing() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 14)).unwrap();
        let summary = aggregate(&bins, 1400.0, true, &[], date(2024, 1, 1)).unwrap();
        assert_eq!(summary.weeks[0].budget, 1400.0);
        assert_eq!(summary.weeks[1].budget, 1400.0);
    }

    #[test]
    fn short_week_is_prorated_by_day_count() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let summary = aggregate(&bins, 700.0, true, &[], date(2024, 1, 1)).unwrap();
        assert!((summary.weeks[0].budget - 700.0).abs() < 1e-9);
        assert!((summary.weeks[1].budget - 300.0).abs() < 1e-9);
    }

    #[test]
    fn short_week_keeps_full_budget_without_prorating() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let summary = aggregate(&bins, 700.0, false, &[], date(2024, 1, 1)).unwrap();
        assert_eq!(summary.weeks[1].budget, 700.0);
        assert_eq!(summary.totals.budget, 1400.0);
    }

    #[test]
    fn spend_and_topups_land_in_their_weeks() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let transactions = vec![
            txn(1, NewTransaction::spend(date(2024, 1, 9), "Rema 1000", 150.0)),
            txn(2, NewTransaction::topup(date(2024, 1, 2), "Gift", 50.0)),
        ];
        let summary = aggregate(&bins, 700.0, true, &transactions, date(2024, 1, 1)).unwrap();

        let first = summary.week(1).unwrap();
        assert!((first.topups - 50.0).abs() < 1e-9);
        assert_eq!(first.spend, 0.0);
        assert!((first.remaining - 750.0).abs() < 1e-9);

        let second = summary.week(2).unwrap();
        assert!((second.spend - 150.0).abs() < 1e-9);
        assert_eq!(second.topups, 0.0);
        assert!((second.remaining - 150.0).abs() < 1e-9);

        assert!((summary.totals.remaining - 900.0).abs() < 1e-9);
        assert!((summary.totals.spend - 150.0).abs() < 1e-9);
        assert!((summary.totals.topups - 50.0).abs() < 1e-9);
    }

    #[test]
    fn transactions_outside_the_period_are_ignored() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let transactions = vec![
            txn(1, NewTransaction::spend(date(2023, 12, 31), "Before", 100.0)),
            txn(2, NewTransaction::spend(date(2024, 1, 11), "After", 100.0)),
            txn(3, NewTransaction::spend(date(2024, 1, 10), "Last day", 10.0)),
        ];
        let summary = aggregate(&bins, 700.0, false, &transactions, date(2024, 1, 1)).unwrap();
        assert_eq!(summary.totals.spend, 10.0);
        assert_eq!(summary.week(2).unwrap().spend, 10.0);
    }

    #[test]
    fn overspending_yields_negative_remaining() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 7)).unwrap();
        let transactions = vec![txn(1, NewTransaction::spend(date(2024, 1, 3), "Party", 900.0))];
        let summary = aggregate(&bins, 700.0, false, &transactions, date(2024, 1, 4)).unwrap();
        assert_eq!(summary.weeks[0].remaining, -200.0);
        assert!(summary.weeks[0].is_overspent());
        assert_eq!(summary.days_left, 4);
        assert_eq!(summary.daily_projection, -50.0);
    }

    #[test]
    fn negative_amounts_are_skipped_and_reported() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 7)).unwrap();
        let transactions = vec![
            txn(1, NewTransaction::spend(date(2024, 1, 3), "Refund?", -40.0)),
            txn(2, NewTransaction::spend(date(2024, 1, 3), "Bakery", 40.0)),
            txn(3, NewTransaction::spend(date(2024, 1, 4), "Broken", f64::NAN)),
        ];
        let summary = aggregate(&bins, 700.0, false, &transactions, date(2024, 1, 1)).unwrap();
        assert_eq!(summary.excluded, vec![1, 3]);
        assert_eq!(summary.totals.spend, 40.0);
        assert_eq!(summary.totals.remaining, 660.0);
    }

    #[test]
    fn negative_weekly_budget_is_rejected() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 7)).unwrap();
        let err = aggregate(&bins, -1.0, false, &[], date(2024, 1, 1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidBudget(_)));
    }

    #[test]
    fn projection_is_zero_after_the_period() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let summary = aggregate(&bins, 700.0, true, &[], date(2024, 1, 11)).unwrap();
        assert_eq!(summary.days_left, 0);
        assert_eq!(summary.daily_projection, 0.0);
        assert!(summary.totals.remaining > 0.0);
    }

    #[test]
    fn projection_counts_from_period_start_before_it_begins() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let summary = aggregate(&bins, 700.0, true, &[], date(2023, 12, 20)).unwrap();
        assert_eq!(summary.days_left, 10);
        assert!((summary.daily_projection - 100.0).abs() < 1e-9);
    }

    #[test]
    fn projection_spreads_whole_period_remaining_over_days_left() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        let transactions = vec![txn(1, NewTransaction::spend(date(2024, 1, 2), "Week one", 600.0))];
        let summary = aggregate(&bins, 700.0, true, &transactions, date(2024, 1, 9)).unwrap();
        assert_eq!(summary.days_left, 2);
        assert!((summary.daily_projection - 200.0).abs() < 1e-9);
    }

    #[test]
    fn locate_bin_uses_inclusive_bounds() {
        let bins = partition(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        assert_eq!(locate_bin(&bins, date(2024, 1, 7)), Some(0));
        assert_eq!(locate_bin(&bins, date(2024, 1, 8)), Some(1));
        assert_eq!(locate_bin(&bins, date(2024, 1, 11)), None);
    }
}
