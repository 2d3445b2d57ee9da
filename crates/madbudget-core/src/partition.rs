//! Splits a pay period into consecutive week bins.

use chrono::{Days, NaiveDate};
use madbudget_domain::{PayPeriod, WeekBin, DAYS_PER_WEEK};

use crate::CoreError;

/// Partitions `period_start..=period_end` into 7-day bins anchored at the period start.
///
/// The final bin is shorter when the period length is not a multiple of seven.
/// Fails with [`CoreError::InvalidPeriod`] when the end precedes the start.
pub fn partition(period_start: NaiveDate, period_end: NaiveDate) -> Result<Vec<WeekBin>, CoreError> {
    let period = PayPeriod::new(period_start, period_end)?;
    Ok(partition_period(&period))
}

/// Infallible variant for an already validated [`PayPeriod`].
pub fn partition_period(period: &PayPeriod) -> Vec<WeekBin> {
    let capacity = (period.day_count() as usize).div_ceil(DAYS_PER_WEEK as usize);
    let mut bins = Vec::with_capacity(capacity);
    let mut cursor = period.start;
    let mut index = 1;
    loop {
        // Near the end of the calendar the full week may not exist; the period end always does.
        let end = cursor
            .checked_add_days(Days::new(u64::from(DAYS_PER_WEEK) - 1))
            .map_or(period.end, |week_end| week_end.min(period.end));
        let bin = WeekBin::new(index, cursor, end);
        bins.push(bin);
        match bin.next_start() {
            Some(next) if next <= period.end => cursor = next,
            _ => break,
        }
        index += 1;
    }
    bins
}
