//! Pay periods and the week bins they are split into.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of days in a full week bin.
pub const DAYS_PER_WEEK: u32 = 7;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Inclusive date range between two pay days.
pub struct PayPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PayPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        if end < start {
            return Err(PeriodError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`PayPeriod`] values.
pub enum PeriodError {
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodError::InvertedRange { start, end } => {
                write!(f, "pay period end {end} is before start {start}")
            }
        }
    }
}

impl std::error::Error for PeriodError {}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
/// A contiguous slice of a pay period spanning at most seven days.
pub struct WeekBin {
    /// 1-based position within the period.
    pub index: u32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub day_count: u32,
}

impl WeekBin {
    /// Builds the bin covering `start..=end`. Callers guarantee `start <= end`.
    pub fn new(index: u32, start: NaiveDate, end: NaiveDate) -> Self {
        let day_count = ((end - start).num_days() + 1) as u32;
        Self {
            index,
            start,
            end,
            day_count,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn is_full_week(&self) -> bool {
        self.day_count == DAYS_PER_WEEK
    }

    /// First day after this bin, `None` when the bin ends on the last representable date.
    pub fn next_start(&self) -> Option<NaiveDate> {
        self.end.succ_opt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pay_period_rejects_inverted_range() {
        let err = PayPeriod::new(date(2024, 1, 10), date(2024, 1, 9)).unwrap_err();
        assert!(err.to_string().contains("before start"));
    }

    #[test]
    fn single_day_period_is_valid() {
        let period = PayPeriod::new(date(2024, 1, 10), date(2024, 1, 10)).unwrap();
        assert_eq!(period.day_count(), 1);
        assert!(period.contains(date(2024, 1, 10)));
        assert!(!period.contains(date(2024, 1, 11)));
    }

    #[test]
    fn week_bin_counts_days_inclusively() {
        let bin = WeekBin::new(2, date(2024, 1, 8), date(2024, 1, 10));
        assert_eq!(bin.day_count, 3);
        assert!(!bin.is_full_week());
        assert!(bin.contains(date(2024, 1, 8)));
        assert!(bin.contains(date(2024, 1, 10)));
        assert_eq!(bin.next_start(), Some(date(2024, 1, 11)));
    }

    #[test]
    fn last_representable_bin_has_no_successor() {
        let bin = WeekBin::new(1, NaiveDate::MAX, NaiveDate::MAX);
        assert_eq!(bin.day_count, 1);
        assert_eq!(bin.next_start(), None);
    }

    #[test]
    fn pay_period_displays_as_range() {
        let period = PayPeriod::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        assert_eq!(period.to_string(), "2024-01-01 .. 2024-01-10");
    }
}
