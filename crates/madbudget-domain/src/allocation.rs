//! Derived per-week and per-period budget figures.

use serde::{Deserialize, Serialize};

use crate::{period::WeekBin, transaction::TransactionId};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Budget, activity and balance for a single week bin.
pub struct PeriodAllocation {
    pub week: WeekBin,
    pub budget: f64,
    pub topups: f64,
    pub spend: f64,
    pub remaining: f64,
}

impl PeriodAllocation {
    pub fn new(week: WeekBin, budget: f64, topups: f64, spend: f64) -> Self {
        Self {
            week,
            budget,
            topups,
            spend,
            remaining: budget + topups - spend,
        }
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining < 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
/// Sums across every week of the period.
pub struct PeriodTotals {
    pub budget: f64,
    pub remaining: f64,
    pub spend: f64,
    pub topups: f64,
}

impl PeriodTotals {
    pub fn add(&mut self, allocation: &PeriodAllocation) {
        self.budget += allocation.budget;
        self.remaining += allocation.remaining;
        self.spend += allocation.spend;
        self.topups += allocation.topups;
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Result of aggregating a period's transactions into its week bins.
pub struct PeriodSummary {
    /// Ordered by week index.
    pub weeks: Vec<PeriodAllocation>,
    pub totals: PeriodTotals,
    pub days_left: i64,
    pub daily_projection: f64,
    /// Transactions skipped because their amount was negative or not a number.
    #[serde(default)]
    pub excluded: Vec<TransactionId>,
}

impl PeriodSummary {
    pub fn week(&self, index: u32) -> Option<&PeriodAllocation> {
        self.weeks.iter().find(|entry| entry.week.index == index)
    }
}
