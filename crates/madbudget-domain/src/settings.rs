//! Budget settings stored as key/value pairs and their defaults.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::period::{PayPeriod, PeriodError};

pub const PAY_START_KEY: &str = "pay_start";
pub const PAY_END_KEY: &str = "pay_end";
pub const WEEKLY_BUDGET_KEY: &str = "weekly_budget";

/// Weekly budget used until the user sets one.
pub const DEFAULT_WEEKLY_BUDGET: f64 = 2500.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
/// Pay period bounds and weekly budget remembered between sessions.
pub struct BudgetSettings {
    pub pay_start: NaiveDate,
    pub pay_end: NaiveDate,
    pub weekly_budget: f64,
}

impl BudgetSettings {
    /// The current calendar month with the fallback weekly budget.
    pub fn defaults_for(today: NaiveDate) -> Self {
        Self {
            pay_start: start_of_month(today),
            pay_end: end_of_month(today),
            weekly_budget: DEFAULT_WEEKLY_BUDGET,
        }
    }

    pub fn period(&self) -> Result<PayPeriod, PeriodError> {
        PayPeriod::new(self.pay_start, self.pay_end)
    }
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
