use chrono::{Local, NaiveDate};

use madbudget_core::Clock;

/// Real-time clock. Dates follow the local calendar since pay days do.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
