#![doc(test(attr(deny(warnings))))]

//! Madbudget tracks a pay period's food budget week by week: it splits the
//! period into week bins, allocates the weekly budget across them and reports
//! what is left, both per week and per remaining day.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Madbudget tracing initialized.");
    });
}
