//! Reads and writes the persisted budget settings, seeding defaults for missing keys.

use chrono::NaiveDate;
use madbudget_domain::{BudgetSettings, PAY_END_KEY, PAY_START_KEY, WEEKLY_BUDGET_KEY};
use tracing::warn;

use crate::{allocation::validate_weekly_budget, storage::SettingsStore, CoreError};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SettingsService;

impl SettingsService {
    /// Loads the settings, falling back to the defaults for `today` when a key is
    /// missing or cannot be parsed.
    pub fn load(store: &dyn SettingsStore, today: NaiveDate) -> Result<BudgetSettings, CoreError> {
        let defaults = BudgetSettings::defaults_for(today);
        let pay_start = read_value(store, PAY_START_KEY, parse_date)?.unwrap_or(defaults.pay_start);
        let pay_end = read_value(store, PAY_END_KEY, parse_date)?.unwrap_or(defaults.pay_end);
        let weekly_budget = read_value(store, WEEKLY_BUDGET_KEY, parse_amount)?
            .unwrap_or(defaults.weekly_budget);
        Ok(BudgetSettings {
            pay_start,
            pay_end,
            weekly_budget,
        })
    }

    /// Persists all three settings. The pay period and budget are validated first.
    pub fn save(store: &dyn SettingsStore, settings: &BudgetSettings) -> Result<(), CoreError> {
        settings.period()?;
        validate_weekly_budget(settings.weekly_budget)?;
        store.save_setting(PAY_START_KEY, &settings.pay_start.format(DATE_FORMAT).to_string())?;
        store.save_setting(PAY_END_KEY, &settings.pay_end.format(DATE_FORMAT).to_string())?;
        store.save_setting(WEEKLY_BUDGET_KEY, &settings.weekly_budget.to_string())?;
        Ok(())
    }
}

fn read_value<T>(
    store: &dyn SettingsStore,
    key: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Option<T>, CoreError> {
    let Some(raw) = store.load_setting(key)? else {
        return Ok(None);
    };
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!(key, value = %raw, "ignoring unparsable setting");
    }
    Ok(parsed)
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim_matches('"'), DATE_FORMAT).ok()
}

fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim_matches('"')
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}
