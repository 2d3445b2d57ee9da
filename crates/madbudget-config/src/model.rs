use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stores user-configurable preferences for the budgeting shell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Suffix printed after amounts, e.g. `kr`.
    #[serde(default = "Config::default_currency_suffix")]
    pub currency_suffix: String,
    #[serde(default = "Config::default_thousands_separator")]
    pub thousands_separator: String,
    /// Scale the weekly budget down for weeks shorter than seven days.
    #[serde(default = "Config::default_prorate_short_weeks")]
    pub prorate_short_weeks: bool,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for transactions and settings. Defaults to the platform data dir.
    pub data_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_suffix: Self::default_currency_suffix(),
            thousands_separator: Self::default_thousands_separator(),
            prorate_short_weeks: Self::default_prorate_short_weeks(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_root: None,
        }
    }
}

impl Config {
    pub fn default_currency_suffix() -> String {
        "kr".into()
    }

    pub fn default_thousands_separator() -> String {
        ".".into()
    }

    pub fn default_prorate_short_weeks() -> bool {
        true
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("madbudget")
    }
}
