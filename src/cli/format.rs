use chrono::NaiveDate;
use madbudget_config::Config;

/// Renders amounts the way the budget screens show them: whole units,
/// grouped thousands and a currency suffix (`1.234 kr`).
#[derive(Debug, Clone)]
pub struct AmountFormatter {
    separator: String,
    suffix: String,
}

impl AmountFormatter {
    pub fn new(separator: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            suffix: suffix.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.thousands_separator, &config.currency_suffix)
    }

    pub fn format(&self, amount: f64) -> String {
        let rounded = amount.round();
        let sign = if rounded < 0.0 { "-" } else { "" };
        let digits = format!("{:.0}", rounded.abs());
        let grouped = group_thousands(&digits, &self.separator);
        if self.suffix.is_empty() {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{grouped} {}", self.suffix)
        }
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
