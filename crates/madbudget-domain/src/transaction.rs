//! Domain models for recorded spending and top-ups.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on insert.
pub type TransactionId = u64;

/// Categories offered when recording a transaction. Any other label is accepted too.
pub const CATEGORY_SUGGESTIONS: [&str; 5] = [
    "Dagligvarer",
    "Takeaway",
    "Restaurant",
    "Husholdning",
    "Andet",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
}

impl Transaction {
    pub fn from_draft(id: TransactionId, draft: NewTransaction) -> Self {
        Self {
            id,
            date: draft.date,
            text: draft.text,
            category: draft.category,
            kind: draft.kind,
            amount: draft.amount,
        }
    }

    pub fn is_spend(&self) -> bool {
        self.kind == TransactionKind::Spend
    }
}

/// A transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub text: String,
    pub category: String,
    pub kind: TransactionKind,
    pub amount: f64,
}

impl NewTransaction {
    pub fn new(
        date: NaiveDate,
        text: impl Into<String>,
        category: impl Into<String>,
        kind: TransactionKind,
        amount: f64,
    ) -> Self {
        Self {
            date,
            text: text.into(),
            category: category.into(),
            kind,
            amount,
        }
    }

    pub fn spend(date: NaiveDate, text: impl Into<String>, amount: f64) -> Self {
        Self::new(date, text, "Dagligvarer", TransactionKind::Spend, amount)
    }

    pub fn topup(date: NaiveDate, text: impl Into<String>, amount: f64) -> Self {
        Self::new(date, text, "Andet", TransactionKind::Topup, amount)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Whether a transaction draws from or adds to the budget.
pub enum TransactionKind {
    Spend,
    Topup,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Spend => "spend",
            TransactionKind::Topup => "topup",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "spend" | "forbrug" => Ok(TransactionKind::Spend),
            "topup" | "top-up" | "indsætning" => Ok(TransactionKind::Topup),
            other => Err(format!("unknown transaction type `{other}` (use spend or topup)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_as_type_tag() {
        let txn = Transaction::from_draft(
            7,
            NewTransaction::topup(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), "Refund", 50.0),
        );
        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"type\":\"topup\""));
        assert!(json.contains("\"id\":7"));
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("Spend".parse::<TransactionKind>(), Ok(TransactionKind::Spend));
        assert_eq!("top-up".parse::<TransactionKind>(), Ok(TransactionKind::Topup));
        assert!("refund".parse::<TransactionKind>().is_err());
    }
}
