use std::cmp::Reverse;

use madbudget_domain::{NewTransaction, PayPeriod, Transaction};
use tracing::info;

use crate::{storage::TransactionStore, CoreError};

pub struct TransactionService;

impl TransactionService {
    /// Validates and appends a transaction. The label is stored trimmed.
    pub fn add(
        store: &dyn TransactionStore,
        mut draft: NewTransaction,
    ) -> Result<Transaction, CoreError> {
        if !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(CoreError::Validation(
                "amount must be greater than zero".into(),
            ));
        }
        let text = draft.text.trim();
        if text.is_empty() {
            return Err(CoreError::Validation("text must not be empty".into()));
        }
        draft.text = text.to_string();
        draft.category = draft.category.trim().to_string();

        let stored = store.insert_transaction(draft)?;
        info!(
            id = stored.id,
            kind = %stored.kind,
            amount = stored.amount,
            date = %stored.date,
            "transaction added"
        );
        Ok(stored)
    }

    /// Transactions dated inside `period`, newest first.
    pub fn in_period(transactions: &[Transaction], period: &PayPeriod) -> Vec<Transaction> {
        let mut rows: Vec<Transaction> = transactions
            .iter()
            .filter(|txn| period.contains(txn.date))
            .cloned()
            .collect();
        rows.sort_by_key(|txn| Reverse((txn.date, txn.id)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::storage::InMemoryStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_assigns_increasing_ids_and_trims_text() {
        let store = InMemoryStore::new();
        let first =
            TransactionService::add(&store, NewTransaction::spend(date(2024, 1, 3), "  Netto ", 89.5))
                .unwrap();
        let second =
            TransactionService::add(&store, NewTransaction::topup(date(2024, 1, 4), "Mum", 200.0))
                .unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.text, "Netto");
        assert_eq!(second.id, 2);
        assert_eq!(store.load_transactions().unwrap().len(), 2);
    }

    #[test]
    fn add_rejects_zero_amount_and_blank_text() {
        let store = InMemoryStore::new();
        let zero = TransactionService::add(&store, NewTransaction::spend(date(2024, 1, 3), "Netto", 0.0));
        assert!(matches!(zero, Err(CoreError::Validation(_))));
        let blank = TransactionService::add(&store, NewTransaction::spend(date(2024, 1, 3), "   ", 10.0));
        assert!(matches!(blank, Err(CoreError::Validation(_))));
        assert!(store.load_transactions().unwrap().is_empty());
    }

    #[test]
    fn in_period_filters_and_sorts_newest_first() {
        let period = PayPeriod::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let rows = vec![
            Transaction::from_draft(1, NewTransaction::spend(date(2024, 1, 5), "a", 1.0)),
            Transaction::from_draft(2, NewTransaction::spend(date(2024, 2, 1), "b", 1.0)),
            Transaction::from_draft(3, NewTransaction::spend(date(2024, 1, 20), "c", 1.0)),
            Transaction::from_draft(4, NewTransaction::spend(date(2024, 1, 5), "d", 1.0)),
        ];
        let ids: Vec<u64> = TransactionService::in_period(&rows, &period)
            .iter()
            .map(|txn| txn.id)
            .collect();
        assert_eq!(ids, vec![3, 4, 1]);
    }
}
