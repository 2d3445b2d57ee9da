use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock},
};

use madbudget_domain::{NewTransaction, Transaction};

use crate::CoreError;

/// Append-only record store for transactions.
pub trait TransactionStore: Send + Sync {
    /// Returns every stored transaction, in no particular order.
    fn load_transactions(&self) -> Result<Vec<Transaction>, CoreError>;
    /// Stores the draft under a freshly assigned id and returns the stored record.
    fn insert_transaction(&self, draft: NewTransaction) -> Result<Transaction, CoreError>;
}

/// Key/value store holding the budget settings as strings.
pub trait SettingsStore: Send + Sync {
    fn load_setting(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn save_setting(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Next id after the largest one in use, starting at 1.
pub fn next_transaction_id(existing: &[Transaction]) -> u64 {
    existing.iter().map(|txn| txn.id).max().unwrap_or(0) + 1
}

/// Volatile store used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    transactions: RwLock<Vec<Transaction>>,
    settings: RwLock<BTreeMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: RwLock::new(transactions),
            settings: RwLock::default(),
        }
    }
}

fn poisoned<T>(_: PoisonError<T>) -> CoreError {
    CoreError::Storage("in-memory store lock poisoned".into())
}

impl TransactionStore for InMemoryStore {
    fn load_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(self.transactions.read().map_err(poisoned)?.clone())
    }

    fn insert_transaction(&self, draft: NewTransaction) -> Result<Transaction, CoreError> {
        let mut guard = self.transactions.write().map_err(poisoned)?;
        let txn = Transaction::from_draft(next_transaction_id(&guard), draft);
        guard.push(txn.clone());
        Ok(txn)
    }
}

impl SettingsStore for InMemoryStore {
    fn load_setting(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.settings.read().map_err(poisoned)?.get(key).cloned())
    }

    fn save_setting(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.settings
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
