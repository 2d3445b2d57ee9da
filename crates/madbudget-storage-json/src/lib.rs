//! madbudget-storage-json
//!
//! Filesystem-backed JSON persistence for transactions and budget settings.

use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use madbudget_core::{next_transaction_id, CoreError, SettingsStore, TransactionStore};
use madbudget_domain::{NewTransaction, Transaction};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

const TRANSACTIONS_FILE: &str = "transactions.json";
const SETTINGS_FILE: &str = "settings.json";
const TMP_SUFFIX: &str = "tmp";

/// Locations of the files backing a [`JsonStore`].
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub transactions: PathBuf,
    pub settings: PathBuf,
}

impl StoragePaths {
    pub fn in_dir(root: &Path) -> Self {
        Self {
            transactions: root.join(TRANSACTIONS_FILE),
            settings: root.join(SETTINGS_FILE),
        }
    }
}

/// Append-only transaction log plus a key/value settings map, each kept in one JSON file.
#[derive(Debug)]
pub struct JsonStore {
    paths: StoragePaths,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Self::with_paths(StoragePaths::in_dir(&root))
    }

    pub fn with_paths(paths: StoragePaths) -> Result<Self, CoreError> {
        for path in [&paths.transactions, &paths.settings] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            paths,
            write_lock: Mutex::new(()),
        })
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    fn read_settings(&self) -> Result<BTreeMap<String, String>, CoreError> {
        Ok(read_json(&self.paths.settings)?.unwrap_or_default())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, CoreError> {
        self.write_lock
            .lock()
            .map_err(|_| CoreError::Storage("json store lock poisoned".into()))
    }
}

impl TransactionStore for JsonStore {
    fn load_transactions(&self) -> Result<Vec<Transaction>, CoreError> {
        Ok(read_json(&self.paths.transactions)?.unwrap_or_default())
    }

    fn insert_transaction(&self, draft: NewTransaction) -> Result<Transaction, CoreError> {
        let _guard = self.lock()?;
        let mut transactions = self.load_transactions()?;
        let txn = Transaction::from_draft(next_transaction_id(&transactions), draft);
        transactions.push(txn.clone());
        write_json(&self.paths.transactions, &transactions)?;
        debug!(id = txn.id, path = %self.paths.transactions.display(), "appended transaction");
        Ok(txn)
    }
}

impl SettingsStore for JsonStore {
    fn load_setting(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.read_settings()?.get(key).cloned())
    }

    fn save_setting(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let _guard = self.lock()?;
        let mut settings = self.read_settings()?;
        if settings.get(key).map(String::as_str) == Some(value) {
            return Ok(());
        }
        settings.insert(key.to_string(), value.to_string());
        write_json(&self.paths.settings, &settings)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|err| CoreError::Serde(format!("{}: {}", path.display(), err)))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CoreError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
