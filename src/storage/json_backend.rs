use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::{
    core::errors::StorageError,
    domain::{Category, CategoryId, NewCategory, NewTransaction, Transaction, TransactionId},
    utils::ensure_dir,
};

use super::{LedgerStore, Result};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;
const TMP_SUFFIX: &str = "tmp";

/// On-disk layout of a JSON store file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreDocument {
    #[serde(default = "StoreDocument::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl StoreDocument {
    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            categories: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

/// Single-file JSON store. A missing file reads as an empty store.
pub struct JsonStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_document(&self) -> Result<StoreDocument> {
        load_document_from_path(&self.path)
    }

    fn update<T>(&self, apply: impl FnOnce(&mut StoreDocument) -> T) -> Result<T> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("store lock poisoned".into()))?;
        let mut document = self.read_document()?;
        let outcome = apply(&mut document);
        save_document_to_path(&document, &self.path)?;
        Ok(outcome)
    }
}

impl LedgerStore for JsonStorage {
    fn load_categories(&self) -> Result<Vec<Category>> {
        Ok(self.read_document()?.categories)
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.read_document()?.transactions)
    }

    fn create_transaction(&self, candidate: &NewTransaction) -> Result<TransactionId> {
        let id = Uuid::new_v4();
        self.update(|document| {
            document
                .transactions
                .push(candidate.clone().into_transaction(id));
        })?;
        debug!(%id, path = %self.path.display(), "transaction written to json store");
        Ok(id)
    }

    fn create_category(&self, candidate: &NewCategory) -> Result<CategoryId> {
        let id = Uuid::new_v4();
        self.update(|document| {
            document.categories.push(candidate.clone().into_category(id));
        })?;
        debug!(%id, name = %candidate.name, "category written to json store");
        Ok(id)
    }
}

/// Writes the document by staging to a sibling temp file and renaming it over the target.
pub fn save_document_to_path(document: &StoreDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_document_from_path(path: &Path) -> Result<StoreDocument> {
    if !path.exists() {
        return Ok(StoreDocument::default());
    }
    let data = fs::read_to_string(path)?;
    let document: StoreDocument = serde_json::from_str(&data)?;
    if document.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(StorageError::Rejected(format!(
            "store `{}` uses schema version {}, newest supported is {}",
            path.display(),
            document.schema_version,
            CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(document)
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

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let storage = JsonStorage::new(dir.path().join("store.json")).unwrap();
        assert!(storage.load_categories().unwrap().is_empty());
        assert!(storage.load_transactions().unwrap().is_empty());
    }

    #[test]
    fn created_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");
        let storage = JsonStorage::new(&path).unwrap();
        let category_id = storage
            .create_category(&NewCategory::new("Rent", TransactionKind::Expense))
            .unwrap();
        let candidate = NewTransaction::new(
            TransactionKind::Expense,
            Decimal::new(120050, 2),
            "April rent",
            "Rent",
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
        );
        let txn_id = storage.create_transaction(&candidate).unwrap();

        let reopened = JsonStorage::new(&path).unwrap();
        let categories = reopened.load_categories().unwrap();
        let transactions = reopened.load_transactions().unwrap();
        assert_eq!(categories[0].id, category_id);
        assert_eq!(transactions[0].id, txn_id);
        assert_eq!(transactions[0].amount, Decimal::new(120050, 2));
        assert!(!tmp_path(&path).exists());
    }

    #[test]
    fn newer_schema_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"schema_version": 9, "categories": [], "transactions": []}"#).unwrap();
        let storage = JsonStorage::new(&path).unwrap();
        assert!(matches!(
            storage.load_categories(),
            Err(StorageError::Rejected(_))
        ));
    }

    #[test]
    fn legacy_type_names_and_numeric_amounts_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let id = Uuid::new_v4();
        fs::write(
            &path,
            format!(
                r#"{{"transactions": [{{"id": "{id}", "type": "despesa", "amount": 42.5,
                "description": "Lunch", "category": "Food", "date": "2024-01-03"}}]}}"#
            ),
        )
        .unwrap();
        let storage = JsonStorage::new(&path).unwrap();
        let transactions = storage.load_transactions().unwrap();
        assert_eq!(transactions[0].kind, TransactionKind::Expense);
        assert_eq!(transactions[0].amount, Decimal::new(425, 1));
    }
}
