#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use fintrack_core::{
    domain::{Category, NewTransaction, TransactionKind},
    storage::MemoryStorage,
    MutationPipeline,
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn scenario_categories() -> Vec<Category> {
    vec![
        Category::new("Salary", TransactionKind::Income),
        Category::new("Rent", TransactionKind::Expense),
        Category::new("Food", TransactionKind::Expense),
    ]
}

/// Memory store seeded with the Salary/Rent/Food catalog, plus a loaded pipeline over it.
pub fn scenario_pipeline() -> (Arc<MemoryStorage>, MutationPipeline) {
    let store = Arc::new(MemoryStorage::new().with_categories(scenario_categories()));
    let pipeline = MutationPipeline::load(store.clone()).expect("load memory store");
    (store, pipeline)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn dec(value: i64) -> Decimal {
    Decimal::new(value, 0)
}

pub fn candidate(
    kind: TransactionKind,
    amount: i64,
    category: &str,
    on: NaiveDate,
) -> NewTransaction {
    NewTransaction::new(kind, dec(amount), category, category, on)
}
