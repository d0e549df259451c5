mod common;

use std::fs;
use std::sync::Arc;

use common::{candidate, date, dec, temp_dir};
use fintrack_core::{
    core::errors::StorageError,
    domain::{Category, NewCategory, TransactionKind},
    storage::{JsonStorage, LedgerStore, StoreDocument},
    LedgerError, MutationPipeline,
};

#[test]
fn pipeline_state_survives_reload_from_json() {
    let path = temp_dir().join("ledger.json");
    {
        let pipeline = MutationPipeline::load(Arc::new(JsonStorage::new(&path).unwrap())).unwrap();
        pipeline
            .add_category(NewCategory::new("Salary", TransactionKind::Income))
            .unwrap();
        pipeline
            .add_category(NewCategory::new("Rent", TransactionKind::Expense).with_color("#EF4444"))
            .unwrap();
        pipeline
            .submit(candidate(TransactionKind::Income, 3000, "Salary", date(2024, 1, 5)))
            .unwrap();
        pipeline
            .submit(candidate(TransactionKind::Expense, 1200, "Rent", date(2024, 1, 10)))
            .unwrap();
    }

    let reloaded = MutationPipeline::load(Arc::new(JsonStorage::new(&path).unwrap())).unwrap();
    let snapshot = reloaded.snapshot();
    assert_eq!(snapshot.catalog.len(), 2);
    assert_eq!(snapshot.ledger.len(), 2);
    assert_eq!(snapshot.summary.totals.balance, dec(1800));
    assert_eq!(
        snapshot.summary.category_breakdown[0].color.as_deref(),
        Some("#EF4444")
    );
}

#[test]
fn rejected_submission_leaves_store_file_untouched() {
    let path = temp_dir().join("ledger.json");
    let storage = JsonStorage::new(&path).unwrap();
    storage
        .create_category(&NewCategory::new("Food", TransactionKind::Expense))
        .unwrap();
    let original = fs::read_to_string(&path).unwrap();

    let pipeline = MutationPipeline::load(Arc::new(storage)).unwrap();
    pipeline
        .submit(candidate(TransactionKind::Expense, 0, "Food", date(2024, 1, 1)))
        .expect_err("zero amount");
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn corrupt_store_fails_the_load() {
    let path = temp_dir().join("ledger.json");
    fs::write(&path, "{ not json").unwrap();
    let err = MutationPipeline::load(Arc::new(JsonStorage::new(&path).unwrap()))
        .err()
        .expect("load must fail");
    assert!(matches!(err, LedgerError::Load(StorageError::Serde(_))));
}

#[test]
fn duplicate_categories_in_store_fail_the_load() {
    let path = temp_dir().join("ledger.json");
    let document = StoreDocument {
        categories: vec![
            Category::new("Food", TransactionKind::Expense),
            Category::new("food", TransactionKind::Expense),
        ],
        ..StoreDocument::default()
    };
    fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();
    let err = MutationPipeline::load(Arc::new(JsonStorage::new(&path).unwrap()))
        .err()
        .expect("load must fail");
    assert!(matches!(err, LedgerError::Load(StorageError::Rejected(_))));
}

#[test]
fn loaded_history_with_retired_category_is_kept() {
    let path = temp_dir().join("ledger.json");
    let storage = JsonStorage::new(&path).unwrap();
    storage
        .create_category(&NewCategory::new("Food", TransactionKind::Expense))
        .unwrap();
    storage
        .create_transaction(&candidate(TransactionKind::Expense, 40, "Food", date(2024, 2, 1)))
        .unwrap();
    storage
        .create_transaction(&candidate(TransactionKind::Expense, 60, "Travel", date(2024, 2, 2)))
        .unwrap();

    let pipeline = MutationPipeline::load(Arc::new(storage)).unwrap();
    let summary = pipeline.summary();
    assert_eq!(pipeline.snapshot().ledger.len(), 2);
    assert_eq!(summary.totals.expense, dec(100));
    assert_eq!(summary.category_breakdown.len(), 1);
    assert_eq!(summary.category_breakdown[0].value, dec(40));
}
