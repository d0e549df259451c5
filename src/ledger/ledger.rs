use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::core::errors::{FieldError, ValidationError};
use crate::domain::{NewTransaction, Transaction, TransactionId, TransactionKind};

use super::catalog::CategoryCatalog;

/// Authoritative, insertion-ordered history of recorded transactions.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    ids: HashSet<TransactionId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-populates the ledger from a store load.
    ///
    /// Records that break the field or category invariants are kept and
    /// reported back as warnings. A record whose id was already restored is
    /// skipped with a warning; the first occurrence wins.
    pub fn restore(
        catalog: &CategoryCatalog,
        transactions: impl IntoIterator<Item = Transaction>,
    ) -> (Self, Vec<String>) {
        let mut ledger = Self::new();
        let mut warnings = Vec::new();
        for txn in transactions {
            if ledger.ids.contains(&txn.id) {
                warnings.push(format!("transaction {} appears more than once; skipped", txn.id));
                continue;
            }
            for fault in field_faults(catalog, txn.kind, txn.amount, &txn.description, &txn.category)
            {
                warnings.push(format!("transaction {}: {}", txn.id, fault));
            }
            ledger.push(txn);
        }
        (ledger, warnings)
    }

    /// Validates and appends a transaction carrying a store-assigned id.
    ///
    /// On error the ledger is left untouched.
    pub fn add(
        &mut self,
        catalog: &CategoryCatalog,
        transaction: Transaction,
    ) -> Result<TransactionId, ValidationError> {
        let mut faults = field_faults(
            catalog,
            transaction.kind,
            transaction.amount,
            &transaction.description,
            &transaction.category,
        );
        if self.ids.contains(&transaction.id) {
            faults.push(FieldError::DuplicateId(transaction.id));
        }
        ValidationError::check(faults)?;
        let id = transaction.id;
        self.push(transaction);
        Ok(id)
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The `n` most recently added transactions, newest first.
    pub fn recent(&self, n: usize) -> Vec<&Transaction> {
        self.transactions.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn push(&mut self, transaction: Transaction) {
        self.ids.insert(transaction.id);
        self.transactions.push(transaction);
    }
}

/// Checks a candidate against the field constraints and the catalog.
pub fn validate_candidate(
    catalog: &CategoryCatalog,
    candidate: &NewTransaction,
) -> Result<(), ValidationError> {
    ValidationError::check(field_faults(
        catalog,
        candidate.kind,
        candidate.amount,
        &candidate.description,
        &candidate.category,
    ))
}

fn field_faults(
    catalog: &CategoryCatalog,
    kind: TransactionKind,
    amount: Decimal,
    description: &str,
    category: &str,
) -> Vec<FieldError> {
    let mut faults = Vec::new();
    if amount <= Decimal::ZERO {
        faults.push(FieldError::NonPositiveAmount);
    }
    if description.trim().is_empty() {
        faults.push(FieldError::EmptyDescription);
    }
    if let Some(fault) = catalog.check_assignment(category, kind) {
        faults.push(fault);
    }
    faults
}
