//! The single write path into the ledger.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::core::errors::{LedgerError, Result, StorageError};
use crate::core::services::{CategoryService, SummaryService};
use crate::domain::{
    CategoryId, DashboardSummary, MonthComparison, MonthKey, NewCategory, NewTransaction,
    Transaction,
};
use crate::ledger::{validate_candidate, CategoryCatalog, Ledger};
use crate::storage::LedgerStore;

/// Immutable, mutually consistent view of catalog, ledger and summary.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub catalog: Arc<CategoryCatalog>,
    pub ledger: Ledger,
    pub summary: DashboardSummary,
}

impl Snapshot {
    fn build(catalog: Arc<CategoryCatalog>, ledger: Ledger) -> Self {
        let summary = SummaryService::summarize(ledger.all(), &catalog);
        Self {
            catalog,
            ledger,
            summary,
        }
    }
}

/// Validates, persists and applies mutations, then republishes the snapshot.
///
/// Writers are serialized by `writer`; readers only touch `current` long
/// enough to clone the published `Arc`.
pub struct MutationPipeline {
    store: Arc<dyn LedgerStore>,
    writer: Mutex<()>,
    current: RwLock<Arc<Snapshot>>,
}

impl MutationPipeline {
    /// Loads categories and transactions from `store`.
    ///
    /// A pipeline only exists once both loads succeeded.
    pub fn load(store: Arc<dyn LedgerStore>) -> Result<Self> {
        let categories = store.load_categories().map_err(LedgerError::Load)?;
        let catalog = CategoryCatalog::from_categories(categories).map_err(|err| {
            LedgerError::Load(StorageError::Rejected(format!("invalid category data: {err}")))
        })?;
        let transactions = store.load_transactions().map_err(LedgerError::Load)?;
        let (ledger, warnings) = Ledger::restore(&catalog, transactions);
        for warning in &warnings {
            warn!("loaded ledger anomaly: {}", warning);
        }
        info!(
            categories = catalog.len(),
            transactions = ledger.len(),
            warnings = warnings.len(),
            "ledger loaded"
        );
        let snapshot = Snapshot::build(Arc::new(catalog), ledger);
        Ok(Self {
            store,
            writer: Mutex::new(()),
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Current published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        // Published snapshots are replaced whole, so a poisoned lock still holds a valid one.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn summary(&self) -> DashboardSummary {
        self.snapshot().summary.clone()
    }

    /// Transactions of the current snapshot in insertion order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.snapshot().ledger.all().to_vec()
    }

    pub fn month_comparison(&self, reference: MonthKey) -> MonthComparison {
        SummaryService::month_comparison(&self.snapshot().summary, reference)
    }

    /// Records a new transaction and returns the recomputed summary.
    ///
    /// Nothing is persisted when validation fails, and the in-memory ledger is
    /// untouched when the store rejects the create.
    pub fn submit(&self, candidate: NewTransaction) -> Result<DashboardSummary> {
        let _writer = self.lock_writer();
        let base = self.snapshot();

        if let Err(err) = validate_candidate(&base.catalog, &candidate) {
            warn!(category = %candidate.category, "transaction rejected: {}", err);
            return Err(err.into());
        }

        let id = self.store.create_transaction(&candidate).map_err(|err| {
            warn!("store failed to create transaction: {}", err);
            LedgerError::Storage(err)
        })?;

        let mut ledger = base.ledger.clone();
        ledger
            .add(&base.catalog, candidate.into_transaction(id))
            .map_err(|err| {
                warn!(%id, "store recorded a transaction the ledger cannot apply: {}", err);
                LedgerError::Storage(StorageError::Rejected(format!(
                    "store already holds transaction {id} but it could not be applied ({err}); \
                     reload instead of resubmitting"
                )))
            })?;

        let snapshot = Snapshot::build(Arc::clone(&base.catalog), ledger);
        let summary = snapshot.summary.clone();
        self.publish(snapshot);
        info!(%id, "transaction recorded");
        debug!(
            income = %summary.totals.income,
            expense = %summary.totals.expense,
            balance = %summary.totals.balance,
            "dashboard recomputed"
        );
        Ok(summary)
    }

    /// Creates a category and republishes the snapshot with it.
    pub fn add_category(&self, candidate: NewCategory) -> Result<CategoryId> {
        let _writer = self.lock_writer();
        let base = self.snapshot();
        let mut catalog = CategoryCatalog::clone(&base.catalog);
        let id = self.persist_category(&mut catalog, CategoryService::prepare(candidate))?;
        self.publish(Snapshot::build(Arc::new(catalog), base.ledger.clone()));
        info!(%id, "category created");
        Ok(id)
    }

    /// Adds the default categories that are missing, returning how many were created.
    ///
    /// Categories created before a store failure stay published.
    pub fn seed_default_categories(&self) -> Result<usize> {
        let _writer = self.lock_writer();
        let base = self.snapshot();
        let mut catalog = CategoryCatalog::clone(&base.catalog);
        let mut created = 0;
        let mut failure = None;
        for candidate in CategoryService::missing_defaults(&catalog) {
            match self.persist_category(&mut catalog, candidate) {
                Ok(_) => created += 1,
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }
        if created > 0 {
            self.publish(Snapshot::build(Arc::new(catalog), base.ledger.clone()));
        }
        info!(created, "default categories seeded");
        match failure {
            Some(err) => Err(err),
            None => Ok(created),
        }
    }

    fn persist_category(
        &self,
        catalog: &mut CategoryCatalog,
        candidate: NewCategory,
    ) -> Result<CategoryId> {
        catalog.validate(&candidate)?;
        let id = self.store.create_category(&candidate).map_err(|err| {
            warn!("store failed to create category: {}", err);
            LedgerError::Storage(err)
        })?;
        catalog.insert(candidate.into_category(id))?;
        Ok(id)
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, snapshot: Snapshot) {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(snapshot);
    }
}
