use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard,
};

use uuid::Uuid;

use crate::core::errors::StorageError;
use crate::domain::{Category, CategoryId, NewCategory, NewTransaction, Transaction, TransactionId};

use super::{LedgerStore, Result};

#[derive(Debug, Default)]
struct MemoryState {
    categories: Vec<Category>,
    transactions: Vec<Transaction>,
    remaining_creates: Option<usize>,
}

impl MemoryState {
    fn take_create(&mut self, operation: &str) -> Result<()> {
        match self.remaining_creates.as_mut() {
            Some(0) => Err(StorageError::Unavailable(format!("{operation} failed"))),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// In-process store. Loads and creates can be switched to fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
    fail_loads: AtomicBool,
    fail_creates: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories(self, categories: impl IntoIterator<Item = Category>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.categories.extend(categories);
        }
        self
    }

    pub fn with_transactions(self, transactions: impl IntoIterator<Item = Transaction>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.transactions.extend(transactions);
        }
        self
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    /// Lets the next `count` creates through, then fails every later one.
    pub fn fail_creates_after(&self, count: usize) {
        if let Ok(mut state) = self.state.lock() {
            state.remaining_creates = Some(count);
        }
    }

    pub fn stored_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.lock()?.transactions.clone())
    }

    pub fn stored_categories(&self) -> Result<Vec<Category>> {
        Ok(self.lock()?.categories.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".into()))
    }

    fn check(flag: &AtomicBool, operation: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(StorageError::Unavailable(format!("{operation} failed")))
        } else {
            Ok(())
        }
    }
}

impl LedgerStore for MemoryStorage {
    fn load_categories(&self) -> Result<Vec<Category>> {
        Self::check(&self.fail_loads, "load categories")?;
        self.stored_categories()
    }

    fn load_transactions(&self) -> Result<Vec<Transaction>> {
        Self::check(&self.fail_loads, "load transactions")?;
        self.stored_transactions()
    }

    fn create_transaction(&self, candidate: &NewTransaction) -> Result<TransactionId> {
        Self::check(&self.fail_creates, "create transaction")?;
        let mut state = self.lock()?;
        state.take_create("create transaction")?;
        let id = Uuid::new_v4();
        state.transactions.push(candidate.clone().into_transaction(id));
        Ok(id)
    }

    fn create_category(&self, candidate: &NewCategory) -> Result<CategoryId> {
        Self::check(&self.fail_creates, "create category")?;
        let mut state = self.lock()?;
        state.take_create("create category")?;
        let id = Uuid::new_v4();
        state.categories.push(candidate.clone().into_category(id));
        Ok(id)
    }
}
