pub mod json_backend;
pub mod memory;

use crate::core::errors::StorageError;
use crate::domain::{Category, CategoryId, NewCategory, NewTransaction, Transaction, TransactionId};

pub type Result<T> = std::result::Result<T, StorageError>;

/// Contract of the external store backing the engine.
///
/// Loads happen once at startup; creates assign the identifier the engine
/// records the new entity under.
pub trait LedgerStore: Send + Sync {
    fn load_categories(&self) -> Result<Vec<Category>>;
    fn load_transactions(&self) -> Result<Vec<Transaction>>;
    fn create_transaction(&self, candidate: &NewTransaction) -> Result<TransactionId>;
    fn create_category(&self, candidate: &NewCategory) -> Result<CategoryId>;
}

pub use json_backend::{JsonStorage, StoreDocument, CURRENT_SCHEMA_VERSION};
pub use memory::MemoryStorage;
