//! Plain data types shared by the ledger, the aggregator and the stores.

pub mod category;
pub mod common;
pub mod summary;
pub mod transaction;

pub use category::{Category, NewCategory};
pub use common::{CategoryId, TransactionId, TransactionKind};
pub use summary::{CategoryShare, DashboardSummary, MonthComparison, MonthlyEntry, Totals};
pub use transaction::{MonthKey, NewTransaction, Transaction};

// Re-export common dependencies so consumers can rely on this module as a façade.
pub use chrono;
pub use rust_decimal;
pub use uuid;
