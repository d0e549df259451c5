//! In-memory ledger state: the category catalog and the transaction history.

pub mod catalog;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use catalog::CategoryCatalog;
pub use ledger::{validate_candidate, Ledger};
