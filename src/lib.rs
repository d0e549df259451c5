#![doc(test(attr(deny(warnings))))]

//! Fintrack Core holds the ledger of income and expense transactions, keeps
//! its categories consistent, and derives the dashboard summary from it.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod ledger;
pub mod storage;
pub mod utils;

pub use crate::core::{LedgerError, MutationPipeline, Snapshot};
pub use crate::domain::{DashboardSummary, NewTransaction, TransactionKind};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fintrack Core tracing initialized.");
    });
}
