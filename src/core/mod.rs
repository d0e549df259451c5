pub mod errors;
pub mod pipeline;
pub mod services;

pub use errors::{FieldError, LedgerError, StorageError, ValidationError};
pub use pipeline::{MutationPipeline, Snapshot};
