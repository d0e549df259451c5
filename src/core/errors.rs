use std::{fmt, result::Result as StdResult};

use thiserror::Error;

use crate::domain::{TransactionId, TransactionKind};

/// A single rejected field of a candidate transaction or category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    NonPositiveAmount,
    EmptyDescription,
    UnknownCategory {
        name: String,
    },
    CategoryTypeMismatch {
        name: String,
        expected: TransactionKind,
        actual: TransactionKind,
    },
    EmptyCategoryName,
    DuplicateCategory {
        name: String,
        kind: TransactionKind,
    },
    DuplicateId(TransactionId),
}

impl FieldError {
    /// Name of the offending field as exposed to callers.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::NonPositiveAmount => "amount",
            FieldError::EmptyDescription => "description",
            FieldError::UnknownCategory { .. } | FieldError::CategoryTypeMismatch { .. } => {
                "category"
            }
            FieldError::EmptyCategoryName | FieldError::DuplicateCategory { .. } => "name",
            FieldError::DuplicateId(_) => "id",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NonPositiveAmount => f.write_str("amount must be greater than zero"),
            FieldError::EmptyDescription => f.write_str("description must not be empty"),
            FieldError::UnknownCategory { name } => write!(f, "category `{name}` does not exist"),
            FieldError::CategoryTypeMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "category `{name}` is an {actual} category, expected {expected}"
            ),
            FieldError::EmptyCategoryName => f.write_str("category name must not be empty"),
            FieldError::DuplicateCategory { name, kind } => {
                write!(f, "{kind} category `{name}` already exists")
            }
            FieldError::DuplicateId(id) => write!(f, "transaction {id} is already recorded"),
        }
    }
}

/// Rejection of a candidate, listing every field at fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }

    pub fn single(field: FieldError) -> Self {
        Self::new(vec![field])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|error| error.field() == field)
    }

    /// Collects the accumulated field errors, `Ok` when there are none.
    pub(crate) fn check(fields: Vec<FieldError>) -> StdResult<(), ValidationError> {
        if fields.is_empty() {
            Ok(())
        } else {
            Err(Self::new(fields))
        }
    }
}

fn join_messages(fields: &[FieldError]) -> String {
    let messages: Vec<String> = fields.iter().map(ToString::to_string).collect();
    messages.join("; ")
}

/// Failures reported by a [`crate::storage::LedgerStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Store rejected the request: {0}")]
    Rejected(String),
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Unified error type for the engine.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid input: {0}")]
    Validation(ValidationError),
    #[error("Category not found: {0}")]
    NotFound(String),
    #[error("Persistence error: {0}")]
    Storage(#[source] StorageError),
    #[error("Initial load failed: {0}")]
    Load(#[source] StorageError),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LedgerError {
    /// Maps a rejected candidate, reporting a lone unknown category as `NotFound`.
    pub fn from_validation(err: ValidationError) -> Self {
        match err.fields.as_slice() {
            [FieldError::UnknownCategory { name }] => LedgerError::NotFound(name.clone()),
            _ => LedgerError::Validation(err),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_) | LedgerError::NotFound(_))
    }
}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::from_validation(err)
    }
}

pub type Result<T> = StdResult<T, LedgerError>;
