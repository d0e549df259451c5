use serde::{Deserialize, Serialize};

use crate::core::errors::{FieldError, ValidationError};
use crate::domain::common::normalize_name;
use crate::domain::{Category, CategoryId, NewCategory, TransactionKind};

/// Valid category labels, each scoped to income or expense.
///
/// Names are unique within a kind; the same name may exist once per kind
/// (an `Other` income and an `Other` expense category are distinct).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a store load, rejecting duplicates and empty names.
    pub fn from_categories(
        categories: impl IntoIterator<Item = Category>,
    ) -> Result<Self, ValidationError> {
        let mut catalog = Self::new();
        let mut faults = Vec::new();
        for category in categories {
            if let Err(err) = catalog.insert(category) {
                faults.extend(err.fields);
            }
        }
        ValidationError::check(faults)?;
        Ok(catalog)
    }

    pub fn insert(&mut self, category: Category) -> Result<CategoryId, ValidationError> {
        self.check_new(&category.name, category.kind)?;
        let id = category.id;
        self.categories.push(category);
        Ok(id)
    }

    /// Validates a candidate category before it is sent to the store.
    pub fn validate(&self, candidate: &NewCategory) -> Result<(), ValidationError> {
        self.check_new(&candidate.name, candidate.kind)
    }

    pub fn list_by_type(&self, kind: TransactionKind) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|category| category.kind == kind)
            .collect()
    }

    pub fn exists(&self, name: &str, kind: TransactionKind) -> bool {
        self.find(name, kind).is_some()
    }

    pub fn find(&self, name: &str, kind: TransactionKind) -> Option<&Category> {
        let normalized = normalize_name(name);
        self.categories
            .iter()
            .find(|category| category.kind == kind && normalize_name(&category.name) == normalized)
    }

    /// Checks that `name` can be assigned to a transaction of `kind`.
    pub fn check_assignment(&self, name: &str, kind: TransactionKind) -> Option<FieldError> {
        if self.exists(name, kind) {
            return None;
        }
        let other = kind.opposite();
        if self.exists(name, other) {
            Some(FieldError::CategoryTypeMismatch {
                name: name.to_string(),
                expected: kind,
                actual: other,
            })
        } else {
            Some(FieldError::UnknownCategory {
                name: name.to_string(),
            })
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    fn check_new(&self, name: &str, kind: TransactionKind) -> Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::single(FieldError::EmptyCategoryName));
        }
        if self.exists(name, kind) {
            return Err(ValidationError::single(FieldError::DuplicateCategory {
                name: name.trim().to_string(),
                kind,
            }));
        }
        Ok(())
    }
}
