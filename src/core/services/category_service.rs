use crate::domain::{Category, NewCategory, TransactionKind};
use crate::ledger::CategoryCatalog;

/// Starter categories offered to a fresh catalog, with their chart colours.
pub const DEFAULT_CATEGORIES: &[(&str, TransactionKind, &str)] = &[
    ("Work", TransactionKind::Income, "#10B981"),
    ("Investments", TransactionKind::Income, "#3B82F6"),
    ("Sales", TransactionKind::Income, "#8B5CF6"),
    ("Other", TransactionKind::Income, "#6B7280"),
    ("Housing", TransactionKind::Expense, "#EF4444"),
    ("Food", TransactionKind::Expense, "#F59E0B"),
    ("Transport", TransactionKind::Expense, "#06B6D4"),
    ("Health", TransactionKind::Expense, "#EC4899"),
    ("Education", TransactionKind::Expense, "#8B5CF6"),
    ("Leisure", TransactionKind::Expense, "#10B981"),
    ("Clothing", TransactionKind::Expense, "#F97316"),
    ("Other", TransactionKind::Expense, "#6B7280"),
];

/// Colour given to categories created without one.
pub const DEFAULT_COLOR: &str = "#10B981";

pub struct CategoryService;

impl CategoryService {
    pub fn list(catalog: &CategoryCatalog, kind: Option<TransactionKind>) -> Vec<&Category> {
        match kind {
            Some(kind) => catalog.list_by_type(kind),
            None => catalog.iter().collect(),
        }
    }

    /// Normalizes a candidate: trims the name and fills in the default colour.
    pub fn prepare(mut candidate: NewCategory) -> NewCategory {
        candidate.name = candidate.name.trim().to_string();
        if candidate.color.is_none() {
            candidate.color = Some(DEFAULT_COLOR.to_string());
        }
        candidate
    }

    /// Default categories not yet present in `catalog`, in declaration order.
    pub fn missing_defaults(catalog: &CategoryCatalog) -> Vec<NewCategory> {
        DEFAULT_CATEGORIES
            .iter()
            .filter(|(name, kind, _)| !catalog.exists(name, *kind))
            .map(|(name, kind, color)| NewCategory::new(*name, *kind).with_color(*color))
            .collect()
    }
}
