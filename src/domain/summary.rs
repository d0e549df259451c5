use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::MonthKey;

/// Aggregate figures derived from the full ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Totals {
    pub fn new(income: Decimal, expense: Decimal) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    /// Balance as a percentage of income. `None` when there is no income.
    pub fn savings_rate(&self) -> Option<Decimal> {
        if self.income.is_zero() {
            return None;
        }
        self.balance
            .checked_div(self.income)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }
}

/// Expense total attributed to one category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryShare {
    pub category: String,
    pub value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Income and expense totals for one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyEntry {
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
}

impl MonthlyEntry {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        }
    }

    pub fn net(&self) -> Decimal {
        self.income - self.expense
    }
}

/// Read-only dashboard view. Always recomputed from scratch, never patched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DashboardSummary {
    pub totals: Totals,
    pub category_breakdown: Vec<CategoryShare>,
    pub monthly_series: Vec<MonthlyEntry>,
}

impl DashboardSummary {
    pub fn month(&self, key: MonthKey) -> Option<&MonthlyEntry> {
        self.monthly_series.iter().find(|entry| entry.month == key)
    }
}

/// Side-by-side figures for a reference month and the month before it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthComparison {
    pub previous: MonthlyEntry,
    pub current: MonthlyEntry,
}
