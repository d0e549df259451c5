use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;

use crate::domain::{
    CategoryId, CategoryShare, DashboardSummary, MonthComparison, MonthKey, MonthlyEntry, Totals,
    Transaction, TransactionKind,
};
use crate::ledger::{CategoryCatalog, Ledger};

/// Folds ledger contents into dashboard aggregates.
///
/// Every function here is pure: output depends only on the arguments.
pub struct SummaryService;

impl SummaryService {
    pub fn summarize(transactions: &[Transaction], catalog: &CategoryCatalog) -> DashboardSummary {
        DashboardSummary {
            totals: Self::totals(transactions),
            category_breakdown: Self::category_breakdown(transactions, catalog),
            monthly_series: Self::monthly_series(transactions),
        }
    }

    pub fn totals(transactions: &[Transaction]) -> Totals {
        let (income, expense) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, expense), txn| match txn.kind {
                TransactionKind::Income => (income + txn.amount, expense),
                TransactionKind::Expense => (income, expense + txn.amount),
            },
        );
        Totals::new(income, expense)
    }

    /// Expense totals per category, in order of first appearance.
    ///
    /// Expenses whose category is not a known expense category are left out,
    /// so for restored history the shares may sum to less than
    /// `totals.expense`.
    pub fn category_breakdown(
        transactions: &[Transaction],
        catalog: &CategoryCatalog,
    ) -> Vec<CategoryShare> {
        let mut shares: Vec<CategoryShare> = Vec::new();
        let mut positions: HashMap<CategoryId, usize> = HashMap::new();
        for txn in transactions.iter().filter(|txn| txn.is_expense()) {
            let Some(category) = catalog.find(&txn.category, TransactionKind::Expense) else {
                continue;
            };
            match positions.get(&category.id) {
                Some(&index) => shares[index].value += txn.amount,
                None => {
                    positions.insert(category.id, shares.len());
                    shares.push(CategoryShare {
                        category: category.name.clone(),
                        value: txn.amount,
                        color: category.color.clone(),
                    });
                }
            }
        }
        shares
    }

    /// One entry per calendar month present, ascending.
    pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyEntry> {
        let mut buckets: BTreeMap<MonthKey, MonthlyEntry> = BTreeMap::new();
        for txn in transactions {
            let month = txn.month();
            let entry = buckets
                .entry(month)
                .or_insert_with(|| MonthlyEntry::empty(month));
            match txn.kind {
                TransactionKind::Income => entry.income += txn.amount,
                TransactionKind::Expense => entry.expense += txn.amount,
            }
        }
        buckets.into_values().collect()
    }

    /// Figures for `reference` and the month before it; absent months read as zero.
    pub fn month_comparison(summary: &DashboardSummary, reference: MonthKey) -> MonthComparison {
        let lookup = |key: MonthKey| {
            summary
                .month(key)
                .cloned()
                .unwrap_or_else(|| MonthlyEntry::empty(key))
        };
        MonthComparison {
            previous: lookup(reference.previous()),
            current: lookup(reference),
        }
    }

    pub fn recent(ledger: &Ledger, n: usize) -> Vec<&Transaction> {
        ledger.recent(n)
    }
}
