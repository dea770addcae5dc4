//! Personal finance analysis
//!
//! Income and expense totals, per-category summaries and the series behind
//! the personal finance charts.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{EntryKind, FinanceEntry, Money};

/// Sum of entries for one (category, kind) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub kind: EntryKind,
    pub amount: Money,
}

/// Net cash flow of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFlow {
    pub category: String,
    pub amount: Money,
}

/// Running balance after an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub amount: Money,
    pub balance: Money,
}

/// Result of a personal finance analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalFinanceAnalysis {
    pub total_income: Money,
    /// Absolute value of all outflows
    pub total_expenses: Money,
    pub net_savings: Money,
    /// Sorted by category, then kind
    pub category_summary: Vec<CategorySummary>,
    /// Sorted ascending by amount (largest outflow first)
    pub cash_flow_by_category: Vec<CategoryFlow>,
    /// Entries in date order with a cumulative balance
    pub balance_trend: Vec<BalancePoint>,
}

impl PersonalFinanceAnalysis {
    /// Share of income and expenses in the combined flow, in percent
    pub fn income_expense_split(&self) -> (f64, f64) {
        let total = self.total_income + self.total_expenses;
        match (
            self.total_income.ratio(total),
            self.total_expenses.ratio(total),
        ) {
            (Some(income), Some(expenses)) => (income * 100.0, expenses * 100.0),
            _ => (0.0, 0.0),
        }
    }

    /// Savings as a share of income, `None` without income
    pub fn savings_rate(&self) -> Option<f64> {
        self.net_savings.ratio(self.total_income).map(|r| r * 100.0)
    }
}

/// Analyze income and expense entries
pub fn analyze_personal_finance(entries: &[FinanceEntry]) -> PersonalFinanceAnalysis {
    let total_income: Money = entries
        .iter()
        .filter(|e| e.amount.is_positive())
        .map(|e| e.amount)
        .sum();
    let total_expenses = entries
        .iter()
        .filter(|e| e.amount.is_negative())
        .map(|e| e.amount)
        .sum::<Money>()
        .abs();

    let mut by_category_kind: BTreeMap<(String, EntryKind), Money> = BTreeMap::new();
    let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
    for entry in entries {
        *by_category_kind
            .entry((entry.category.clone(), entry.kind()))
            .or_default() += entry.amount;
        *by_category.entry(entry.category.clone()).or_default() += entry.amount;
    }

    let category_summary = by_category_kind
        .into_iter()
        .map(|((category, kind), amount)| CategorySummary {
            category,
            kind,
            amount,
        })
        .collect();

    let mut cash_flow_by_category: Vec<CategoryFlow> = by_category
        .into_iter()
        .map(|(category, amount)| CategoryFlow { category, amount })
        .collect();
    cash_flow_by_category.sort_by(|a, b| a.amount.cmp(&b.amount));

    let mut ordered: Vec<&FinanceEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| e.date);
    let mut balance = Money::zero();
    let balance_trend = ordered
        .into_iter()
        .map(|e| {
            balance += e.amount;
            BalancePoint {
                date: e.date,
                amount: e.amount,
                balance,
            }
        })
        .collect();

    PersonalFinanceAnalysis {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
        category_summary,
        cash_flow_by_category,
        balance_trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: &str, cents: i64, day: u32) -> FinanceEntry {
        FinanceEntry::new(
            category,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        )
    }

    #[test]
    fn test_totals() {
        let analysis = analyze_personal_finance(&[
            entry("Salary", 500_000, 1),
            entry("Rent", -180_000, 2),
            entry("Groceries", -42_075, 5),
            entry("Refund", 0, 6),
        ]);

        assert_eq!(analysis.total_income.cents(), 500_000);
        assert_eq!(analysis.total_expenses.cents(), 222_075);
        assert_eq!(analysis.net_savings.cents(), 277_925);
    }

    #[test]
    fn test_category_summary_groups_and_sorts() {
        let analysis = analyze_personal_finance(&[
            entry("Groceries", -4_000, 3),
            entry("Salary", 500_000, 1),
            entry("Groceries", -6_000, 4),
            entry("Groceries", 1_500, 5),
        ]);

        let summary: Vec<(&str, EntryKind, i64)> = analysis
            .category_summary
            .iter()
            .map(|s| (s.category.as_str(), s.kind, s.amount.cents()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Groceries", EntryKind::Expense, -10_000),
                ("Groceries", EntryKind::Income, 1_500),
                ("Salary", EntryKind::Income, 500_000),
            ]
        );
    }

    #[test]
    fn test_cash_flow_sorted_ascending() {
        let analysis = analyze_personal_finance(&[
            entry("Salary", 500_000, 1),
            entry("Rent", -180_000, 2),
            entry("Dining", -9_000, 3),
        ]);

        let order: Vec<&str> = analysis
            .cash_flow_by_category
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["Rent", "Dining", "Salary"]);
    }

    #[test]
    fn test_balance_trend_is_date_ordered_and_stable() {
        let analysis = analyze_personal_finance(&[
            entry("Rent", -180_000, 2),
            entry("Salary", 500_000, 1),
            entry("Coffee", -500, 2),
        ]);

        let trend: Vec<(u32, i64)> = analysis
            .balance_trend
            .iter()
            .map(|p| (chrono::Datelike::day(&p.date), p.balance.cents()))
            .collect();
        assert_eq!(trend, vec![(1, 500_000), (2, 320_000), (2, 319_500)]);
    }

    #[test]
    fn test_split_and_rate() {
        let analysis = analyze_personal_finance(&[entry("Salary", 300_000, 1), entry("Rent", -100_000, 2)]);
        let (income, expenses) = analysis.income_expense_split();
        assert!((income - 75.0).abs() < 1e-9);
        assert!((expenses - 25.0).abs() < 1e-9);
        assert!((analysis.savings_rate().unwrap() - 66.666_666_666).abs() < 1e-6);

        let empty = analyze_personal_finance(&[]);
        assert_eq!(empty.income_expense_split(), (0.0, 0.0));
        assert_eq!(empty.savings_rate(), None);
    }
}
