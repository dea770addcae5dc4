//! Typed records produced by cleaning a raw table
//!
//! One record type per analysis: P&L line items, personal finance entries
//! and investment holdings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;

/// A single line of a profit & loss statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PnlLineItem {
    /// Metric name, e.g. "Total Revenue"
    pub metric: String,
    /// Monthly amount in USD
    pub amount: Money,
}

impl PnlLineItem {
    pub fn new(metric: impl Into<String>, amount: Money) -> Self {
        Self {
            metric: metric.into().trim().to_string(),
            amount,
        }
    }
}

/// Whether a personal finance entry adds or removes money
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Expense,
    Income,
}

impl EntryKind {
    /// Positive amounts are income; zero and negative amounts are expenses
    pub fn of(amount: Money) -> Self {
        if amount.is_positive() {
            Self::Income
        } else {
            Self::Expense
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "Expense"),
            Self::Income => write!(f, "Income"),
        }
    }
}

/// A dated income or expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub category: String,
    /// Signed amount: positive for income, negative for expenses
    pub amount: Money,
    pub date: NaiveDate,
}

impl FinanceEntry {
    pub fn new(category: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self {
            category: category.into(),
            amount,
            date,
        }
    }

    pub fn kind(&self) -> EntryKind {
        EntryKind::of(self.amount)
    }
}

/// A position in an investment portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker or asset name
    pub asset: String,
    /// Asset class, e.g. "Stock", "ETF", "Bond"
    pub asset_type: String,
    pub purchase_date: NaiveDate,
    pub purchase_price: Money,
    pub current_value: Money,
    /// Annual return in percent
    pub annual_return: f64,
}

impl Holding {
    /// Current value minus purchase price
    pub fn gain_loss(&self) -> Money {
        self.current_value - self.purchase_price
    }

    /// Gain or loss relative to the purchase price, in percent
    ///
    /// Returns `None` when the purchase price is zero.
    pub fn return_percentage(&self) -> Option<f64> {
        self.gain_loss()
            .ratio(self.purchase_price)
            .map(|ratio| ratio * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_kind() {
        assert_eq!(EntryKind::of(Money::from_cents(1)), EntryKind::Income);
        assert_eq!(EntryKind::of(Money::zero()), EntryKind::Expense);
        assert_eq!(EntryKind::of(Money::from_cents(-1)), EntryKind::Expense);
        assert!(EntryKind::Expense < EntryKind::Income);
    }

    #[test]
    fn test_holding_gain_and_return() {
        let holding = Holding {
            asset: "AAPL".into(),
            asset_type: "Stock".into(),
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            purchase_price: Money::from_cents(20000),
            current_value: Money::from_cents(25000),
            annual_return: 20.13,
        };
        assert_eq!(holding.gain_loss().cents(), 5000);
        assert_eq!(holding.return_percentage(), Some(25.0));

        let free = Holding {
            purchase_price: Money::zero(),
            ..holding
        };
        assert_eq!(free.return_percentage(), None);
    }

    #[test]
    fn test_line_item_trims_metric() {
        let item = PnlLineItem::new("  Total Revenue ", Money::from_cents(100));
        assert_eq!(item.metric, "Total Revenue");
    }
}
