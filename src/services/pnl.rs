//! Profit & loss ratio metrics

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::{Money, PnlLineItem};

/// Ratios derived from a profit & loss statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PnlRatio {
    GrossProfitMargin,
    OperatingProfitMargin,
    NetProfitMargin,
    CogsPercentage,
    OperatingExpenseRatio,
    MarketingEfficiency,
    SalariesWagesPercentage,
    InterestCoverageRatio,
    DepreciationPercentage,
    OtherExpensesPercentage,
    NetOtherIncomePercentage,
    IncomeTaxPercentage,
}

/// How a ratio is computed from statement lines
enum Formula {
    /// numerator / Total Revenue × 100
    PercentOfRevenue(&'static str),
    /// numerator / denominator
    Multiple(&'static str, &'static str),
    /// numerator / denominator × 100
    Percent(&'static str, &'static str),
}

const TOTAL_REVENUE: &str = "Total Revenue";

impl PnlRatio {
    /// All ratios in report order
    pub const ALL: [PnlRatio; 12] = [
        PnlRatio::GrossProfitMargin,
        PnlRatio::OperatingProfitMargin,
        PnlRatio::NetProfitMargin,
        PnlRatio::CogsPercentage,
        PnlRatio::OperatingExpenseRatio,
        PnlRatio::MarketingEfficiency,
        PnlRatio::SalariesWagesPercentage,
        PnlRatio::InterestCoverageRatio,
        PnlRatio::DepreciationPercentage,
        PnlRatio::OtherExpensesPercentage,
        PnlRatio::NetOtherIncomePercentage,
        PnlRatio::IncomeTaxPercentage,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::GrossProfitMargin => "Gross Profit Margin",
            Self::OperatingProfitMargin => "Operating Profit Margin",
            Self::NetProfitMargin => "Net Profit Margin",
            Self::CogsPercentage => "COGS Percentage",
            Self::OperatingExpenseRatio => "Operating Expense Ratio",
            Self::MarketingEfficiency => "Marketing Efficiency",
            Self::SalariesWagesPercentage => "Salaries & Wages Percentage",
            Self::InterestCoverageRatio => "Interest Coverage Ratio",
            Self::DepreciationPercentage => "Depreciation Percentage",
            Self::OtherExpensesPercentage => "Other Expenses Percentage",
            Self::NetOtherIncomePercentage => "Net Other Income Percentage",
            Self::IncomeTaxPercentage => "Income Tax Percentage",
        }
    }

    /// Whether the value is a percentage (as opposed to a multiple)
    pub fn is_percentage(&self) -> bool {
        !matches!(self, Self::MarketingEfficiency | Self::InterestCoverageRatio)
    }

    fn formula(&self) -> Formula {
        match self {
            Self::GrossProfitMargin => Formula::PercentOfRevenue("Gross Profit"),
            Self::OperatingProfitMargin => Formula::PercentOfRevenue("Operating Profit (EBIT)"),
            Self::NetProfitMargin => Formula::PercentOfRevenue("Net Profit After Tax"),
            Self::CogsPercentage => Formula::PercentOfRevenue("Total COGS"),
            Self::OperatingExpenseRatio => Formula::PercentOfRevenue("Total Operating Expenses"),
            Self::MarketingEfficiency => Formula::Multiple(TOTAL_REVENUE, "Marketing & Advertising"),
            Self::SalariesWagesPercentage => Formula::PercentOfRevenue("Salaries & Wages"),
            Self::InterestCoverageRatio => {
                Formula::Multiple("Operating Profit (EBIT)", "Interest Expense")
            }
            Self::DepreciationPercentage => Formula::PercentOfRevenue("Depreciation"),
            Self::OtherExpensesPercentage => Formula::PercentOfRevenue("Other Expenses"),
            Self::NetOtherIncomePercentage => Formula::PercentOfRevenue("Net Other Income/Expense"),
            Self::IncomeTaxPercentage => {
                Formula::Percent("Income Tax Expense", "Net Profit Before Tax")
            }
        }
    }
}

/// Computed ratios in report order
#[derive(Debug, Clone, PartialEq)]
pub struct PnlMetrics {
    values: Vec<(PnlRatio, f64)>,
}

impl PnlMetrics {
    pub fn get(&self, ratio: PnlRatio) -> f64 {
        self.values
            .iter()
            .find(|(r, _)| *r == ratio)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PnlRatio, f64)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for PnlMetrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (ratio, value) in &self.values {
            map.serialize_entry(ratio.label(), value)?;
        }
        map.end()
    }
}

/// Calculate every ratio from statement line items
///
/// Missing lines read as zero and a later duplicate line replaces an earlier
/// one. A ratio whose denominator is zero is reported as 0.0.
pub fn calculate_metrics(items: &[PnlLineItem]) -> PnlMetrics {
    let lines: HashMap<&str, Money> = items
        .iter()
        .map(|item| (item.metric.as_str(), item.amount))
        .collect();
    let line = |name: &str| lines.get(name).copied().unwrap_or_else(Money::zero);

    let values = PnlRatio::ALL
        .into_iter()
        .map(|ratio| {
            let value = match ratio.formula() {
                Formula::PercentOfRevenue(numerator) => {
                    line(numerator).ratio(line(TOTAL_REVENUE)).map(|r| r * 100.0)
                }
                Formula::Multiple(numerator, denominator) => {
                    line(numerator).ratio(line(denominator))
                }
                Formula::Percent(numerator, denominator) => {
                    line(numerator).ratio(line(denominator)).map(|r| r * 100.0)
                }
            };
            (ratio, value.unwrap_or(0.0))
        })
        .collect();

    PnlMetrics { values }
}
