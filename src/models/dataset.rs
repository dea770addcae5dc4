//! Analysis types and the CSV layouts they expect

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of financial dataset being analyzed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    /// Monthly profit & loss statement (metric/amount pairs)
    ProfitLoss,
    /// Income and expense records by category and date
    PersonalFinance,
    /// Investment holdings with purchase and current values
    InvestmentPortfolio,
}

impl AnalysisType {
    /// All analysis types, in detection order
    pub const ALL: [AnalysisType; 3] = [
        AnalysisType::ProfitLoss,
        AnalysisType::PersonalFinance,
        AnalysisType::InvestmentPortfolio,
    ];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ProfitLoss => "Profit & Loss Statement",
            Self::PersonalFinance => "Personal Finance",
            Self::InvestmentPortfolio => "Investment Portfolio",
        }
    }

    /// Columns that must be present in the CSV header
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            Self::ProfitLoss => &["metric", "amount_month_usd"],
            Self::PersonalFinance => &["Category", "Amount", "Date"],
            Self::InvestmentPortfolio => &[
                "Asset",
                "Type",
                "Purchase_Date",
                "Purchase_Price",
                "Current_Value",
                "Annual_Return",
            ],
        }
    }

    /// Example of a well-formed file, shown when processing fails
    pub fn expected_format(&self) -> &'static str {
        match self {
            Self::ProfitLoss => "metric,amount_month_usd\nTotal Revenue,250000\n",
            Self::PersonalFinance => {
                "Category,Amount,Date\nSalary,5000,2024-03-01\nRent,-1800,2024-03-02\n"
            }
            Self::InvestmentPortfolio => {
                "Asset,Type,Purchase_Date,Purchase_Price,Current_Value,Annual_Return\n\
                 AAPL,Stock,2024-03-01,150.25,180.50,20.13\n"
            }
        }
    }

    /// Bundled demonstration dataset
    pub fn sample_csv(&self) -> &'static str {
        match self {
            Self::ProfitLoss => include_str!("../../sample_data/profit_loss.csv"),
            Self::PersonalFinance => include_str!("../../sample_data/personal_finance.csv"),
            Self::InvestmentPortfolio => {
                include_str!("../../sample_data/investment_portfolio.csv")
            }
        }
    }

    /// File name of the bundled sample
    pub fn sample_file_name(&self) -> &'static str {
        match self {
            Self::ProfitLoss => "profit_loss.csv",
            Self::PersonalFinance => "personal_finance.csv",
            Self::InvestmentPortfolio => "investment_portfolio.csv",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_carry_required_columns() {
        for kind in AnalysisType::ALL {
            let header = kind.sample_csv().lines().next().unwrap();
            let columns: Vec<&str> = header.split(',').collect();
            for required in kind.required_columns() {
                assert!(columns.contains(required), "{} missing {}", kind, required);
            }
        }
    }

    #[test]
    fn test_expected_format_starts_with_header() {
        for kind in AnalysisType::ALL {
            let header = kind.expected_format().lines().next().unwrap();
            assert_eq!(header, kind.required_columns().join(","));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(AnalysisType::ProfitLoss.to_string(), "Profit & Loss Statement");
        assert_eq!(
            serde_json::to_string(&AnalysisType::InvestmentPortfolio).unwrap(),
            "\"investment_portfolio\""
        );
    }
}
