//! Service layer for finsight
//!
//! Ingestion, validation and cleaning turn a CSV file into typed records;
//! the analysis services compute the numbers behind every report.

pub mod cleaning;
pub mod ingest;
pub mod insight;
pub mod parse;
pub mod personal;
pub mod pnl;
pub mod portfolio;
pub mod validation;

pub use cleaning::{clean, CleanedData, CleanedDataset};
pub use insight::InsightService;
pub use personal::{analyze_personal_finance, PersonalFinanceAnalysis};
pub use pnl::{calculate_metrics, PnlMetrics, PnlRatio};
pub use portfolio::{analyze_investment_portfolio, PortfolioAnalysis};
pub use validation::{detect_type, validate_structure, ValidationReport};

use serde::Serialize;

use crate::models::{AnalysisType, PnlLineItem};

/// Outcome of running the analysis that matches a cleaned dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Analysis {
    ProfitLoss {
        items: Vec<PnlLineItem>,
        metrics: PnlMetrics,
    },
    PersonalFinance(PersonalFinanceAnalysis),
    InvestmentPortfolio(PortfolioAnalysis),
}

impl Analysis {
    /// Run the analysis for the records in `data`
    pub fn run(data: &CleanedData) -> Self {
        match data {
            CleanedData::ProfitLoss(items) => Self::ProfitLoss {
                items: items.clone(),
                metrics: calculate_metrics(items),
            },
            CleanedData::PersonalFinance(entries) => {
                Self::PersonalFinance(analyze_personal_finance(entries))
            }
            CleanedData::InvestmentPortfolio(holdings) => {
                Self::InvestmentPortfolio(analyze_investment_portfolio(holdings))
            }
        }
    }

    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            Self::ProfitLoss { .. } => AnalysisType::ProfitLoss,
            Self::PersonalFinance(_) => AnalysisType::PersonalFinance,
            Self::InvestmentPortfolio(_) => AnalysisType::InvestmentPortfolio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_run_matches_data_type() {
        let data = CleanedData::ProfitLoss(vec![PnlLineItem::new(
            "Total Revenue",
            Money::from_cents(100),
        )]);
        let analysis = Analysis::run(&data);
        assert_eq!(analysis.analysis_type(), AnalysisType::ProfitLoss);

        let empty = Analysis::run(&CleanedData::InvestmentPortfolio(Vec::new()));
        assert_eq!(empty.analysis_type(), AnalysisType::InvestmentPortfolio);
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let analysis = Analysis::run(&CleanedData::PersonalFinance(Vec::new()));
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["type"], "personal_finance");
        assert_eq!(json["total_income"], 0);
    }
}
