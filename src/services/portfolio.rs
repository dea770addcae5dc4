//! Investment portfolio analysis

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Holding, Money};

/// Per-holding performance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoldingPerformance {
    pub asset: String,
    pub asset_type: String,
    pub purchase_price: Money,
    pub current_value: Money,
    pub gain_loss: Money,
    /// `None` when the purchase price is zero
    pub return_percentage: Option<f64>,
    pub annual_return: f64,
}

/// Current value held in one asset type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeAllocation {
    pub asset_type: String,
    pub current_value: Money,
}

/// One relative step of the gain/loss waterfall
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaterfallStep {
    pub asset: String,
    pub change: Money,
    /// Cumulative gain/loss after this step
    pub running_total: Money,
}

/// Result of a portfolio analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioAnalysis {
    pub total_investment: Money,
    pub current_value: Money,
    pub total_gain_loss: Money,
    /// Mean annual return in percent, `None` for an empty portfolio
    pub avg_return: Option<f64>,
    /// Sorted by asset type
    pub type_distribution: Vec<TypeAllocation>,
    /// Input order
    pub holdings: Vec<HoldingPerformance>,
    pub waterfall: Vec<WaterfallStep>,
}

impl PortfolioAnalysis {
    /// Share of current value held in each asset type, in percent
    pub fn type_shares(&self) -> Vec<(&str, f64)> {
        self.type_distribution
            .iter()
            .map(|t| {
                let share = t
                    .current_value
                    .ratio(self.current_value)
                    .map(|r| r * 100.0)
                    .unwrap_or(0.0);
                (t.asset_type.as_str(), share)
            })
            .collect()
    }
}

/// Analyze a set of holdings
pub fn analyze_investment_portfolio(holdings: &[Holding]) -> PortfolioAnalysis {
    let total_investment: Money = holdings.iter().map(|h| h.purchase_price).sum();
    let current_value: Money = holdings.iter().map(|h| h.current_value).sum();

    let avg_return = if holdings.is_empty() {
        None
    } else {
        Some(holdings.iter().map(|h| h.annual_return).sum::<f64>() / holdings.len() as f64)
    };

    let mut by_type: BTreeMap<&str, Money> = BTreeMap::new();
    for holding in holdings {
        *by_type.entry(holding.asset_type.as_str()).or_default() += holding.current_value;
    }
    let type_distribution = by_type
        .into_iter()
        .map(|(asset_type, current_value)| TypeAllocation {
            asset_type: asset_type.to_string(),
            current_value,
        })
        .collect();

    let performance: Vec<HoldingPerformance> = holdings
        .iter()
        .map(|h| HoldingPerformance {
            asset: h.asset.clone(),
            asset_type: h.asset_type.clone(),
            purchase_price: h.purchase_price,
            current_value: h.current_value,
            gain_loss: h.gain_loss(),
            return_percentage: h.return_percentage(),
            annual_return: h.annual_return,
        })
        .collect();

    let mut running_total = Money::zero();
    let waterfall = performance
        .iter()
        .map(|p| {
            running_total += p.gain_loss;
            WaterfallStep {
                asset: p.asset.clone(),
                change: p.gain_loss,
                running_total,
            }
        })
        .collect();

    PortfolioAnalysis {
        total_investment,
        current_value,
        total_gain_loss: current_value - total_investment,
        avg_return,
        type_distribution,
        holdings: performance,
        waterfall,
    }
}
