//! Prompt builders for financial insights

use std::fmt::Write;

use crate::models::AnalysisType;
use crate::services::pnl::PnlMetrics;
use crate::services::personal::PersonalFinanceAnalysis;
use crate::services::portfolio::PortfolioAnalysis;
use crate::services::Analysis;

/// Report request built from P&L ratios
pub fn build_metrics_prompt(metrics: &PnlMetrics) -> String {
    let mut prompt = String::from(
        "You are a financial analyst. Based on the following financial metrics, generate a report \
         that includes insights on the current state of the business and actionable \
         recommendations for improvement. \n\nMetrics:\n",
    );
    for (ratio, value) in metrics.iter() {
        let _ = writeln!(prompt, "{}: {:.2}", ratio.label(), value);
    }
    prompt
}

/// Advisor request for personal finance totals
pub fn build_personal_finance_prompt(analysis: &PersonalFinanceAnalysis, symbol: &str) -> String {
    format!(
        "As a financial advisor, analyze this personal finance data and provide insights:\n\
         Total Income: {}\n\
         Total Expenses: {}\n\
         Net Savings: {}\n\
         Provide budget analysis, savings recommendations, and potential areas for improvement.",
        analysis.total_income.format_grouped(symbol),
        analysis.total_expenses.format_grouped(symbol),
        analysis.net_savings.format_grouped(symbol),
    )
}

/// Advisor request for portfolio totals
pub fn build_portfolio_prompt(analysis: &PortfolioAnalysis, symbol: &str) -> String {
    let mut prompt = format!(
        "As a financial advisor, analyze this investment portfolio and provide insights:\n\
         Total Investment: {}\n\
         Current Value: {}\n\
         Total Gain/Loss: {}\n\
         Average Return: {}\n\
         Allocation by asset type:\n",
        analysis.total_investment.format_grouped(symbol),
        analysis.current_value.format_grouped(symbol),
        analysis.total_gain_loss.format_grouped(symbol),
        format_optional_percent(analysis.avg_return),
    );
    for (asset_type, share) in analysis.type_shares() {
        let _ = writeln!(prompt, "- {}: {:.1}%", asset_type, share);
    }
    prompt.push_str(
        "Provide diversification analysis, risk observations, and rebalancing recommendations.",
    );
    prompt
}

/// Free-form question about an analyzed dataset
pub fn build_question_prompt(
    analysis_type: AnalysisType,
    question: &str,
    data_summary: &str,
) -> String {
    format!(
        "Based on the {} data provided, please answer this question:\n{}\n\
         Provide a detailed, analytical response.\n\nData summary:\n{}",
        analysis_type,
        question.trim(),
        data_summary.trim_end()
    )
}

/// Compact plain-text description of an analysis, used as question context
pub fn summarize_analysis(analysis: &Analysis, symbol: &str) -> String {
    let mut out = String::new();
    match analysis {
        Analysis::ProfitLoss { items, metrics } => {
            for item in items {
                let _ = writeln!(out, "{}: {}", item.metric, item.amount.format_grouped(symbol));
            }
            for (ratio, value) in metrics.iter() {
                let _ = writeln!(out, "{}: {:.2}", ratio.label(), value);
            }
        }
        Analysis::PersonalFinance(pf) => {
            let _ = writeln!(out, "Total Income: {}", pf.total_income.format_grouped(symbol));
            let _ = writeln!(out, "Total Expenses: {}", pf.total_expenses.format_grouped(symbol));
            let _ = writeln!(out, "Net Savings: {}", pf.net_savings.format_grouped(symbol));
            out.push_str("Cash flow by category:\n");
            for flow in &pf.cash_flow_by_category {
                let _ = writeln!(out, "- {}: {}", flow.category, flow.amount.format_grouped(symbol));
            }
        }
        Analysis::InvestmentPortfolio(pa) => {
            let _ = writeln!(out, "Total Investment: {}", pa.total_investment.format_grouped(symbol));
            let _ = writeln!(out, "Current Value: {}", pa.current_value.format_grouped(symbol));
            let _ = writeln!(out, "Total Gain/Loss: {}", pa.total_gain_loss.format_grouped(symbol));
            let _ = writeln!(out, "Average Return: {}", format_optional_percent(pa.avg_return));
            out.push_str("Holdings:\n");
            for h in &pa.holdings {
                let _ = writeln!(
                    out,
                    "- {} ({}): value {}, gain/loss {}, annual return {:.2}%",
                    h.asset,
                    h.asset_type,
                    h.current_value.format_grouped(symbol),
                    h.gain_loss.format_grouped(symbol),
                    h.annual_return
                );
            }
        }
    }
    out
}

fn format_optional_percent(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}%", v))
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FinanceEntry, Money, PnlLineItem};
    use crate::services::pnl::calculate_metrics;
    use crate::services::personal::analyze_personal_finance;
    use chrono::NaiveDate;

    #[test]
    fn test_metrics_prompt() {
        let metrics = calculate_metrics(&[
            PnlLineItem::new("Total Revenue", Money::from_cents(10_000_000)),
            PnlLineItem::new("Gross Profit", Money::from_cents(4_000_000)),
        ]);
        let prompt = build_metrics_prompt(&metrics);
        assert!(prompt.starts_with("You are a financial analyst."));
        assert!(prompt.contains("\n\nMetrics:\nGross Profit Margin: 40.00\n"));
        assert!(prompt.ends_with("Income Tax Percentage: 0.00\n"));
    }

    #[test]
    fn test_personal_finance_prompt_uses_grouped_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let analysis = analyze_personal_finance(&[
            FinanceEntry::new("Salary", Money::from_cents(500_000), date),
            FinanceEntry::new("Rent", Money::from_cents(-180_000), date),
        ]);
        let prompt = build_personal_finance_prompt(&analysis, "$");
        assert!(prompt.contains("Total Income: $5,000.00\n"));
        assert!(prompt.contains("Total Expenses: $1,800.00\n"));
        assert!(prompt.contains("Net Savings: $3,200.00\n"));
    }

    #[test]
    fn test_question_prompt() {
        let prompt = build_question_prompt(
            AnalysisType::PersonalFinance,
            " Where can I save? ",
            "Total Income: $1.00\n",
        );
        assert_eq!(
            prompt,
            "Based on the Personal Finance data provided, please answer this question:\n\
             Where can I save?\nProvide a detailed, analytical response.\n\n\
             Data summary:\nTotal Income: $1.00"
        );
    }
}
