//! Analysis report rendering
//!
//! Puts together the tables and charts shown by `analyze`.

use super::chart::{
    format_balance_trend, format_share_chart, format_signed_bar_chart, format_waterfall,
};
use super::report::{format_section, separator};
use super::table::{format_category_summary, format_holdings, format_line_items, format_metrics_table};
use crate::services::personal::PersonalFinanceAnalysis;
use crate::services::portfolio::PortfolioAnalysis;
use crate::services::{Analysis, CleanedDataset, PnlMetrics, ValidationReport};
use crate::models::PnlLineItem;

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 30;

/// Render an analysis for the terminal
pub fn format_analysis(analysis: &Analysis, symbol: &str) -> String {
    match analysis {
        Analysis::ProfitLoss { items, metrics } => format_pnl_analysis(items, metrics, symbol),
        Analysis::PersonalFinance(pf) => format_personal_finance(pf, symbol),
        Analysis::InvestmentPortfolio(pa) => format_portfolio(pa, symbol),
    }
}

fn format_pnl_analysis(items: &[PnlLineItem], metrics: &PnlMetrics, symbol: &str) -> String {
    let mut out = format_section("Profit & Loss Statement", WIDTH);
    out.push_str(&format_line_items(items, symbol));
    out.push_str("\n\n");
    out.push_str(&format_section("Financial Metrics", WIDTH));
    out.push_str(&format_metrics_table(metrics));
    out.push('\n');
    out
}

fn format_personal_finance(pf: &PersonalFinanceAnalysis, symbol: &str) -> String {
    let mut out = format_section("Personal Finance Summary", WIDTH);
    out.push_str(&format!(
        "Total Income:     {:>16}\n",
        pf.total_income.format_grouped(symbol)
    ));
    out.push_str(&format!(
        "Total Expenses:   {:>16}\n",
        pf.total_expenses.format_grouped(symbol)
    ));
    out.push_str(&format!("{}\n", separator(34)));
    out.push_str(&format!(
        "Net Savings:      {:>16}\n",
        pf.net_savings.format_grouped(symbol)
    ));
    if let Some(rate) = pf.savings_rate() {
        out.push_str(&format!("Savings Rate:     {:>15.1}%\n", rate));
    }

    out.push('\n');
    out.push_str(&format_section("Income vs Expenses", WIDTH));
    let (income, expenses) = pf.income_expense_split();
    if pf.total_income.is_zero() && pf.total_expenses.is_zero() {
        out.push_str("No income or expenses.\n");
    } else {
        out.push_str(&format_share_chart(
            &[("Income", income), ("Expenses", expenses)],
            BAR_WIDTH,
        ));
    }

    out.push('\n');
    out.push_str(&format_section("Cash Flow by Category", WIDTH));
    let flows: Vec<(String, f64, String)> = pf
        .cash_flow_by_category
        .iter()
        .map(|f| (f.category.clone(), f.amount.as_f64(), f.amount.format_grouped(symbol)))
        .collect();
    out.push_str(&format_signed_bar_chart(&flows, BAR_WIDTH));

    out.push('\n');
    out.push_str(&format_section("Category Summary", WIDTH));
    out.push_str(&format_category_summary(&pf.category_summary, symbol));
    out.push_str("\n\n");

    out.push_str(&format_section("Balance Trend", WIDTH));
    out.push_str(&format_balance_trend(&pf.balance_trend, symbol, BAR_WIDTH));
    out
}

fn format_portfolio(pa: &PortfolioAnalysis, symbol: &str) -> String {
    let mut out = format_section("Portfolio Summary", WIDTH);
    out.push_str(&format!(
        "Total Investment: {:>16}\n",
        pa.total_investment.format_grouped(symbol)
    ));
    out.push_str(&format!(
        "Current Value:    {:>16}\n",
        pa.current_value.format_grouped(symbol)
    ));
    out.push_str(&format!(
        "Total Gain/Loss:  {:>16}\n",
        pa.total_gain_loss.format_grouped(symbol)
    ));
    match pa.avg_return {
        Some(avg) => out.push_str(&format!("Average Return:   {:>15.2}%\n", avg)),
        None => out.push_str("Average Return:                n/a\n"),
    }

    out.push('\n');
    out.push_str(&format_section("Distribution by Asset Type", WIDTH));
    out.push_str(&format_share_chart(&pa.type_shares(), BAR_WIDTH));

    out.push('\n');
    out.push_str(&format_section("Annual Return by Asset", WIDTH));
    let returns: Vec<(String, f64, String)> = pa
        .holdings
        .iter()
        .map(|h| {
            (
                format!("{} ({})", h.asset, h.asset_type),
                h.annual_return,
                format!("{:.2}%", h.annual_return),
            )
        })
        .collect();
    out.push_str(&format_signed_bar_chart(&returns, BAR_WIDTH));

    out.push('\n');
    out.push_str(&format_section("Gain/Loss Waterfall", WIDTH));
    out.push_str(&format_waterfall(&pa.waterfall, symbol, BAR_WIDTH));

    out.push('\n');
    out.push_str(&format_section("Holdings", WIDTH));
    out.push_str(&format_holdings(&pa.holdings, symbol));
    out.push('\n');
    out
}

/// Row counts and warnings from cleaning
pub fn format_cleaning_summary(cleaned: &CleanedDataset) -> String {
    let mut out = format!(
        "Cleaned {} rows of {} data ({} dropped)\n",
        cleaned.data.len(),
        cleaned.analysis_type(),
        cleaned.dropped_rows
    );
    for warning in &cleaned.warnings {
        out.push_str(&format!("  warning: {}\n", warning));
    }
    out
}

pub fn format_validation_report(report: &ValidationReport) -> String {
    let mut out = String::new();
    match report.analysis_type {
        Some(kind) => out.push_str(&format!("Detected type: {}\n", kind)),
        None => out.push_str("Detected type: unknown\n"),
    }
    if report.errors.is_empty() {
        out.push_str("No validation errors found.\n");
    } else {
        out.push_str(&format!("{} validation error(s):\n", report.errors.len()));
        for error in &report.errors {
            out.push_str(&format!("  - {}\n", error));
        }
    }
    out
}
