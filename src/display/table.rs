//! Tabular views built with `tabled`

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{DataTable, PnlLineItem};
use crate::services::personal::CategorySummary;
use crate::services::portfolio::HoldingPerformance;
use crate::services::PnlMetrics;

#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Metric")]
    metric: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct LineItemRow<'a> {
    #[tabled(rename = "Line Item")]
    metric: &'a str,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct CategoryRow<'a> {
    #[tabled(rename = "Category")]
    category: &'a str,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct HoldingRow<'a> {
    #[tabled(rename = "Asset")]
    asset: &'a str,
    #[tabled(rename = "Type")]
    asset_type: &'a str,
    #[tabled(rename = "Purchase")]
    purchase_price: String,
    #[tabled(rename = "Current")]
    current_value: String,
    #[tabled(rename = "Gain/Loss")]
    gain_loss: String,
    #[tabled(rename = "Return")]
    return_percentage: String,
    #[tabled(rename = "Annual")]
    annual_return: String,
}

fn finish(mut table: Table, numeric_from: usize) -> String {
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::new(numeric_from..)).with(Alignment::right()));
    table.to_string()
}

/// The first `limit` rows of a raw table
pub fn format_data_preview(table: &DataTable, limit: usize) -> String {
    if table.is_empty() {
        return "No rows.".to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(table.headers().iter().cloned());
    for row in table.rows().iter().take(limit) {
        let cells = (0..table.headers().len()).map(|i| row.get(i).cloned().unwrap_or_default());
        builder.push_record(cells);
    }

    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    let mut out = rendered.to_string();
    if table.len() > limit {
        out.push_str(&format!("\n... {} more rows", table.len() - limit));
    }
    out
}

/// Metric/Value table for P&L ratios
pub fn format_metrics_table(metrics: &PnlMetrics) -> String {
    let rows: Vec<MetricRow> = metrics
        .iter()
        .map(|(ratio, value)| MetricRow {
            metric: ratio.label(),
            value: if ratio.is_percentage() {
                format!("{:.2}%", value)
            } else {
                format!("{:.2}x", value)
            },
        })
        .collect();
    finish(Table::new(rows), 1)
}

pub fn format_line_items(items: &[PnlLineItem], symbol: &str) -> String {
    let rows: Vec<LineItemRow> = items
        .iter()
        .map(|item| LineItemRow {
            metric: &item.metric,
            amount: item.amount.format_grouped(symbol),
        })
        .collect();
    finish(Table::new(rows), 1)
}

pub fn format_category_summary(summary: &[CategorySummary], symbol: &str) -> String {
    let rows: Vec<CategoryRow> = summary
        .iter()
        .map(|s| CategoryRow {
            category: &s.category,
            kind: s.kind.to_string(),
            amount: s.amount.format_grouped(symbol),
        })
        .collect();
    finish(Table::new(rows), 2)
}

pub fn format_holdings(holdings: &[HoldingPerformance], symbol: &str) -> String {
    let rows: Vec<HoldingRow> = holdings
        .iter()
        .map(|h| HoldingRow {
            asset: &h.asset,
            asset_type: &h.asset_type,
            purchase_price: h.purchase_price.format_grouped(symbol),
            current_value: h.current_value.format_grouped(symbol),
            gain_loss: h.gain_loss.format_grouped(symbol),
            return_percentage: h
                .return_percentage
                .map(|r| format!("{:.2}%", r))
                .unwrap_or_else(|| "n/a".to_string()),
            annual_return: format!("{:.2}%", h.annual_return),
        })
        .collect();
    finish(Table::new(rows), 2)
}
