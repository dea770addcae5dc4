//! Data cleaning
//!
//! Turns a raw [`DataTable`] into typed records for one analysis type,
//! dropping rows that cannot be parsed and reporting what was removed.

use serde::Serialize;
use tracing::{debug, warn};

use super::parse::{parse_amount, parse_date, parse_number};
use crate::error::{FinsightError, FinsightResult};
use crate::models::{AnalysisType, DataTable, FinanceEntry, Holding, Money, PnlLineItem};

/// Typed rows for one analysis type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "rows", rename_all = "snake_case")]
pub enum CleanedData {
    ProfitLoss(Vec<PnlLineItem>),
    PersonalFinance(Vec<FinanceEntry>),
    InvestmentPortfolio(Vec<Holding>),
}

impl CleanedData {
    pub fn analysis_type(&self) -> AnalysisType {
        match self {
            Self::ProfitLoss(_) => AnalysisType::ProfitLoss,
            Self::PersonalFinance(_) => AnalysisType::PersonalFinance,
            Self::InvestmentPortfolio(_) => AnalysisType::InvestmentPortfolio,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::ProfitLoss(rows) => rows.len(),
            Self::PersonalFinance(rows) => rows.len(),
            Self::InvestmentPortfolio(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of cleaning a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedDataset {
    pub data: CleanedData,
    /// User-facing notes about removed rows
    pub warnings: Vec<String>,
    /// Total number of rows removed
    pub dropped_rows: usize,
}

impl CleanedDataset {
    pub fn analysis_type(&self) -> AnalysisType {
        self.data.analysis_type()
    }

    /// Render the cleaned rows back into a table with normalized values
    pub fn to_table(&self) -> DataTable {
        let kind = self.analysis_type();
        let headers = kind
            .required_columns()
            .iter()
            .map(|c| c.to_string())
            .collect();

        let rows = match &self.data {
            CleanedData::ProfitLoss(items) => items
                .iter()
                .map(|item| vec![item.metric.clone(), item.amount.to_decimal_string()])
                .collect(),
            CleanedData::PersonalFinance(entries) => entries
                .iter()
                .map(|entry| {
                    vec![
                        entry.category.clone(),
                        entry.amount.to_decimal_string(),
                        entry.date.format("%Y-%m-%d").to_string(),
                    ]
                })
                .collect(),
            CleanedData::InvestmentPortfolio(holdings) => holdings
                .iter()
                .map(|h| {
                    vec![
                        h.asset.clone(),
                        h.asset_type.clone(),
                        h.purchase_date.format("%Y-%m-%d").to_string(),
                        h.purchase_price.to_decimal_string(),
                        h.current_value.to_decimal_string(),
                        format!("{:.2}", h.annual_return),
                    ]
                })
                .collect(),
        };

        DataTable::new(headers, rows)
    }
}

/// Clean a table for the requested analysis type
///
/// # Errors
///
/// Returns a validation error naming the missing columns when the table
/// does not carry every column the analysis requires.
pub fn clean(
    table: &DataTable,
    analysis_type: AnalysisType,
    date_format: &str,
) -> FinsightResult<CleanedDataset> {
    let missing = table.missing_columns(analysis_type.required_columns());
    if !missing.is_empty() {
        return Err(FinsightError::Validation(format!(
            "{} data is missing required columns: {}",
            analysis_type,
            missing.join(", ")
        )));
    }

    let cleaned = match analysis_type {
        AnalysisType::ProfitLoss => clean_profit_loss(table),
        AnalysisType::PersonalFinance => clean_personal_finance(table, date_format),
        AnalysisType::InvestmentPortfolio => clean_portfolio(table, date_format),
    };

    for warning in &cleaned.warnings {
        warn!("{}", warning);
    }
    debug!(
        analysis = %analysis_type,
        kept = cleaned.data.len(),
        dropped = cleaned.dropped_rows,
        "Cleaned dataset"
    );

    Ok(cleaned)
}

// Column lookups below are checked by `clean` before dispatch.
fn col(table: &DataTable, name: &str) -> usize {
    table.column_index(name).unwrap_or(usize::MAX)
}

fn clean_profit_loss(table: &DataTable) -> CleanedDataset {
    let metric = col(table, "metric");
    let amount = col(table, "amount_month_usd");

    let items = (0..table.len())
        .map(|row| {
            // Unparseable amounts count as zero
            let raw = table.cell(row, amount);
            let value = parse_amount(raw).unwrap_or_else(|| {
                warn!(
                    metric = table.cell(row, metric),
                    amount = raw,
                    "Unparseable amount counted as zero"
                );
                Money::zero()
            });
            PnlLineItem::new(table.cell(row, metric), value)
        })
        .collect();

    CleanedDataset {
        data: CleanedData::ProfitLoss(items),
        warnings: Vec::new(),
        dropped_rows: 0,
    }
}

fn clean_personal_finance(table: &DataTable, date_format: &str) -> CleanedDataset {
    let category = col(table, "Category");
    let amount = col(table, "Amount");
    let date = col(table, "Date");
    let mut warnings = Vec::new();

    let dated: Vec<(usize, chrono::NaiveDate)> = (0..table.len())
        .filter_map(|row| parse_date(table.cell(row, date), date_format).map(|d| (row, d)))
        .collect();
    let invalid_dates = table.len() - dated.len();
    if invalid_dates > 0 {
        warnings.push(format!(
            "Found {} rows with invalid dates. These rows will be excluded.",
            invalid_dates
        ));
    }

    let entries: Vec<FinanceEntry> = dated
        .iter()
        .filter_map(|&(row, d)| {
            parse_amount(table.cell(row, amount))
                .map(|value| FinanceEntry::new(table.cell(row, category).trim(), value, d))
        })
        .collect();
    let invalid_amounts = dated.len() - entries.len();
    if invalid_amounts > 0 {
        warnings.push(format!(
            "Found {} rows with invalid amounts. These rows will be excluded.",
            invalid_amounts
        ));
    }

    CleanedDataset {
        data: CleanedData::PersonalFinance(entries),
        warnings,
        dropped_rows: invalid_dates + invalid_amounts,
    }
}

fn clean_portfolio(table: &DataTable, date_format: &str) -> CleanedDataset {
    let asset = col(table, "Asset");
    let asset_type = col(table, "Type");
    let purchase_date = col(table, "Purchase_Date");
    let purchase_price = col(table, "Purchase_Price");
    let current_value = col(table, "Current_Value");
    let annual_return = col(table, "Annual_Return");

    let holdings: Vec<Holding> = (0..table.len())
        .filter_map(|row| {
            let name = table.cell(row, asset).trim();
            let kind = table.cell(row, asset_type).trim();
            if name.is_empty() || kind.is_empty() {
                return None;
            }
            Some(Holding {
                asset: name.to_string(),
                asset_type: kind.to_string(),
                purchase_date: parse_date(table.cell(row, purchase_date), date_format)?,
                purchase_price: parse_amount(table.cell(row, purchase_price))?,
                current_value: parse_amount(table.cell(row, current_value))?,
                annual_return: parse_number(table.cell(row, annual_return))?,
            })
        })
        .collect();

    let dropped = table.len() - holdings.len();
    let warnings = if dropped > 0 {
        vec![format!("Removed {} rows with invalid data.", dropped)]
    } else {
        Vec::new()
    };

    CleanedDataset {
        data: CleanedData::InvestmentPortfolio(holdings),
        warnings,
        dropped_rows: dropped,
    }
}
