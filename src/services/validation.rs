//! CSV structure validation
//!
//! Detects which kind of dataset a table holds from its columns and checks
//! that typed columns contain parseable values.

use serde::Serialize;

use super::parse::{parse_amount, parse_date, parse_number};
use crate::models::{AnalysisType, DataTable};

/// Outcome of validating a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Detected dataset kind, if any
    pub analysis_type: Option<AnalysisType>,
    /// Problems found in the data
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.analysis_type.is_some() && self.errors.is_empty()
    }
}

/// Detect the dataset kind from the header
///
/// The first kind whose required columns are all present wins, in
/// [`AnalysisType::ALL`] order.
pub fn detect_type(table: &DataTable) -> Option<AnalysisType> {
    AnalysisType::ALL
        .into_iter()
        .find(|kind| table.has_columns(kind.required_columns()))
}

/// Validate the table structure and column contents
pub fn validate_structure(table: &DataTable, date_format: &str) -> ValidationReport {
    let Some(analysis_type) = detect_type(table) else {
        return ValidationReport {
            analysis_type: None,
            errors: vec!["Unable to determine file type. Missing required columns.".to_string()],
        };
    };

    let mut errors = Vec::new();
    match analysis_type {
        AnalysisType::ProfitLoss => {}
        AnalysisType::PersonalFinance => {
            if !column_all(table, "Date", |v| parse_date(v, date_format).is_some()) {
                errors.push("Date column contains invalid dates".to_string());
            }
            if !column_all(table, "Amount", |v| parse_amount(v).is_some()) {
                errors.push("Amount column contains non-numeric values".to_string());
            }
        }
        AnalysisType::InvestmentPortfolio => {
            if !column_all(table, "Purchase_Date", |v| parse_date(v, date_format).is_some()) {
                errors.push("Purchase_Date column contains invalid dates".to_string());
            }
            for column in ["Purchase_Price", "Current_Value"] {
                if !column_all(table, column, |v| parse_amount(v).is_some()) {
                    errors.push(format!("{} column contains non-numeric values", column));
                }
            }
            if !column_all(table, "Annual_Return", |v| parse_number(v).is_some()) {
                errors.push("Annual_Return column contains non-numeric values".to_string());
            }
        }
    }

    ValidationReport {
        analysis_type: Some(analysis_type),
        errors,
    }
}

fn column_all(table: &DataTable, column: &str, check: impl Fn(&str) -> bool) -> bool {
    match table.column_index(column) {
        Some(idx) => table.column_values(idx).all(check),
        None => false,
    }
}
