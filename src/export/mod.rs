//! Export module for finsight
//!
//! - CSV: cleaned datasets (spreadsheet-compatible)
//! - JSON: machine-readable analysis results and row conversion
//! - YAML: human-readable analysis results

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_cleaned_csv, export_table_csv};
pub use json::{
    export_analysis_json, export_rows_json, AnalysisExport, AMOUNT_UNIT, EXPORT_SCHEMA_VERSION,
};
pub use yaml::export_analysis_yaml;
