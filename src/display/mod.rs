//! Display formatting for terminal output
//!
//! Provides utilities for rendering tables, text charts and analysis
//! reports for the terminal.

pub mod analysis;
pub mod chart;
pub mod report;
pub mod table;

pub use analysis::{format_analysis, format_cleaning_summary, format_validation_report};
pub use table::{format_data_preview, format_metrics_table};
