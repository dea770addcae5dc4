//! Core data models for finsight
//!
//! This module contains the data structures that represent the analysis
//! domain: money amounts, dataset kinds, raw tables and typed records.

pub mod dataset;
pub mod money;
pub mod records;
pub mod table;

pub use dataset::AnalysisType;
pub use money::{Money, MoneyParseError};
pub use records::{EntryKind, FinanceEntry, Holding, PnlLineItem};
pub use table::DataTable;
