//! finsight - terminal financial analysis of CSV data
//!
//! This library provides the core functionality for the finsight command
//! line tool. It reads profit & loss statements, personal finance records
//! and investment portfolios from CSV, cleans them into typed records and
//! computes the metrics and series behind each report.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (money, dataset kinds, records)
//! - `services`: Ingestion, validation, cleaning and analysis
//! - `ai`: Chat completion client and prompts
//! - `display`: Terminal tables and text charts
//! - `export`: CSV, JSON and YAML output
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,no_run
//! use finsight::models::AnalysisType;
//! use finsight::services::{clean, ingest::read_csv_str, Analysis};
//!
//! let table = read_csv_str(AnalysisType::ProfitLoss.sample_csv())?;
//! let cleaned = clean(&table, AnalysisType::ProfitLoss, "%Y-%m-%d")?;
//! let analysis = Analysis::run(&cleaned.data);
//! assert_eq!(analysis.analysis_type(), AnalysisType::ProfitLoss);
//! # Ok::<(), finsight::FinsightError>(())
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;

pub use error::FinsightError;
