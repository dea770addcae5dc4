//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analyze;
pub mod ask;
pub mod config;
pub mod convert;
pub mod sample;
pub mod validate;

pub use analyze::{handle_analyze_command, AnalyzeArgs, OutputFormat};
pub use ask::{handle_ask_command, AskArgs};
pub use config::{handle_config_command, ConfigCommands};
pub use convert::handle_convert_command;
pub use sample::handle_sample_command;
pub use validate::handle_validate_command;

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use crate::config::Settings;
use crate::error::{FinsightError, FinsightResult};
use crate::models::{AnalysisType, DataTable};
use crate::services::ingest::{read_csv_path, read_csv_str};
use crate::services::{clean, Analysis, CleanedDataset};

/// Dataset kinds accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetKind {
    /// Profit & loss statement (metric, amount_month_usd)
    Pnl,
    /// Income and expenses (Category, Amount, Date)
    Personal,
    /// Investment holdings (Asset, Type, Purchase_Date, ...)
    Portfolio,
}

impl From<DatasetKind> for AnalysisType {
    fn from(kind: DatasetKind) -> Self {
        match kind {
            DatasetKind::Pnl => AnalysisType::ProfitLoss,
            DatasetKind::Personal => AnalysisType::PersonalFinance,
            DatasetKind::Portfolio => AnalysisType::InvestmentPortfolio,
        }
    }
}

/// Where the CSV comes from
#[derive(Args, Debug, Clone)]
pub struct DataSource {
    /// Path to the CSV file
    #[arg(conflicts_with = "sample")]
    pub file: Option<PathBuf>,

    /// Use the bundled sample dataset
    #[arg(long)]
    pub sample: bool,
}

/// A loaded, cleaned and analyzed dataset
pub struct LoadedDataset {
    pub raw: DataTable,
    pub cleaned: CleanedDataset,
    pub analysis: Analysis,
}

impl DataSource {
    fn read(&self, analysis_type: AnalysisType) -> FinsightResult<DataTable> {
        match &self.file {
            Some(path) if !self.sample => read_csv_path(path),
            _ => {
                info!(sample = analysis_type.sample_file_name(), "Using bundled sample data");
                read_csv_str(analysis_type.sample_csv())
            }
        }
    }
}

/// Read, clean and analyze a dataset
///
/// On a data error the expected CSV layout for the type is printed to
/// stderr before the error is returned.
pub fn load_dataset(
    source: &DataSource,
    kind: DatasetKind,
    settings: &Settings,
) -> FinsightResult<LoadedDataset> {
    if source.file.is_none() && !source.sample {
        return Err(FinsightError::Validation(
            "Provide a CSV file or use --sample to load the bundled sample data".into(),
        ));
    }

    let analysis_type = AnalysisType::from(kind);
    let result = source.read(analysis_type).and_then(|raw| {
        let cleaned = clean(&raw, analysis_type, &settings.date_format)?;
        let analysis = Analysis::run(&cleaned.data);
        Ok(LoadedDataset {
            raw,
            cleaned,
            analysis,
        })
    });

    if let Err(err) = &result {
        if err.is_data_error() {
            eprintln!("{}", expected_format_hint(analysis_type));
        }
    }
    result
}

/// Message shown when a file cannot be processed as `analysis_type`
pub fn expected_format_hint(analysis_type: AnalysisType) -> String {
    format!(
        "Error processing {} data. Please make sure your CSV file has the expected format:\n{}",
        analysis_type,
        analysis_type.expected_format().trim_end()
    )
}
