//! The `analyze` command
//!
//! Load a dataset, show a preview, render the analysis and optionally ask
//! for AI insights.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing::info;

use super::{load_dataset, DataSource, DatasetKind};
use crate::ai::OpenAiClient;
use crate::config::Settings;
use crate::display::{format_analysis, format_cleaning_summary, format_data_preview};
use crate::display::report::format_section;
use crate::error::{FinsightError, FinsightResult};
use crate::export::{export_analysis_json, export_analysis_yaml, export_cleaned_csv, AnalysisExport};
use crate::services::InsightService;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tables and text charts
    #[default]
    Text,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

/// Arguments for `analyze`
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Kind of dataset
    #[arg(value_enum)]
    pub kind: DatasetKind,

    #[command(flatten)]
    pub source: DataSource,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Write the cleaned data to a CSV file
    #[arg(long, value_name = "PATH")]
    pub cleaned_output: Option<PathBuf>,

    /// Number of raw rows to preview (defaults to the configured value)
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Generate an AI report for the analysis
    #[arg(long)]
    pub insights: bool,

    /// Ask the AI a question about the data
    #[arg(long, value_name = "QUESTION")]
    pub ask: Option<String>,
}

/// Handle the analyze command
pub fn handle_analyze_command(settings: &Settings, args: AnalyzeArgs) -> FinsightResult<()> {
    // The key is checked before anything is read or written
    let wants_ai = args.insights || args.ask.is_some();
    let client = if wants_ai {
        Some(OpenAiClient::from_env(&settings.ai)?)
    } else {
        None
    };

    let loaded = load_dataset(&args.source, args.kind, settings)?;
    let symbol = &settings.currency_symbol;

    if let Some(path) = &args.cleaned_output {
        let file = File::create(path).map_err(|e| {
            FinsightError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        export_cleaned_csv(&loaded.cleaned, BufWriter::new(file))?;
        info!(path = %path.display(), "Wrote cleaned data");
    }

    match args.format {
        OutputFormat::Text => {
            let rows = args.rows.unwrap_or(settings.preview_rows);
            print!("{}", format_section("Data Preview", 60));
            println!("{}\n", format_data_preview(&loaded.raw, rows));
            print!("{}", format_cleaning_summary(&loaded.cleaned));
            if let Some(path) = &args.cleaned_output {
                println!("Cleaned data written to: {}", path.display());
            }
            println!();
            print!("{}", format_analysis(&loaded.analysis, symbol));

            if let Some(client) = &client {
                let service = InsightService::new(client, settings);
                if args.insights {
                    let report = service.report(&loaded.analysis)?;
                    println!();
                    print!("{}", format_section("AI Insights", 60));
                    println!("{}", report);
                }
                if let Some(question) = &args.ask {
                    let answer = service.answer_question(&loaded.analysis, question)?;
                    println!();
                    print!("{}", format_section("AI Answer", 60));
                    println!("{}", answer);
                }
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let mut export = AnalysisExport::new(&loaded.cleaned, &loaded.analysis);
            if let Some(client) = &client {
                let service = InsightService::new(client, settings);
                if args.insights {
                    export.insights = Some(service.report(&loaded.analysis)?);
                }
                if let Some(question) = &args.ask {
                    export.answer = Some(service.answer_question(&loaded.analysis, question)?);
                }
            }

            let stdout = io::stdout();
            let mut writer = stdout.lock();
            if args.format == OutputFormat::Json {
                export_analysis_json(&export, &mut writer)?;
            } else {
                export_analysis_yaml(&export, &mut writer)?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
