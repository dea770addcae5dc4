//! JSON Export functionality
//!
//! Serializes analysis results with schema versioning, and converts raw
//! tables to arrays of row objects.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FinsightError, FinsightResult};
use crate::models::{AnalysisType, DataTable};
use crate::services::ingest::table_to_json;
use crate::services::{Analysis, CleanedDataset};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Unit of every money field in an export
pub const AMOUNT_UNIT: &str = "cents";

/// An analysis together with how its input was cleaned
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub analysis_type: AnalysisType,

    /// Money fields are integers in this unit (hundredths of the currency)
    pub amount_unit: &'static str,

    /// Rows kept after cleaning
    pub row_count: usize,

    /// Rows removed during cleaning
    pub dropped_rows: usize,

    pub warnings: &'a [String],

    pub analysis: &'a Analysis,

    /// Generated advisory report, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insights: Option<String>,

    /// Generated answer to a question, when asked
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

impl<'a> AnalysisExport<'a> {
    pub fn new(cleaned: &'a CleanedDataset, analysis: &'a Analysis) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            analysis_type: analysis.analysis_type(),
            amount_unit: AMOUNT_UNIT,
            row_count: cleaned.data.len(),
            dropped_rows: cleaned.dropped_rows,
            warnings: &cleaned.warnings,
            analysis,
            insights: None,
            answer: None,
        }
    }
}

/// Write an analysis export as pretty-printed JSON
pub fn export_analysis_json<W: Write>(
    export: &AnalysisExport<'_>,
    mut writer: W,
) -> FinsightResult<()> {
    serde_json::to_writer_pretty(&mut writer, export)
        .map_err(|e| FinsightError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinsightError::Export(e.to_string()))?;
    Ok(())
}

/// Write a table as a JSON array with one object per row
pub fn export_rows_json<W: Write>(table: &DataTable, mut writer: W, pretty: bool) -> FinsightResult<()> {
    let rows = table_to_json(table);
    let written = if pretty {
        serde_json::to_writer_pretty(&mut writer, &rows)
    } else {
        serde_json::to_writer(&mut writer, &rows)
    };
    written.map_err(|e| FinsightError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinsightError::Export(e.to_string()))?;
    Ok(())
}
