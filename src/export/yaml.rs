//! YAML Export functionality
//!
//! Human-readable analysis export.

use std::io::Write;

use crate::error::{FinsightError, FinsightResult};
use crate::export::json::AnalysisExport;

/// Export an analysis as YAML with a short comment header
pub fn export_analysis_yaml<W: Write>(
    export: &AnalysisExport<'_>,
    mut writer: W,
) -> FinsightResult<()> {
    writeln!(writer, "# finsight {} analysis", export.analysis_type)
        .map_err(|e| FinsightError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| FinsightError::Export(e.to_string()))?;
    writeln!(writer, "# Amounts are integer {}", export.amount_unit)
        .map_err(|e| FinsightError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| FinsightError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| FinsightError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisType;
    use crate::services::ingest::read_csv_str;
    use crate::services::{clean, Analysis};

    #[test]
    fn test_yaml_export() {
        let table = read_csv_str(
            "Asset,Type,Purchase_Date,Purchase_Price,Current_Value,Annual_Return\n\
             AAPL,Stock,2024-03-01,150.25,180.50,20.13\n",
        )
        .unwrap();
        let cleaned = clean(&table, AnalysisType::InvestmentPortfolio, "%Y-%m-%d").unwrap();
        let analysis = Analysis::run(&cleaned.data);

        let mut out = Vec::new();
        export_analysis_yaml(&AnalysisExport::new(&cleaned, &analysis), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# finsight Investment Portfolio analysis\n"));
        let body: serde_yaml::Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(body["analysis"]["type"].as_str(), Some("investment_portfolio"));
        assert!(text.contains("# Amounts are integer cents\n"));
        assert_eq!(body["amount_unit"].as_str(), Some("cents"));
        assert_eq!(body["analysis"]["total_gain_loss"].as_i64(), Some(3025));
    }
}
