//! CSV ingestion
//!
//! Reads CSV input into an in-memory [`DataTable`] and converts tables to
//! JSON row objects.

use std::path::Path;

use csv::ReaderBuilder;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{FinsightError, FinsightResult};
use crate::models::DataTable;

/// Read a CSV file from disk
pub fn read_csv_path(path: &Path) -> FinsightResult<DataTable> {
    if !path.exists() {
        return Err(FinsightError::file_not_found(path.display().to_string()));
    }

    let file = std::fs::File::open(path)
        .map_err(|e| FinsightError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let table = read_csv_from_reader(file)?;
    debug!(path = %path.display(), rows = table.len(), "Loaded CSV");
    Ok(table)
}

/// Read CSV content held in memory
pub fn read_csv_str(content: &str) -> FinsightResult<DataTable> {
    read_csv_from_reader(content.as_bytes())
}

/// Read CSV from any reader; the first record is the header
pub fn read_csv_from_reader<R: std::io::Read>(reader: R) -> FinsightResult<DataTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(FinsightError::Csv("CSV input has no header row".into()));
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| FinsightError::Csv(format!("Error reading CSV record {}: {}", idx + 1, e)))?;
        // Skip fully blank lines
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(DataTable::new(headers, rows))
}

/// Convert each row to a JSON object keyed by column name
pub fn table_to_json(table: &DataTable) -> Vec<Map<String, Value>> {
    (0..table.len())
        .map(|row| {
            table
                .headers()
                .iter()
                .enumerate()
                .map(|(col, header)| (header.clone(), Value::String(table.cell(row, col).to_string())))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_csv_str() {
        let table = read_csv_str("metric,amount_month_usd\nTotal Revenue,\"250,000\"\n\n").unwrap();
        assert_eq!(table.headers(), &["metric", "amount_month_usd"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 1), "250,000");
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let table = read_csv_str("Category,Amount,Date\nRent,-1800\nSalary,5000,2024-03-01,extra\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 2), "");
        assert_eq!(table.cell(1, 2), "2024-03-01");
    }

    #[test]
    fn test_empty_input_is_error() {
        let err = read_csv_str("").unwrap_err();
        assert!(matches!(err, FinsightError::Csv(_)));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_csv_path(&temp_dir.path().join("missing.csv")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_read_csv_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.csv");
        std::fs::write(&path, "a,b\n1,2\n3,4\n").unwrap();

        let table = read_csv_path(&path).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_table_to_json() {
        let table = read_csv_str("metric,amount_month_usd\nTotal Revenue,100000\nGross Profit,40000\n").unwrap();
        let rows = table_to_json(&table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["metric"], "Total Revenue");
        assert_eq!(rows[1]["amount_month_usd"], "40000");
    }
}
