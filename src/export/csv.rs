//! CSV Export functionality
//!
//! Writes cleaned datasets back out with normalized values.

use std::io::Write;

use crate::error::{FinsightError, FinsightResult};
use crate::models::DataTable;
use crate::services::CleanedDataset;

/// Export a cleaned dataset to CSV
pub fn export_cleaned_csv<W: Write>(cleaned: &CleanedDataset, writer: W) -> FinsightResult<()> {
    export_table_csv(&cleaned.to_table(), writer)
}

/// Export any table to CSV, header first
pub fn export_table_csv<W: Write>(table: &DataTable, writer: W) -> FinsightResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.headers())?;
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer
        .flush()
        .map_err(|e| FinsightError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisType;
    use crate::services::ingest::read_csv_str;
    use crate::services::clean;

    #[test]
    fn test_cleaned_csv_output() {
        let table = read_csv_str(
            "Category,Amount,Date\nSalary,\"$5,000\",03/01/2024\nRent,oops,2024-03-02\nRent,-1800.5,2024-03-02\n",
        )
        .unwrap();
        let cleaned = clean(&table, AnalysisType::PersonalFinance, "%Y-%m-%d").unwrap();

        let mut out = Vec::new();
        export_cleaned_csv(&cleaned, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Category,Amount,Date\nSalary,5000.00,2024-03-01\nRent,-1800.50,2024-03-02\n"
        );
    }

    #[test]
    fn test_fields_with_commas_are_quoted() {
        let table = DataTable::new(
            vec!["metric".into(), "amount_month_usd".into()],
            vec![vec!["Fees, misc".into(), "10.00".into()]],
        );
        let mut out = Vec::new();
        export_table_csv(&table, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "metric,amount_month_usd\n\"Fees, misc\",10.00\n"
        );
    }
}
