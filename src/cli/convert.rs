//! The `convert` command: CSV to JSON rows

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{FinsightError, FinsightResult};
use crate::export::export_rows_json;
use crate::services::ingest::read_csv_path;

/// Convert a CSV file to a JSON array of row objects
///
/// Writes to `output` when given, otherwise to stdout.
pub fn handle_convert_command(file: &Path, output: Option<&Path>, pretty: bool) -> FinsightResult<()> {
    let table = read_csv_path(file)?;

    match output {
        Some(path) => {
            let out = File::create(path).map_err(|e| {
                FinsightError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(out);
            export_rows_json(&table, &mut writer, pretty)?;
            writer.flush()?;
            println!("Converted {} rows to: {}", table.len(), path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            export_rows_json(&table, &mut writer, pretty)?;
            writer.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_convert_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("in.csv");
        let output = temp_dir.path().join("out.json");
        std::fs::write(&input, "Category,Amount\nRent,-1800\n").unwrap();

        handle_convert_command(&input, Some(&output), false).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json[0]["Category"], "Rent");
        assert_eq!(json[0]["Amount"], "-1800");
    }
}
