//! The `sample` command

use std::path::Path;

use super::DatasetKind;
use crate::error::{FinsightError, FinsightResult};
use crate::models::AnalysisType;

/// Print a bundled sample dataset, or write it to `output`
pub fn handle_sample_command(kind: DatasetKind, output: Option<&Path>) -> FinsightResult<()> {
    let analysis_type = AnalysisType::from(kind);
    let csv = analysis_type.sample_csv();

    match output {
        Some(path) => {
            std::fs::write(path, csv).map_err(|e| {
                FinsightError::Export(format!("Failed to write {}: {}", path.display(), e))
            })?;
            println!("{} sample written to: {}", analysis_type, path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_written_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("portfolio.csv");

        handle_sample_command(DatasetKind::Portfolio, Some(&path)).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Asset,Type,Purchase_Date"));
    }
}
