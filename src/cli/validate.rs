//! The `validate` command

use std::path::Path;

use tracing::debug;

use crate::config::Settings;
use crate::display::format_validation_report;
use crate::error::FinsightResult;
use crate::services::ingest::read_csv_path;
use crate::services::validate_structure;

/// Validate a CSV file and print the report
///
/// Returns whether the file is valid.
pub fn handle_validate_command(settings: &Settings, file: &Path) -> FinsightResult<bool> {
    let table = read_csv_path(file)?;
    let report = validate_structure(&table, &settings.date_format);
    debug!(errors = report.errors.len(), "Validated {}", file.display());

    print!("{}", format_validation_report(&report));
    Ok(report.is_valid())
}
