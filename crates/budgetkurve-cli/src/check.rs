//! Input validation for the budgetkurve CLI.
use std::path::Path;

use anyhow::{Context, Result};

use budgetkurve_chart::error::ChartError;
use budgetkurve_chart::io::{read_table_with_config, TableReaderConfig};
use budgetkurve_chart::table::MONTHS_PER_YEAR;

/// Validate a monthly table and report the result on stdout.
///
/// Missing required columns are listed by name so the user can fix the
/// header instead of guessing from a generic failure.
pub fn run_check<P: AsRef<Path>>(input: P, reader_config: &TableReaderConfig) -> Result<()> {
    match read_table_with_config(&input, reader_config) {
        Ok(table) => {
            let active = table.active_months().iter().filter(|&&f| f).count();
            println!(
                "OK: {} ({} of {} months active)",
                input.as_ref().display(),
                active,
                MONTHS_PER_YEAR
            );
            Ok(())
        }
        Err(ChartError::MissingColumns(names)) => {
            println!("Missing required columns: {}", names.join(", "));
            anyhow::bail!("input table is missing required columns")
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to validate: {}", input.as_ref().display()))
        }
    }
}
