//! Delimited monthly-table reader.
//!
//! Accepts comma, semicolon or tab separated text with a header row. The
//! three required columns are matched by their exact names; any further
//! columns (a month-name column, notes) are ignored. Cells may be empty or
//! `nan` for missing data, and a decimal comma is accepted in fields that
//! carry no decimal point, as Danish spreadsheet exports commonly do.
use std::fs;
use std::path::Path;

use csv::StringRecord;
use log::debug;

use crate::error::ChartError;
use crate::table::{BudgetTable, MonthSeries, MONTHS_PER_YEAR, REQUIRED_COLUMNS};

/// Configuration for reading a delimited monthly table.
#[derive(Debug, Clone, Default)]
pub struct TableReaderConfig {
    /// Column delimiter. When `None` the delimiter is detected from the
    /// header row: `;` wins over tab, which wins over `,`.
    pub delimiter: Option<u8>,
}

/// Read a monthly table from a delimited text file.
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<BudgetTable, ChartError> {
    read_table_with_config(path, &TableReaderConfig::default())
}

/// Read a monthly table from a file using a custom reader configuration.
pub fn read_table_with_config<P: AsRef<Path>>(
    path: P,
    config: &TableReaderConfig,
) -> Result<BudgetTable, ChartError> {
    let content = fs::read_to_string(&path).map_err(|e| {
        ChartError::MalformedInput(format!("failed to read {}: {}", path.as_ref().display(), e))
    })?;
    parse_table(&content, config)
}

/// Parse a monthly table from delimited text.
pub fn parse_table(content: &str, config: &TableReaderConfig) -> Result<BudgetTable, ChartError> {
    let delimiter = config.delimiter.unwrap_or_else(|| detect_delimiter(content));
    debug!("Reading monthly table with delimiter {:?}", delimiter as char);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();

    let mut missing = Vec::new();
    let mut indices = [0usize; REQUIRED_COLUMNS.len()];
    for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
        match find_column(&headers, name) {
            Some(idx) => indices[slot] = idx,
            None => missing.push((*name).to_string()),
        }
    }
    if !missing.is_empty() {
        return Err(ChartError::MissingColumns(missing));
    }

    let mut columns: [Vec<f64>; REQUIRED_COLUMNS.len()] = Default::default();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| {
            ChartError::MalformedInput(format!("failed to read row {}: {}", row_idx + 1, e))
        })?;
        for (slot, name) in REQUIRED_COLUMNS.iter().enumerate() {
            let raw = record.get(indices[slot]).unwrap_or_default();
            columns[slot].push(parse_cell(raw, name, row_idx + 1)?);
        }
    }

    if columns[0].len() != MONTHS_PER_YEAR {
        return Err(ChartError::MalformedInput(format!(
            "expected {} month rows, found {}",
            MONTHS_PER_YEAR,
            columns[0].len()
        )));
    }

    let [budget, actual, prior_year] = columns;
    Ok(BudgetTable::new(
        MonthSeries::from_slice(&budget)?,
        MonthSeries::from_slice(&actual)?,
        MonthSeries::from_slice(&prior_year)?,
    ))
}

/// Exact header match, tolerating surrounding whitespace and a UTF-8 BOM
/// on the first cell.
fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
}

/// Parse one numeric cell. Empty cells and `nan` mean missing.
fn parse_cell(raw: &str, column: &str, row: usize) -> Result<f64, ChartError> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    if let Ok(parsed) = value.parse::<f64>() {
        return Ok(parsed);
    }
    if value.contains(',') && !value.contains('.') {
        if let Ok(parsed) = value.replace(',', ".").parse::<f64>() {
            return Ok(parsed);
        }
    }
    Err(ChartError::MalformedInput(format!(
        "column '{}', row {}: invalid number '{}'",
        column, row, value
    )))
}

fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    if header.contains(';') {
        b';'
    } else if header.contains('\t') {
        b'\t'
    } else {
        b','
    }
}
