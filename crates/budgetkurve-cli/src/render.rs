//! CLI rendering helpers for budgetkurve-chart.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use budgetkurve_chart::chart::render_with_options;
use budgetkurve_chart::config::ChartOptions;
use budgetkurve_chart::export::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE};
use budgetkurve_chart::io::{read_table_with_config, TableReaderConfig};

/// Parameters for rendering a chart from a delimited monthly table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub chart: ChartOptions,
    /// Column delimiter name: "comma", "semicolon" or "tab". Detected from
    /// the header row when unset.
    pub delimiter: Option<String>,
    /// Output PNG path. Defaults to the fixed export file name.
    pub output: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            chart: ChartOptions::default(),
            delimiter: None,
            output: None,
        }
    }
}

impl RenderConfig {
    /// Apply command line overrides on top of the loaded configuration.
    pub fn apply_arguments(&mut self, matches: &ArgMatches) {
        if let Some(title) = matches.get_one::<String>("title") {
            self.chart.title = title.clone();
        }
        if let Some(output) = matches.get_one::<PathBuf>("output_file") {
            self.output = Some(output.clone());
        }
        if let Some(delimiter) = matches.get_one::<String>("delimiter") {
            self.delimiter = Some(delimiter.clone());
        }
    }

    /// Resolve the configured delimiter name to its byte.
    pub fn delimiter_byte(&self) -> Result<Option<u8>> {
        match self.delimiter.as_deref() {
            Some(name) => Ok(Some(delimiter_from_name(name)?)),
            None => Ok(None),
        }
    }

    /// Output path, falling back to the fixed export file name.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPORT_FILE_NAME))
    }
}

/// Map a delimiter name accepted on the command line to its byte.
pub fn delimiter_from_name(name: &str) -> Result<u8> {
    match name {
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "tab" => Ok(b'\t'),
        other => anyhow::bail!("Unknown delimiter name: {}", other),
    }
}

/// Load a render configuration from a JSON file.
pub fn load_render_config<P: AsRef<Path>>(path: P) -> Result<RenderConfig> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config: {}", path.as_ref().display()))?;
    let config: RenderConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.as_ref().display()))?;
    Ok(config)
}

/// Read a monthly table and write the rendered chart as a PNG file.
///
/// Returns the path the chart was written to.
pub fn run_render<P: AsRef<Path>>(input: P, config: &RenderConfig) -> Result<PathBuf> {
    let reader_config = TableReaderConfig {
        delimiter: config.delimiter_byte()?,
    };
    let table = read_table_with_config(&input, &reader_config)
        .with_context(|| format!("Failed to read table: {}", input.as_ref().display()))?;

    let image = render_with_options(&table, &config.chart)?;
    let bytes = image.to_png_bytes()?;

    let output = config.output_path();
    std::fs::write(&output, &bytes)
        .with_context(|| format!("Failed to write chart: {}", output.display()))?;
    eprintln!(
        "[Budgetkurve::Render] Wrote {} ({} bytes, {})",
        output.display(),
        bytes.len(),
        EXPORT_MIME_TYPE
    );
    Ok(output)
}
