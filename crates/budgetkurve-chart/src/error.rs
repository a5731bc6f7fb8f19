use std::error::Error;
use std::fmt;

/// Custom error type for table loading and chart rendering failures
#[derive(Debug)]
pub enum ChartError {
    /// Required columns absent from the input table, in canonical order.
    MissingColumns(Vec<String>),
    /// Input could not be read or parsed as a twelve-row numeric table.
    MalformedInput(String),
    /// Drawing or image encoding failed.
    Render(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChartError::MissingColumns(names) => {
                write!(f, "Missing required columns: {}", names.join(", "))
            }
            ChartError::MalformedInput(reason) => write!(f, "Malformed input table: {}", reason),
            ChartError::Render(reason) => write!(f, "Chart rendering failed: {}", reason),
        }
    }
}

impl Error for ChartError {}

impl From<csv::Error> for ChartError {
    fn from(err: csv::Error) -> Self {
        ChartError::MalformedInput(err.to_string())
    }
}

impl From<image::ImageError> for ChartError {
    fn from(err: image::ImageError) -> Self {
        ChartError::Render(err.to_string())
    }
}
