use serde::{Deserialize, Serialize};

/// Caption used when the caller does not supply one.
pub const DEFAULT_TITLE: &str = "Budget vs. Regnskab (med 2024 som reference)";
/// Default output bitmap width in pixels.
pub const DEFAULT_WIDTH: u32 = 1000;
/// Default output bitmap height in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Rendering options for the deviation chart.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct ChartOptions {
    /// Caption drawn above the plot area.
    pub title: String,
    /// Output bitmap width in pixels.
    pub width: u32,
    /// Output bitmap height in pixels.
    pub height: u32,
}

impl ChartOptions {
    /// Default dimensions with a caller-provided caption.
    pub fn with_title(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}
