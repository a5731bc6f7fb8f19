//! Integration tests for chart rendering and PNG export.
//!
//! Pixel assertions count exact colors the renderer is known to produce over
//! a white background: the half-transparent deviation fills, the two line
//! colors and the faded reference line. Counts are kept loose so layout
//! changes do not break them.

use budgetkurve_chart::chart::{render, render_with_options};
use budgetkurve_chart::config::{ChartOptions, DEFAULT_TITLE};
use budgetkurve_chart::error::ChartError;
use budgetkurve_chart::export::{ChartImage, EXPORT_FILE_NAME};
use budgetkurve_chart::table::{BudgetTable, MonthSeries};

// The bitmap backend blends with integer alpha: each channel moves by
// delta * floor(0.3 * 256) / 256 = delta * 76 / 256 toward the overlay.
/// Red fill over white: RED blended at alpha 0.3.
const RED_FILL: [u8; 3] = [255, 180, 180];
/// Green fill over white: GREEN (0,128,0) blended at alpha 0.3.
const GREEN_FILL: [u8; 3] = [180, 218, 180];
/// Reference line over white: black blended at alpha 0.3.
const REFERENCE_GRAY: [u8; 3] = [180, 180, 180];
/// Budget line color, drawn opaque.
const BUDGET_BLUE: [u8; 3] = [31, 119, 180];
/// Actuals line color, drawn opaque.
const ACTUAL_GREEN: [u8; 3] = [0, 128, 0];

fn table(budget: [f64; 12], actual: [f64; 12], prior: [f64; 12]) -> BudgetTable {
    BudgetTable::new(
        MonthSeries::new(budget),
        MonthSeries::new(actual),
        MonthSeries::new(prior),
    )
}

fn count_pixels(image: &ChartImage, color: [u8; 3]) -> usize {
    image.as_rgb().pixels().filter(|p| p.0 == color).count()
}

// ---------------------------------------------------------------------------
// ChartOptions
// ---------------------------------------------------------------------------

#[test]
fn options_default_to_the_dashboard_geometry() {
    let options = ChartOptions::default();
    assert_eq!(options.title, DEFAULT_TITLE);
    assert_eq!(options.width, 1000);
    assert_eq!(options.height, 600);
}

#[test]
fn options_fill_missing_json_fields_from_defaults() {
    let options: ChartOptions = serde_json::from_str(r#"{"width": 800}"#).unwrap();
    assert_eq!(options.width, 800);
    assert_eq!(options.height, 600);
    assert_eq!(options.title, DEFAULT_TITLE);
}

#[test]
fn with_title_keeps_default_dimensions() {
    let options = ChartOptions::with_title("Timer 2025");
    assert_eq!(options.title, "Timer 2025");
    assert_eq!(options.width, 1000);
    assert_eq!(options.height, 600);
}

// ---------------------------------------------------------------------------
// Geometry and idempotence
// ---------------------------------------------------------------------------

#[test]
fn default_dimensions() {
    let table = table([100.0; 12], [90.0; 12], [95.0; 12]);
    let image = render(&table, DEFAULT_TITLE).unwrap();
    assert_eq!(image.width(), 1000);
    assert_eq!(image.height(), 600);
}

#[test]
fn custom_dimensions() {
    let table = table([100.0; 12], [90.0; 12], [95.0; 12]);
    let options = ChartOptions {
        width: 640,
        height: 480,
        ..ChartOptions::default()
    };
    let image = render_with_options(&table, &options).unwrap();
    assert_eq!(image.width(), 640);
    assert_eq!(image.height(), 480);
}

#[test]
fn zero_dimensions_are_rejected() {
    let table = table([100.0; 12], [90.0; 12], [95.0; 12]);
    let options = ChartOptions {
        width: 0,
        ..ChartOptions::default()
    };
    match render_with_options(&table, &options) {
        Err(ChartError::Render(_)) => {}
        other => panic!("expected Render error, got {:?}", other),
    }
}

#[test]
fn render_is_byte_identical_for_identical_input() {
    let table = table([100.0; 12], [80.0; 12], [95.0; 12]);
    let first = render(&table, "Idempotens").unwrap();
    let second = render(&table, "Idempotens").unwrap();
    assert_eq!(first.as_rgb().as_raw(), second.as_rgb().as_raw());
    assert_eq!(
        first.to_png_bytes().unwrap(),
        second.to_png_bytes().unwrap()
    );
}

// ---------------------------------------------------------------------------
// Pixel content
// ---------------------------------------------------------------------------

#[test]
fn deficit_year_is_shaded_red() {
    let table = table([100.0; 12], [60.0; 12], [90.0; 12]);
    let image = render(&table, DEFAULT_TITLE).unwrap();
    assert!(
        count_pixels(&image, RED_FILL) > 1000,
        "expected a large red deviation band"
    );
    assert!(count_pixels(&image, GREEN_FILL) < 20);
}

#[test]
fn surplus_year_is_shaded_green() {
    let table = table([100.0; 12], [140.0; 12], [90.0; 12]);
    let image = render(&table, DEFAULT_TITLE).unwrap();
    assert!(
        count_pixels(&image, GREEN_FILL) > 1000,
        "expected a large green deviation band"
    );
    assert!(count_pixels(&image, RED_FILL) < 20);
}

#[test]
fn both_lines_are_drawn_in_their_colors() {
    let table = table([100.0; 12], [80.0; 12], [95.0; 12]);
    let image = render(&table, DEFAULT_TITLE).unwrap();
    assert!(count_pixels(&image, BUDGET_BLUE) > 200);
    assert!(count_pixels(&image, ACTUAL_GREEN) > 200);
}

#[test]
fn equal_lines_leave_no_shading_but_show_the_reference() {
    // Matching budget and actuals with a flat prior-year line at 90.
    let table = table([100.0; 12], [100.0; 12], [90.0; 12]);
    let image = render(&table, DEFAULT_TITLE).unwrap();
    assert!(count_pixels(&image, RED_FILL) < 20);
    assert!(count_pixels(&image, GREEN_FILL) < 20);
    assert!(
        count_pixels(&image, REFERENCE_GRAY) > 200,
        "expected the dashed reference line"
    );
}

#[test]
fn missing_actuals_still_plot_the_budget_line() {
    let table = table([100.0; 12], [f64::NAN; 12], [90.0; 12]);
    let image = render(&table, DEFAULT_TITLE).unwrap();
    assert!(count_pixels(&image, BUDGET_BLUE) > 200);
    assert!(count_pixels(&image, RED_FILL) < 20);
    assert!(count_pixels(&image, GREEN_FILL) < 20);
}

#[test]
fn fully_empty_table_renders_without_panicking() {
    let table = table([f64::NAN; 12], [f64::NAN; 12], [f64::NAN; 12]);
    let image = render(&table, DEFAULT_TITLE).unwrap();
    assert_eq!(image.width(), 1000);
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[test]
fn png_bytes_carry_the_signature() {
    let table = table([100.0; 12], [90.0; 12], [95.0; 12]);
    let bytes = render(&table, DEFAULT_TITLE).unwrap().to_png_bytes().unwrap();
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    assert_eq!(&bytes[12..16], b"IHDR");
}

#[test]
fn save_png_writes_the_default_file_name() {
    let table = table([100.0; 12], [90.0; 12], [95.0; 12]);
    let image = render(&table, DEFAULT_TITLE).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);
    image.save_png(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.len() > 1000, "wrote {} bytes", bytes.len());
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
}
