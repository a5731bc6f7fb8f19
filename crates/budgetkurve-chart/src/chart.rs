//! Chart rendering for the budget vs. actuals deviation chart.
//!
//! `render` draws three series over the twelve-month axis: the budget line
//! (blue, circular markers), the recorded actuals (green, circular markers)
//! and last year's corrected actuals as a dashed reference behind them. The
//! area between budget and actuals is shaded red or green per deviation
//! region, and every active month carries a bold signed label at the
//! midpoint between the two lines.
//!
//! Rendering is pure: it draws into a fresh in-memory RGB buffer and
//! performs no I/O. Text uses the bundled DejaVu faces so no system font
//! configuration is required.
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontDesc, FontFamily, FontStyle, FontTransform};

use crate::config::ChartOptions;
use crate::deviation::{deviation_labels, shade_regions, DeviationKind};
use crate::error::ChartError;
use crate::export::ChartImage;
use crate::table::{BudgetTable, MONTHS_PER_YEAR, MONTH_NAMES};

/// Line color for the budget series.
const BUDGET_COLOR: RGBColor = RGBColor(31, 119, 180);
/// Line color for the actuals series, also used for surplus shading.
const ACTUAL_COLOR: RGBColor = RGBColor(0, 128, 0);
/// Opacity of the deviation shading and the reference overlay.
const FILL_ALPHA: f64 = 0.3;

static FONT_REGULAR: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static FONT_BOLD: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

static FONTS: OnceLock<Result<(), String>> = OnceLock::new();

/// Register the bundled DejaVu faces under the `sans-serif` family.
fn ensure_fonts() -> Result<(), ChartError> {
    let status = FONTS.get_or_init(|| {
        register_font("sans-serif", FontStyle::Normal, FONT_REGULAR)
            .and_then(|_| register_font("sans-serif", FontStyle::Bold, FONT_BOLD))
            .map_err(|_| String::from("invalid bundled font data"))
    });
    match status {
        Ok(()) => Ok(()),
        Err(reason) => Err(ChartError::Render(reason.clone())),
    }
}

/// Render the deviation chart with default dimensions and the given caption.
pub fn render(table: &BudgetTable, title: &str) -> Result<ChartImage, ChartError> {
    render_with_options(table, &ChartOptions::with_title(title))
}

/// Render the deviation chart into a fresh in-memory RGB image.
///
/// The same table and options always produce byte-identical output.
pub fn render_with_options(
    table: &BudgetTable,
    options: &ChartOptions,
) -> Result<ChartImage, ChartError> {
    if options.width == 0 || options.height == 0 {
        return Err(ChartError::Render(format!(
            "image dimensions must be non-zero, got {}x{}",
            options.width, options.height
        )));
    }
    ensure_fonts()?;

    let (width, height) = (options.width, options.height);
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_chart(&root, table, &options.title).map_err(|e| ChartError::Render(e.to_string()))?;
    }

    ChartImage::from_raw(width, height, buffer)
}

fn draw_chart(
    root: &DrawingArea<BitMapBackend, Shift>,
    table: &BudgetTable,
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    root.fill(&WHITE)?;

    let (y_min, y_max) = y_range(table);

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 18).into_font())
        .margin(12)
        .x_label_area_size(95)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..11.5f64, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_labels(MONTHS_PER_YEAR)
        .x_label_formatter(&month_tick_label)
        .x_label_style(
            ("sans-serif", 14)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_formatter(&|v: &f64| format!("{:.0}", v))
        .x_desc("Måned")
        .y_desc("Timer")
        .axis_desc_style(("sans-serif", 15).into_font())
        .bold_line_style(BLACK.mix(0.15).stroke_width(1))
        .light_line_style(TRANSPARENT.stroke_width(1))
        .draw()?;

    let mut legend_entries = 0usize;

    // Reference overlay first: it sits behind the shading and both lines.
    for (idx, run) in finite_runs(table.prior_year.as_slice()).iter().enumerate() {
        let series = chart.draw_series(DashedLineSeries::new(
            run.iter().copied(),
            6,
            4,
            BLACK.mix(FILL_ALPHA).stroke_width(2),
        ))?;
        if idx == 0 {
            legend_entries += 1;
            series
                .label("Korrigeret regnskab for sidste år")
                .legend(|(x, y)| {
                    PathElement::new(
                        vec![(x, y), (x + 18, y)],
                        BLACK.mix(FILL_ALPHA).stroke_width(2),
                    )
                });
        }
        chart.draw_series(run.iter().map(|&(x, y)| {
            EmptyElement::at((x, y))
                + Polygon::new(
                    vec![(0, -3), (3, 0), (0, 3), (-3, 0)],
                    BLACK.mix(FILL_ALPHA).filled(),
                )
        }))?;
    }

    let mut deficit_in_legend = false;
    let mut surplus_in_legend = false;
    for region in &shade_regions(table) {
        if region.points.len() < 2 {
            continue;
        }
        // One closed band: actuals edge forward, budget edge reversed.
        let mut polygon: Vec<(f64, f64)> =
            region.points.iter().map(|p| (p.x, p.actual)).collect();
        polygon.extend(region.points.iter().rev().map(|p| (p.x, p.budget)));

        let fill = match region.kind {
            DeviationKind::Deficit => RED.mix(FILL_ALPHA),
            DeviationKind::Surplus => ACTUAL_COLOR.mix(FILL_ALPHA),
        };
        let series = chart.draw_series(std::iter::once(Polygon::new(polygon, fill.filled())))?;
        match region.kind {
            DeviationKind::Deficit if !deficit_in_legend => {
                deficit_in_legend = true;
                legend_entries += 1;
                series.label(region.kind.label()).legend(|(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 16, y + 5)], RED.mix(FILL_ALPHA).filled())
                });
            }
            DeviationKind::Surplus if !surplus_in_legend => {
                surplus_in_legend = true;
                legend_entries += 1;
                series.label(region.kind.label()).legend(|(x, y)| {
                    Rectangle::new(
                        [(x, y - 5), (x + 16, y + 5)],
                        ACTUAL_COLOR.mix(FILL_ALPHA).filled(),
                    )
                });
            }
            _ => {}
        }
    }

    for (idx, run) in finite_runs(table.budget.as_slice()).iter().enumerate() {
        let series = chart.draw_series(LineSeries::new(
            run.iter().copied(),
            BUDGET_COLOR.stroke_width(3),
        ))?;
        if idx == 0 {
            legend_entries += 1;
            series.label("Budget").legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], BUDGET_COLOR.stroke_width(3))
            });
        }
        chart.draw_series(
            run.iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BUDGET_COLOR.filled())),
        )?;
    }

    for (idx, run) in finite_runs(table.actual.as_slice()).iter().enumerate() {
        let series = chart.draw_series(LineSeries::new(
            run.iter().copied(),
            ACTUAL_COLOR.stroke_width(3),
        ))?;
        if idx == 0 {
            legend_entries += 1;
            series.label("Regnskab").legend(|(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], ACTUAL_COLOR.stroke_width(3))
            });
        }
        chart.draw_series(
            run.iter()
                .map(|&(x, y)| Circle::new((x, y), 4, ACTUAL_COLOR.filled())),
        )?;
    }

    let annotation_style = FontDesc::new(FontFamily::SansSerif, 13.0, FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(
        deviation_labels(table).into_iter().map(|label| {
            Text::new(
                label.text,
                (label.month as f64, label.y),
                annotation_style.clone(),
            )
        }),
    )?;

    if legend_entries > 0 {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85).filled())
            .border_style(BLACK.mix(0.4).stroke_width(1))
            .label_font(("sans-serif", 14).into_font())
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Tick label for the fractional x axis: month names on whole positions,
/// nothing elsewhere.
fn month_tick_label(x: &f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 {
        return String::new();
    }
    let month = nearest as i64;
    if !(0..MONTHS_PER_YEAR as i64).contains(&month) {
        return String::new();
    }
    MONTH_NAMES[month as usize].to_string()
}

/// Split monthly values into runs of consecutive months with data, so lines
/// break at missing cells instead of bridging them.
fn finite_runs(values: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut run: Vec<(f64, f64)> = Vec::new();
    for (month, value) in values.iter().copied().enumerate() {
        if value.is_nan() {
            if !run.is_empty() {
                runs.push(std::mem::take(&mut run));
            }
        } else {
            run.push((month as f64, value));
        }
    }
    if !run.is_empty() {
        runs.push(run);
    }
    runs
}

/// Vertical range covering every finite value of all three series, with a
/// five percent pad. Flat data gets a unit pad; an all-missing table falls
/// back to the unit range.
fn y_range(table: &BudgetTable) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for series in [&table.budget, &table.actual, &table.prior_year] {
        for value in series.iter().filter(|v| v.is_finite()) {
            min = min.min(value);
            max = max.max(value);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}
