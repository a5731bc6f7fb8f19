//! Deviation geometry between the budget and actuals lines.
//!
//! The renderer shades the area between the two lines wherever the month is
//! active, split into maximal runs where the actuals stay strictly on one
//! side of the budget. Runs are cut at months where the two values are
//! exactly equal and at the interpolated crossing point when the sign flips
//! between two consecutive active months. Inactive months are skipped and
//! the shading bridges linearly across the gap.
use crate::table::{BudgetTable, MONTHS_PER_YEAR};

/// Direction of a shaded deviation region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviationKind {
    /// Actuals run below budget; shaded red.
    Deficit,
    /// Actuals run above budget; shaded green.
    Surplus,
}

impl DeviationKind {
    /// Legend text for regions of this kind.
    pub fn label(&self) -> &'static str {
        match self {
            DeviationKind::Deficit => "Afvigelse (n)",
            DeviationKind::Surplus => "Afvigelse (p)",
        }
    }
}

/// One vertex of a shaded region: an x position in month units and the two
/// edge values there. At region boundaries `budget == actual`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadePoint {
    pub x: f64,
    pub budget: f64,
    pub actual: f64,
}

/// A maximal run of the shaded band on one side of the budget line.
///
/// A region with a single point is degenerate (an isolated active month
/// with nothing to bridge to); it rasterizes to nothing but is kept so the
/// region list mirrors the activity structure of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadeRegion {
    pub kind: DeviationKind,
    pub points: Vec<ShadePoint>,
}

/// Compute the shaded regions between the budget and actuals lines.
///
/// Regions of different kinds never overlap; two adjacent regions share at
/// most a zero-width boundary point where the lines meet.
pub fn shade_regions(table: &BudgetTable) -> Vec<ShadeRegion> {
    let points: Vec<ShadePoint> = (0..MONTHS_PER_YEAR)
        .filter(|&m| table.is_active(m))
        .map(|m| ShadePoint {
            x: m as f64,
            budget: table.budget[m],
            actual: table.actual[m],
        })
        .collect();

    let mut regions: Vec<ShadeRegion> = Vec::new();
    let mut current: Option<ShadeRegion> = None;

    for (idx, &point) in points.iter().enumerate() {
        let side = side_of(point.actual - point.budget);

        if idx == 0 {
            if let Some(kind) = side {
                current = Some(ShadeRegion {
                    kind,
                    points: vec![point],
                });
            }
            continue;
        }

        let prev = points[idx - 1];
        let prev_side = side_of(prev.actual - prev.budget);

        match (prev_side, side) {
            (Some(prev_kind), Some(kind)) if prev_kind == kind => {
                if let Some(region) = current.as_mut() {
                    region.points.push(point);
                }
            }
            (Some(_), Some(kind)) => {
                // Sign flip: split both regions at the exact crossing.
                let crossing = crossing_point(prev, point);
                if let Some(mut region) = current.take() {
                    region.points.push(crossing);
                    regions.push(region);
                }
                current = Some(ShadeRegion {
                    kind,
                    points: vec![crossing, point],
                });
            }
            (Some(_), None) => {
                // The lines meet exactly here; the point closes the run.
                if let Some(mut region) = current.take() {
                    region.points.push(point);
                    regions.push(region);
                }
            }
            (None, Some(kind)) => {
                // The run opens at the previous equal point, zero width.
                current = Some(ShadeRegion {
                    kind,
                    points: vec![prev, point],
                });
            }
            (None, None) => {}
        }
    }

    if let Some(region) = current.take() {
        regions.push(region);
    }

    regions
}

/// A bold per-month annotation with the signed whole-number deviation.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviationLabel {
    /// Month index, 0 = January.
    pub month: usize,
    /// Signed whole-number text, e.g. "+5", "-3" or "0".
    pub text: String,
    /// Vertical midpoint between the budget and actuals values.
    pub y: f64,
}

/// One annotation per active month, placed midway between the two lines.
pub fn deviation_labels(table: &BudgetTable) -> Vec<DeviationLabel> {
    (0..MONTHS_PER_YEAR)
        .filter(|&m| table.is_active(m))
        .map(|m| {
            let budget = table.budget[m];
            let actual = table.actual[m];
            DeviationLabel {
                month: m,
                text: format_delta(actual - budget),
                y: (actual + budget) / 2.0,
            }
        })
        .collect()
}

/// Format a deviation as a whole number truncated toward zero, with an
/// explicit `+` on positive values and no sign on zero.
pub fn format_delta(delta: f64) -> String {
    let whole = delta as i64;
    if whole > 0 {
        format!("+{}", whole)
    } else {
        format!("{}", whole)
    }
}

fn side_of(delta: f64) -> Option<DeviationKind> {
    if delta > 0.0 {
        Some(DeviationKind::Surplus)
    } else if delta < 0.0 {
        Some(DeviationKind::Deficit)
    } else {
        None
    }
}

/// Exact point where the two linearly interpolated edges meet between two
/// points with deltas of opposite sign.
fn crossing_point(p: ShadePoint, q: ShadePoint) -> ShadePoint {
    let dp = p.actual - p.budget;
    let dq = q.actual - q.budget;
    let t = dp / (dp - dq);
    let x = p.x + t * (q.x - p.x);
    let y = p.budget + t * (q.budget - p.budget);
    ShadePoint {
        x,
        budget: y,
        actual: y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_delta_truncates_toward_zero() {
        assert_eq!(format_delta(4.9), "+4");
        assert_eq!(format_delta(-4.9), "-4");
        assert_eq!(format_delta(0.0), "0");
    }

    #[test]
    fn crossing_point_symmetric_deltas() {
        let p = ShadePoint {
            x: 0.0,
            budget: 10.0,
            actual: 8.0,
        };
        let q = ShadePoint {
            x: 1.0,
            budget: 10.0,
            actual: 12.0,
        };
        let c = crossing_point(p, q);
        assert!((c.x - 0.5).abs() < 1e-12);
        assert!((c.budget - 10.0).abs() < 1e-12);
        assert_eq!(c.budget, c.actual);
    }

    #[test]
    fn crossing_point_on_sloped_budget() {
        let p = ShadePoint {
            x: 2.0,
            budget: 0.0,
            actual: -3.0,
        };
        let q = ShadePoint {
            x: 4.0,
            budget: 6.0,
            actual: 9.0,
        };
        // Deltas -3 and +3 cross at t = 0.5.
        let c = crossing_point(p, q);
        assert!((c.x - 3.0).abs() < 1e-12);
        assert!((c.budget - 3.0).abs() < 1e-12);
        assert_eq!(c.budget, c.actual);
    }
}
