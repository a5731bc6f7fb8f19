//! Data structures for the twelve-month budget table.
//!
//! This module defines `MonthSeries` and `BudgetTable`, the fixed-shape
//! record the rest of the crate operates on, together with the month-name
//! and column-name constants shared by the reader and the renderer.
use std::ops::Index;

use crate::error::ChartError;

/// Number of rows every input table carries, January through December.
pub const MONTHS_PER_YEAR: usize = 12;

/// Danish month names used for the x-axis ticks, in calendar order.
pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "Januar",
    "Februar",
    "Marts",
    "April",
    "Maj",
    "Juni",
    "Juli",
    "August",
    "September",
    "Oktober",
    "November",
    "December",
];

/// Column holding the budgeted hours per month.
pub const COLUMN_BUDGET: &str = "Budget";
/// Column holding the recorded hours per month.
pub const COLUMN_ACTUAL: &str = "Regnskab";
/// Column holding last year's corrected actuals, plotted as reference.
pub const COLUMN_PRIOR_YEAR: &str = "Regnskab t-1";

/// All required columns, in the order missing ones are reported.
pub const REQUIRED_COLUMNS: [&str; 3] = [COLUMN_BUDGET, COLUMN_ACTUAL, COLUMN_PRIOR_YEAR];

/// Exactly twelve monthly values, index 0 = January. `NaN` marks a cell with
/// no data.
#[derive(Debug, Clone)]
pub struct MonthSeries {
    values: [f64; MONTHS_PER_YEAR],
}

impl MonthSeries {
    pub fn new(values: [f64; MONTHS_PER_YEAR]) -> Self {
        Self { values }
    }

    /// Build a series from a slice, which must hold exactly twelve values.
    pub fn from_slice(values: &[f64]) -> Result<Self, ChartError> {
        if values.len() != MONTHS_PER_YEAR {
            return Err(ChartError::MalformedInput(format!(
                "expected {} monthly values, found {}",
                MONTHS_PER_YEAR,
                values.len()
            )));
        }
        let mut data = [f64::NAN; MONTHS_PER_YEAR];
        data.copy_from_slice(values);
        Ok(Self { values: data })
    }

    /// True when the month holds a value (not `NaN`).
    pub fn has_value(&self, month: usize) -> bool {
        !self.values[month].is_nan()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl Index<usize> for MonthSeries {
    type Output = f64;

    fn index(&self, month: usize) -> &f64 {
        &self.values[month]
    }
}

/// The validated input table: budget, recorded actuals, and last year's
/// corrected actuals over one calendar year.
///
/// A recorded value of exactly zero is treated the same as a missing cell:
/// the month counts as not yet reported and is excluded from shading and
/// labels. A genuinely zero-hour month is indistinguishable from an
/// unreported one under this rule.
#[derive(Debug, Clone)]
pub struct BudgetTable {
    /// Budgeted hours; may hold `NaN` for months without a budget.
    pub budget: MonthSeries,
    /// Recorded hours; zero and `NaN` both mean no data yet.
    pub actual: MonthSeries,
    /// Last year's actuals, corrected for staffing level by the caller.
    /// Plotted as a reference only, never shaded or labelled.
    pub prior_year: MonthSeries,
}

impl BudgetTable {
    pub fn new(budget: MonthSeries, actual: MonthSeries, prior_year: MonthSeries) -> Self {
        Self {
            budget,
            actual,
            prior_year,
        }
    }

    /// A month is active when both budget and actuals are present and the
    /// actuals are non-zero. Only active months are shaded and labelled.
    pub fn is_active(&self, month: usize) -> bool {
        self.budget.has_value(month)
            && self.actual.has_value(month)
            && self.actual[month] != 0.0
    }

    /// Per-month activity flags, January through December.
    pub fn active_months(&self) -> [bool; MONTHS_PER_YEAR] {
        let mut active = [false; MONTHS_PER_YEAR];
        for (month, flag) in active.iter_mut().enumerate() {
            *flag = self.is_active(month);
        }
        active
    }
}
