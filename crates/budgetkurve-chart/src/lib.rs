//! budgetkurve-chart: annotated budget-vs-actuals deviation charts.
//!
//! This crate turns a twelve-month table of budgeted and recorded hours into
//! a single annotated comparison chart: three plotted series (budget, actuals
//! and last year's corrected actuals as a reference), red/green shading where
//! the actuals run below or above budget, and a bold per-month label with the
//! signed deviation.
//!
//! The chart core is pure: [`chart::render`] takes a validated
//! [`table::BudgetTable`] and returns an in-memory image. All I/O lives at
//! the edges, in [`io`] (delimited table reading) and [`export`] (PNG
//! encoding and saving).
pub mod chart;
pub mod config;
pub mod deviation;
pub mod error;
pub mod export;
pub mod io;
pub mod table;
