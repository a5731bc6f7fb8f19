//! Library target for the budgetkurve CLI so integration tests can reach
//! the configuration plumbing and command runners directly.
pub mod check;
pub mod render;
