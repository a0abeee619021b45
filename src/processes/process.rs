// src/processes/process.rs
use crate::error::RovResult;
use statrs::distribution::ContinuousCDF;

/// A stochastic process driving the net-cashflow paths.
///
/// `step` advances one sub-step given a standard-normal shock; `marginal`
/// exposes the distribution of the process at a horizon for diagnostics.
pub trait CashflowProcess: Send + Sync {
    /// Advance `value` by one sub-step of length `dt` under `shock` ~ N(0,1)
    fn step(&self, value: f64, dt: f64, shock: f64) -> f64;

    /// Marginal distribution at horizon `t` (in period units) starting from
    /// `start`. Requires positive volatility; the degenerate zero-vol case
    /// has no density.
    fn marginal(&self, start: f64, t: f64) -> RovResult<Box<dyn ContinuousCDF<f64, f64>>>;
}
