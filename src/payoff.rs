// src/payoff.rs
//! Per-path payoffs and the aggregate Monte Carlo estimate
//!
//! # Mathematical Framework
//!
//! A path that realizes value (CompletedEarly or Success) is paid as a
//! growing annuity off its frozen cashflow:
//! ```text
//! PV = Σ_{i=0}^{m-1}  cf·(1+g)^{i+1} / (1+r)^{f+1+i}   −   λ · C_f
//! ```
//! where cf is the frozen cashflow, g the per-period drift, r the discount
//! rate, f the freeze period, m the annuity length, λ the cost multiple and
//! C_f the development cost sunk through period f. Abandoned and failed
//! paths pay −C_f.
//!
//! The aggregate is the plain Monte Carlo estimator: arithmetic mean plus
//! the sample standard error √(s²/n) with the n−1 divisor.

use crate::config::{SimConfig, ValuationFlags};
use crate::error::{RovError, RovResult};
use crate::exercise::PathRecord;

/// Present value of a growing annuity.
///
/// `m` payments, the first equal to `first_payment` and paid at period
/// `start`, growing at rate `g` per period, discounted at rate `r`.
pub fn pv_growing_annuity(first_payment: f64, g: f64, r: f64, m: usize, start: usize) -> f64 {
    (0..m)
        .map(|i| {
            first_payment * (1.0 + g).powi(i as i32) / (1.0 + r).powi((start + i) as i32)
        })
        .sum()
}

/// Aggregate valuation across the simulated batch
#[derive(Debug, Clone)]
pub struct Estimate {
    /// Arithmetic mean of per-path payoffs
    pub value: f64,
    /// Sample standard error of the mean
    pub std_error: f64,
    /// Paths included in the estimator
    pub paths_used: usize,
    /// Degenerate paths in the batch (excluded or included per flags)
    pub degenerate_paths: usize,
    /// Per-path discounted payoffs, indexed like the path matrix
    pub payoffs: Vec<f64>,
}

pub struct PayoffEvaluator<'a> {
    cfg: &'a SimConfig,
}

impl<'a> PayoffEvaluator<'a> {
    pub fn new(cfg: &'a SimConfig) -> Self {
        PayoffEvaluator { cfg }
    }

    /// Discounted payoff of one classified path
    pub fn path_payoff(&self, record: &PathRecord) -> f64 {
        if record.outcome.is_positive() && !record.degenerate {
            let first = record.freeze.cashflow * (1.0 + self.cfg.drift);
            let annuity = pv_growing_annuity(
                first,
                self.cfg.drift,
                self.cfg.rate,
                self.cfg.annuity_periods,
                record.freeze.period + 1,
            );
            annuity - self.cfg.cost_multiple * record.freeze.cost_sunk
        } else {
            -record.freeze.cost_sunk
        }
    }

    /// Mean payoff and standard error across the batch.
    ///
    /// Degenerate paths contribute their Failure payoff unless
    /// `EXCLUDE_DEGENERATE` is set; a NaN never reaches the mean either way.
    pub fn evaluate(&self, records: &[PathRecord]) -> RovResult<Estimate> {
        let exclude = self.cfg.flags.contains(ValuationFlags::EXCLUDE_DEGENERATE);
        let degenerate_paths = records.iter().filter(|r| r.degenerate).count();

        let payoffs: Vec<f64> = records.iter().map(|r| self.path_payoff(r)).collect();
        let used: Vec<f64> = records
            .iter()
            .zip(payoffs.iter())
            .filter(|(r, _)| !(exclude && r.degenerate))
            .map(|(_, &x)| x)
            .collect();

        let n = used.len();
        if n == 0 {
            return Err(RovError::ValuationError {
                paths: records.len(),
                reason: "no usable paths after excluding degenerate ones".to_string(),
            });
        }

        let mean = used.iter().sum::<f64>() / n as f64;
        let std_error = if n > 1 {
            let variance =
                used.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
            (variance / n as f64).sqrt()
        } else {
            0.0
        };

        if !mean.is_finite() || !std_error.is_finite() {
            return Err(RovError::NumericalInstability {
                method: "Monte Carlo valuation".to_string(),
                reason: format!("estimate not finite: mean = {}, se = {}", mean, std_error),
            });
        }

        Ok(Estimate {
            value: mean,
            std_error,
            paths_used: n,
            degenerate_paths,
            payoffs,
        })
    }
}
