// src/decision.rs
//! Period-boundary decision signals and their cumulative history
//!
//! At each review period the engine compares the path's cashflow at the
//! period boundary against the configured reference and records the sign.
//! Equality maps to `Flat` by exact comparison; there is deliberately no
//! epsilon tolerance, matching the source model.

use crate::config::{ReferenceRule, SimConfig};
use crate::error::{RovError, RovResult};
use ndarray::{Array2, ArrayView1, Axis, Zip};
use std::cmp::Ordering;

/// Ternary decision signal: sign of (period-end cashflow − reference).
///
/// An explicit enum rather than a bare integer, with `signum()` as the
/// numeric projection used by the history accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Down,
    Flat,
    Up,
}

impl Decision {
    /// Exact sign comparison; NaN on either side maps to `Flat` and is
    /// caught later by the degenerate-path handling.
    pub fn from_comparison(cashflow: f64, reference: f64) -> Self {
        match cashflow.partial_cmp(&reference) {
            Some(Ordering::Greater) => Decision::Up,
            Some(Ordering::Less) => Decision::Down,
            _ => Decision::Flat,
        }
    }

    /// Numeric projection in {−1, 0, +1}
    pub fn signum(self) -> i32 {
        match self {
            Decision::Down => -1,
            Decision::Flat => 0,
            Decision::Up => 1,
        }
    }
}

/// Decision and history matrices, shape (paths, T + 1); column 0 is the
/// pre-simulation state (`Flat` / 0).
pub struct DecisionSet {
    pub decisions: Array2<Decision>,
    pub history: Array2<i32>,
}

pub struct DecisionEngine<'a> {
    cfg: &'a SimConfig,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(cfg: &'a SimConfig) -> Self {
        DecisionEngine { cfg }
    }

    fn reference_for(&self, period: usize, path: ArrayView1<f64>) -> f64 {
        match self.cfg.reference {
            ReferenceRule::FixedStart => self.cfg.start,
            ReferenceRule::Constant(v) => v,
            ReferenceRule::PerPeriod(ref values) => values[period - 1],
            ReferenceRule::TrailingCashflow => {
                if period == 1 {
                    self.cfg.start
                } else {
                    path[self.cfg.boundary_index(period - 1)]
                }
            }
        }
    }

    /// Compute `d[p,k] = sign(cf − ref)` and `h[p,k] = h[p,k−1] + d[p,k]`
    /// for every path and period.
    pub fn evaluate(&self, paths: &Array2<f64>) -> RovResult<DecisionSet> {
        let n = self.cfg.paths;
        let t = self.cfg.periods;
        if paths.dim() != (n, self.cfg.total_steps() + 1) {
            return Err(RovError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: format!(
                    "expected shape ({}, {}), got {:?}",
                    n,
                    self.cfg.total_steps() + 1,
                    paths.dim()
                ),
            });
        }

        let mut decisions = Array2::from_elem((n, t + 1), Decision::Flat);
        let mut history = Array2::zeros((n, t + 1));

        Zip::from(decisions.axis_iter_mut(Axis(0)))
            .and(history.axis_iter_mut(Axis(0)))
            .and(paths.axis_iter(Axis(0)))
            .par_for_each(|mut drow, mut hrow, path| {
                let mut running = 0;
                for k in 1..=t {
                    let cf = path[self.cfg.boundary_index(k)];
                    let reference = self.reference_for(k, path);
                    let d = Decision::from_comparison(cf, reference);
                    running += d.signum();
                    drow[k] = d;
                    hrow[k] = running;
                }
            });

        Ok(DecisionSet { decisions, history })
    }
}
