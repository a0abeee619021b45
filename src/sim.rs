// src/sim.rs
//! Path integration over the simulation grid
//!
//! Turns the shock matrix into the cashflow path matrix: N rows, one per
//! path, T·STEP + 1 columns with column 0 pinned to the initial value.
//! Integration is row-parallel; rows never interact.

use crate::config::SimConfig;
use crate::error::{RovError, RovResult};
use crate::processes;
use ndarray::{Array2, Axis, Zip};

pub struct ProcessSimulator<'a> {
    cfg: &'a SimConfig,
}

impl<'a> ProcessSimulator<'a> {
    pub fn new(cfg: &'a SimConfig) -> Self {
        ProcessSimulator { cfg }
    }

    /// Integrate every path through the configured process.
    ///
    /// `shocks` must have shape (paths, T·STEP). The returned matrix has
    /// shape (paths, T·STEP + 1); row p holds the full trajectory of path p
    /// and is left untouched by later exercise logic (freezing is a view).
    pub fn simulate(&self, shocks: &Array2<f64>) -> RovResult<Array2<f64>> {
        let n = self.cfg.paths;
        let m = self.cfg.total_steps();
        if shocks.dim() != (n, m) {
            return Err(RovError::InvalidConfiguration {
                field: "shocks".to_string(),
                reason: format!(
                    "expected shape ({}, {}), got {:?}",
                    n,
                    m,
                    shocks.dim()
                ),
            });
        }

        let process = processes::from_config(self.cfg);
        let dt = self.cfg.dt();
        let start = self.cfg.start;

        let mut paths = Array2::zeros((n, m + 1));
        Zip::from(paths.axis_iter_mut(Axis(0)))
            .and(shocks.axis_iter(Axis(0)))
            .par_for_each(|mut row, shock_row| {
                let mut value = start;
                row[0] = value;
                for (t, &z) in shock_row.iter().enumerate() {
                    value = process.step(value, dt, z);
                    row[t + 1] = value;
                }
            });

        Ok(paths)
    }
}
