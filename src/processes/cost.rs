// src/processes/cost.rs
use crate::config::SimConfig;
use crate::error::RovResult;

/// Deterministic per-period development costs.
///
/// Costs are constant within a period and never sub-stepped. The schedule is
/// either given explicitly or derived from a base cost with a multiplicative
/// per-period decline factor.
#[derive(Debug, Clone)]
pub struct CostSchedule {
    per_period: Vec<f64>,
}

impl CostSchedule {
    pub fn from_config(cfg: &SimConfig) -> RovResult<Self> {
        cfg.validate()?;
        let per_period = match cfg.cost_schedule {
            Some(ref schedule) => schedule.clone(),
            None => (0..cfg.periods)
                .map(|k| cfg.cost_per_period * cfg.cost_decline.powi(k as i32))
                .collect(),
        };
        Ok(CostSchedule { per_period })
    }

    /// Cost charged in period k (1-based)
    pub fn in_period(&self, period: usize) -> f64 {
        self.per_period[period - 1]
    }

    /// Total development cost sunk through the end of period k
    pub fn sunk_through(&self, period: usize) -> f64 {
        self.per_period[..period].iter().sum()
    }

    /// Cumulative cost at every period boundary: `[0, c₁, c₁+c₂, ...]`
    pub fn cumulative(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.per_period.len() + 1);
        let mut total = 0.0;
        out.push(0.0);
        for &c in &self.per_period {
            total += c;
            out.push(total);
        }
        out
    }

    pub fn periods(&self) -> usize {
        self.per_period.len()
    }
}
