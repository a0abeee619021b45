// src/engine.rs
//! End-to-end valuation pipeline
//!
//! Shock generation → path integration → decision signals → exercise
//! classification → payoff aggregation. Every stage is parallel across the
//! path dimension and deterministic for a given seed.

use crate::config::SimConfig;
use crate::decision::{Decision, DecisionEngine};
use crate::error::RovResult;
use crate::exercise::{ExerciseStateMachine, PathRecord};
use crate::payoff::{Estimate, PayoffEvaluator};
use crate::processes::CostSchedule;
use crate::rng::ShockGenerator;
use crate::sim::ProcessSimulator;
use ndarray::Array2;

/// Complete simulation output: raw matrices, per-path records and the
/// aggregate estimate. Raw matrices are never mutated by exercise logic;
/// the `frozen_*` views clamp each path at its freeze index for display
/// and payoff consumers.
pub struct ProjectValuation {
    pub config: SimConfig,
    /// Cashflow paths, shape (paths, T·STEP + 1)
    pub cashflow: Array2<f64>,
    /// Cumulative development cost at each period boundary, length T + 1
    pub cost: Vec<f64>,
    /// Decision signals, shape (paths, T + 1), column 0 unused
    pub decisions: Array2<Decision>,
    /// Cumulative decision history, shape (paths, T + 1)
    pub history: Array2<i32>,
    /// One record per path: outcome, freeze point, flags
    pub records: Vec<PathRecord>,
    pub estimate: Estimate,
}

impl ProjectValuation {
    /// Cashflow paths with every row held constant from its freeze index on
    pub fn frozen_cashflow(&self) -> Array2<f64> {
        let mut out = self.cashflow.clone();
        for record in &self.records {
            let from = self.config.boundary_index(record.freeze.period);
            let mut row = out.row_mut(record.path);
            for t in from..row.len() {
                row[t] = record.freeze.cashflow;
            }
        }
        out
    }

    /// Cumulative cost per path and period, clamped at each path's freeze
    /// period; shape (paths, T + 1)
    pub fn frozen_cost(&self) -> Array2<f64> {
        let periods = self.config.periods;
        let mut out = Array2::zeros((self.config.paths, periods + 1));
        for record in &self.records {
            let mut row = out.row_mut(record.path);
            for k in 0..=periods {
                row[k] = self.cost[k.min(record.freeze.period)];
            }
        }
        out
    }

    /// Per-path opacity hints for the plotting collaborator
    pub fn shades(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.outcome.shade()).collect()
    }
}

/// Run the full pipeline for one configuration.
pub fn value_project(cfg: &SimConfig) -> RovResult<ProjectValuation> {
    cfg.validate()?;

    let shocks = ShockGenerator::new(cfg).generate();
    let cashflow = ProcessSimulator::new(cfg).simulate(&shocks)?;
    let decisions = DecisionEngine::new(cfg).evaluate(&cashflow)?;
    let cost = CostSchedule::from_config(cfg)?;
    let records = ExerciseStateMachine::new(cfg, &cost).classify(&cashflow, &decisions);
    let estimate = PayoffEvaluator::new(cfg).evaluate(&records)?;

    Ok(ProjectValuation {
        config: cfg.clone(),
        cashflow,
        cost: cost.cumulative(),
        decisions: decisions.decisions,
        history: decisions.history,
        records,
        estimate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frozen_cashflow_constant_after_freeze() {
        let cfg = SimConfig {
            paths: 64,
            seed: 9,
            ..Default::default()
        };
        let valuation = value_project(&cfg).unwrap();
        let frozen = valuation.frozen_cashflow();
        for record in &valuation.records {
            let from = cfg.boundary_index(record.freeze.period);
            for t in from..=cfg.total_steps() {
                assert_eq!(frozen[[record.path, t]], record.freeze.cashflow);
            }
        }
    }

    #[test]
    fn test_frozen_cost_clamps_at_freeze_period() {
        let cfg = SimConfig {
            paths: 64,
            seed: 9,
            ..Default::default()
        };
        let valuation = value_project(&cfg).unwrap();
        let frozen = valuation.frozen_cost();
        for record in &valuation.records {
            for k in record.freeze.period..=cfg.periods {
                assert_eq!(
                    frozen[[record.path, k]],
                    valuation.cost[record.freeze.period]
                );
            }
        }
    }

    #[test]
    fn test_shades_track_outcomes() {
        let cfg = SimConfig {
            paths: 64,
            ..Default::default()
        };
        let valuation = value_project(&cfg).unwrap();
        let shades = valuation.shades();
        assert_eq!(shades.len(), cfg.paths);
        for (record, &shade) in valuation.records.iter().zip(shades.iter()) {
            if record.outcome.is_positive() {
                assert!(shade > 0.5);
            } else {
                assert!(shade < 0.5);
            }
        }
    }
}
