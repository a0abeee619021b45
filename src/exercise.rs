// src/exercise.rs
//! Per-path exercise classification and freeze records
//!
//! Each path starts `Pending` and reaches exactly one terminal outcome by
//! the final review period. The early rule is driven purely by the shock
//! history (two successive same-sign decisions); the final rule compares the
//! raw level against the initial value. The two signals can disagree (a path
//! completed early on shocks while its level sits below start); that
//! conflict is recorded on the path record, never resolved here.

use crate::config::{SimConfig, ValuationFlags};
use crate::decision::{Decision, DecisionSet};
use crate::processes::CostSchedule;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

/// Terminal classification of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseOutcome {
    Pending,
    CompletedEarly,
    AbandonedEarly,
    Success,
    Failure,
}

impl ExerciseOutcome {
    pub fn is_terminal(self) -> bool {
        self != ExerciseOutcome::Pending
    }

    /// Outcomes that realize a cashflow stream
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            ExerciseOutcome::CompletedEarly | ExerciseOutcome::Success
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            ExerciseOutcome::Pending => "pending",
            ExerciseOutcome::CompletedEarly => "completed_early",
            ExerciseOutcome::AbandonedEarly => "abandoned_early",
            ExerciseOutcome::Success => "success",
            ExerciseOutcome::Failure => "failure",
        }
    }

    /// Opacity hint for plotting collaborators: paths that realize value
    /// render darker.
    pub fn shade(self) -> f64 {
        if self.is_positive() {
            0.9
        } else if self.is_terminal() {
            0.35
        } else {
            0.1
        }
    }
}

/// Where and at what values a path stopped evolving
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreezeRecord {
    /// Review period at which the outcome became terminal
    pub period: usize,
    /// Cashflow at the freeze boundary (0 for degenerate paths)
    pub cashflow: f64,
    /// Development cost sunk through the freeze period
    pub cost_sunk: f64,
}

/// Full per-path classification result
#[derive(Debug, Clone, PartialEq)]
pub struct PathRecord {
    pub path: usize,
    pub outcome: ExerciseOutcome,
    pub freeze: FreezeRecord,
    /// Non-finite cashflow was detected on this path
    pub degenerate: bool,
    /// Independent level signal: frozen cashflow strictly above start
    pub level_above_start: bool,
}

impl PathRecord {
    /// Shock-based outcome disagrees with the level-based signal
    pub fn conflict(&self) -> bool {
        if self.degenerate {
            return false;
        }
        match self.outcome {
            ExerciseOutcome::CompletedEarly => !self.level_above_start,
            ExerciseOutcome::AbandonedEarly => self.level_above_start,
            _ => false,
        }
    }
}

pub struct ExerciseStateMachine<'a> {
    cfg: &'a SimConfig,
    cost: &'a CostSchedule,
}

impl<'a> ExerciseStateMachine<'a> {
    pub fn new(cfg: &'a SimConfig, cost: &'a CostSchedule) -> Self {
        ExerciseStateMachine { cfg, cost }
    }

    /// Classify every path, first match wins, increasing period order:
    /// 1. non-finite boundary cashflow → Failure, flagged degenerate;
    /// 2. at `early_period`: two successive Up → CompletedEarly,
    ///    two successive Down → AbandonedEarly;
    /// 3. at `final_period`: cashflow > start → Success, else Failure
    ///    (equality resolves to Failure).
    ///
    /// Under `UNALTERED` the early rule is skipped and every path resolves
    /// at the final period on level alone.
    pub fn classify(&self, paths: &Array2<f64>, decisions: &DecisionSet) -> Vec<PathRecord> {
        let unaltered = self.cfg.flags.contains(ValuationFlags::UNALTERED);

        paths
            .axis_iter(Axis(0))
            .into_par_iter()
            .enumerate()
            .map(|(p, path)| {
                for k in 1..=self.cfg.final_period {
                    let cf = path[self.cfg.boundary_index(k)];

                    if !cf.is_finite() {
                        return PathRecord {
                            path: p,
                            outcome: ExerciseOutcome::Failure,
                            freeze: FreezeRecord {
                                period: k,
                                cashflow: 0.0,
                                cost_sunk: self.cost.sunk_through(k),
                            },
                            degenerate: true,
                            level_above_start: false,
                        };
                    }

                    if !unaltered && k == self.cfg.early_period {
                        let prev = decisions.decisions[[p, k - 1]];
                        let curr = decisions.decisions[[p, k]];
                        let outcome = if prev == Decision::Up && curr == Decision::Up {
                            Some(ExerciseOutcome::CompletedEarly)
                        } else if prev == Decision::Down && curr == Decision::Down {
                            Some(ExerciseOutcome::AbandonedEarly)
                        } else {
                            None
                        };
                        if let Some(outcome) = outcome {
                            return PathRecord {
                                path: p,
                                outcome,
                                freeze: FreezeRecord {
                                    period: k,
                                    cashflow: cf,
                                    cost_sunk: self.cost.sunk_through(k),
                                },
                                degenerate: false,
                                level_above_start: cf > self.cfg.start,
                            };
                        }
                    }

                    if k == self.cfg.final_period {
                        let outcome = if cf > self.cfg.start {
                            ExerciseOutcome::Success
                        } else {
                            ExerciseOutcome::Failure
                        };
                        return PathRecord {
                            path: p,
                            outcome,
                            freeze: FreezeRecord {
                                period: k,
                                cashflow: cf,
                                cost_sunk: self.cost.sunk_through(k),
                            },
                            degenerate: false,
                            level_above_start: cf > self.cfg.start,
                        };
                    }
                }
                unreachable!("final_period is always reached");
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReferenceRule;
    use crate::decision::DecisionEngine;
    use ndarray::arr2;

    fn config() -> SimConfig {
        SimConfig {
            paths: 1,
            periods: 3,
            steps_per_period: 1,
            start: 100.0,
            cost_per_period: 10.0,
            ..Default::default()
        }
    }

    fn classify(cfg: &SimConfig, paths: &Array2<f64>) -> Vec<PathRecord> {
        let decisions = DecisionEngine::new(cfg).evaluate(paths).unwrap();
        let cost = CostSchedule::from_config(cfg).unwrap();
        ExerciseStateMachine::new(cfg, &cost).classify(paths, &decisions)
    }

    #[test]
    fn test_two_positive_shocks_complete_early() {
        let cfg = config();
        let paths = arr2(&[[100.0, 110.0, 121.0, 90.0]]);
        let records = classify(&cfg, &paths);
        assert_eq!(records[0].outcome, ExerciseOutcome::CompletedEarly);
        assert_eq!(records[0].freeze.period, 2);
        assert!((records[0].freeze.cashflow - 121.0).abs() < 1e-12);
        assert!((records[0].freeze.cost_sunk - 20.0).abs() < 1e-12);
        assert!(!records[0].conflict());
    }

    #[test]
    fn test_two_negative_shocks_abandon_early() {
        let cfg = config();
        let paths = arr2(&[[100.0, 90.0, 81.0, 150.0]]);
        let records = classify(&cfg, &paths);
        assert_eq!(records[0].outcome, ExerciseOutcome::AbandonedEarly);
        assert_eq!(records[0].freeze.period, 2);
        assert!((records[0].freeze.cost_sunk - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_shocks_resolve_on_level_at_final_period() {
        let cfg = config();
        let paths = arr2(&[[100.0, 110.0, 95.0, 130.0]]);
        let records = classify(&cfg, &paths);
        assert_eq!(records[0].outcome, ExerciseOutcome::Success);
        assert_eq!(records[0].freeze.period, 3);

        let paths = arr2(&[[100.0, 110.0, 95.0, 70.0]]);
        let records = classify(&cfg, &paths);
        assert_eq!(records[0].outcome, ExerciseOutcome::Failure);
    }

    #[test]
    fn test_level_tie_resolves_to_failure() {
        let cfg = config();
        let paths = arr2(&[[100.0, 100.0, 100.0, 100.0]]);
        let records = classify(&cfg, &paths);
        assert_eq!(records[0].outcome, ExerciseOutcome::Failure);
        assert!(!records[0].level_above_start);
    }

    #[test]
    fn test_shock_level_conflict_is_flagged() {
        // Reference low enough that both decisions read Up while the level
        // stays below start.
        let mut cfg = config();
        cfg.reference = ReferenceRule::Constant(50.0);
        let paths = arr2(&[[100.0, 80.0, 75.0, 60.0]]);
        let records = classify(&cfg, &paths);
        assert_eq!(records[0].outcome, ExerciseOutcome::CompletedEarly);
        assert!(!records[0].level_above_start);
        assert!(records[0].conflict());
    }

    #[test]
    fn test_non_finite_path_is_degenerate_failure() {
        let cfg = config();
        let paths = arr2(&[[100.0, 110.0, f64::NAN, 130.0]]);
        let records = classify(&cfg, &paths);
        assert_eq!(records[0].outcome, ExerciseOutcome::Failure);
        assert!(records[0].degenerate);
        assert_eq!(records[0].freeze.period, 2);
        assert_eq!(records[0].freeze.cashflow, 0.0);
        assert!(!records[0].conflict());
    }

    #[test]
    fn test_unaltered_skips_early_rule() {
        let mut cfg = config();
        cfg.flags = ValuationFlags::UNALTERED;
        let paths = arr2(&[[100.0, 110.0, 121.0, 130.0]]);
        let records = classify(&cfg, &paths);
        assert_eq!(records[0].outcome, ExerciseOutcome::Success);
        assert_eq!(records[0].freeze.period, 3);
    }

    #[test]
    fn test_every_path_is_terminal() {
        let cfg = SimConfig {
            paths: 200,
            ..Default::default()
        };
        let shocks = crate::rng::ShockGenerator::new(&cfg).generate();
        let paths = crate::sim::ProcessSimulator::new(&cfg)
            .simulate(&shocks)
            .unwrap();
        let records = classify(&cfg, &paths);
        assert_eq!(records.len(), cfg.paths);
        for r in &records {
            assert!(r.outcome.is_terminal());
            assert!(r.freeze.period <= cfg.final_period);
        }
    }
}
