// src/config.rs
use crate::error::{validation::*, RovError, RovResult};
use bitflags::bitflags;

bitflags! {
    /// Switches for how the aggregate estimator treats the simulated batch.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ValuationFlags: u32 {
        const NONE = 0;
        /// Drop degenerate (non-finite) paths from the estimator instead of
        /// including them at their Failure payoff.
        const EXCLUDE_DEGENERATE = 1 << 0;
        /// Value the raw terminal cashflows with no early-exercise overlay.
        const UNALTERED = 1 << 1;
    }
}

/// Which increment the cashflow process applies per sub-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessKind {
    /// Lognormal increments (exact GBM step)
    Geometric,
    /// Additive drift + diffusion increments
    Arithmetic,
}

/// Per-period baseline the decision engine compares cashflow against.
///
/// The source material is ambiguous between an absolute baseline (the
/// initial cashflow, every period) and a relative one (the previous
/// period's cashflow), so the rule is a configurable strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceRule {
    /// Reference equals the initial cashflow value at every period (default)
    FixedStart,
    /// Fixed level at every period
    Constant(f64),
    /// Explicit per-period values; length must equal the period count
    PerPeriod(Vec<f64>),
    /// Reference for period k is the same path's cashflow at period k−1;
    /// period 1 compares against the initial value
    TrailingCashflow,
}

/// Immutable simulation parameters, constructed once per run.
///
/// One period spans `steps_per_period` sub-steps of length
/// `1 / steps_per_period`, so `drift` and `vol` are per-period quantities.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent paths (N)
    pub paths: usize,
    /// Number of review periods (T)
    pub periods: usize,
    /// Sub-steps per period (STEP)
    pub steps_per_period: usize,
    /// Per-period drift of the cashflow process
    pub drift: f64,
    /// Per-period volatility of the cashflow process
    pub vol: f64,
    /// Initial cashflow value; also the default decision reference
    pub start: f64,
    /// Base seed; path p draws from an independent stream seeded `seed + p`
    pub seed: u64,
    /// Per-period discount rate applied to payoffs
    pub rate: f64,
    pub process: ProcessKind,
    pub reference: ReferenceRule,
    /// Development cost charged in period 1
    pub cost_per_period: f64,
    /// Multiplicative factor applied to the cost each subsequent period
    /// (< 1.0 models cost-to-completion driven down per period)
    pub cost_decline: f64,
    /// Explicit per-period cost schedule; overrides the base/decline pair
    pub cost_schedule: Option<Vec<f64>>,
    /// Period at which the two-successive-shock rule fires
    pub early_period: usize,
    /// Period at which success/failure is resolved against `start`
    pub final_period: usize,
    /// Number of growing-annuity payments valued off a realized cashflow
    pub annuity_periods: usize,
    /// Multiple of sunk development cost charged against positive payoffs
    pub cost_multiple: f64,
    pub flags: ValuationFlags,
}

impl SimConfig {
    /// Length of one sub-step in period units
    pub fn dt(&self) -> f64 {
        1.0 / self.steps_per_period as f64
    }

    /// Total number of sub-steps across all periods
    pub fn total_steps(&self) -> usize {
        self.periods * self.steps_per_period
    }

    /// Time-grid index of the period-k boundary
    pub fn boundary_index(&self, period: usize) -> usize {
        period * self.steps_per_period
    }

    /// Validate the simulation configuration
    pub fn validate(&self) -> RovResult<()> {
        validate_paths(self.paths)?;
        validate_periods(self.periods)?;
        validate_steps(self.steps_per_period)?;
        validate_finite("drift", self.drift)?;
        validate_non_negative("vol", self.vol)?;
        validate_positive("start", self.start)?;
        validate_finite("rate", self.rate)?;
        validate_non_negative("cost_per_period", self.cost_per_period)?;
        validate_positive("cost_decline", self.cost_decline)?;
        validate_non_negative("cost_multiple", self.cost_multiple)?;

        if self.rate <= -1.0 {
            return Err(RovError::InvalidParameters {
                parameter: "rate".to_string(),
                value: self.rate,
                constraint: "must exceed -1 (discount factors must stay positive)".to_string(),
            });
        }

        if self.annuity_periods == 0 {
            return Err(RovError::InvalidConfiguration {
                field: "annuity_periods".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.early_period < 2 {
            return Err(RovError::InvalidConfiguration {
                field: "early_period".to_string(),
                reason: "must be at least 2 (the rule inspects two successive decisions)"
                    .to_string(),
            });
        }
        if self.final_period <= self.early_period {
            return Err(RovError::InvalidConfiguration {
                field: "final_period".to_string(),
                reason: "must be greater than early_period".to_string(),
            });
        }
        if self.final_period > self.periods {
            return Err(RovError::InvalidConfiguration {
                field: "final_period".to_string(),
                reason: format!("exceeds period count ({})", self.periods),
            });
        }

        if let ReferenceRule::PerPeriod(ref values) = self.reference {
            if values.len() != self.periods {
                return Err(RovError::InvalidConfiguration {
                    field: "reference".to_string(),
                    reason: format!(
                        "per-period array has length {} but there are {} periods",
                        values.len(),
                        self.periods
                    ),
                });
            }
            for (k, &v) in values.iter().enumerate() {
                validate_finite(&format!("reference[{}]", k), v)?;
            }
        }
        if let ReferenceRule::Constant(v) = self.reference {
            validate_finite("reference", v)?;
        }

        if let Some(ref schedule) = self.cost_schedule {
            if schedule.len() != self.periods {
                return Err(RovError::InvalidConfiguration {
                    field: "cost_schedule".to_string(),
                    reason: format!(
                        "schedule has length {} but there are {} periods",
                        schedule.len(),
                        self.periods
                    ),
                });
            }
            for (k, &c) in schedule.iter().enumerate() {
                validate_non_negative(&format!("cost_schedule[{}]", k), c)?;
            }
        }

        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            paths: 10_000,
            periods: 3,
            steps_per_period: 12,
            drift: 0.08,
            vol: 0.2,
            start: 100.0,
            seed: 12345,
            rate: 0.05,
            process: ProcessKind::Geometric,
            reference: ReferenceRule::FixedStart,
            cost_per_period: 10.0,
            cost_decline: 1.0,
            cost_schedule: None,
            early_period: 2,
            final_period: 3,
            annuity_periods: 3,
            cost_multiple: 2.0,
            flags: ValuationFlags::NONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_counts() {
        let mut cfg = SimConfig::default();
        cfg.paths = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.periods = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.steps_per_period = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_negative_vol() {
        let mut cfg = SimConfig::default();
        cfg.vol = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_vol_is_allowed() {
        let mut cfg = SimConfig::default();
        cfg.vol = 0.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_reference_length_mismatch() {
        let mut cfg = SimConfig::default();
        cfg.reference = ReferenceRule::PerPeriod(vec![100.0, 100.0]);
        assert!(cfg.validate().is_err());

        cfg.reference = ReferenceRule::PerPeriod(vec![100.0; cfg.periods]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_cost_schedule_length_mismatch() {
        let mut cfg = SimConfig::default();
        cfg.cost_schedule = Some(vec![10.0, 8.0]);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_review_periods() {
        let mut cfg = SimConfig::default();
        cfg.early_period = 1;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.final_period = cfg.early_period;
        assert!(cfg.validate().is_err());

        let mut cfg = SimConfig::default();
        cfg.final_period = cfg.periods + 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_grid_helpers() {
        let cfg = SimConfig {
            periods: 3,
            steps_per_period: 4,
            ..Default::default()
        };
        assert_eq!(cfg.total_steps(), 12);
        assert_eq!(cfg.boundary_index(2), 8);
        assert!((cfg.dt() - 0.25).abs() < 1e-15);
    }
}
