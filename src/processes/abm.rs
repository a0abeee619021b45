// src/processes/abm.rs
//! Arithmetic Brownian motion (Wiener process with drift)
//!
//! # Mathematical Framework
//!
//! The SDE:
//! ```text
//! dX_t = μ dt + σ dW_t
//! ```
//!
//! discretizes exactly per sub-step as:
//! ```text
//! X_{t+dt} = X_t + μ dt + σ √dt Z
//! ```
//! where Z ~ N(0,1). Unlike the geometric variant, paths may go negative.

use super::process::CashflowProcess;
use crate::error::{RovError, RovResult};
use statrs::distribution::{ContinuousCDF, Normal};

pub struct ArithmeticBrownianMotion {
    pub mu: f64,
    pub sigma: f64,
}

impl ArithmeticBrownianMotion {
    pub fn new(mu: f64, sigma: f64) -> Self {
        ArithmeticBrownianMotion { mu, sigma }
    }
}

impl CashflowProcess for ArithmeticBrownianMotion {
    fn step(&self, value: f64, dt: f64, shock: f64) -> f64 {
        value + self.mu * dt + self.sigma * dt.sqrt() * shock
    }

    /// At horizon t: X_t ~ N(x₀ + μ t, σ² t)
    fn marginal(&self, start: f64, t: f64) -> RovResult<Box<dyn ContinuousCDF<f64, f64>>> {
        let dist = Normal::new(start + self.mu * t, self.sigma * t.sqrt()).map_err(|e| {
            RovError::InvalidParameters {
                parameter: "vol".to_string(),
                value: self.sigma,
                constraint: format!("normal marginal undefined: {}", e),
            }
        })?;
        Ok(Box::new(dist))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_vol_step_is_linear_drift() {
        let abm = ArithmeticBrownianMotion::new(2.4, 0.0);
        let mut x = 100.0;
        for _ in 0..12 {
            x = abm.step(x, 1.0 / 12.0, -1.9);
        }
        assert!((x - 102.4).abs() < 1e-10);
    }

    #[test]
    fn test_marginal_mean() {
        let abm = ArithmeticBrownianMotion::new(0.5, 1.0);
        let dist = abm.marginal(10.0, 4.0).unwrap();
        assert!((dist.inverse_cdf(0.5) - 12.0).abs() < 1e-6);
    }
}
