// src/processes/gbm.rs
//! Geometric Brownian motion with the exact lognormal step
//!
//! # Mathematical Framework
//!
//! The SDE:
//! ```text
//! dX_t = μ X_t dt + σ X_t dW_t
//! ```
//!
//! has the exact solution, applied per sub-step:
//! ```text
//! X_{t+dt} = X_t * exp((μ - σ²/2) dt + σ √dt Z)
//! ```
//! where Z ~ N(0,1). With σ = 0 the step degenerates to pure drift and the
//! path equals `X_0 * exp(μ t)` exactly.

use super::process::CashflowProcess;
use crate::error::{RovError, RovResult};
use statrs::distribution::{ContinuousCDF, LogNormal};

pub struct GeometricBrownianMotion {
    pub mu: f64,
    pub sigma: f64,
}

impl GeometricBrownianMotion {
    pub fn new(mu: f64, sigma: f64) -> Self {
        GeometricBrownianMotion { mu, sigma }
    }

    pub fn exact_step(&self, x: f64, dt: f64, shock: f64) -> f64 {
        x * ((self.mu - 0.5 * self.sigma * self.sigma) * dt + self.sigma * dt.sqrt() * shock).exp()
    }
}

impl CashflowProcess for GeometricBrownianMotion {
    fn step(&self, value: f64, dt: f64, shock: f64) -> f64 {
        self.exact_step(value, dt, shock)
    }

    /// At horizon t: ln X_t ~ N(ln x₀ + (μ - σ²/2) t, σ² t)
    fn marginal(&self, start: f64, t: f64) -> RovResult<Box<dyn ContinuousCDF<f64, f64>>> {
        let location = start.ln() + (self.mu - 0.5 * self.sigma * self.sigma) * t;
        let scale = self.sigma * t.sqrt();
        let dist = LogNormal::new(location, scale).map_err(|e| RovError::InvalidParameters {
            parameter: "vol".to_string(),
            value: self.sigma,
            constraint: format!("lognormal marginal undefined: {}", e),
        })?;
        Ok(Box::new(dist))
    }
}
