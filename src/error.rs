// src/error.rs
use std::fmt;

/// Custom error types for the lean-rov library
#[derive(Debug, Clone)]
pub enum RovError {
    /// Invalid parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid configuration
    InvalidConfiguration { field: String, reason: String },

    /// Numerical instability in an estimator or a simulated quantity
    NumericalInstability { method: String, reason: String },

    /// Valuation could not be produced from the simulated batch
    ValuationError { paths: usize, reason: String },
}

impl fmt::Display for RovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RovError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            RovError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            RovError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
            RovError::ValuationError { paths, reason } => {
                write!(f, "Valuation error with {} paths: {}", paths, reason)
            }
        }
    }
}

impl std::error::Error for RovError {}

/// Result type alias for lean-rov operations
pub type RovResult<T> = Result<T, RovError>;

/// Validation utilities
pub mod validation {
    use super::{RovError, RovResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> RovResult<()> {
        if value <= 0.0 {
            Err(RovError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> RovResult<()> {
        if value < 0.0 {
            Err(RovError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> RovResult<()> {
        if !value.is_finite() {
            Err(RovError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate paths count
    pub fn validate_paths(paths: usize) -> RovResult<()> {
        if paths == 0 {
            Err(RovError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > 1_000_000_000 {
            Err(RovError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate review period count
    pub fn validate_periods(periods: usize) -> RovResult<()> {
        if periods == 0 {
            Err(RovError::InvalidConfiguration {
                field: "periods".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if periods > 10_000 {
            Err(RovError::InvalidConfiguration {
                field: "periods".to_string(),
                reason: "exceeds maximum allowed (10,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate sub-steps per period
    pub fn validate_steps(steps: usize) -> RovResult<()> {
        if steps == 0 {
            Err(RovError::InvalidConfiguration {
                field: "steps_per_period".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(RovError::InvalidConfiguration {
                field: "steps_per_period".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
