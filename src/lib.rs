//! # lean-rov: Monte Carlo Real-Options Valuation of Staged R&D Projects
//!
//! A Rust library for valuing a staged R&D project under uncertainty with a
//! real-options Monte Carlo framework: simulate many independent net-cashflow
//! paths against a deterministic development-cost schedule, apply a
//! path-dependent exercise rule at discrete review periods, and aggregate the
//! discounted payoffs into an expected valuation.
//!
//! ## Key Features
//!
//! - **Parallel simulation**: path-parallel with Rayon, per-path RNG streams
//! - **Two process variants**: geometric (exact lognormal step) and
//!   arithmetic Brownian motion
//! - **Staged exercise**: two-successive-shock early completion/abandonment,
//!   level-based success/failure at the final review period
//! - **Freeze views**: exercised paths held constant for display and payoff
//!   without touching the raw simulation
//! - **Robust aggregation**: degenerate-path handling, standard errors,
//!   comprehensive validation
//!
//! ## Quick Start
//!
//! ```rust
//! use lean_rov::config::SimConfig;
//! use lean_rov::engine::value_project;
//!
//! let cfg = SimConfig {
//!     paths: 1_000,
//!     seed: 42,
//!     ..Default::default()
//! };
//!
//! let valuation = value_project(&cfg).expect("valid configuration");
//! println!(
//!     "project value: {:.4} ± {:.4}",
//!     valuation.estimate.value,
//!     valuation.estimate.std_error
//! );
//! ```
//!
//! ## Exercise Semantics
//!
//! The early rule is driven purely by the shock history while the final rule
//! compares the raw cashflow level to its starting value. The two signals can
//! disagree; the state machine's precedence (shocks first, level last) is the
//! single source of truth and any disagreement is surfaced per path via
//! [`exercise::PathRecord::conflict`].

// Module declarations
pub mod config;
pub mod decision;
pub mod engine;
pub mod error;
pub mod exercise;
pub mod payoff;
pub mod processes;
pub mod report;
pub mod rng;
pub mod sim;

// Re-export commonly used types for convenience
pub use config::{ProcessKind, ReferenceRule, SimConfig, ValuationFlags};
pub use engine::{value_project, ProjectValuation};
pub use error::{RovError, RovResult};
pub use exercise::{ExerciseOutcome, FreezeRecord, PathRecord};
