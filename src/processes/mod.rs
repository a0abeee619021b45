// src/processes/mod.rs
pub mod abm;
pub mod cost;
pub mod gbm;
pub mod process;

pub use abm::ArithmeticBrownianMotion;
pub use cost::CostSchedule;
pub use gbm::GeometricBrownianMotion;
pub use process::CashflowProcess;

use crate::config::{ProcessKind, SimConfig};

/// Build the configured cashflow process
pub fn from_config(cfg: &SimConfig) -> Box<dyn CashflowProcess> {
    match cfg.process {
        ProcessKind::Geometric => Box::new(GeometricBrownianMotion::new(cfg.drift, cfg.vol)),
        ProcessKind::Arithmetic => Box::new(ArithmeticBrownianMotion::new(cfg.drift, cfg.vol)),
    }
}
