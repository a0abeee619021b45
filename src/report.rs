// src/report.rs
use crate::engine::ProjectValuation;
use chrono::Utc;
use std::fs::File;
use std::io::{self, Write};

/// Write one row per path: terminal state, outcome label, shade hint and
/// payoff, for external plotting and reporting.
pub fn write_paths_to_csv(filename: &str, valuation: &ProjectValuation) -> io::Result<()> {
    let mut file = File::create(filename)?;
    writeln!(
        file,
        "path_id,outcome,terminal_cashflow,freeze_period,cost_sunk,payoff,shade,degenerate,conflict"
    )?;
    for record in &valuation.records {
        writeln!(
            file,
            "{},{},{},{},{},{},{},{},{}",
            record.path,
            record.outcome.label(),
            record.freeze.cashflow,
            record.freeze.period,
            record.freeze.cost_sunk,
            valuation.estimate.payoffs[record.path],
            record.outcome.shade(),
            record.degenerate,
            record.conflict()
        )?;
    }
    Ok(())
}

/// Write a key/value run summary with a UTC timestamp.
pub fn write_summary_to_csv(filename: &str, valuation: &ProjectValuation) -> io::Result<()> {
    let mut file = File::create(filename)?;
    let outcome_count = |predicate: &dyn Fn(&crate::exercise::PathRecord) -> bool| {
        valuation.records.iter().filter(|r| predicate(r)).count()
    };

    writeln!(file, "key,value")?;
    writeln!(file, "timestamp,{}", Utc::now().to_rfc3339())?;
    writeln!(file, "paths,{}", valuation.config.paths)?;
    writeln!(file, "periods,{}", valuation.config.periods)?;
    writeln!(file, "seed,{}", valuation.config.seed)?;
    writeln!(file, "value,{}", valuation.estimate.value)?;
    writeln!(file, "std_error,{}", valuation.estimate.std_error)?;
    writeln!(file, "paths_used,{}", valuation.estimate.paths_used)?;
    writeln!(file, "degenerate,{}", valuation.estimate.degenerate_paths)?;
    writeln!(
        file,
        "completed_early,{}",
        outcome_count(&|r| r.outcome == crate::exercise::ExerciseOutcome::CompletedEarly)
    )?;
    writeln!(
        file,
        "abandoned_early,{}",
        outcome_count(&|r| r.outcome == crate::exercise::ExerciseOutcome::AbandonedEarly)
    )?;
    writeln!(
        file,
        "success,{}",
        outcome_count(&|r| r.outcome == crate::exercise::ExerciseOutcome::Success)
    )?;
    writeln!(
        file,
        "failure,{}",
        outcome_count(&|r| r.outcome == crate::exercise::ExerciseOutcome::Failure)
    )?;
    writeln!(
        file,
        "conflicts,{}",
        outcome_count(&|r| r.conflict())
    )?;
    Ok(())
}
