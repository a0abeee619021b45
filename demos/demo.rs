// demos/demo.rs
use lean_rov::config::{SimConfig, ValuationFlags};
use lean_rov::engine::value_project;
use lean_rov::exercise::ExerciseOutcome;
use lean_rov::report;

fn main() {
    println!("Running lean-rov staged R&D valuation demo\n");

    let cfg = SimConfig {
        paths: 50_000,
        seed: 12345,
        drift: 0.08,
        vol: 0.25,
        start: 100.0,
        cost_per_period: 10.0,
        cost_decline: 0.8,
        ..Default::default()
    };

    let valuation = match value_project(&cfg) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Valuation failed: {}", e);
            std::process::exit(1);
        }
    };

    println!("--- Project Valuation ---");
    println!(
        "Value: {:.4} ± {:.4} (std error, {} paths)",
        valuation.estimate.value, valuation.estimate.std_error, valuation.estimate.paths_used
    );

    let count = |outcome: ExerciseOutcome| {
        valuation
            .records
            .iter()
            .filter(|r| r.outcome == outcome)
            .count()
    };
    println!("\n--- Outcome Breakdown ---");
    println!("Completed early: {}", count(ExerciseOutcome::CompletedEarly));
    println!("Abandoned early: {}", count(ExerciseOutcome::AbandonedEarly));
    println!("Success:         {}", count(ExerciseOutcome::Success));
    println!("Failure:         {}", count(ExerciseOutcome::Failure));
    println!(
        "Degenerate:      {}",
        valuation.estimate.degenerate_paths
    );
    println!(
        "Shock/level conflicts: {}",
        valuation.records.iter().filter(|r| r.conflict()).count()
    );

    // Compare against the unaltered valuation (no early exercise overlay)
    let unaltered_cfg = SimConfig {
        flags: ValuationFlags::UNALTERED,
        ..cfg.clone()
    };
    match value_project(&unaltered_cfg) {
        Ok(unaltered) => {
            println!("\n--- Unaltered Comparison ---");
            println!(
                "Unaltered value: {:.4} ± {:.4}",
                unaltered.estimate.value, unaltered.estimate.std_error
            );
            println!(
                "Option premium:  {:.4}",
                valuation.estimate.value - unaltered.estimate.value
            );
        }
        Err(e) => eprintln!("Unaltered valuation failed: {}", e),
    }

    // --- CSV Output ---
    if let Err(e) = std::fs::create_dir_all("results") {
        eprintln!("Could not create results directory: {}", e);
        return;
    }

    match report::write_paths_to_csv("results/paths.csv", &valuation) {
        Ok(_) => println!("\nPath data written to results/paths.csv"),
        Err(e) => eprintln!("Error writing path data: {}", e),
    }
    match report::write_summary_to_csv("results/summary.csv", &valuation) {
        Ok(_) => println!("Summary data written to results/summary.csv"),
        Err(e) => eprintln!("Error writing summary data: {}", e),
    }
}
