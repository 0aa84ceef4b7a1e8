//! Designer comparison: runs random and grid search on several BBOB problems
//! and prints their win rate against the random baseline.
//!
//! Run with: `cargo run --example compare_designers`

use std::sync::Arc;

use optbench::prelude::*;

const NUM_REPEATS: u64 = 5;
const NUM_TRIALS: usize = 50;

fn main() -> optbench::Result<()> {
    let registry = DesignerRegistry::with_defaults();
    let runner = BenchmarkRunner::new(vec![Arc::new(GenerateAndEvaluate::new(1))], NUM_TRIALS);

    let mut records = Vec::new();
    for function in BbobFunction::ALL {
        for dim in [2, 4] {
            let problem = BbobExperimenterFactory::from_function(function, dim)?;
            for algorithm in registry.names() {
                let factory = ExperimenterDesignerBenchmarkStateFactory::new(
                    Arc::new(problem),
                    registry.get(algorithm)?,
                );
                let states = runner.run_states(&factory, 0..NUM_REPEATS)?;
                records.push(BenchmarkStateAnalyzer::to_record(algorithm, &problem, &states)?);
            }
        }
    }

    BenchmarkRecordAnalyzer::add_comparison_metrics(&mut records, "random", RECORD_OBJECTIVE_KEY)?;

    println!("Win rate against random search ({NUM_REPEATS} repeats x {NUM_TRIALS} trials)");
    println!();
    for row in BenchmarkRecordAnalyzer::score_table(&records, RECORD_OBJECTIVE_KEY, "random")? {
        println!("  {:<28} {:<8} {:.3}", row.problem.to_string(), row.algorithm, row.score);
    }

    // Mean best-so-far at the final trial, per record.
    println!();
    for record in &records {
        if let Some(curve) = record.element(RECORD_OBJECTIVE_KEY).and_then(PlotElement::curve) {
            let best = curve.best_so_far();
            let last = best.mean().last().copied().unwrap_or(f64::NAN);
            println!(
                "  {:<28} {:<8} best = {last:.4}",
                record.experimenter_metadata.to_string(),
                record.algorithm
            );
        }
    }

    Ok(())
}
