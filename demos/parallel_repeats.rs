//! Parallel repeats: runs every seed of a benchmark on its own blocking task.
//!
//! Run with: `cargo run --example parallel_repeats --features async`

use std::sync::Arc;

use optbench::prelude::*;

#[tokio::main]
async fn main() -> optbench::Result<()> {
    let factory: Arc<dyn BenchmarkStateFactory> = Arc::new(
        ExperimenterDesignerBenchmarkStateFactory::new(
            Arc::new(Hartmann6D::new()),
            designer_factory(|problem, seed| Ok(RandomDesigner::new(problem, seed))),
        ),
    );
    let runner = BenchmarkRunner::new(
        vec![
            Arc::new(GenerateSuggestions::new(4)),
            Arc::new(EvaluateActiveTrials::new()),
        ],
        25,
    );

    let states = runner.run_parallel(factory, 0..16).await?;
    let curve = BenchmarkStateAnalyzer::to_curve(&states)?;
    let (repeats, trials) = curve.shape();
    println!("Ran {repeats} repeats of {trials} trials on Hartmann6D");

    let finals = curve.best_so_far().final_values();
    let best = finals.iter().copied().fold(f64::INFINITY, f64::min);
    println!("Best value found: {best:.5} (global minimum -3.32237)");

    Ok(())
}
