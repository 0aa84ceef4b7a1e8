//! The benchmark execution engine.
//!
//! A [`BenchmarkStateFactory`] builds a [`BenchmarkState`] per seed, and a
//! [`BenchmarkRunner`] drives it by applying [`BenchmarkSubroutine`] stages
//! for a fixed number of repeats.

mod runner;
mod state;
mod subroutine;

pub use runner::BenchmarkRunner;
pub use state::{
    BenchmarkState, BenchmarkStateFactory, DesignerBenchmarkStateFactory,
    ExperimenterDesignerBenchmarkStateFactory,
};
pub use subroutine::{
    BenchmarkSubroutine, EvaluateActiveTrials, GenerateAndEvaluate, GenerateSuggestions,
};
