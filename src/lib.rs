#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Benchmarking harness for black-box optimization algorithms.
//!
//! Drive an optimization policy (a *designer*) against a synthetic objective
//! (an *experimenter*) for a fixed trial budget, repeat the run over several
//! seeds, and turn the trial histories into curves and win-rate scores that
//! compare algorithms across problems.
//!
//! # Getting Started
//!
//! ```
//! use std::sync::Arc;
//!
//! use optbench::prelude::*;
//!
//! let problem = BbobExperimenterFactory::new("Sphere", 4).unwrap();
//! let registry = DesignerRegistry::with_defaults();
//! let runner = BenchmarkRunner::new(vec![Arc::new(GenerateAndEvaluate::new(1))], 20);
//!
//! let mut records = Vec::new();
//! for algorithm in ["random", "grid"] {
//!     let factory = ExperimenterDesignerBenchmarkStateFactory::new(
//!         Arc::new(problem),
//!         registry.get(algorithm).unwrap(),
//!     );
//!     let states = runner.run_states(&factory, 0..5).unwrap();
//!     records.push(BenchmarkStateAnalyzer::to_record(algorithm, &problem, &states).unwrap());
//! }
//!
//! BenchmarkRecordAnalyzer::add_comparison_metrics(&mut records, "random", RECORD_OBJECTIVE_KEY)
//!     .unwrap();
//! for row in BenchmarkRecordAnalyzer::score_table(&records, "objective", "random").unwrap() {
//!     println!("{} {}: {:.2}", row.problem, row.algorithm, row.score);
//! }
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Designer`](designer::Designer) | Proposes trials and learns from completed ones. |
//! | [`Experimenter`](experimenter::Experimenter) | Owns a [`ProblemStatement`] and measures trials. |
//! | [`BenchmarkState`] | One designer bound to one experimenter, plus the trial history. |
//! | [`BenchmarkStateFactory`] | Builds a fresh, seeded state per repeat. |
//! | [`BenchmarkRunner`] | Applies [`BenchmarkSubroutine`]s to a state for a fixed number of repeats. |
//! | [`BenchmarkStateAnalyzer`] | Turns completed states into a [`Curve`] or [`BenchmarkRecord`]. |
//! | [`BenchmarkRecordAnalyzer`] | Scores records against a baseline algorithm per problem. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `async` | `BenchmarkRunner::run_parallel` on tokio blocking tasks | off |
//! | `serde` | `Serialize`/`Deserialize` on problems, trials, curves and records | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at run and analysis points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod analyzer;
mod benchmark;
pub mod designer;
pub mod distribution;
mod error;
pub mod experimenter;
mod param;
mod problem;
mod trial;
mod types;

pub use analyzer::{
    BenchmarkRecord, BenchmarkRecordAnalyzer, BenchmarkStateAnalyzer, Curve, PlotElement,
    RECORD_OBJECTIVE_KEY, ScoreRow, score_curve_key, score_key,
};
pub use benchmark::{
    BenchmarkRunner, BenchmarkState, BenchmarkStateFactory, BenchmarkSubroutine,
    DesignerBenchmarkStateFactory, EvaluateActiveTrials, ExperimenterDesignerBenchmarkStateFactory,
    GenerateAndEvaluate, GenerateSuggestions,
};
pub use error::{Error, Result};
pub use param::ParamValue;
pub use problem::{MetricInformation, ParameterConfig, ProblemStatement, SearchSpace};
pub use trial::{Measurement, Trial};
pub use types::Direction;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use optbench::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analyzer::{
        BenchmarkRecord, BenchmarkRecordAnalyzer, BenchmarkStateAnalyzer, Curve, PlotElement,
        RECORD_OBJECTIVE_KEY, ScoreRow,
    };
    pub use crate::benchmark::{
        BenchmarkRunner, BenchmarkState, BenchmarkStateFactory, BenchmarkSubroutine,
        DesignerBenchmarkStateFactory, EvaluateActiveTrials,
        ExperimenterDesignerBenchmarkStateFactory, GenerateAndEvaluate, GenerateSuggestions,
    };
    pub use crate::designer::{
        Designer, DesignerFactory, DesignerRegistry, GridSearchDesigner, RandomDesigner,
        designer_factory,
    };
    pub use crate::error::{Error, Result};
    pub use crate::experimenter::{
        BbobExperimenterFactory, BbobFunction, Experimenter, ExperimenterFactory,
        ExperimenterMetadata, FunctionExperimenter, Hartmann3D, Hartmann6D,
    };
    pub use crate::param::ParamValue;
    pub use crate::problem::{ProblemStatement, SearchSpace};
    pub use crate::trial::{Measurement, Trial};
    pub use crate::types::Direction;
}
