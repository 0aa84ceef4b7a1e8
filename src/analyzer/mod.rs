//! Turning completed runs into curves, records and comparison scores.
//!
//! [`BenchmarkStateAnalyzer`] converts the states of one algorithm on one
//! problem into a [`Curve`] or a [`BenchmarkRecord`].
//! [`BenchmarkRecordAnalyzer`] then scores records of several algorithms
//! against a baseline on each problem.

mod comparison;
mod curve;
mod record;
mod state;

pub use comparison::{BenchmarkRecordAnalyzer, ScoreRow};
pub use curve::Curve;
pub use record::{BenchmarkRecord, PlotElement, RECORD_OBJECTIVE_KEY, score_curve_key, score_key};
pub use state::BenchmarkStateAnalyzer;
