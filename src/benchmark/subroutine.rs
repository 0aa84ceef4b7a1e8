//! Pipeline stages applied to a [`BenchmarkState`].
//!
//! Two compositions cover the common cases:
//!
//! - `[GenerateAndEvaluate]`: every repeat suggests one batch and evaluates it
//!   immediately.
//! - `[GenerateSuggestions, .., EvaluateActiveTrials]`: suggestions pile up
//!   as active trials and are evaluated by a later stage, which models
//!   batched or asynchronous suggestion.

use super::state::BenchmarkState;
use crate::error::{Error, Result};

/// A single stage of the benchmark loop.
pub trait BenchmarkSubroutine: Send + Sync {
    /// Short stage name used in error context and logs.
    fn name(&self) -> &'static str;

    /// Applies the stage to `state`.
    ///
    /// # Errors
    ///
    /// Returns designer or experimenter contract violations.
    fn run(&self, state: &mut BenchmarkState) -> Result<()>;
}

fn check_count(count: usize) -> Result<usize> {
    if count == 0 {
        Err(Error::InvalidSuggestionCount(count))
    } else {
        Ok(count)
    }
}

/// Asks the designer for suggestions and adds them as active trials.
#[derive(Clone, Copy, Debug)]
pub struct GenerateSuggestions {
    num_suggestions: usize,
}

impl GenerateSuggestions {
    /// Requests `num_suggestions` trials per run.
    #[must_use]
    pub fn new(num_suggestions: usize) -> Self {
        Self { num_suggestions }
    }
}

impl Default for GenerateSuggestions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BenchmarkSubroutine for GenerateSuggestions {
    fn name(&self) -> &'static str {
        "GenerateSuggestions"
    }

    fn run(&self, state: &mut BenchmarkState) -> Result<()> {
        state.add_suggestions(check_count(self.num_suggestions)?)?;
        Ok(())
    }
}

/// Evaluates active trials and reports them back to the designer.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvaluateActiveTrials {
    max_trials: Option<usize>,
}

impl EvaluateActiveTrials {
    /// Evaluates every active trial per run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps each run at the `max_trials` oldest active trials.
    #[must_use]
    pub fn max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = Some(max_trials);
        self
    }
}

impl BenchmarkSubroutine for EvaluateActiveTrials {
    fn name(&self) -> &'static str {
        "EvaluateActiveTrials"
    }

    fn run(&self, state: &mut BenchmarkState) -> Result<()> {
        state.evaluate_active(self.max_trials)?;
        Ok(())
    }
}

/// Suggests one batch and evaluates it immediately.
///
/// Evaluation is oldest-first, so trials left active by an earlier
/// [`GenerateSuggestions`] stage are evaluated in the same step.
#[derive(Clone, Copy, Debug)]
pub struct GenerateAndEvaluate {
    num_suggestions: usize,
}

impl GenerateAndEvaluate {
    /// Suggests and evaluates `num_suggestions` trials per run.
    #[must_use]
    pub fn new(num_suggestions: usize) -> Self {
        Self { num_suggestions }
    }
}

impl Default for GenerateAndEvaluate {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BenchmarkSubroutine for GenerateAndEvaluate {
    fn name(&self) -> &'static str {
        "GenerateAndEvaluate"
    }

    fn run(&self, state: &mut BenchmarkState) -> Result<()> {
        state.add_suggestions(check_count(self.num_suggestions)?)?;
        state.evaluate_active(None)?;
        Ok(())
    }
}
