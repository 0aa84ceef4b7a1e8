//! Benchmark state and the factories that build it.

use std::sync::Arc;

use crate::designer::{Designer, DesignerFactory};
use crate::error::{Error, Result};
use crate::experimenter::{Experimenter, ExperimenterFactory};
use crate::problem::ProblemStatement;
use crate::trial::Trial;

/// The mutable context of one benchmark run.
///
/// Binds one [`Designer`] to one [`Experimenter`] and keeps the ordered trial
/// history. Trials are partitioned into a completed prefix and an active
/// suffix: evaluation always completes the oldest active trials first, so
/// the history order is also the completion order.
///
/// A state is driven by a single control flow at a time; independent states
/// may run concurrently.
pub struct BenchmarkState {
    designer: Box<dyn Designer>,
    experimenter: Arc<dyn Experimenter>,
    problem: ProblemStatement,
    trials: Vec<Trial>,
    first_active: usize,
}

impl BenchmarkState {
    /// Creates a state with an empty history.
    #[must_use]
    pub fn new(designer: Box<dyn Designer>, experimenter: Arc<dyn Experimenter>) -> Self {
        let problem = experimenter.problem_statement();
        Self {
            designer,
            experimenter,
            problem,
            trials: Vec::new(),
            first_active: 0,
        }
    }

    /// Returns the problem statement of the bound experimenter.
    #[must_use]
    pub fn problem(&self) -> &ProblemStatement {
        &self.problem
    }

    /// Returns the full trial history: completed trials first, then active ones.
    #[must_use]
    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    /// Returns the completed trials in completion order.
    #[must_use]
    pub fn completed_trials(&self) -> &[Trial] {
        &self.trials[..self.first_active]
    }

    /// Returns the trials awaiting evaluation, oldest first.
    #[must_use]
    pub fn active_trials(&self) -> &[Trial] {
        &self.trials[self.first_active..]
    }

    /// Returns the number of completed trials.
    #[must_use]
    pub fn num_completed(&self) -> usize {
        self.first_active
    }

    /// Asks the designer for `count` suggestions and appends them as active trials.
    ///
    /// Trials receive ids `1, 2, ...` in suggestion order. Returns the
    /// number of trials added.
    ///
    /// # Errors
    ///
    /// Propagates designer errors. Returns [`Error::EmptySuggestions`] if the
    /// designer produced nothing and [`Error::SuggestionAlreadyCompleted`] if
    /// a suggestion carries a measurement; in both cases nothing is appended.
    pub fn add_suggestions(&mut self, count: usize) -> Result<usize> {
        let mut suggestions = self.designer.suggest(count)?;
        if suggestions.is_empty() {
            return Err(Error::EmptySuggestions { requested: count });
        }
        let next_id = self.trials.len() as u64 + 1;
        for (offset, trial) in (0_u64..).zip(suggestions.iter_mut()) {
            trial.set_id(next_id + offset);
            if trial.is_completed() {
                return Err(Error::SuggestionAlreadyCompleted {
                    trial_id: trial.id(),
                });
            }
        }
        let added = suggestions.len();
        self.trials.extend(suggestions);
        trace_debug!(added, total = self.trials.len(), "suggestions added");
        Ok(added)
    }

    /// Evaluates the oldest active trials, at most `max_trials` of them (all
    /// when `None`), then feeds them to the designer.
    ///
    /// Returns the number of trials evaluated. No active trials is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates experimenter and designer errors. Returns
    /// [`Error::IncompleteEvaluation`] if the experimenter leaves a trial
    /// without a measurement. On any error the leading run of completed
    /// trials is still moved to the completed prefix and passed to the
    /// designer, so it is never evaluated again; the rest stays active.
    pub fn evaluate_active(&mut self, max_trials: Option<usize>) -> Result<usize> {
        let available = self.trials.len() - self.first_active;
        let n = max_trials.map_or(available, |m| m.min(available));
        if n == 0 {
            return Ok(0);
        }
        let batch = self.first_active..self.first_active + n;
        let evaluated = self.experimenter.evaluate(&mut self.trials[batch.clone()]);
        let done = self.trials[batch]
            .iter()
            .take_while(|t| t.is_completed())
            .count();
        let committed = self.first_active..self.first_active + done;
        self.first_active = committed.end;
        let updated = if done == 0 {
            Ok(())
        } else {
            self.designer.update(&self.trials[committed])
        };
        evaluated?;
        updated?;
        if done < n {
            return Err(Error::IncompleteEvaluation {
                trial_id: self.trials[self.first_active].id(),
            });
        }
        trace_debug!(evaluated = n, completed = self.first_active, "trials evaluated");
        Ok(n)
    }
}

impl core::fmt::Debug for BenchmarkState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BenchmarkState")
            .field("problem", &self.problem)
            .field("num_trials", &self.trials.len())
            .field("num_completed", &self.first_active)
            .finish_non_exhaustive()
    }
}

/// Builds fresh [`BenchmarkState`]s for reproducible repeats.
///
/// The same seed must yield the same initial designer and experimenter
/// configuration.
pub trait BenchmarkStateFactory: Send + Sync {
    /// Creates a new state seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the designer or experimenter cannot be built.
    fn create(&self, seed: u64) -> Result<BenchmarkState>;
}

/// Pairs one shared experimenter with a fresh designer per state.
#[derive(Clone)]
pub struct DesignerBenchmarkStateFactory {
    experimenter: Arc<dyn Experimenter>,
    designer_factory: DesignerFactory,
}

impl DesignerBenchmarkStateFactory {
    /// Creates the factory.
    #[must_use]
    pub fn new(experimenter: Arc<dyn Experimenter>, designer_factory: DesignerFactory) -> Self {
        Self {
            experimenter,
            designer_factory,
        }
    }
}

impl BenchmarkStateFactory for DesignerBenchmarkStateFactory {
    fn create(&self, seed: u64) -> Result<BenchmarkState> {
        let problem = self.experimenter.problem_statement();
        let designer = (self.designer_factory)(&problem, seed)?;
        Ok(BenchmarkState::new(designer, Arc::clone(&self.experimenter)))
    }
}

/// Builds a fresh experimenter and a fresh designer for every state.
#[derive(Clone)]
pub struct ExperimenterDesignerBenchmarkStateFactory {
    experimenter_factory: Arc<dyn ExperimenterFactory>,
    designer_factory: DesignerFactory,
}

impl ExperimenterDesignerBenchmarkStateFactory {
    /// Creates the factory.
    #[must_use]
    pub fn new(
        experimenter_factory: Arc<dyn ExperimenterFactory>,
        designer_factory: DesignerFactory,
    ) -> Self {
        Self {
            experimenter_factory,
            designer_factory,
        }
    }
}

impl BenchmarkStateFactory for ExperimenterDesignerBenchmarkStateFactory {
    fn create(&self, seed: u64) -> Result<BenchmarkState> {
        let experimenter = self.experimenter_factory.create()?;
        let problem = experimenter.problem_statement();
        let designer = (self.designer_factory)(&problem, seed)?;
        Ok(BenchmarkState::new(designer, experimenter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designer::{RandomDesigner, designer_factory};
    use crate::experimenter::FunctionExperimenter;
    use crate::param::ParamValue;

    fn experimenter() -> Arc<dyn Experimenter> {
        Arc::new(
            FunctionExperimenter::new("Sum", 2, 0.0, 1.0, |x: &[f64]| x.iter().sum()).unwrap(),
        )
    }

    fn state(seed: u64) -> BenchmarkState {
        let factory = DesignerBenchmarkStateFactory::new(
            experimenter(),
            designer_factory(|p, s| Ok(RandomDesigner::new(p, s))),
        );
        factory.create(seed).unwrap()
    }

    #[test]
    fn test_suggest_then_partial_evaluate() {
        let mut state = state(1);
        assert_eq!(state.add_suggestions(3).unwrap(), 3);
        assert_eq!(state.active_trials().len(), 3);
        assert_eq!(state.num_completed(), 0);
        let ids: Vec<u64> = state.trials().iter().map(Trial::id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert_eq!(state.evaluate_active(Some(2)).unwrap(), 2);
        assert_eq!(state.completed_trials().len(), 2);
        assert_eq!(state.active_trials()[0].id(), 3);

        assert_eq!(state.evaluate_active(None).unwrap(), 1);
        assert_eq!(state.evaluate_active(None).unwrap(), 0);
        assert!(state.trials().iter().all(Trial::is_completed));
    }

    #[test]
    fn test_same_seed_same_trials() {
        let mut a = state(9);
        let mut b = state(9);
        a.add_suggestions(5).unwrap();
        b.add_suggestions(5).unwrap();
        assert_eq!(a.trials(), b.trials());
    }

    struct Lazy;

    impl Experimenter for Lazy {
        fn problem_statement(&self) -> ProblemStatement {
            experimenter().problem_statement()
        }

        fn evaluate(&self, _trials: &mut [Trial]) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_incomplete_evaluation_keeps_trials_active() {
        let problem = experimenter().problem_statement();
        let mut state = BenchmarkState::new(
            Box::new(RandomDesigner::new(&problem, 0)),
            Arc::new(Lazy),
        );
        state.add_suggestions(2).unwrap();
        assert!(matches!(
            state.evaluate_active(None),
            Err(Error::IncompleteEvaluation { trial_id: 1 })
        ));
        assert_eq!(state.active_trials().len(), 2);
    }

    /// Hands out a fixed list of trials once.
    struct Scripted(Vec<Trial>);

    impl Designer for Scripted {
        fn suggest(&mut self, _count: usize) -> Result<Vec<Trial>> {
            Ok(core::mem::take(&mut self.0))
        }
    }

    #[test]
    fn test_failed_batch_commits_evaluated_prefix() {
        let valid = Trial::new()
            .with_param("x0", ParamValue::Float(0.25))
            .with_param("x1", ParamValue::Float(0.5));
        let mut state = BenchmarkState::new(
            Box::new(Scripted(vec![valid, Trial::new()])),
            experimenter(),
        );
        state.add_suggestions(2).unwrap();

        assert!(matches!(
            state.evaluate_active(None),
            Err(Error::InvalidParameter { trial_id: 2, .. })
        ));
        assert_eq!(state.num_completed(), 1);
        assert_eq!(state.completed_trials()[0].objective("value"), Some(0.75));
        assert_eq!(state.active_trials().len(), 1);
        assert_eq!(state.active_trials()[0].id(), 2);
        assert!(!state.active_trials()[0].is_completed());

        assert!(state.evaluate_active(None).is_err());
        assert_eq!(state.num_completed(), 1);
    }
}
