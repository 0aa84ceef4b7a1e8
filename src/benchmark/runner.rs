use std::sync::Arc;

use super::state::{BenchmarkState, BenchmarkStateFactory};
use super::subroutine::BenchmarkSubroutine;
use crate::error::{Error, Result};

/// Drives the benchmark loop: applies an ordered list of subroutines to a
/// [`BenchmarkState`] a fixed number of times.
///
/// Each repeat is one round of the optimize loop. A failing subroutine
/// aborts the run immediately; the error is wrapped in
/// [`Error::Subroutine`] with the repeat index and the state keeps whatever
/// progress it made.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use optbench::designer::{RandomDesigner, designer_factory};
/// use optbench::experimenter::{BbobExperimenterFactory, ExperimenterFactory};
/// use optbench::{
///     BenchmarkRunner, BenchmarkStateFactory, DesignerBenchmarkStateFactory, GenerateAndEvaluate,
/// };
///
/// let experimenter = BbobExperimenterFactory::new("Sphere", 4).unwrap().create().unwrap();
/// let factory = DesignerBenchmarkStateFactory::new(
///     experimenter,
///     designer_factory(|problem, seed| Ok(RandomDesigner::new(problem, seed))),
/// );
///
/// let runner = BenchmarkRunner::new(vec![Arc::new(GenerateAndEvaluate::new(1))], 20);
/// let mut state = factory.create(0).unwrap();
/// runner.run(&mut state).unwrap();
/// assert_eq!(state.completed_trials().len(), 20);
/// ```
#[derive(Clone)]
pub struct BenchmarkRunner {
    subroutines: Vec<Arc<dyn BenchmarkSubroutine>>,
    num_repeats: usize,
}

impl BenchmarkRunner {
    /// Creates a runner applying `subroutines` in order, `num_repeats` times.
    #[must_use]
    pub fn new(subroutines: Vec<Arc<dyn BenchmarkSubroutine>>, num_repeats: usize) -> Self {
        Self {
            subroutines,
            num_repeats,
        }
    }

    /// Returns the number of repeats per run.
    #[must_use]
    pub fn num_repeats(&self) -> usize {
        self.num_repeats
    }

    /// Runs the loop on `state` in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Subroutine`] wrapping the first subroutine failure.
    pub fn run(&self, state: &mut BenchmarkState) -> Result<()> {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "benchmark_run",
            num_repeats = self.num_repeats,
            num_subroutines = self.subroutines.len()
        )
        .entered();

        for repeat in 0..self.num_repeats {
            for subroutine in &self.subroutines {
                subroutine
                    .run(state)
                    .map_err(|source| Error::Subroutine {
                        repeat,
                        subroutine: subroutine.name(),
                        source: Box::new(source),
                    })?;
            }
            trace_debug!(repeat, completed = state.num_completed(), "repeat finished");
        }

        trace_info!(
            trials = state.trials().len(),
            completed = state.num_completed(),
            "benchmark run finished"
        );
        Ok(())
    }

    /// Creates one state per seed with `factory`, runs each, and returns
    /// them in seed order.
    ///
    /// # Errors
    ///
    /// Returns the first creation or run failure.
    pub fn run_states(
        &self,
        factory: &dyn BenchmarkStateFactory,
        seeds: impl IntoIterator<Item = u64>,
    ) -> Result<Vec<BenchmarkState>> {
        seeds
            .into_iter()
            .map(|seed| {
                let mut state = factory.create(seed)?;
                self.run(&mut state)?;
                Ok(state)
            })
            .collect()
    }

    /// Like [`run_states`](Self::run_states), but runs every seed on its own
    /// [`spawn_blocking`](tokio::task::spawn_blocking) task.
    ///
    /// Results keep seed order regardless of completion order.
    ///
    /// # Errors
    ///
    /// Returns the failure of the lowest failing seed, or
    /// [`Error::TaskError`] if a task panicked.
    #[cfg(feature = "async")]
    pub async fn run_parallel(
        &self,
        factory: Arc<dyn BenchmarkStateFactory>,
        seeds: impl IntoIterator<Item = u64>,
    ) -> Result<Vec<BenchmarkState>> {
        let mut set = tokio::task::JoinSet::new();
        for (index, seed) in seeds.into_iter().enumerate() {
            let runner = self.clone();
            let factory = Arc::clone(&factory);
            set.spawn_blocking(move || {
                let result = factory.create(seed).and_then(|mut state| {
                    runner.run(&mut state)?;
                    Ok(state)
                });
                (index, result)
            });
        }

        let mut results: Vec<(usize, Result<BenchmarkState>)> = Vec::with_capacity(set.len());
        while let Some(joined) = set.join_next().await {
            results.push(joined.map_err(|e| Error::TaskError(e.to_string()))?);
        }
        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, result)| result).collect()
    }
}

impl core::fmt::Debug for BenchmarkRunner {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let names: Vec<&str> = self.subroutines.iter().map(|s| s.name()).collect();
        f.debug_struct("BenchmarkRunner")
            .field("subroutines", &names)
            .field("num_repeats", &self.num_repeats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::state::DesignerBenchmarkStateFactory;
    use crate::benchmark::subroutine::{
        EvaluateActiveTrials, GenerateAndEvaluate, GenerateSuggestions,
    };
    use crate::designer::{Designer, RandomDesigner, designer_factory};
    use crate::experimenter::{Experimenter, FunctionExperimenter};
    use crate::trial::Trial;

    fn experimenter() -> Arc<dyn Experimenter> {
        Arc::new(
            FunctionExperimenter::new("Sum", 3, 0.0, 1.0, |x: &[f64]| x.iter().sum()).unwrap(),
        )
    }

    fn random_factory() -> DesignerBenchmarkStateFactory {
        DesignerBenchmarkStateFactory::new(
            experimenter(),
            designer_factory(|p, s| Ok(RandomDesigner::new(p, s))),
        )
    }

    #[test]
    fn test_batched_generate_before_evaluate() {
        let runner = BenchmarkRunner::new(
            vec![
                Arc::new(GenerateSuggestions::new(2)),
                Arc::new(GenerateSuggestions::new(1)),
                Arc::new(EvaluateActiveTrials::new()),
            ],
            4,
        );
        let mut state = random_factory().create(0).unwrap();
        runner.run(&mut state).unwrap();
        assert_eq!(state.trials().len(), 12);
        assert_eq!(state.num_completed(), 12);
    }

    #[test]
    fn test_capped_evaluation_leaves_backlog() {
        let runner = BenchmarkRunner::new(
            vec![
                Arc::new(GenerateSuggestions::new(2)),
                Arc::new(EvaluateActiveTrials::new().max_trials(1)),
            ],
            5,
        );
        let mut state = random_factory().create(0).unwrap();
        runner.run(&mut state).unwrap();
        assert_eq!(state.trials().len(), 10);
        assert_eq!(state.num_completed(), 5);
        assert_eq!(state.active_trials()[0].id(), 6);
    }

    struct Exhausted {
        remaining: usize,
    }

    impl Designer for Exhausted {
        fn suggest(&mut self, _count: usize) -> Result<Vec<Trial>> {
            if self.remaining == 0 {
                return Ok(Vec::new());
            }
            self.remaining -= 1;
            Ok(vec![
                Trial::new()
                    .with_param("x0", crate::ParamValue::Float(0.0))
                    .with_param("x1", crate::ParamValue::Float(0.0))
                    .with_param("x2", crate::ParamValue::Float(0.0)),
            ])
        }
    }

    #[test]
    fn test_failure_aborts_with_repeat_index() {
        let mut state =
            BenchmarkState::new(Box::new(Exhausted { remaining: 3 }), experimenter());
        let runner = BenchmarkRunner::new(vec![Arc::new(GenerateAndEvaluate::new(1))], 10);
        let err = runner.run(&mut state).unwrap_err();
        assert!(matches!(
            err,
            Error::Subroutine {
                repeat: 3,
                subroutine: "GenerateAndEvaluate",
                ..
            }
        ));
        assert!(matches!(
            err.root_cause(),
            Error::EmptySuggestions { requested: 1 }
        ));
        assert_eq!(state.num_completed(), 3);
    }

    #[test]
    fn test_zero_suggestion_count_rejected() {
        let runner = BenchmarkRunner::new(vec![Arc::new(GenerateSuggestions::new(0))], 1);
        let mut state = random_factory().create(0).unwrap();
        let err = runner.run(&mut state).unwrap_err();
        assert!(matches!(err.root_cause(), Error::InvalidSuggestionCount(0)));
        assert!(state.trials().is_empty());
    }

    #[test]
    fn test_run_states_keeps_seed_order() {
        let runner = BenchmarkRunner::new(vec![Arc::new(GenerateAndEvaluate::new(1))], 5);
        let factory = random_factory();
        let states = runner.run_states(&factory, [3, 4]).unwrap();
        let again = runner.run_states(&factory, [4]).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[1].trials(), again[0].trials());
        assert_ne!(states[0].trials(), states[1].trials());
    }
}
