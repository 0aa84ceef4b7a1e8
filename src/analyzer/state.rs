use super::curve::Curve;
use super::record::{BenchmarkRecord, PlotElement, RECORD_OBJECTIVE_KEY};
use crate::benchmark::BenchmarkState;
use crate::error::{Error, Result};
use crate::experimenter::ExperimenterFactory;

/// Converts completed benchmark states into curves and records.
#[derive(Clone, Copy, Debug, Default)]
pub struct BenchmarkStateAnalyzer;

impl BenchmarkStateAnalyzer {
    /// Builds the objective curve of `states`, one row per state.
    ///
    /// Rows follow state order and columns follow completion order. The
    /// metric and trend come from the shared problem statement.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyStates`] if `states` is empty.
    /// - [`Error::ProblemMismatch`] if any problem differs from the first.
    /// - [`Error::TrialCountMismatch`] if trial counts differ.
    /// - [`Error::IncompleteTrial`] if a state still holds active trials.
    /// - [`Error::MissingMetric`] if a measurement lacks the problem metric.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use optbench::designer::{RandomDesigner, designer_factory};
    /// use optbench::experimenter::{BbobExperimenterFactory, ExperimenterFactory};
    /// use optbench::{
    ///     BenchmarkRunner, BenchmarkStateAnalyzer, DesignerBenchmarkStateFactory,
    ///     GenerateAndEvaluate,
    /// };
    ///
    /// let factory = DesignerBenchmarkStateFactory::new(
    ///     BbobExperimenterFactory::new("Rastrigin", 3).unwrap().create().unwrap(),
    ///     designer_factory(|problem, seed| Ok(RandomDesigner::new(problem, seed))),
    /// );
    /// let runner = BenchmarkRunner::new(vec![Arc::new(GenerateAndEvaluate::new(1))], 8);
    /// let states = runner.run_states(&factory, 0..4).unwrap();
    ///
    /// let curve = BenchmarkStateAnalyzer::to_curve(&states).unwrap();
    /// assert_eq!(curve.shape(), (4, 8));
    /// ```
    pub fn to_curve(states: &[BenchmarkState]) -> Result<Curve> {
        let first = states.first().ok_or(Error::EmptyStates)?;
        let problem = first.problem();
        let expected = first.trials().len();

        for (index, state) in states.iter().enumerate().skip(1) {
            if state.problem() != problem {
                return Err(Error::ProblemMismatch { index });
            }
            if state.trials().len() != expected {
                return Err(Error::TrialCountMismatch {
                    index,
                    expected,
                    got: state.trials().len(),
                });
            }
        }

        let metric = &problem.metric().name;
        let mut ys = Vec::with_capacity(states.len());
        for (index, state) in states.iter().enumerate() {
            let row = state
                .trials()
                .iter()
                .map(|trial| {
                    if !trial.is_completed() {
                        return Err(Error::IncompleteTrial {
                            state: index,
                            trial_id: trial.id(),
                        });
                    }
                    trial.objective(metric).ok_or_else(|| Error::MissingMetric {
                        trial_id: trial.id(),
                        metric: metric.clone(),
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            ys.push(row);
        }

        Curve::new(ys, problem.metric().goal)
    }

    /// Builds a record holding the objective curve of `states` under
    /// [`RECORD_OBJECTIVE_KEY`], tagged with `algorithm` and the metadata of
    /// `experimenter_factory`.
    ///
    /// Call once per algorithm and problem instance.
    ///
    /// # Errors
    ///
    /// Same as [`to_curve`](Self::to_curve).
    pub fn to_record(
        algorithm: &str,
        experimenter_factory: &dyn ExperimenterFactory,
        states: &[BenchmarkState],
    ) -> Result<BenchmarkRecord> {
        let curve = Self::to_curve(states)?;
        let record = BenchmarkRecord::new(algorithm, experimenter_factory.metadata())
            .with_element(RECORD_OBJECTIVE_KEY, PlotElement::Curve(curve));
        trace_debug!(
            algorithm,
            problem = %record.experimenter_metadata,
            "benchmark record built"
        );
        Ok(record)
    }
}
