use std::sync::Arc;

use super::{Experimenter, ExperimenterFactory, ExperimenterMetadata};
use crate::error::Result;
use crate::problem::{ProblemStatement, SearchSpace};
use crate::trial::{Measurement, Trial};
use crate::types::Direction;

/// Metric name written by the synthetic experimenters.
pub const DEFAULT_METRIC: &str = "value";

type ObjectiveFn = Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Experimenter backed by a plain function over a box of float parameters.
///
/// Parameters are read in search-space order and passed to the function as
/// a slice. The result is recorded under the `"value"` metric, which is
/// minimized.
///
/// # Examples
///
/// ```
/// use optbench::experimenter::{Experimenter, FunctionExperimenter};
/// use optbench::{ParamValue, Trial};
///
/// let exp = FunctionExperimenter::new("Quadratic", 2, -1.0, 1.0, |x: &[f64]| {
///     x.iter().map(|v| v * v).sum()
/// })
/// .unwrap();
///
/// let mut trials = vec![
///     Trial::new()
///         .with_param("x0", ParamValue::Float(0.5))
///         .with_param("x1", ParamValue::Float(-0.5)),
/// ];
/// exp.evaluate(&mut trials).unwrap();
/// assert_eq!(trials[0].objective("value"), Some(0.5));
/// ```
#[derive(Clone)]
pub struct FunctionExperimenter {
    name: String,
    function: ObjectiveFn,
    problem: ProblemStatement,
}

impl FunctionExperimenter {
    /// Creates an experimenter over `[low, high]^dim` with parameters `x0..x{dim-1}`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`](crate::Error::InvalidDimension)
    /// for `dim == 0`, or a bounds error.
    pub fn new(
        name: impl Into<String>,
        dim: usize,
        low: f64,
        high: f64,
        function: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
    ) -> Result<Self> {
        let space = SearchSpace::float_box("x", 0, dim, low, high)?;
        Ok(Self::with_search_space(name, space, function))
    }

    /// Creates an experimenter over an explicit search space.
    ///
    /// Every parameter of `space` must be numeric.
    #[must_use]
    pub fn with_search_space(
        name: impl Into<String>,
        space: SearchSpace,
        function: impl Fn(&[f64]) -> f64 + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            function: Arc::new(function),
            problem: ProblemStatement::new(space, DEFAULT_METRIC, Direction::Minimize),
        }
    }

    /// Returns the function name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.problem.search_space().len()
    }

    /// Evaluates the function at `x` directly.
    #[must_use]
    pub fn value_at(&self, x: &[f64]) -> f64 {
        (self.function)(x)
    }
}

impl core::fmt::Debug for FunctionExperimenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FunctionExperimenter")
            .field("name", &self.name)
            .field("problem", &self.problem)
            .finish_non_exhaustive()
    }
}

impl Experimenter for FunctionExperimenter {
    fn problem_statement(&self) -> ProblemStatement {
        self.problem.clone()
    }

    fn evaluate(&self, trials: &mut [Trial]) -> Result<()> {
        let params = self.problem.search_space().parameters();
        let metric = &self.problem.metric().name;
        for trial in trials.iter_mut() {
            let x = params
                .iter()
                .map(|p| trial.float_param(&p.name))
                .collect::<Result<Vec<f64>>>()?;
            let value = (self.function)(&x);
            trial.complete(Measurement::single(metric.clone(), value));
        }
        Ok(())
    }
}

impl ExperimenterFactory for FunctionExperimenter {
    fn create(&self) -> Result<Arc<dyn Experimenter>> {
        Ok(Arc::new(self.clone()))
    }

    fn metadata(&self) -> ExperimenterMetadata {
        ExperimenterMetadata::new()
            .with("name", &self.name)
            .with("dim", self.dim())
    }
}
