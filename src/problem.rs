//! Problem statements: the search space and the metric being optimized.
//!
//! A [`ProblemStatement`] is owned by the [`Experimenter`](crate::experimenter::Experimenter)
//! that defines it and compared structurally: two statements are equal when
//! their search spaces and metric information are equal, regardless of where
//! they came from.
//!
//! ```
//! use optbench::{Direction, ProblemStatement, SearchSpace};
//!
//! let space = SearchSpace::new()
//!     .float("x0", -5.0, 5.0)
//!     .unwrap()
//!     .int("layers", 1, 8)
//!     .unwrap();
//! let problem = ProblemStatement::new(space, "value", Direction::Minimize);
//! assert_eq!(problem.search_space().len(), 2);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::types::Direction;

/// One named dimension of a [`SearchSpace`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParameterConfig {
    /// Parameter name, unique within its search space.
    pub name: String,
    /// Distribution the parameter is drawn from.
    pub distribution: Distribution,
}

/// An ordered collection of named parameter distributions.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchSpace {
    parameters: Vec<ParameterConfig>,
}

impl SearchSpace {
    /// Creates an empty search space.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter with an arbitrary distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateParameter`] if `name` is already present, or
    /// a validation error if the distribution is malformed.
    pub fn add(mut self, name: impl Into<String>, distribution: Distribution) -> Result<Self> {
        let name = name.into();
        distribution.validate(&name)?;
        if self.get(&name).is_some() {
            return Err(Error::DuplicateParameter(name));
        }
        self.parameters.push(ParameterConfig { name, distribution });
        Ok(self)
    }

    /// Adds a uniform float parameter on `[low, high]`.
    ///
    /// # Errors
    ///
    /// See [`SearchSpace::add`].
    pub fn float(self, name: impl Into<String>, low: f64, high: f64) -> Result<Self> {
        self.add(name, Distribution::float(low, high))
    }

    /// Adds a uniform integer parameter on `[low, high]`.
    ///
    /// # Errors
    ///
    /// See [`SearchSpace::add`].
    pub fn int(self, name: impl Into<String>, low: i64, high: i64) -> Result<Self> {
        self.add(name, Distribution::int(low, high))
    }

    /// Adds a categorical parameter with `n_choices` options.
    ///
    /// # Errors
    ///
    /// See [`SearchSpace::add`].
    pub fn categorical(self, name: impl Into<String>, n_choices: usize) -> Result<Self> {
        self.add(name, Distribution::categorical(n_choices))
    }

    /// Builds a box `[low, high]^dim` of float parameters named `{prefix}{offset}..`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] when `dim` is zero, or a bounds error.
    pub fn float_box(prefix: &str, offset: usize, dim: usize, low: f64, high: f64) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidDimension(dim));
        }
        (offset..offset + dim).try_fold(Self::new(), |space, i| {
            space.float(format!("{prefix}{i}"), low, high)
        })
    }

    /// Builds `[0, 1]^dim` with parameters named `{prefix}{offset}..`.
    pub(crate) fn unit_interval_box(prefix: &str, offset: usize, dim: usize) -> Self {
        let parameters = (offset..offset + dim)
            .map(|i| ParameterConfig {
                name: format!("{prefix}{i}"),
                distribution: Distribution::float(0.0, 1.0),
            })
            .collect();
        Self { parameters }
    }

    /// Looks up a parameter by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParameterConfig> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Returns the parameters in definition order.
    #[must_use]
    pub fn parameters(&self) -> &[ParameterConfig] {
        &self.parameters
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` if the space has no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

/// Name and goal of the objective metric.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MetricInformation {
    /// Metric name as written into each trial's measurement.
    pub name: String,
    /// Whether lower or higher values are better.
    pub goal: Direction,
}

/// Immutable description of a search space and its objective metric.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProblemStatement {
    search_space: SearchSpace,
    metric: MetricInformation,
}

impl ProblemStatement {
    /// Creates a problem statement for a single objective metric.
    #[must_use]
    pub fn new(search_space: SearchSpace, metric_name: impl Into<String>, goal: Direction) -> Self {
        Self {
            search_space,
            metric: MetricInformation {
                name: metric_name.into(),
                goal,
            },
        }
    }

    /// Returns the search space.
    #[must_use]
    pub fn search_space(&self) -> &SearchSpace {
        &self.search_space
    }

    /// Returns the objective metric information.
    #[must_use]
    pub fn metric(&self) -> &MetricInformation {
        &self.metric
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_parameter_rejected() {
        let result = SearchSpace::new()
            .float("x", 0.0, 1.0)
            .and_then(|s| s.float("x", 0.0, 2.0));
        assert!(matches!(result, Err(Error::DuplicateParameter(name)) if name == "x"));
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        assert!(matches!(
            SearchSpace::new().float("x", 1.0, 0.0),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(matches!(
            SearchSpace::new().categorical("c", 0),
            Err(Error::EmptyChoices(_))
        ));
    }

    #[test]
    fn test_float_box_names_and_equality() {
        let a = SearchSpace::float_box("x", 0, 3, -5.0, 5.0).unwrap();
        let b = SearchSpace::float_box("x", 0, 3, -5.0, 5.0).unwrap();
        let c = SearchSpace::float_box("x", 0, 2, -5.0, 5.0).unwrap();
        assert_eq!(a.len(), 3);
        assert!(a.get("x2").is_some());
        assert_eq!(
            ProblemStatement::new(a, "value", Direction::Minimize),
            ProblemStatement::new(b.clone(), "value", Direction::Minimize)
        );
        assert_ne!(
            ProblemStatement::new(b, "value", Direction::Minimize),
            ProblemStatement::new(c, "value", Direction::Minimize)
        );
    }

    #[test]
    fn test_float_box_rejects_zero_dim() {
        assert!(matches!(
            SearchSpace::float_box("x", 0, 0, 0.0, 1.0),
            Err(Error::InvalidDimension(0))
        ));
    }
}
