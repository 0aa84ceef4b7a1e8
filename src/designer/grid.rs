//! Grid search designer implementation.
//!
//! `GridSearchDesigner` discretizes every parameter of the search space and
//! walks the Cartesian product of the per-parameter grids in lexicographic
//! order, the last parameter varying fastest.

use crate::designer::Designer;
use crate::distribution::{Distribution, FloatDistribution, IntDistribution};
use crate::error::{Error, Result};
use crate::param::ParamValue;
use crate::problem::ProblemStatement;
use crate::trial::Trial;

/// Default number of points used to discretize a continuous parameter.
pub const DEFAULT_POINTS_PER_PARAM: usize = 10;

/// Generates grid points for an integer distribution.
///
/// # Behavior
///
/// - If `step` is `Some(s)`: generates points at `low, low+s, low+2*s, ...` up to `high`.
/// - If `step` is `None` and `log_scale` is `false`: generates `n_points` evenly spaced
///   integers from `low` to `high`.
/// - If `step` is `None` and `log_scale` is `true`: generates `n_points` evenly spaced
///   in log space, rounded to integers.
///
/// The result is sorted, deduplicated and clamped to `[low, high]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn int_grid_points(dist: &IntDistribution, n_points: usize) -> Vec<i64> {
    let (low, high) = (dist.low, dist.high);
    if low > high {
        return vec![];
    }
    if low == high {
        return vec![low];
    }

    let mut points: Vec<i64> = if let Some(step) = dist.step.filter(|&s| s > 0) {
        let n_steps = (high - low) / step;
        (0..=n_steps).map(|k| low + k * step).collect()
    } else if n_points <= 1 {
        vec![low]
    } else {
        let scale = if dist.log_scale && low > 0 {
            Scale::Log
        } else {
            Scale::Linear
        };
        spaced(low as f64, high as f64, n_points, scale)
            .into_iter()
            .map(|p| (p.round() as i64).clamp(low, high))
            .collect()
    };

    points.sort_unstable();
    points.dedup();
    points
}

/// Generates grid points for a float distribution.
///
/// A `step` overrides `log_scale`. Without a step, `n_points` points are
/// spread evenly over `[low, high]`, in log space when `log_scale` is set.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn float_grid_points(dist: &FloatDistribution, n_points: usize) -> Vec<f64> {
    let (low, high) = (dist.low, dist.high);
    if low > high {
        return vec![];
    }
    if (low - high).abs() < f64::EPSILON || (n_points <= 1 && dist.step.is_none()) {
        return vec![low];
    }

    if let Some(step) = dist.step.filter(|&s| s > 0.0) {
        let n_steps = ((high - low) / step + f64::EPSILON).floor() as usize;
        return (0..=n_steps)
            .map(|k| (low + k as f64 * step).clamp(low, high))
            .collect();
    }

    let scale = if dist.log_scale && low > 0.0 {
        Scale::Log
    } else {
        Scale::Linear
    };
    spaced(low, high, n_points, scale)
        .into_iter()
        .map(|p| p.clamp(low, high))
        .collect()
}

#[derive(Clone, Copy)]
enum Scale {
    Linear,
    Log,
}

#[allow(clippy::cast_precision_loss)]
fn spaced(low: f64, high: f64, n_points: usize, scale: Scale) -> Vec<f64> {
    let (a, b) = match scale {
        Scale::Linear => (low, high),
        Scale::Log => (low.ln(), high.ln()),
    };
    (0..n_points)
        .map(|i| {
            let v = a + (i as f64 / (n_points - 1) as f64) * (b - a);
            match scale {
                Scale::Linear => v,
                Scale::Log => v.exp(),
            }
        })
        .collect()
}

/// Discretizes `distribution` into its list of grid values.
fn grid_values(distribution: &Distribution, n_points: usize) -> Vec<ParamValue> {
    match distribution {
        Distribution::Float(d) => float_grid_points(d, n_points)
            .into_iter()
            .map(ParamValue::Float)
            .collect(),
        Distribution::Int(d) => int_grid_points(d, n_points)
            .into_iter()
            .map(ParamValue::Int)
            .collect(),
        Distribution::Categorical(d) => (0..d.n_choices).map(ParamValue::Categorical).collect(),
    }
}

/// A designer that enumerates a discretized grid of the search space.
///
/// Suggestions follow the grid in order starting at a seed-derived offset
/// and wrap around once every point has been proposed, so any trial budget
/// can be served. Two designers with the same seed propose the same
/// sequence.
///
/// # Examples
///
/// ```
/// use optbench::designer::{Designer, GridSearchDesigner};
/// use optbench::{Direction, ProblemStatement, SearchSpace};
///
/// let space = SearchSpace::new().int("a", 0, 1).unwrap().categorical("b", 3).unwrap();
/// let problem = ProblemStatement::new(space, "value", Direction::Minimize);
///
/// let mut designer = GridSearchDesigner::new(&problem, 0).unwrap();
/// assert_eq!(designer.grid_size(), 6);
/// assert_eq!(designer.suggest(6).unwrap().len(), 6);
/// ```
pub struct GridSearchDesigner {
    names: Vec<String>,
    axes: Vec<Vec<ParamValue>>,
    grid_size: u64,
    position: u64,
}

impl GridSearchDesigner {
    /// Creates a grid designer with [`DEFAULT_POINTS_PER_PARAM`] points per
    /// continuous parameter.
    ///
    /// # Errors
    ///
    /// See [`GridSearchDesigner::with_points`].
    pub fn new(problem: &ProblemStatement, seed: u64) -> Result<Self> {
        Self::with_points(problem, seed, DEFAULT_POINTS_PER_PARAM)
    }

    /// Creates a grid designer discretizing continuous parameters into
    /// `points_per_param` points.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the search space is empty.
    pub fn with_points(
        problem: &ProblemStatement,
        seed: u64,
        points_per_param: usize,
    ) -> Result<Self> {
        let space = problem.search_space();
        if space.is_empty() {
            return Err(Error::InvalidDimension(0));
        }
        let names = space.parameters().iter().map(|p| p.name.clone()).collect();
        let axes: Vec<Vec<ParamValue>> = space
            .parameters()
            .iter()
            .map(|p| grid_values(&p.distribution, points_per_param.max(1)))
            .collect();
        let grid_size = axes
            .iter()
            .fold(1_u64, |acc, axis| acc.saturating_mul(axis.len() as u64))
            .max(1);
        Ok(Self {
            names,
            axes,
            grid_size,
            position: seed % grid_size,
        })
    }

    /// Returns the number of distinct grid points.
    #[must_use]
    pub fn grid_size(&self) -> u64 {
        self.grid_size
    }

    /// Decodes a flat grid index into a trial.
    #[allow(clippy::cast_possible_truncation)]
    fn trial_at(&self, mut index: u64) -> Trial {
        let mut values = vec![ParamValue::Int(0); self.axes.len()];
        for (slot, axis) in values.iter_mut().zip(&self.axes).rev() {
            let len = axis.len() as u64;
            *slot = axis[(index % len) as usize].clone();
            index /= len;
        }
        self.names
            .iter()
            .cloned()
            .zip(values)
            .fold(Trial::new(), |trial, (name, value)| {
                trial.with_param(name, value)
            })
    }
}

impl Designer for GridSearchDesigner {
    fn suggest(&mut self, count: usize) -> Result<Vec<Trial>> {
        if count == 0 {
            return Err(Error::InvalidSuggestionCount(count));
        }
        let trials = (0..count)
            .map(|_| {
                let trial = self.trial_at(self.position);
                self.position = (self.position + 1) % self.grid_size;
                trial
            })
            .collect();
        Ok(trials)
    }
}
