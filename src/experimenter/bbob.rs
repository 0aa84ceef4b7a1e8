//! Noiseless BBOB-style test functions.
//!
//! All functions are defined on `[-5, 5]^d` and minimized. Each has its
//! global minimum of `0.0` at the origin, except Rosenbrock whose minimum
//! sits at `(1, ..., 1)`.

use core::f64::consts::{E, PI};
use core::str::FromStr;
use std::sync::Arc;

use super::{Experimenter, ExperimenterFactory, ExperimenterMetadata, FunctionExperimenter};
use crate::error::{Error, Result};

/// Lower bound of every BBOB dimension.
pub const BBOB_LOW: f64 = -5.0;
/// Upper bound of every BBOB dimension.
pub const BBOB_HIGH: f64 = 5.0;

/// A synthetic BBOB test function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BbobFunction {
    /// Unimodal and separable: `sum x_i^2`.
    Sphere,
    /// One very sensitive direction: `1e6 x_0^2 + sum_{i>0} x_i^2`.
    Discus,
    /// Condition number `1e6` spread geometrically over the axes.
    Ellipsoidal,
    /// Highly multimodal with a regular lattice of local minima.
    Rastrigin,
    /// Narrow curved valley.
    Rosenbrock,
    /// Nearly flat outer region with a deep central well.
    Ackley,
}

impl BbobFunction {
    /// Every supported function, in declaration order.
    pub const ALL: [BbobFunction; 6] = [
        BbobFunction::Sphere,
        BbobFunction::Discus,
        BbobFunction::Ellipsoidal,
        BbobFunction::Rastrigin,
        BbobFunction::Rosenbrock,
        BbobFunction::Ackley,
    ];

    /// Returns the canonical function name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BbobFunction::Sphere => "Sphere",
            BbobFunction::Discus => "Discus",
            BbobFunction::Ellipsoidal => "Ellipsoidal",
            BbobFunction::Rastrigin => "Rastrigin",
            BbobFunction::Rosenbrock => "Rosenbrock",
            BbobFunction::Ackley => "Ackley",
        }
    }

    /// Evaluates the function at `x`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn evaluate(self, x: &[f64]) -> f64 {
        match self {
            BbobFunction::Sphere => x.iter().map(|xi| xi * xi).sum(),
            BbobFunction::Discus => x
                .iter()
                .enumerate()
                .map(|(i, xi)| if i == 0 { 1e6 * xi * xi } else { xi * xi })
                .sum(),
            BbobFunction::Ellipsoidal => {
                let denom = (x.len().max(2) - 1) as f64;
                x.iter()
                    .enumerate()
                    .map(|(i, xi)| 10f64.powf(6.0 * i as f64 / denom) * xi * xi)
                    .sum()
            }
            BbobFunction::Rastrigin => {
                let n = x.len() as f64;
                10.0 * n
                    + x.iter()
                        .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
                        .sum::<f64>()
            }
            BbobFunction::Rosenbrock => x
                .windows(2)
                .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
                .sum(),
            BbobFunction::Ackley => {
                let n = x.len() as f64;
                let sum_sq: f64 = x.iter().map(|xi| xi * xi).sum();
                let sum_cos: f64 = x.iter().map(|xi| (2.0 * PI * xi).cos()).sum();
                -20.0 * (-0.2 * (sum_sq / n).sqrt()).exp() - (sum_cos / n).exp() + 20.0 + E
            }
        }
    }
}

impl core::fmt::Display for BbobFunction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BbobFunction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| Error::UnknownFunction(s.to_string()))
    }
}

/// Builds [`FunctionExperimenter`]s for one BBOB function and dimension.
///
/// # Examples
///
/// ```
/// use optbench::experimenter::{BbobExperimenterFactory, ExperimenterFactory};
///
/// let factory = BbobExperimenterFactory::new("Sphere", 10).unwrap();
/// let experimenter = factory.create().unwrap();
/// assert_eq!(experimenter.problem_statement().search_space().len(), 10);
/// assert!(factory.metadata().to_string().contains("Sphere"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BbobExperimenterFactory {
    function: BbobFunction,
    dim: usize,
}

impl BbobExperimenterFactory {
    /// Creates a factory for the function called `name` in `dim` dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFunction`] for an unsupported name and
    /// [`Error::InvalidDimension`] for `dim == 0`.
    pub fn new(name: &str, dim: usize) -> Result<Self> {
        Self::from_function(name.parse()?, dim)
    }

    /// Creates a factory from an already parsed [`BbobFunction`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for `dim == 0`.
    pub fn from_function(function: BbobFunction, dim: usize) -> Result<Self> {
        if dim == 0 {
            return Err(Error::InvalidDimension(dim));
        }
        Ok(Self { function, dim })
    }

    /// Returns the function.
    #[must_use]
    pub fn function(&self) -> BbobFunction {
        self.function
    }

    /// Returns the dimensionality.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Builds the concrete experimenter.
    ///
    /// # Errors
    ///
    /// Never fails for a factory built through [`BbobExperimenterFactory::new`].
    pub fn experimenter(&self) -> Result<FunctionExperimenter> {
        let function = self.function;
        FunctionExperimenter::new(
            function.name(),
            self.dim,
            BBOB_LOW,
            BBOB_HIGH,
            move |x: &[f64]| function.evaluate(x),
        )
    }
}

impl ExperimenterFactory for BbobExperimenterFactory {
    fn create(&self) -> Result<Arc<dyn Experimenter>> {
        Ok(Arc::new(self.experimenter()?))
    }

    fn metadata(&self) -> ExperimenterMetadata {
        ExperimenterMetadata::new()
            .with("name", self.function)
            .with("dim", self.dim)
    }
}
