//! Hartmann test functions on the unit hypercube.
//!
//! Parameters are named `x1..xd`.

use std::sync::Arc;

use super::{Experimenter, ExperimenterFactory, ExperimenterMetadata, FunctionExperimenter};
use crate::error::Result;
use crate::problem::{ProblemStatement, SearchSpace};
use crate::trial::Trial;

const ALPHA: [f64; 4] = [1.0, 1.2, 3.0, 3.2];

const A3: [[f64; 3]; 4] = [
    [3.0, 10.0, 30.0],
    [0.1, 10.0, 35.0],
    [3.0, 10.0, 30.0],
    [0.1, 10.0, 35.0],
];

const P3: [[f64; 3]; 4] = [
    [0.3689, 0.1170, 0.2673],
    [0.4699, 0.4387, 0.7470],
    [0.1091, 0.8732, 0.5547],
    [0.0381, 0.5743, 0.8828],
];

const A6: [[f64; 6]; 4] = [
    [10.0, 3.0, 17.0, 3.5, 1.7, 8.0],
    [0.05, 10.0, 17.0, 0.1, 8.0, 14.0],
    [3.0, 3.5, 1.7, 10.0, 17.0, 8.0],
    [17.0, 8.0, 0.05, 10.0, 0.1, 14.0],
];

const P6: [[f64; 6]; 4] = [
    [0.1312, 0.1696, 0.5569, 0.0124, 0.8283, 0.5886],
    [0.2329, 0.4135, 0.8307, 0.3736, 0.1004, 0.9991],
    [0.2348, 0.1451, 0.3522, 0.2883, 0.3047, 0.6650],
    [0.4047, 0.8828, 0.8732, 0.5743, 0.1091, 0.0381],
];

fn hartmann<const D: usize>(x: &[f64], a: &[[f64; D]; 4], p: &[[f64; D]; 4]) -> f64 {
    (0..4)
        .map(|i| {
            let inner: f64 = x
                .iter()
                .zip(a[i].iter().zip(&p[i]))
                .map(|(xj, (aij, pij))| aij * (xj - pij).powi(2))
                .sum();
            -ALPHA[i] * (-inner).exp()
        })
        .sum()
}

/// Hartmann 3D function. Global minimum `-3.86278` at
/// `(0.114614, 0.555649, 0.852547)`.
#[must_use]
pub fn hartmann3d(x: &[f64]) -> f64 {
    hartmann(x, &A3, &P3)
}

/// Hartmann 6D function. Global minimum `-3.32237` at
/// `(0.20169, 0.150011, 0.476874, 0.275332, 0.311652, 0.6573)`.
#[must_use]
pub fn hartmann6d(x: &[f64]) -> f64 {
    hartmann(x, &A6, &P6)
}

fn unit_box(dim: usize) -> SearchSpace {
    SearchSpace::unit_interval_box("x", 1, dim)
}

/// Experimenter for [`hartmann3d`].
#[derive(Clone, Debug)]
pub struct Hartmann3D {
    inner: FunctionExperimenter,
}

impl Hartmann3D {
    /// Creates the experimenter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FunctionExperimenter::with_search_space("Hartmann3D", unit_box(3), hartmann3d),
        }
    }
}

impl Default for Hartmann3D {
    fn default() -> Self {
        Self::new()
    }
}

/// Experimenter for [`hartmann6d`].
#[derive(Clone, Debug)]
pub struct Hartmann6D {
    inner: FunctionExperimenter,
}

impl Hartmann6D {
    /// Creates the experimenter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FunctionExperimenter::with_search_space("Hartmann6D", unit_box(6), hartmann6d),
        }
    }
}

impl Default for Hartmann6D {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! delegate_experimenter {
    ($ty:ty) => {
        impl Experimenter for $ty {
            fn problem_statement(&self) -> ProblemStatement {
                self.inner.problem_statement()
            }

            fn evaluate(&self, trials: &mut [Trial]) -> Result<()> {
                self.inner.evaluate(trials)
            }
        }

        impl ExperimenterFactory for $ty {
            fn create(&self) -> Result<Arc<dyn Experimenter>> {
                Ok(Arc::new(self.clone()))
            }

            fn metadata(&self) -> ExperimenterMetadata {
                self.inner.metadata()
            }
        }
    };
}

delegate_experimenter!(Hartmann3D);
delegate_experimenter!(Hartmann6D);
