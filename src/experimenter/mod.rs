//! Experimenter trait, factories, and synthetic reference problems.
//!
//! An [`Experimenter`] owns a fixed [`ProblemStatement`] and fills in the
//! final measurement of the trials it is handed. Experimenters are shared
//! between benchmark states as `Arc<dyn Experimenter>`, so evaluation takes
//! `&self` and must be repeatable for identical parameters.
//!
//! An [`ExperimenterFactory`] builds experimenters and describes them through
//! [`ExperimenterMetadata`], the structural identity used to group
//! [`BenchmarkRecord`](crate::BenchmarkRecord)s by problem.
//!
//! # Available experimenters
//!
//! | Experimenter | Domain | Description |
//! |--------------|--------|-------------|
//! | [`FunctionExperimenter`] | any float box | Wraps a plain `fn(&[f64]) -> f64` |
//! | [`BbobExperimenterFactory`] | `[-5, 5]^d` | Sphere, Discus, Ellipsoidal, Rastrigin, Rosenbrock, Ackley |
//! | [`Hartmann3D`], [`Hartmann6D`] | `[0, 1]^d` | Classic multimodal Hartmann functions |

pub mod bbob;
mod function;
pub mod hartmann;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use bbob::{BbobExperimenterFactory, BbobFunction};
pub use function::{DEFAULT_METRIC, FunctionExperimenter};
pub use hartmann::{Hartmann3D, Hartmann6D};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::problem::ProblemStatement;
use crate::trial::Trial;

/// Trait for objective functions evaluated over batches of trials.
pub trait Experimenter: Send + Sync {
    /// Returns the problem this experimenter defines.
    fn problem_statement(&self) -> ProblemStatement;

    /// Attaches a final measurement to every trial in `trials`.
    ///
    /// # Errors
    ///
    /// Returns an error if a trial's parameters do not fit the problem.
    fn evaluate(&self, trials: &mut [Trial]) -> Result<()>;
}

/// Builds experimenters and describes the problem instance they represent.
pub trait ExperimenterFactory: Send + Sync {
    /// Creates a new experimenter.
    ///
    /// # Errors
    ///
    /// Returns an error if the factory is misconfigured.
    fn create(&self) -> Result<Arc<dyn Experimenter>>;

    /// Returns the structural description of the problem instance.
    fn metadata(&self) -> ExperimenterMetadata;
}

/// Ordered key/value description of a problem instance, such as
/// `name=Sphere` and `dim=10`.
///
/// Equality and hashing are by value, so metadata from independently built
/// factories compares equal when they describe the same problem.
///
/// # Examples
///
/// ```
/// use optbench::experimenter::ExperimenterMetadata;
///
/// let meta = ExperimenterMetadata::new().with("name", "Sphere").with("dim", 10);
/// assert_eq!(meta.to_string(), "dim=10, name=Sphere");
/// assert_eq!(meta.get("name"), Some("Sphere"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimenterMetadata {
    fields: BTreeMap<String, String>,
}

impl ExperimenterMetadata {
    /// Creates empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.fields.insert(key.into(), value.to_string());
        self
    }

    /// Returns the value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Returns all fields in key order.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

impl core::fmt::Display for ExperimenterMetadata {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}
