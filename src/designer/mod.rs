//! Designer trait and reference implementations.
//!
//! A [`Designer`] is a stateful optimization policy. It is built for one
//! [`ProblemStatement`] and seed by a [`DesignerFactory`], proposes
//! unevaluated trials through [`suggest`](Designer::suggest), and learns
//! from completed ones through [`update`](Designer::update).
//!
//! # Available designers
//!
//! | Designer | Registry name | Description |
//! |----------|---------------|-------------|
//! | [`RandomDesigner`] | `random` | Uniform random search, the usual baseline |
//! | [`GridSearchDesigner`] | `grid` | Walks a discretized Cartesian grid in order |
//!
//! Custom designers implement the trait and are plugged in either directly
//! through [`designer_factory`] or by name through a [`DesignerRegistry`].

pub mod grid;
pub mod random;
mod registry;

use std::sync::Arc;

pub use grid::GridSearchDesigner;
pub use random::RandomDesigner;
pub use registry::DesignerRegistry;

use crate::error::Result;
use crate::problem::ProblemStatement;
use crate::trial::Trial;

/// Trait for pluggable optimization policies.
///
/// Designers are owned by exactly one
/// [`BenchmarkState`](crate::BenchmarkState) and driven sequentially, so
/// both methods take `&mut self`. The `Send` bound lets a state move to a
/// worker thread when repeats run in parallel.
pub trait Designer: Send {
    /// Proposes `count` new trials carrying parameters but no measurement.
    ///
    /// # Errors
    ///
    /// Implementations return
    /// [`Error::InvalidSuggestionCount`](crate::Error::InvalidSuggestionCount)
    /// for `count == 0`, or any error describing why no suggestion can be made.
    fn suggest(&mut self, count: usize) -> Result<Vec<Trial>>;

    /// Ingests trials that have just been completed.
    ///
    /// The default implementation ignores them.
    ///
    /// # Errors
    ///
    /// Implementations may reject trials they cannot interpret.
    fn update(&mut self, _completed: &[Trial]) -> Result<()> {
        Ok(())
    }
}

/// Builds a fresh designer for a problem and seed.
pub type DesignerFactory =
    Arc<dyn Fn(&ProblemStatement, u64) -> Result<Box<dyn Designer>> + Send + Sync>;

/// Wraps a constructor closure into a [`DesignerFactory`].
///
/// # Examples
///
/// ```
/// use optbench::designer::{RandomDesigner, designer_factory};
///
/// let factory = designer_factory(|problem, seed| Ok(RandomDesigner::new(problem, seed)));
/// ```
pub fn designer_factory<D, F>(f: F) -> DesignerFactory
where
    D: Designer + 'static,
    F: Fn(&ProblemStatement, u64) -> Result<D> + Send + Sync + 'static,
{
    Arc::new(
        move |problem: &ProblemStatement, seed: u64| -> Result<Box<dyn Designer>> {
            Ok(Box::new(f(problem, seed)?))
        },
    )
}
