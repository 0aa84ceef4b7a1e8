//! Random search designer.

use crate::designer::Designer;
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::param::ParamValue;
use crate::problem::{ProblemStatement, SearchSpace};
use crate::trial::Trial;

/// A designer that samples every parameter uniformly at random.
///
/// Completed trials are ignored; only the log scale and step of each
/// distribution shape the draws. The same seed yields the same suggestions.
///
/// # Examples
///
/// ```
/// use optbench::designer::{Designer, RandomDesigner};
/// use optbench::{Direction, ProblemStatement, SearchSpace};
///
/// let space = SearchSpace::float_box("x", 0, 2, -1.0, 1.0).unwrap();
/// let problem = ProblemStatement::new(space, "value", Direction::Minimize);
///
/// let mut designer = RandomDesigner::new(&problem, 42);
/// let trials = designer.suggest(3).unwrap();
/// assert_eq!(trials.len(), 3);
/// ```
pub struct RandomDesigner {
    search_space: SearchSpace,
    rng: fastrand::Rng,
}

impl RandomDesigner {
    /// Creates a random designer for `problem` with a fixed seed.
    ///
    /// Using the same seed will produce the same sequence of suggestions.
    #[must_use]
    pub fn new(problem: &ProblemStatement, seed: u64) -> Self {
        Self {
            search_space: problem.search_space().clone(),
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

/// Uniform `f64` in `[low, high)`.
#[inline]
fn uniform(rng: &mut fastrand::Rng, low: f64, high: f64) -> f64 {
    low + rng.f64() * (high - low)
}

/// Draws one value from `distribution`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn sample_value(rng: &mut fastrand::Rng, distribution: &Distribution) -> ParamValue {
    match distribution {
        Distribution::Float(d) => {
            let value = if d.log_scale {
                let log_value = uniform(rng, d.low.ln(), d.high.ln());
                log_value.exp().clamp(d.low, d.high)
            } else if let Some(step) = d.step {
                let n_steps = ((d.high - d.low) / step).floor() as i64;
                let k = rng.i64(0..=n_steps);
                d.low + (k as f64) * step
            } else {
                uniform(rng, d.low, d.high)
            };
            ParamValue::Float(value)
        }
        Distribution::Int(d) => {
            let value = if d.log_scale {
                let log_low = (d.low as f64).ln();
                let log_high = (d.high as f64).ln();
                let raw = uniform(rng, log_low, log_high).exp().round() as i64;
                // Rounding can step outside the bounds.
                raw.clamp(d.low, d.high)
            } else if let Some(step) = d.step {
                let n_steps = (d.high - d.low) / step;
                d.low + rng.i64(0..=n_steps) * step
            } else {
                rng.i64(d.low..=d.high)
            };
            ParamValue::Int(value)
        }
        Distribution::Categorical(d) => ParamValue::Categorical(rng.usize(0..d.n_choices)),
    }
}

impl Designer for RandomDesigner {
    fn suggest(&mut self, count: usize) -> Result<Vec<Trial>> {
        if count == 0 {
            return Err(Error::InvalidSuggestionCount(count));
        }
        let trials = (0..count)
            .map(|_| {
                self.search_space
                    .parameters()
                    .iter()
                    .fold(Trial::new(), |trial, p| {
                        let value = sample_value(&mut self.rng, &p.distribution);
                        trial.with_param(p.name.clone(), value)
                    })
            })
            .collect();
        Ok(trials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn problem() -> ProblemStatement {
        let space = SearchSpace::new()
            .float("x", 0.0, 1.0)
            .unwrap()
            .add("lr", Distribution::float(1e-5, 1.0).log_scale())
            .unwrap()
            .add("n", Distribution::int(0, 10).step(2))
            .unwrap()
            .categorical("c", 5)
            .unwrap();
        ProblemStatement::new(space, "value", Direction::Minimize)
    }

    #[test]
    fn test_random_designer_respects_distributions() {
        let problem = problem();
        let mut designer = RandomDesigner::new(&problem, 42);
        for trial in designer.suggest(100).unwrap() {
            for config in problem.search_space().parameters() {
                let value = &trial.parameters()[&config.name];
                assert!(
                    config.distribution.contains(value),
                    "{} = {value:?} outside {:?}",
                    config.name,
                    config.distribution
                );
            }
            assert!(!trial.is_completed());
        }
    }

    #[test]
    fn test_random_designer_reproducibility() {
        let mut d1 = RandomDesigner::new(&problem(), 7);
        let mut d2 = RandomDesigner::new(&problem(), 7);
        assert_eq!(d1.suggest(10).unwrap(), d2.suggest(10).unwrap());
    }

    #[test]
    fn test_random_designer_rejects_zero_count() {
        let mut designer = RandomDesigner::new(&problem(), 0);
        assert!(matches!(
            designer.suggest(0),
            Err(Error::InvalidSuggestionCount(0))
        ));
    }
}
