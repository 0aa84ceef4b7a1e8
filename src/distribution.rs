//! Value domains of search space parameters.
//!
//! Bounds are inclusive on both ends. A `step` restricts values to
//! `low + k * step`; `log_scale` asks designers to spread points evenly in
//! log space and requires a positive lower bound.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::param::ParamValue;

/// Domain of a float parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FloatDistribution {
    /// Smallest allowed value.
    pub low: f64,
    /// Largest allowed value.
    pub high: f64,
    /// Spread points evenly in log space.
    pub log_scale: bool,
    /// Grid spacing anchored at `low`, if any.
    pub step: Option<f64>,
}

/// Domain of an integer parameter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntDistribution {
    /// Smallest allowed value.
    pub low: i64,
    /// Largest allowed value.
    pub high: i64,
    /// Spread points evenly in log space.
    pub log_scale: bool,
    /// Grid spacing anchored at `low`, if any.
    pub step: Option<i64>,
}

/// Domain of a categorical parameter: choice indices `0..n_choices`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoricalDistribution {
    /// Number of choices.
    pub n_choices: usize,
}

/// The domain of one search space parameter.
///
/// # Examples
///
/// ```
/// use optbench::ParamValue;
/// use optbench::distribution::Distribution;
///
/// let lr = Distribution::float(1e-5, 1e-1).log_scale();
/// assert!(lr.contains(&ParamValue::Float(3e-4)));
/// assert!(!lr.contains(&ParamValue::Int(1)));
///
/// let batch = Distribution::int(16, 128).step(16);
/// assert!(batch.contains(&ParamValue::Int(64)));
/// assert!(!batch.contains(&ParamValue::Int(65)));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Distribution {
    /// Float values in `[low, high]`.
    Float(FloatDistribution),
    /// Integer values in `[low, high]`.
    Int(IntDistribution),
    /// Choice indices.
    Categorical(CategoricalDistribution),
}

impl Distribution {
    /// Uniform floats on `[low, high]`.
    #[must_use]
    pub fn float(low: f64, high: f64) -> Self {
        Distribution::Float(FloatDistribution {
            low,
            high,
            log_scale: false,
            step: None,
        })
    }

    /// Uniform integers on `[low, high]`.
    #[must_use]
    pub fn int(low: i64, high: i64) -> Self {
        Distribution::Int(IntDistribution {
            low,
            high,
            log_scale: false,
            step: None,
        })
    }

    /// `n_choices` unordered choices.
    #[must_use]
    pub fn categorical(n_choices: usize) -> Self {
        Distribution::Categorical(CategoricalDistribution { n_choices })
    }

    /// Switches a numeric distribution to log scale. No-op for categoricals.
    #[must_use]
    pub fn log_scale(mut self) -> Self {
        match &mut self {
            Distribution::Float(d) => d.log_scale = true,
            Distribution::Int(d) => d.log_scale = true,
            Distribution::Categorical(_) => {}
        }
        self
    }

    /// Sets the grid spacing of a numeric distribution. No-op for categoricals.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn step(mut self, step: impl Into<f64>) -> Self {
        let step = step.into();
        match &mut self {
            Distribution::Float(d) => d.step = Some(step),
            Distribution::Int(d) => d.step = Some(step as i64),
            Distribution::Categorical(_) => {}
        }
        self
    }

    /// Returns `true` if `value` has the right kind and lies in the domain,
    /// on the step grid when a step is set.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn contains(&self, value: &ParamValue) -> bool {
        match (self, value) {
            (Distribution::Float(d), ParamValue::Float(v)) => {
                let on_grid = d.step.is_none_or(|s| {
                    let k = ((v - d.low) / s).round();
                    (d.low + k * s - v).abs() <= 1e-9 * s.max(1.0)
                });
                (d.low..=d.high).contains(v) && on_grid
            }
            (Distribution::Int(d), ParamValue::Int(v)) => {
                (d.low..=d.high).contains(v) && d.step.is_none_or(|s| (v - d.low) % s == 0)
            }
            (Distribution::Categorical(d), ParamValue::Categorical(i)) => *i < d.n_choices,
            _ => false,
        }
    }

    /// Checks bounds, log scale and step for the parameter called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`], [`Error::InvalidLogBounds`],
    /// [`Error::InvalidStep`], or [`Error::EmptyChoices`].
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn validate(&self, name: &str) -> Result<()> {
        let (low, high, log_scale, bad_step) = match self {
            Distribution::Float(d) => (
                d.low,
                d.high,
                d.log_scale,
                d.step.is_some_and(|s| s.is_nan() || s <= 0.0),
            ),
            Distribution::Int(d) => (
                d.low as f64,
                d.high as f64,
                d.log_scale,
                d.step.is_some_and(|s| s <= 0),
            ),
            Distribution::Categorical(d) => {
                if d.n_choices == 0 {
                    return Err(Error::EmptyChoices(name.to_string()));
                }
                return Ok(());
            }
        };
        if low.is_nan() || high.is_nan() || low > high {
            return Err(Error::InvalidBounds {
                name: name.to_string(),
                low,
                high,
            });
        }
        if log_scale && low <= 0.0 {
            return Err(Error::InvalidLogBounds(name.to_string()));
        }
        if bad_step {
            return Err(Error::InvalidStep(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Distribution::float(0.0, 1.0).validate("x").is_ok());
        assert!(matches!(
            Distribution::float(1.0, 0.0).validate("x"),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(matches!(
            Distribution::float(f64::NAN, 0.0).validate("x"),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(matches!(
            Distribution::int(0, 10).log_scale().validate("n"),
            Err(Error::InvalidLogBounds(_))
        ));
        assert!(matches!(
            Distribution::int(0, 10).step(0).validate("n"),
            Err(Error::InvalidStep(_))
        ));
        assert!(matches!(
            Distribution::categorical(0).validate("c"),
            Err(Error::EmptyChoices(_))
        ));
    }

    #[test]
    fn test_contains_checks_kind_bounds_and_step() {
        let x = Distribution::float(-1.0, 1.0).step(0.5);
        assert!(x.contains(&ParamValue::Float(0.5)));
        assert!(!x.contains(&ParamValue::Float(0.25)));
        assert!(!x.contains(&ParamValue::Float(1.5)));
        assert!(!x.contains(&ParamValue::Categorical(0)));

        let c = Distribution::categorical(3);
        assert!(c.contains(&ParamValue::Categorical(2)));
        assert!(!c.contains(&ParamValue::Categorical(3)));
    }
}
