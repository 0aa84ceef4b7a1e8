#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Direction;

/// A repeats-by-trials matrix of metric values.
///
/// Row `i` holds one repeat, column `j` the value observed at trial
/// `xs[j]` (1-based). `trend` is the metric's optimization direction and
/// decides what "better" means for [`best_so_far`](Self::best_so_far).
///
/// # Examples
///
/// ```
/// use optbench::{Curve, Direction};
///
/// let curve = Curve::new(vec![vec![3.0, 1.0, 2.0], vec![5.0, 4.0, 0.0]], Direction::Minimize)
///     .unwrap();
/// assert_eq!(curve.shape(), (2, 3));
/// assert_eq!(curve.best_so_far().ys()[0], vec![3.0, 1.0, 1.0]);
/// assert_eq!(curve.final_values(), vec![2.0, 0.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "CurveData"))]
pub struct Curve {
    xs: Vec<usize>,
    ys: Vec<Vec<f64>>,
    trend: Direction,
}

/// Unchecked wire form of a [`Curve`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct CurveData {
    xs: Vec<usize>,
    ys: Vec<Vec<f64>>,
    trend: Direction,
}

#[cfg(feature = "serde")]
impl TryFrom<CurveData> for Curve {
    type Error = Error;

    fn try_from(data: CurveData) -> Result<Self> {
        let curve = Self::new(data.ys, data.trend)?;
        if data.xs != curve.xs {
            return Err(Error::CurveIndexMismatch {
                xs: data.xs,
                width: curve.xs.len(),
            });
        }
        Ok(curve)
    }
}

impl Curve {
    /// Builds a curve from `ys[repeat][trial]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedCurve`] if the rows differ in length.
    pub fn new(ys: Vec<Vec<f64>>, trend: Direction) -> Result<Self> {
        let width = ys.first().map_or(0, Vec::len);
        if let Some((row, values)) = ys.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::RaggedCurve {
                row,
                expected: width,
                got: values.len(),
            });
        }
        Ok(Self {
            xs: (1..=width).collect(),
            ys,
            trend,
        })
    }

    /// Returns the 1-based trial indices.
    #[must_use]
    pub fn xs(&self) -> &[usize] {
        &self.xs
    }

    /// Returns the values, one row per repeat.
    #[must_use]
    pub fn ys(&self) -> &[Vec<f64>] {
        &self.ys
    }

    /// Returns the optimization direction of the metric.
    #[must_use]
    pub fn trend(&self) -> Direction {
        self.trend
    }

    /// Returns `(repeats, trials)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.ys.len(), self.xs.len())
    }

    /// Returns the running best of every row according to [`trend`](Self::trend).
    ///
    /// The result is monotone: non-increasing for minimization,
    /// non-decreasing for maximization. NaN values never replace a best.
    #[must_use]
    pub fn best_so_far(&self) -> Self {
        let ys = self
            .ys
            .iter()
            .map(|row| {
                let mut best = f64::NAN;
                row.iter()
                    .map(|&v| {
                        best = self.trend.best_of(best, v);
                        best
                    })
                    .collect()
            })
            .collect();
        Self {
            xs: self.xs.clone(),
            ys,
            trend: self.trend,
        }
    }

    /// Returns the per-trial mean across repeats.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean(&self) -> Vec<f64> {
        let n = self.ys.len() as f64;
        (0..self.xs.len())
            .map(|j| self.ys.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect()
    }

    /// Returns the last value of every row. Empty rows are skipped.
    #[must_use]
    pub fn final_values(&self) -> Vec<f64> {
        self.ys.iter().filter_map(|row| row.last().copied()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ragged_rows_rejected() {
        let err = Curve::new(vec![vec![1.0, 2.0], vec![1.0]], Direction::Minimize).unwrap_err();
        assert!(matches!(
            err,
            Error::RaggedCurve {
                row: 1,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn test_best_so_far_is_monotone() {
        let ys = vec![vec![4.0, 6.0, 2.0, f64::NAN, 3.0]];
        let min = Curve::new(ys.clone(), Direction::Minimize).unwrap().best_so_far();
        assert_eq!(min.ys()[0], vec![4.0, 4.0, 2.0, 2.0, 2.0]);
        let max = Curve::new(ys, Direction::Maximize).unwrap().best_so_far();
        assert_eq!(max.ys()[0], vec![4.0, 6.0, 6.0, 6.0, 6.0]);
    }

    #[test]
    fn test_mean_and_shape() {
        let curve = Curve::new(vec![vec![1.0, 2.0], vec![3.0, 6.0]], Direction::Minimize).unwrap();
        assert_eq!(curve.shape(), (2, 2));
        assert_eq!(curve.xs(), &[1, 2]);
        assert_eq!(curve.mean(), vec![2.0, 4.0]);
    }

    #[test]
    fn test_empty_curve() {
        let curve = Curve::new(Vec::new(), Direction::Maximize).unwrap();
        assert_eq!(curve.shape(), (0, 0));
        assert!(curve.mean().is_empty());
        assert!(curve.final_values().is_empty());
    }
}
