//! Core types shared across the benchmark pipeline.

use core::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The direction of optimization for a metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Minimize the objective value.
    #[default]
    Minimize,
    /// Maximize the objective value.
    Maximize,
}

impl Direction {
    /// Returns `true` if `a` is strictly better than `b` in this direction.
    ///
    /// NaN is never better than anything.
    #[must_use]
    pub fn is_better(self, a: f64, b: f64) -> bool {
        match self {
            Direction::Minimize => a < b,
            Direction::Maximize => a > b,
        }
    }

    /// Returns the better of two values, preferring `current` on ties and
    /// skipping NaN candidates.
    #[must_use]
    pub fn best_of(self, current: f64, candidate: f64) -> f64 {
        if current.is_nan() || self.is_better(candidate, current) {
            candidate
        } else {
            current
        }
    }

    /// Compares two values so that the better one is [`Ordering::Greater`].
    #[must_use]
    pub fn compare(self, a: f64, b: f64) -> Ordering {
        if self.is_better(a, b) {
            Ordering::Greater
        } else if self.is_better(b, a) {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }
}
