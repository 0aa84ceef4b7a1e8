use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::curve::Curve;
use crate::experimenter::ExperimenterMetadata;

/// Key under which [`BenchmarkStateAnalyzer::to_record`](super::BenchmarkStateAnalyzer::to_record)
/// stores the objective curve.
pub const RECORD_OBJECTIVE_KEY: &str = "objective";

/// A derived artifact attached to a [`BenchmarkRecord`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlotElement {
    /// A raw metric curve.
    Curve(Curve),
    /// A scalar comparison score.
    Score(f64),
    /// A comparison score per trial, one row.
    ScoreCurve(Curve),
}

impl PlotElement {
    /// Returns the curve of a [`Curve`](Self::Curve) or
    /// [`ScoreCurve`](Self::ScoreCurve) element.
    #[must_use]
    pub fn curve(&self) -> Option<&Curve> {
        match self {
            Self::Curve(curve) | Self::ScoreCurve(curve) => Some(curve),
            Self::Score(_) => None,
        }
    }

    /// Returns the value of a [`Score`](Self::Score) element.
    #[must_use]
    pub fn score(&self) -> Option<f64> {
        match self {
            Self::Score(score) => Some(*score),
            _ => None,
        }
    }
}

/// Results of one algorithm on one problem instance.
///
/// Created by
/// [`BenchmarkStateAnalyzer::to_record`](super::BenchmarkStateAnalyzer::to_record)
/// and annotated in place by
/// [`BenchmarkRecordAnalyzer::add_comparison_metrics`](super::BenchmarkRecordAnalyzer::add_comparison_metrics).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BenchmarkRecord {
    /// Name of the algorithm that produced the runs.
    pub algorithm: String,
    /// Identifying fields of the problem instance.
    pub experimenter_metadata: ExperimenterMetadata,
    /// Derived artifacts keyed by metric name or comparison key.
    pub plot_elements: BTreeMap<String, PlotElement>,
}

impl BenchmarkRecord {
    /// Creates a record without plot elements.
    #[must_use]
    pub fn new(algorithm: impl Into<String>, experimenter_metadata: ExperimenterMetadata) -> Self {
        Self {
            algorithm: algorithm.into(),
            experimenter_metadata,
            plot_elements: BTreeMap::new(),
        }
    }

    /// Adds or replaces a plot element.
    #[must_use]
    pub fn with_element(mut self, key: impl Into<String>, element: PlotElement) -> Self {
        self.plot_elements.insert(key.into(), element);
        self
    }

    /// Returns the plot element under `key`.
    #[must_use]
    pub fn element(&self, key: &str) -> Option<&PlotElement> {
        self.plot_elements.get(key)
    }
}

/// Key of the scalar score of `metric` against `baseline`.
#[must_use]
pub fn score_key(metric: &str, baseline: &str) -> String {
    format!("{metric}:score:{baseline}")
}

/// Key of the per-trial score of `metric` against `baseline`.
#[must_use]
pub fn score_curve_key(metric: &str, baseline: &str) -> String {
    format!("{metric}:score_curve:{baseline}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    #[test]
    fn test_element_accessors() {
        let curve = Curve::new(vec![vec![1.0]], Direction::Minimize).unwrap();
        assert_eq!(PlotElement::Curve(curve.clone()).curve(), Some(&curve));
        assert_eq!(PlotElement::ScoreCurve(curve.clone()).score(), None);
        assert_eq!(PlotElement::Score(0.25).score(), Some(0.25));
        assert!(PlotElement::Score(0.25).curve().is_none());
    }

    #[test]
    fn test_comparison_keys() {
        assert_eq!(score_key("objective", "random"), "objective:score:random");
        assert_eq!(
            score_curve_key("objective", "random"),
            "objective:score_curve:random"
        );
    }
}
