//! Trials and their measurements.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::param::ParamValue;

/// Objective values recorded for a trial, keyed by metric name.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement {
    metrics: BTreeMap<String, f64>,
}

impl Measurement {
    /// Creates an empty measurement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a measurement holding a single metric value.
    #[must_use]
    pub fn single(metric: impl Into<String>, value: f64) -> Self {
        Self::new().with(metric, value)
    }

    /// Adds or replaces a metric value.
    #[must_use]
    pub fn with(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(metric.into(), value);
        self
    }

    /// Returns the value of `metric`, if recorded.
    #[must_use]
    pub fn get(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied()
    }

    /// Returns all recorded metrics.
    #[must_use]
    pub fn metrics(&self) -> &BTreeMap<String, f64> {
        &self.metrics
    }
}

/// One candidate parameter assignment plus its optional final measurement.
///
/// Designers create trials with parameters only; experimenters complete
/// them by attaching a final measurement. A trial is *completed* exactly
/// when it carries a final measurement.
///
/// # Examples
///
/// ```
/// use optbench::{Measurement, ParamValue, Trial};
///
/// let mut trial = Trial::new().with_param("x0", ParamValue::Float(0.5));
/// assert!(!trial.is_completed());
///
/// trial.complete(Measurement::single("value", 0.25));
/// assert!(trial.is_completed());
/// assert_eq!(trial.objective("value"), Some(0.25));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trial {
    id: u64,
    parameters: BTreeMap<String, ParamValue>,
    final_measurement: Option<Measurement>,
}

impl Trial {
    /// Creates an unassigned trial with no parameters.
    ///
    /// The id is zero until the trial is added to a
    /// [`BenchmarkState`](crate::BenchmarkState).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter assignment.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.insert(name.into(), value);
        self
    }

    /// Returns the trial id.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u64) {
        self.id = id;
    }

    /// Returns the parameter assignments.
    #[must_use]
    pub fn parameters(&self) -> &BTreeMap<String, ParamValue> {
        &self.parameters
    }

    /// Returns the value of the float (or integer) parameter `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] when the parameter is missing or categorical.
    pub fn float_param(&self, name: &str) -> Result<f64> {
        let value = self
            .parameters
            .get(name)
            .ok_or_else(|| Error::InvalidParameter {
                trial_id: self.id,
                name: name.to_string(),
                reason: "parameter is missing".to_string(),
            })?;
        value.as_f64().ok_or_else(|| Error::InvalidParameter {
            trial_id: self.id,
            name: name.to_string(),
            reason: format!("expected a numeric value, got {value:?}"),
        })
    }

    /// Returns the final measurement, if the trial is completed.
    #[must_use]
    pub fn final_measurement(&self) -> Option<&Measurement> {
        self.final_measurement.as_ref()
    }

    /// Returns the final value of `metric`, if the trial is completed and recorded it.
    #[must_use]
    pub fn objective(&self, metric: &str) -> Option<f64> {
        self.final_measurement.as_ref().and_then(|m| m.get(metric))
    }

    /// Returns `true` if the trial carries a final measurement.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.final_measurement.is_some()
    }

    /// Attaches the final measurement, completing the trial.
    pub fn complete(&mut self, measurement: Measurement) {
        self.final_measurement = Some(measurement);
    }
}
