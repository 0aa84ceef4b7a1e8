#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the lower bound is greater than the upper bound.
    #[error("invalid bounds for '{name}': low ({low}) must be less than or equal to high ({high})")]
    InvalidBounds {
        /// The parameter whose bounds are invalid.
        name: String,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when log scale is used with non-positive bounds.
    #[error("invalid log bounds for '{0}': low must be positive for log scale")]
    InvalidLogBounds(String),

    /// Returned when step size is not positive.
    #[error("invalid step for '{0}': step must be positive")]
    InvalidStep(String),

    /// Returned when categorical choices are empty.
    #[error("categorical parameter '{0}' must have at least one choice")]
    EmptyChoices(String),

    /// Returned when a search space already contains a parameter with the same name.
    #[error("duplicate parameter '{0}' in search space")]
    DuplicateParameter(String),

    /// Returned when a trial's parameter is missing or has the wrong type.
    #[error("invalid parameter '{name}' on trial {trial_id}: {reason}")]
    InvalidParameter {
        /// The id of the offending trial.
        trial_id: u64,
        /// The parameter name.
        name: String,
        /// What is wrong with the parameter.
        reason: String,
    },

    /// Returned when an experimenter is configured with zero dimensions.
    #[error("invalid dimension: {0} must be at least 1")]
    InvalidDimension(usize),

    /// Returned when a synthetic function name is not recognized.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// Returned when no designer is registered under the given name.
    #[error("unknown designer '{0}'")]
    UnknownDesigner(String),

    /// Returned when a designer is asked for zero suggestions.
    #[error("invalid suggestion count: {0} must be at least 1")]
    InvalidSuggestionCount(usize),

    /// Returned when a designer produced no trials although at least one was requested.
    #[error("designer returned no suggestions (requested {requested})")]
    EmptySuggestions {
        /// The number of suggestions requested.
        requested: usize,
    },

    /// Returned when a designer hands back a trial that already carries a measurement.
    #[error("suggested trial {trial_id} already carries a final measurement")]
    SuggestionAlreadyCompleted {
        /// The id assigned to the offending trial.
        trial_id: u64,
    },

    /// Returned when an experimenter leaves a trial without a final measurement.
    #[error("experimenter did not complete trial {trial_id}")]
    IncompleteEvaluation {
        /// The id of the trial left incomplete.
        trial_id: u64,
    },

    /// Wraps an error raised by a benchmark subroutine, with the repeat it failed in.
    #[error("subroutine '{subroutine}' failed at repeat {repeat}: {source}")]
    Subroutine {
        /// Zero-based repeat index.
        repeat: usize,
        /// Name of the failing subroutine.
        subroutine: &'static str,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },

    /// Returned when curve conversion receives no states.
    #[error("Empty list of states: at least one benchmark state is required")]
    EmptyStates,

    /// Returned when the states passed to curve conversion do not share a problem.
    #[error("all states must have same problem: state {index} differs from state 0")]
    ProblemMismatch {
        /// Index of the first state whose problem differs.
        index: usize,
    },

    /// Returned when the states passed to curve conversion have uneven trial counts.
    #[error("state {index} has {got} trials, expected {expected}")]
    TrialCountMismatch {
        /// Index of the offending state.
        index: usize,
        /// Trial count of the first state.
        expected: usize,
        /// Trial count of the offending state.
        got: usize,
    },

    /// Returned when a state still holds a trial without a final measurement.
    #[error("state {state} has incomplete trial {trial_id}")]
    IncompleteTrial {
        /// Index of the offending state.
        state: usize,
        /// Id of the incomplete trial.
        trial_id: u64,
    },

    /// Returned when a measurement lacks the metric being analyzed.
    #[error("trial {trial_id} has no value for metric '{metric}'")]
    MissingMetric {
        /// Id of the trial.
        trial_id: u64,
        /// Name of the missing metric.
        metric: String,
    },

    /// Returned when curve rows have different lengths.
    #[error("ragged curve: row {row} has {got} values, expected {expected}")]
    RaggedCurve {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },

    /// Returned when a curve's trial indices do not match its rows.
    #[error("curve indices {xs:?} do not cover rows of {width} values")]
    CurveIndexMismatch {
        /// The trial indices as given.
        xs: Vec<usize>,
        /// Length of the rows.
        width: usize,
    },

    /// Returned when a problem group has no record for the baseline algorithm.
    #[error("no baseline record for algorithm '{baseline}' on problem [{problem}]")]
    MissingBaseline {
        /// Rendered experimenter metadata of the group.
        problem: String,
        /// The requested baseline algorithm.
        baseline: String,
    },

    /// Returned when a record lacks the curve for the metric being compared.
    #[error("record for '{algorithm}' on [{problem}] has no curve under '{key}'")]
    MissingPlotElement {
        /// Algorithm of the record.
        algorithm: String,
        /// Rendered experimenter metadata of the record.
        problem: String,
        /// The plot element key that was looked up.
        key: String,
    },

    /// Returned when a candidate and its baseline curve have different trial counts.
    #[error(
        "curve length mismatch on [{problem}]: '{algorithm}' has {got} trials, baseline has {expected}"
    )]
    CurveLengthMismatch {
        /// Rendered experimenter metadata of the group.
        problem: String,
        /// Algorithm of the candidate record.
        algorithm: String,
        /// Trial count of the baseline curve.
        expected: usize,
        /// Trial count of the candidate curve.
        got: usize,
    },

    /// Returned when an async task fails.
    #[cfg(feature = "async")]
    #[error("async task error: {0}")]
    TaskError(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Returns the innermost error, unwrapping any [`Error::Subroutine`] layers.
    #[must_use]
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Subroutine { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_subroutine() {
        let err = Error::Subroutine {
            repeat: 3,
            subroutine: "GenerateSuggestions",
            source: Box::new(Error::EmptySuggestions { requested: 1 }),
        };
        assert!(matches!(
            err.root_cause(),
            Error::EmptySuggestions { requested: 1 }
        ));
        assert!(err.to_string().contains("repeat 3"));
    }

    #[test]
    fn test_messages_name_violated_precondition() {
        assert!(Error::EmptyStates.to_string().contains("Empty"));
        assert!(
            Error::ProblemMismatch { index: 1 }
                .to_string()
                .contains("must have same problem")
        );
    }
}
