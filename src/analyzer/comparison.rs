use core::cmp::Ordering;
use std::collections::BTreeMap;

use super::curve::Curve;
use super::record::{BenchmarkRecord, PlotElement, score_curve_key, score_key};
use crate::error::{Error, Result};
use crate::experimenter::ExperimenterMetadata;
use crate::types::Direction;

/// Compares benchmark records of several algorithms against a baseline.
///
/// Scores are win rates of best-so-far curves. At trial `t`, every pair of a
/// candidate repeat and a baseline repeat counts `1` if the candidate's best
/// value so far is strictly better, `0.5` on a tie and `0` otherwise; the
/// score at `t` is the mean over all pairs. `score_curve` is this series over
/// all trials and `score` is its final value, so `0.5` means "as good as the
/// baseline" and the baseline scores exactly `0.5` against itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct BenchmarkRecordAnalyzer;

/// One row of [`BenchmarkRecordAnalyzer::score_table`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRow {
    /// Problem instance the score was measured on.
    pub problem: ExperimenterMetadata,
    /// Scored algorithm.
    pub algorithm: String,
    /// Final win rate against the baseline.
    pub score: f64,
}

impl BenchmarkRecordAnalyzer {
    /// Adds `{compare_metric}:score:{baseline}` and
    /// `{compare_metric}:score_curve:{baseline}` to every record.
    ///
    /// Records are grouped by experimenter metadata and each one is compared
    /// with the baseline record of its group. Existing comparison entries are
    /// overwritten, so running twice yields the same records.
    ///
    /// All groups are validated before any record is touched; on error the
    /// records are left unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingBaseline`] if a group has no record for `baseline`.
    /// - [`Error::MissingPlotElement`] if a record has no curve under
    ///   `compare_metric`.
    /// - [`Error::CurveLengthMismatch`] if a curve's trial count differs from
    ///   its baseline's.
    ///
    /// # Examples
    ///
    /// ```
    /// use optbench::experimenter::ExperimenterMetadata;
    /// use optbench::{BenchmarkRecord, BenchmarkRecordAnalyzer, Curve, Direction, PlotElement};
    ///
    /// let problem = ExperimenterMetadata::new().with("name", "Sphere");
    /// let record = |algorithm: &str, ys: Vec<f64>| {
    ///     let curve = Curve::new(vec![ys], Direction::Minimize).unwrap();
    ///     BenchmarkRecord::new(algorithm, problem.clone())
    ///         .with_element("objective", PlotElement::Curve(curve))
    /// };
    /// let mut records = vec![record("random", vec![5.0, 3.0]), record("grid", vec![4.0, 4.0])];
    ///
    /// BenchmarkRecordAnalyzer::add_comparison_metrics(&mut records, "random", "objective").unwrap();
    ///
    /// let score = |r: &BenchmarkRecord| r.element("objective:score:random").and_then(PlotElement::score);
    /// assert_eq!(score(&records[0]), Some(0.5));
    /// assert_eq!(score(&records[1]), Some(0.0));
    /// ```
    pub fn add_comparison_metrics(
        records: &mut [BenchmarkRecord],
        baseline: &str,
        compare_metric: &str,
    ) -> Result<()> {
        let mut groups: BTreeMap<&ExperimenterMetadata, Vec<usize>> = BTreeMap::new();
        for (index, record) in records.iter().enumerate() {
            groups
                .entry(&record.experimenter_metadata)
                .or_default()
                .push(index);
        }

        let mut updates = Vec::with_capacity(records.len());
        for (problem, members) in &groups {
            let baseline_record = members
                .iter()
                .map(|&i| &records[i])
                .find(|r| r.algorithm == baseline)
                .ok_or_else(|| Error::MissingBaseline {
                    problem: problem.to_string(),
                    baseline: baseline.to_owned(),
                })?;
            let baseline_best = metric_curve(baseline_record, compare_metric)?.best_so_far();
            let expected = baseline_best.shape().1;

            for &index in members {
                let record = &records[index];
                let curve = metric_curve(record, compare_metric)?;
                let got = curve.shape().1;
                if got != expected {
                    return Err(Error::CurveLengthMismatch {
                        problem: problem.to_string(),
                        algorithm: record.algorithm.clone(),
                        expected,
                        got,
                    });
                }
                let series = win_rate(&curve.best_so_far(), &baseline_best);
                let score = series.last().copied().unwrap_or(0.5);
                let score_curve = Curve::new(vec![series], Direction::Maximize)?;
                updates.push((index, score, score_curve));
            }
            trace_debug!(
                problem = %problem,
                records = members.len(),
                "comparison scores computed"
            );
        }

        for (index, score, score_curve) in updates {
            let elements = &mut records[index].plot_elements;
            elements.insert(score_key(compare_metric, baseline), PlotElement::Score(score));
            elements.insert(
                score_curve_key(compare_metric, baseline),
                PlotElement::ScoreCurve(score_curve),
            );
        }

        trace_info!(
            records = records.len(),
            baseline,
            metric = compare_metric,
            "comparison metrics added"
        );
        Ok(())
    }

    /// Collects the scores written by
    /// [`add_comparison_metrics`](Self::add_comparison_metrics), sorted by
    /// problem then algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingPlotElement`] if a record has no score for
    /// `compare_metric` against `baseline`.
    pub fn score_table(
        records: &[BenchmarkRecord],
        compare_metric: &str,
        baseline: &str,
    ) -> Result<Vec<ScoreRow>> {
        let key = score_key(compare_metric, baseline);
        let mut rows = records
            .iter()
            .map(|record| {
                let score = record
                    .element(&key)
                    .and_then(PlotElement::score)
                    .ok_or_else(|| missing(record, &key))?;
                Ok(ScoreRow {
                    problem: record.experimenter_metadata.clone(),
                    algorithm: record.algorithm.clone(),
                    score,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.sort_by(|a, b| {
            a.problem
                .cmp(&b.problem)
                .then_with(|| a.algorithm.cmp(&b.algorithm))
        });
        Ok(rows)
    }
}

fn missing(record: &BenchmarkRecord, key: &str) -> Error {
    Error::MissingPlotElement {
        algorithm: record.algorithm.clone(),
        problem: record.experimenter_metadata.to_string(),
        key: key.to_owned(),
    }
}

fn metric_curve<'a>(record: &'a BenchmarkRecord, metric: &str) -> Result<&'a Curve> {
    record
        .element(metric)
        .and_then(PlotElement::curve)
        .ok_or_else(|| missing(record, metric))
}

/// Per-trial win rate of `candidate` rows over `baseline` rows. Both curves
/// must have the same number of trials. No pairs counts as a tie.
#[allow(clippy::cast_precision_loss)]
fn win_rate(candidate: &Curve, baseline: &Curve) -> Vec<f64> {
    let trend = baseline.trend();
    let trials = baseline.shape().1;
    let pairs = candidate.ys().len() * baseline.ys().len();
    if pairs == 0 {
        return vec![0.5; trials];
    }
    (0..trials)
        .map(|t| {
            let wins: f64 = candidate
                .ys()
                .iter()
                .flat_map(|c| baseline.ys().iter().map(move |b| (c[t], b[t])))
                .map(|(c, b)| match trend.compare(c, b) {
                    Ordering::Greater => 1.0,
                    Ordering::Equal => 0.5,
                    Ordering::Less => 0.0,
                })
                .sum();
            wins / pairs as f64
        })
        .collect()
}
