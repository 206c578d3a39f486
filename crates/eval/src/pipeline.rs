//! End-to-end evaluation: align, segment, match, classify, roll up.

use eventmatch_core::{AlignmentPolicy, EvalError, FlagSeries, Result};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::align::align;
use crate::classify::false_alarms;
use crate::matcher::{match_events, EventIds, MatchResult};
use crate::rollup::{rollup, ConfusionCounts, MetricReport};
use crate::segment::{segment, EventSeries};

/// Everything produced by one evaluation run.
///
/// The intermediate event series and matches are kept for diagnostics such
/// as overlaying detected and labelled spans.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation<K> {
    /// Detection flags reindexed onto the label timeline.
    pub aligned_detections: FlagSeries<K>,
    pub label_events: EventSeries,
    pub detection_events: EventSeries,
    pub matches: MatchResult,
    /// Detection events with no label overlap.
    pub false_alarms: EventIds,
    pub counts: ConfusionCounts,
    pub report: MetricReport,
}

/// Evaluate detections against labels.
///
/// Detections are aligned onto the label index first (see [`align`]), so the
/// label series defines the timeline and the length of every output.
pub fn evaluate<K: Ord + Clone>(
    labels: &FlagSeries<K>,
    detections: &FlagSeries<K>,
    policy: AlignmentPolicy,
) -> Result<Evaluation<K>> {
    if labels.is_empty() {
        return Err(EvalError::EmptyInput { series: "labels" });
    }
    if detections.is_empty() {
        return Err(EvalError::EmptyInput { series: "detections" });
    }

    let aligned_detections = align(detections, labels.index(), policy)?;

    let label_events = segment(labels.flags());
    let detection_events = segment(aligned_detections.flags());
    debug!(
        points = labels.len(),
        label_events = label_events.event_count(),
        detection_events = detection_events.event_count(),
        "Segmented flag series"
    );

    let matches = match_events(&label_events, &detection_events);
    let false_alarms = false_alarms(&detection_events, &matches.valid_detections);
    debug!(
        detected_anomalies = matches.detected_anomalies.len(),
        valid_detections = matches.valid_detections.len(),
        false_alarms = false_alarms.len(),
        "Matched events"
    );

    let counts = rollup(
        &label_events,
        &detection_events,
        &matches.detected_anomalies,
        &false_alarms,
    )?;
    let report = MetricReport::from_counts(&counts);
    info!(
        tp = counts.true_positives,
        fn_ = counts.false_negatives,
        fp = counts.false_positives,
        tn = counts.true_negatives,
        "Evaluation complete"
    );

    Ok(Evaluation {
        aligned_detections,
        label_events,
        detection_events,
        matches,
        false_alarms,
        counts,
        report,
    })
}

/// Evaluate two flag sequences that share positions.
///
/// A shorter detection sequence has its tail treated as detected; a longer
/// one is an alignment error.
pub fn evaluate_flags(labels: &[bool], detections: &[bool]) -> Result<Evaluation<usize>> {
    evaluate(
        &FlagSeries::positional(labels.to_vec()),
        &FlagSeries::positional(detections.to_vec()),
        AlignmentPolicy::Reject,
    )
}

/// One named series pair in a batch, e.g. one sensor.
#[derive(Debug, Clone)]
pub struct EvaluationJob<K> {
    pub name: String,
    pub labels: FlagSeries<K>,
    pub detections: FlagSeries<K>,
}

/// Result of one batch job. A failing job does not abort its siblings.
#[derive(Debug)]
pub struct BatchOutcome<K> {
    pub name: String,
    pub result: Result<Evaluation<K>>,
}

/// Evaluate independent series pairs in parallel, returning outcomes in job order.
pub fn evaluate_many<K>(jobs: &[EvaluationJob<K>], policy: AlignmentPolicy) -> Vec<BatchOutcome<K>>
where
    K: Ord + Clone + Send + Sync,
{
    jobs.par_iter()
        .map(|job| BatchOutcome {
            name: job.name.clone(),
            result: evaluate(&job.labels, &job.detections, policy),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollup::MetricKind;

    fn flags(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == 'T').collect()
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(
            evaluate_flags(&[], &[true]).unwrap_err(),
            EvalError::EmptyInput { series: "labels" }
        );
        assert_eq!(
            evaluate_flags(&[true], &[]).unwrap_err(),
            EvalError::EmptyInput { series: "detections" }
        );
    }

    #[test]
    fn overlapping_scenario_end_to_end() {
        let eval = evaluate_flags(&flags("FFTTFFTF"), &flags("FFFTTFTF")).unwrap();
        assert_eq!(eval.label_events.as_slice(), &[0, 1, 1, 1, 0, 2, 2, 0]);
        assert_eq!(eval.detection_events.as_slice(), &[0, 0, 1, 1, 1, 2, 2, 0]);
        assert_eq!(eval.matches.detected_anomalies.to_vec(), vec![1, 2]);
        assert_eq!(eval.matches.valid_detections.to_vec(), vec![1, 2]);
        assert!(eval.false_alarms.is_empty());
        assert_eq!(eval.counts.true_positives, 5);
        assert_eq!(eval.counts.false_positives, 0);
        assert_eq!(eval.report.require(MetricKind::Recall).unwrap(), 1.0);
    }

    #[test]
    fn short_detections_fill_as_detected() {
        let eval = evaluate_flags(&flags("FFFFFF"), &flags("FFFF")).unwrap();
        assert_eq!(
            eval.aligned_detections.flags(),
            &[false, false, false, false, true, true]
        );
        // Tail run starts at 4 and claims point 3.
        assert_eq!(eval.false_alarms.to_vec(), vec![1]);
        assert_eq!(eval.counts.false_positives, 3);
    }

    #[test]
    fn long_detections_are_rejected() {
        let err = evaluate_flags(&flags("FFF"), &flags("FFFTT")).unwrap_err();
        assert_eq!(err, EvalError::AlignmentMismatch { extra: 2 });
    }

    #[test]
    fn batch_keeps_order_and_isolates_failures() {
        let jobs = vec![
            EvaluationJob {
                name: "cond".to_string(),
                labels: FlagSeries::positional(flags("FTTF")),
                detections: FlagSeries::positional(flags("FTTF")),
            },
            EvaluationJob {
                name: "temp".to_string(),
                labels: FlagSeries::positional(Vec::new()),
                detections: FlagSeries::positional(flags("F")),
            },
            EvaluationJob {
                name: "ph".to_string(),
                labels: FlagSeries::positional(flags("FFFF")),
                detections: FlagSeries::positional(flags("FFTF")),
            },
        ];
        let outcomes = evaluate_many(&jobs, AlignmentPolicy::Reject);
        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["cond", "temp", "ph"]);
        assert!(outcomes[0].result.is_ok());
        assert!(outcomes[1].result.is_err());
        let ph = outcomes[2].result.as_ref().unwrap();
        assert_eq!(ph.counts.false_positives, 2);
    }
}
