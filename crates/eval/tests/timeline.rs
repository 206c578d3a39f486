//! Evaluations over timestamp-indexed series.

use chrono::{DateTime, Duration, TimeZone, Utc};
use eventmatch_eval::{
    evaluate, AlignmentPolicy, EvalError, FlagSeries, MetricKind,
};

fn ts(step: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2017, 3, 1, 0, 0, 0).unwrap() + Duration::minutes(15 * step)
}

fn series(name: &'static str, steps: &[i64], flags: &str) -> FlagSeries<DateTime<Utc>> {
    let index = steps.iter().map(|&s| ts(s)).collect();
    FlagSeries::new(name, index, flags.chars().map(|c| c == 'T').collect()).unwrap()
}

#[test]
fn gaps_in_detector_output_count_as_detections() {
    let labels = series("labels", &[0, 1, 2, 3, 4, 5, 6, 7], "FFFTTFFF");
    // Detector produced nothing for steps 3 and 4.
    let detections = series("detections", &[0, 1, 2, 5, 6, 7], "FFFFFF");

    let eval = evaluate(&labels, &detections, AlignmentPolicy::Reject).unwrap();
    assert_eq!(eval.aligned_detections.flagged_count(), 2);
    assert_eq!(eval.matches.detected_anomalies.to_vec(), vec![1]);
    assert_eq!(eval.counts.true_positives, 3);
    assert_eq!(eval.counts.false_positives, 0);
    assert_eq!(eval.report.require(MetricKind::Precision).unwrap(), 1.0);
}

#[test]
fn detections_past_the_label_timeline() {
    let labels = series("labels", &[0, 1, 2, 3], "FFTF");
    let detections = series("detections", &[0, 1, 2, 3, 4, 5], "FFTFFT");

    let err = evaluate(&labels, &detections, AlignmentPolicy::Reject).unwrap_err();
    assert_eq!(err, EvalError::AlignmentMismatch { extra: 2 });

    let eval = evaluate(&labels, &detections, AlignmentPolicy::Truncate).unwrap();
    assert_eq!(eval.aligned_detections.len(), 4);
    assert_eq!(eval.counts.total(), 4);
    assert_eq!(eval.counts.false_negatives, 0);
}

#[test]
fn nothing_detected_reports_undefined_precision() {
    let labels = series("labels", &[0, 1, 2, 3, 4], "FFTTF");
    let detections = series("detections", &[0, 1, 2, 3, 4], "FFFFF");

    let eval = evaluate(&labels, &detections, AlignmentPolicy::Reject).unwrap();
    assert!(eval.false_alarms.is_empty());
    assert_eq!(eval.counts.true_positives, 0);
    assert_eq!(eval.counts.false_negatives, 3);
    assert_eq!(eval.report.precision, None);
    assert_eq!(eval.report.recall, Some(0.0));
    assert_eq!(
        eval.report.require(MetricKind::Precision).unwrap_err(),
        EvalError::DegenerateMetric { metric: "precision" }
    );
}

#[test]
fn evaluation_serializes_for_reporting() {
    let labels = series("labels", &[0, 1, 2, 3], "FTTF");
    let detections = series("detections", &[0, 1, 2, 3], "FFTT");

    let eval = evaluate(&labels, &detections, AlignmentPolicy::Reject).unwrap();
    let json = serde_json::to_value(&eval).unwrap();
    assert_eq!(json["label_events"], serde_json::json!([1, 1, 1, 0]));
    assert_eq!(json["detection_events"], serde_json::json!([0, 1, 1, 1]));
    assert_eq!(json["counts"]["true_positives"], 3);
    assert_eq!(json["matches"]["valid_detections"], serde_json::json!([1]));
}
