//! Rule-based detections fed through the event evaluator.

use eventmatch_core::labels_from_qualifiers;
use eventmatch_eval::evaluate_flags;
use eventmatch_rules::{interpolate, largest_event, RuleSet};

#[test]
fn stuck_sensor_is_caught_as_one_event() {
    let values = [
        310.0, 312.0, 311.0, 311.0, 311.0, 311.0, 311.0, 314.0, 313.0, 900.0, 315.0, 316.0,
    ];
    let qualifiers = [
        None, None, None, Some("SF"), Some("SF"), Some("SF"), Some("SF"), None, None, None, None,
        None,
    ];
    let labels = labels_from_qualifiers(&qualifiers);

    let rules = RuleSet {
        range: Some((0.0, 800.0)),
        persistence_length: Some(4),
    };
    let detections = rules.detect(&values).unwrap();
    assert!(detections[9], "spike is out of range");

    let eval = evaluate_flags(&labels, &detections).unwrap();
    // The stuck run is matched; the spike is an unlabelled false alarm.
    assert_eq!(eval.matches.detected_anomalies.len(), 1);
    assert_eq!(eval.false_alarms.len(), 1);
    assert_eq!(eval.counts.false_negatives, 0);
    assert_eq!(eval.counts.false_positives, 2);
    assert_eq!(eval.counts.total(), values.len());
    // Stuck run (points 2..=6) plus its anchor point.
    assert_eq!(largest_event(&detections), 6);

    let corrected = interpolate(&values, &detections, 10).unwrap();
    assert_eq!(corrected[9], Some(314.0));
}
