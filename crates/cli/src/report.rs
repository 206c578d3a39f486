//! Rendering of evaluation results.

use std::fmt::Write;

use eventmatch_eval::{ConfusionCounts, EventId, Evaluation, MetricReport};
use serde::Serialize;

/// Serializable summary of one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub name: String,
    pub points: usize,
    pub label_events: usize,
    pub detection_events: usize,
    pub detected_anomalies: Vec<EventId>,
    pub valid_detections: Vec<EventId>,
    pub false_alarms: Vec<EventId>,
    pub counts: ConfusionCounts,
    pub metrics: MetricReport,
    /// Metrics left undefined by a zero denominator.
    pub undefined: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected: Option<Vec<Option<f64>>>,
}

impl Summary {
    pub fn new<K>(name: impl Into<String>, eval: &Evaluation<K>) -> Self {
        Self {
            name: name.into(),
            points: eval.label_events.len(),
            label_events: eval.label_events.event_count(),
            detection_events: eval.detection_events.event_count(),
            detected_anomalies: eval.matches.detected_anomalies.to_vec(),
            valid_detections: eval.matches.valid_detections.to_vec(),
            false_alarms: eval.false_alarms.to_vec(),
            counts: eval.counts,
            metrics: eval.report,
            undefined: eval.report.undefined().iter().map(|k| k.name()).collect(),
            corrected: None,
        }
    }

    pub fn with_corrected(mut self, corrected: Vec<Option<f64>>) -> Self {
        self.corrected = Some(corrected);
        self
    }
}

fn metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.6}", v),
        None => "undefined".to_string(),
    }
}

/// Plain-text report.
pub fn render_text(summary: &Summary) -> String {
    let m = &summary.metrics;
    let c = &summary.counts;
    let mut out = String::new();
    let _ = writeln!(out, "Evaluation report: {}", summary.name);
    let _ = writeln!(
        out,
        "Events: {} labelled, {} detected ({} false alarms)",
        summary.label_events,
        summary.detection_events,
        summary.false_alarms.len()
    );
    let _ = writeln!(out, "PPV = {}", metric(m.precision));
    let _ = writeln!(out, "NPV = {}", metric(m.npv));
    let _ = writeln!(out, "Acc = {}", metric(m.accuracy));
    let _ = writeln!(out, "TP  = {}", c.true_positives);
    let _ = writeln!(out, "TN  = {}", c.true_negatives);
    let _ = writeln!(out, "FP  = {}", c.false_positives);
    let _ = writeln!(out, "FN  = {}", c.false_negatives);
    let _ = writeln!(out, "F1 = {}", metric(m.f1));
    let _ = writeln!(out, "F2 = {}", metric(m.f2));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventmatch_eval::evaluate_flags;

    fn flags(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == 'T').collect()
    }

    #[test]
    fn text_report_lists_counts_and_metrics() {
        let eval = evaluate_flags(&flags("FFTTFFTF"), &flags("FFFTTFTF")).unwrap();
        let text = render_text(&Summary::new("cond", &eval));
        assert!(text.starts_with("Evaluation report: cond\n"));
        assert!(text.contains("PPV = 1.000000\n"));
        assert!(text.contains("TP  = 5\n"));
        assert!(text.contains("FN  = 0\n"));
    }

    #[test]
    fn undefined_metrics_are_spelled_out() {
        let eval = evaluate_flags(&flags("FFFF"), &flags("FFFF")).unwrap();
        let summary = Summary::new("quiet", &eval);
        assert_eq!(summary.undefined, vec!["precision", "recall", "f1", "f2"]);
        let text = render_text(&summary);
        assert!(text.contains("PPV = undefined\n"));
        assert!(text.contains("Acc = 1.000000\n"));

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json["metrics"]["precision"].is_null());
        assert!(json.get("corrected").is_none());
    }
}
