//! Rolling event classifications back into point-level counts and metrics.

use std::fmt;

use eventmatch_core::{EvalError, Result};
use serde::Serialize;

use crate::matcher::EventIds;
use crate::segment::EventSeries;

/// Point-level confusion counts.
///
/// `true_positives + false_negatives + false_positives + true_negatives`
/// always equals the series length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_negatives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
}

impl ConfusionCounts {
    pub fn total(&self) -> usize {
        self.true_positives + self.false_negatives + self.false_positives + self.true_negatives
    }
}

/// Which metric of a [`MetricReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Precision,
    NegativePredictiveValue,
    Accuracy,
    Recall,
    F1,
    F2,
}

impl MetricKind {
    pub const ALL: [MetricKind; 6] = [
        MetricKind::Precision,
        MetricKind::NegativePredictiveValue,
        MetricKind::Accuracy,
        MetricKind::Recall,
        MetricKind::F1,
        MetricKind::F2,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::Precision => "precision",
            MetricKind::NegativePredictiveValue => "npv",
            MetricKind::Accuracy => "accuracy",
            MetricKind::Recall => "recall",
            MetricKind::F1 => "f1",
            MetricKind::F2 => "f2",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metrics derived from [`ConfusionCounts`].
///
/// A metric whose denominator is zero is `None` rather than a coerced 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricReport {
    /// Positive predictive value, TP / (TP + FP).
    pub precision: Option<f64>,
    /// TN / (TN + FN).
    pub npv: Option<f64>,
    /// (TP + TN) / total.
    pub accuracy: Option<f64>,
    /// TP / (TP + FN).
    pub recall: Option<f64>,
    pub f1: Option<f64>,
    pub f2: Option<f64>,
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

impl MetricReport {
    pub fn from_counts(counts: &ConfusionCounts) -> Self {
        let tp = counts.true_positives as f64;
        let fn_ = counts.false_negatives as f64;
        let fp = counts.false_positives as f64;
        let tn = counts.true_negatives as f64;

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = match (precision, recall) {
            (Some(p), Some(r)) => ratio(2.0 * p * r, p + r),
            _ => None,
        };

        Self {
            precision,
            npv: ratio(tn, tn + fn_),
            accuracy: ratio(tp + tn, counts.total() as f64),
            recall,
            f1,
            f2: ratio(5.0 * tp, 5.0 * tp + 4.0 * fn_ + fp),
        }
    }

    /// Same as `precision`.
    pub fn ppv(&self) -> Option<f64> {
        self.precision
    }

    pub fn get(&self, kind: MetricKind) -> Option<f64> {
        match kind {
            MetricKind::Precision => self.precision,
            MetricKind::NegativePredictiveValue => self.npv,
            MetricKind::Accuracy => self.accuracy,
            MetricKind::Recall => self.recall,
            MetricKind::F1 => self.f1,
            MetricKind::F2 => self.f2,
        }
    }

    /// The metric value, or `DegenerateMetric` when it is undefined.
    pub fn require(&self, kind: MetricKind) -> Result<f64> {
        self.get(kind).ok_or(EvalError::DegenerateMetric {
            metric: kind.name(),
        })
    }

    /// Metrics with a zero denominator.
    pub fn undefined(&self) -> Vec<MetricKind> {
        MetricKind::ALL
            .into_iter()
            .filter(|k| self.get(*k).is_none())
            .collect()
    }
}

/// Count points per outcome from event-level classifications.
///
/// Every point of a detected label event is a true positive; remaining label
/// event points are false negatives. Every point of a false-alarm detection
/// event is a false positive; everything else is a true negative.
pub fn rollup(
    labels: &EventSeries,
    detections: &EventSeries,
    detected_anomalies: &EventIds,
    invalid_detections: &EventIds,
) -> Result<ConfusionCounts> {
    debug_assert_eq!(labels.len(), detections.len());

    let total = labels.len();
    let label_counts = labels.point_counts();
    let detection_counts = detections.point_counts();

    let true_positives: usize = detected_anomalies
        .iter()
        .map(|id| label_counts.get(id).copied().unwrap_or(0))
        .sum();
    let false_positives: usize = invalid_detections
        .iter()
        .map(|id| detection_counts.get(id).copied().unwrap_or(0))
        .sum();

    let conservation = || EvalError::CountConservation {
        tp: true_positives,
        fn_: total.saturating_sub(label_counts[0]).saturating_sub(true_positives),
        fp: false_positives,
        total,
    };

    let false_negatives = total
        .checked_sub(label_counts[0])
        .and_then(|n| n.checked_sub(true_positives))
        .ok_or_else(conservation)?;
    let true_negatives = total
        .checked_sub(true_positives + false_negatives + false_positives)
        .ok_or_else(conservation)?;

    Ok(ConfusionCounts {
        true_positives,
        false_negatives,
        false_positives,
        true_negatives,
    })
}
