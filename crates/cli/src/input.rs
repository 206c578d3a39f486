//! JSON input documents accepted by the CLI.

use std::io::Read;

use anyhow::{Context, Result};
use eventmatch_core::{labels_from_qualifiers, FlagSeries, Timestamp};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A labelled point: anomalous when a qualifier is present.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelPoint {
    pub timestamp: Timestamp,
    #[serde(default)]
    pub qualifier: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DetectionPoint {
    pub timestamp: Timestamp,
    pub flag: bool,
}

/// Input for `eventmatch evaluate`.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateInput {
    #[serde(default)]
    pub name: Option<String>,
    pub labels: Vec<LabelPoint>,
    pub detections: Vec<DetectionPoint>,
}

impl EvaluateInput {
    pub fn label_series(&self) -> Result<FlagSeries<Timestamp>> {
        let qualifiers: Vec<Option<&str>> =
            self.labels.iter().map(|p| p.qualifier.as_deref()).collect();
        let index = self.labels.iter().map(|p| p.timestamp).collect();
        Ok(FlagSeries::new("labels", index, labels_from_qualifiers(&qualifiers))?)
    }

    pub fn detection_series(&self) -> Result<FlagSeries<Timestamp>> {
        Ok(FlagSeries::from_pairs(
            "detections",
            self.detections.iter().map(|p| (p.timestamp, p.flag)),
        )?)
    }
}

/// One raw sensor reading with its data-quality qualifier.
#[derive(Debug, Clone, Deserialize)]
pub struct Observation {
    pub timestamp: Timestamp,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub qualifier: Option<String>,
}

/// Input for `eventmatch detect`.
#[derive(Debug, Clone, Deserialize)]
pub struct DetectInput {
    #[serde(default)]
    pub name: Option<String>,
    pub observations: Vec<Observation>,
}

impl DetectInput {
    /// Raw values with missing readings as NaN.
    pub fn values(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(|o| o.value.unwrap_or(f64::NAN))
            .collect()
    }

    pub fn timestamps(&self) -> Vec<Timestamp> {
        self.observations.iter().map(|o| o.timestamp).collect()
    }

    pub fn label_series(&self) -> Result<FlagSeries<Timestamp>> {
        let qualifiers: Vec<Option<&str>> = self
            .observations
            .iter()
            .map(|o| o.qualifier.as_deref())
            .collect();
        Ok(FlagSeries::new(
            "labels",
            self.timestamps(),
            labels_from_qualifiers(&qualifiers),
        )?)
    }
}

/// Read and parse a JSON document from a path, or stdin for `-`.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read input: {}", path))?
    };
    serde_json::from_str(&content).with_context(|| format!("failed to parse input: {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluate_input_builds_series() {
        let input: EvaluateInput = serde_json::from_str(
            r#"{
                "labels": [
                    {"timestamp": "2017-01-01T00:00:00Z"},
                    {"timestamp": "2017-01-01T00:15:00Z", "qualifier": "SV"},
                    {"timestamp": "2017-01-01T00:30:00Z", "qualifier": null}
                ],
                "detections": [
                    {"timestamp": "2017-01-01T00:00:00Z", "flag": false},
                    {"timestamp": "2017-01-01T00:15:00Z", "flag": true}
                ]
            }"#,
        )
        .unwrap();

        let labels = input.label_series().unwrap();
        assert_eq!(labels.flags(), &[false, true, false]);
        let detections = input.detection_series().unwrap();
        assert_eq!(detections.len(), 2);
        assert!(input.name.is_none());
    }

    #[test]
    fn duplicate_label_timestamps_are_rejected() {
        let input: EvaluateInput = serde_json::from_str(
            r#"{
                "labels": [
                    {"timestamp": "2017-01-01T00:00:00Z"},
                    {"timestamp": "2017-01-01T00:00:00Z"}
                ],
                "detections": []
            }"#,
        )
        .unwrap();
        assert!(input.label_series().is_err());
    }

    #[test]
    fn missing_values_become_nan() {
        let input: DetectInput = serde_json::from_str(
            r#"{
                "name": "Mendon cond",
                "observations": [
                    {"timestamp": "2017-01-01T00:00:00Z", "value": 310.5},
                    {"timestamp": "2017-01-01T00:15:00Z", "qualifier": "MV"}
                ]
            }"#,
        )
        .unwrap();
        let values = input.values();
        assert_eq!(values[0], 310.5);
        assert!(values[1].is_nan());
        assert_eq!(input.label_series().unwrap().flags(), &[false, true]);
    }
}
