//! Any-point overlap matching between label events and detection events.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::segment::{EventId, EventSeries};

/// Ordered set of event ids.
///
/// Segmented ids are visited in non-decreasing blocks, so comparing against
/// the last inserted id would already deduplicate; the set keeps that true
/// for any visiting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventIds(BTreeSet<EventId>);

impl EventIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id, returning `false` when it was already present.
    pub fn insert(&mut self, id: EventId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = EventId> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<EventId> {
        self.iter().collect()
    }
}

impl FromIterator<EventId> for EventIds {
    fn from_iter<I: IntoIterator<Item = EventId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of overlap matching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    /// Label events hit by at least one detection point.
    pub detected_anomalies: EventIds,
    /// Detection events that hit at least one label point.
    pub valid_detections: EventIds,
}

/// Match label events against detection events.
///
/// A single shared point validates both events in full; there is no
/// minimum-overlap threshold.
pub fn match_events(labels: &EventSeries, detections: &EventSeries) -> MatchResult {
    debug_assert_eq!(labels.len(), detections.len());

    let mut result = MatchResult::default();
    let mut last: Option<(EventId, EventId)> = None;

    for (&label, &detection) in labels.as_slice().iter().zip(detections.as_slice()) {
        if detection == 0 || label == 0 {
            continue;
        }
        // Skip repeats of the pair just recorded.
        if last == Some((label, detection)) {
            continue;
        }
        result.detected_anomalies.insert(label);
        result.valid_detections.insert(detection);
        last = Some((label, detection));
    }

    result
}
