//! False-alarm classification of detection events.

use tracing::debug;

use crate::matcher::EventIds;
use crate::segment::EventSeries;

/// Detection events that never overlapped a label event.
///
/// A series with no detection events yields an empty set; "the detector
/// flagged nothing" is a normal outcome.
pub fn false_alarms(detections: &EventSeries, valid_detections: &EventIds) -> EventIds {
    let max_id = detections.max_id();
    if max_id == 0 {
        debug!("No detection events; no false alarms");
        return EventIds::new();
    }

    (1..=max_id)
        .filter(|&id| !valid_detections.contains(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;

    fn flags(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == 'T').collect()
    }

    #[test]
    fn unvalidated_ids_are_false_alarms() {
        let detections = segment(&flags("FTFFTFFTF"));
        let valid: EventIds = [2].into_iter().collect();
        assert_eq!(false_alarms(&detections, &valid).to_vec(), vec![1, 3]);
    }

    #[test]
    fn last_id_is_considered() {
        let detections = segment(&flags("FTFFT"));
        let valid: EventIds = [1].into_iter().collect();
        assert_eq!(false_alarms(&detections, &valid).to_vec(), vec![2]);
    }

    #[test]
    fn no_detection_events() {
        let detections = segment(&flags("FFFF"));
        assert!(false_alarms(&detections, &EventIds::new()).is_empty());
    }
}
