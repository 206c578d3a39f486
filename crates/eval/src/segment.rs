//! Run-length segmentation of flag sequences into numbered events.
//!
//! The same routine segments labels and detections so the two sides can
//! never drift apart.

use serde::Serialize;

/// Event identifier. `0` means "not part of any event".
pub type EventId = usize;

/// Per-point event ids for one flag sequence.
///
/// Invariant: ids are `0` outside events, constant across a run, and number
/// runs `1, 2, 3, …` in order of appearance. Only [`segment`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventSeries {
    ids: Vec<EventId>,
}

/// Contiguous span `[start, end]` (inclusive) carried by one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventSpan {
    pub id: EventId,
    pub start: usize,
    pub end: usize,
}

impl EventSpan {
    /// Number of points in the span.
    pub fn points(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Segment a flag sequence into events.
///
/// The first sample never starts an event by itself. When a run of `true`
/// starts at `i`, the preceding point `i - 1` is folded into the same event,
/// anchoring each event at the last point before the transition. A run that
/// begins on the first sample opens its event at position 1.
pub fn segment(flags: &[bool]) -> EventSeries {
    let mut ids = vec![0; flags.len()];
    let mut counter: EventId = 0;

    for i in 1..flags.len() {
        match (flags[i - 1], flags[i]) {
            (_, false) => {}
            (false, true) => {
                counter += 1;
                ids[i - 1] = counter;
                ids[i] = counter;
            }
            (true, true) if i == 1 => {
                counter += 1;
                ids[i] = counter;
            }
            (true, true) => ids[i] = counter,
        }
    }

    EventSeries { ids }
}

impl EventSeries {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[EventId] {
        &self.ids
    }

    pub fn get(&self, i: usize) -> Option<EventId> {
        self.ids.get(i).copied()
    }

    /// Highest event id, `0` when the series has no events.
    ///
    /// Ids are assigned in increasing order, so this is also the event count.
    pub fn max_id(&self) -> EventId {
        self.ids.iter().copied().max().unwrap_or(0)
    }

    pub fn event_count(&self) -> usize {
        self.max_id()
    }

    pub fn has_events(&self) -> bool {
        self.max_id() > 0
    }

    /// Points per id: slot `0` counts points outside any event, slot `k`
    /// counts the points of event `k`.
    pub fn point_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.max_id() + 1];
        for &id in &self.ids {
            counts[id] += 1;
        }
        counts
    }

    /// Number of points carried by a single event.
    pub fn points_in(&self, id: EventId) -> usize {
        self.ids.iter().filter(|&&x| x == id).count()
    }

    /// One span per event, in id order. Useful for overlaying events on a plot.
    pub fn spans(&self) -> Vec<EventSpan> {
        let mut spans: Vec<EventSpan> = Vec::with_capacity(self.max_id());
        for (i, &id) in self.ids.iter().enumerate() {
            if id == 0 {
                continue;
            }
            match spans.last_mut() {
                Some(span) if span.id == id => span.end = i,
                _ => spans.push(EventSpan { id, start: i, end: i }),
            }
        }
        spans
    }
}
