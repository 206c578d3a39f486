//! Event-level evaluation of anomaly detections against anomaly labels.
//!
//! Flag series are segmented into events, detection events are matched to
//! label events by any-point overlap, and the event classification is rolled
//! back into point-level confusion counts and metrics.
//!
//! Stages, leaf-first:
//! - [`segment`] — flags → event ids
//! - [`align`] — detection flags reindexed onto the label timeline
//! - [`matcher`] — overlap matching between label and detection events
//! - [`classify`] — detection events that never matched (false alarms)
//! - [`rollup`] — confusion counts and derived metrics
//! - [`pipeline`] — the full evaluation, single and batched

pub mod align;
pub mod classify;
pub mod matcher;
pub mod pipeline;
pub mod rollup;
pub mod segment;

pub use align::align;
pub use classify::false_alarms;
pub use matcher::{match_events, EventIds, MatchResult};
pub use pipeline::{evaluate, evaluate_flags, evaluate_many, BatchOutcome, Evaluation, EvaluationJob};
pub use rollup::{rollup, ConfusionCounts, MetricKind, MetricReport};
pub use segment::{segment, EventId, EventSeries, EventSpan};

pub use eventmatch_core::{AlignmentPolicy, EvalError, FlagSeries, Result};
