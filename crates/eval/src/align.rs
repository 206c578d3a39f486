//! Reindexing detection flags onto the label timeline.

use std::collections::{BTreeMap, BTreeSet};

use eventmatch_core::{AlignmentPolicy, EvalError, FlagSeries, Result};
use tracing::{debug, warn};

/// Reindex `detections` onto `reference`.
///
/// Reference keys with no detection output are filled with `true`: a gap in
/// detector output is not evidence that the point was normal. Detection keys
/// outside the reference are rejected or dropped according to `policy`.
pub fn align<K: Ord + Clone>(
    detections: &FlagSeries<K>,
    reference: &[K],
    policy: AlignmentPolicy,
) -> Result<FlagSeries<K>> {
    let reference_keys: BTreeSet<&K> = reference.iter().collect();
    let extra = detections
        .index()
        .iter()
        .filter(|k| !reference_keys.contains(k))
        .count();

    if extra > 0 {
        match policy {
            AlignmentPolicy::Reject => return Err(EvalError::AlignmentMismatch { extra }),
            AlignmentPolicy::Truncate => {
                warn!(extra, "Dropping detection points outside the label timeline");
            }
        }
    }

    let lookup: BTreeMap<&K, bool> = detections.iter().collect();
    let mut missing = 0usize;
    let flags: Vec<bool> = reference
        .iter()
        .map(|k| {
            lookup.get(k).copied().unwrap_or_else(|| {
                missing += 1;
                true
            })
        })
        .collect();

    if missing > 0 {
        debug!(missing, "Filled missing detection points as detected");
    }

    FlagSeries::new("aligned detections", reference.to_vec(), flags)
}
