//! Range and persistence checks.

use eventmatch_eval::segment;
use tracing::debug;

use crate::error::{ensure_same_len, Result, RuleError};

/// Flag values strictly outside `[min, max]`.
///
/// NaN values are never flagged; a missing reading is not a range violation.
pub fn range_check(values: &[f64], min: f64, max: f64) -> Result<Vec<bool>> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(RuleError::InvalidRange { min, max });
    }
    Ok(values.iter().map(|&v| v > max || v < min).collect())
}

/// Add persistence flags to `flags`.
///
/// Consecutive identical values form a group (the first repeated value
/// included). Every group spanning at least `length` points is flagged as a
/// stuck sensor. Existing flags are kept.
pub fn persistence(values: &[f64], flags: &[bool], length: usize) -> Result<Vec<bool>> {
    ensure_same_len(values, flags)?;
    if length == 0 {
        return Err(RuleError::InvalidPersistenceLength);
    }

    let mut repeats = vec![false; values.len()];
    for i in 1..values.len() {
        repeats[i] = values[i] - values[i - 1] == 0.0;
    }

    let groups = segment(&repeats);
    let sizes = groups.point_counts();
    let mut out = flags.to_vec();
    let mut stuck_groups = 0usize;
    for (id, &size) in sizes.iter().enumerate().skip(1) {
        if size < length {
            continue;
        }
        stuck_groups += 1;
        for (flag, &group) in out.iter_mut().zip(groups.as_slice()) {
            if group == id {
                *flag = true;
            }
        }
    }

    debug!(groups = groups.event_count(), stuck_groups, length, "Persistence check");
    Ok(out)
}

/// Size in points of the largest event in `flags`, `0` when there is none.
pub fn largest_event(flags: &[bool]) -> usize {
    segment(flags)
        .point_counts()
        .into_iter()
        .skip(1)
        .max()
        .unwrap_or(0)
}
