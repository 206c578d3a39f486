//! Correction of flagged points by linear interpolation.

use crate::error::{ensure_same_len, Result};

/// Replace flagged (and NaN) points with linear interpolation.
///
/// Each gap is filled from the valid points on either side, at most `limit`
/// consecutive points per gap; points beyond the limit stay `None`. A gap
/// before the first valid point is left empty. A gap after the last valid
/// point holds that value.
pub fn interpolate(values: &[f64], flags: &[bool], limit: usize) -> Result<Vec<Option<f64>>> {
    ensure_same_len(values, flags)?;

    let mut out: Vec<Option<f64>> = values
        .iter()
        .zip(flags)
        .map(|(&v, &flagged)| if flagged || v.is_nan() { None } else { Some(v) })
        .collect();

    let mut prev: Option<(usize, f64)> = None;
    let mut i = 0;
    while i < out.len() {
        if let Some(v) = out[i] {
            prev = Some((i, v));
            i += 1;
            continue;
        }

        let start = i;
        let mut end = i;
        while end < out.len() && out[end].is_none() {
            end += 1;
        }

        if let Some((left, left_value)) = prev {
            let right_value = out.get(end).copied().flatten();
            for (j, slot) in out.iter_mut().enumerate().take(end).skip(start).take(limit) {
                *slot = Some(match right_value {
                    Some(rv) => {
                        left_value + (rv - left_value) * (j - left) as f64 / (end - left) as f64
                    }
                    None => left_value,
                });
            }
        }
        i = end;
    }

    Ok(out)
}
