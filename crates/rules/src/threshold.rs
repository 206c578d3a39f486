//! Threshold detection over model residuals.

use crate::error::{Result, RuleError};

/// Flag residuals whose magnitude exceeds `threshold`.
///
/// The first residual has no prior prediction behind it and is never flagged.
pub fn residual_exceedance(residuals: &[f64], threshold: f64) -> Result<Vec<bool>> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(RuleError::InvalidThreshold(threshold));
    }
    Ok(residuals
        .iter()
        .enumerate()
        .map(|(i, r)| i > 0 && r.abs() > threshold)
        .collect())
}

/// Fraction of flagged points, `None` for an empty series.
pub fn detection_ratio(flags: &[bool]) -> Option<f64> {
    if flags.is_empty() {
        return None;
    }
    let flagged = flags.iter().filter(|&&f| f).count();
    Some(flagged as f64 / flags.len() as f64)
}
