//! Error types for rule-based detection.

/// Errors raised for invalid rule parameters or mismatched inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RuleError {
    /// Range bounds are NaN or inverted.
    #[error("invalid range: min={min}, max={max}")]
    InvalidRange { min: f64, max: f64 },

    /// Persistence runs must be at least one point long.
    #[error("persistence length must be at least 1")]
    InvalidPersistenceLength,

    /// Residual threshold is NaN or negative.
    #[error("invalid threshold: {0}")]
    InvalidThreshold(f64),

    /// Values and flags do not line up.
    #[error("{values} values but {flags} flags")]
    LengthMismatch { values: usize, flags: usize },
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

pub(crate) fn ensure_same_len(values: &[f64], flags: &[bool]) -> Result<()> {
    if values.len() != flags.len() {
        return Err(RuleError::LengthMismatch {
            values: values.len(),
            flags: flags.len(),
        });
    }
    Ok(())
}
