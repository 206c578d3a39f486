//! Rule-based anomaly detection and correction for sensor series.
//!
//! This crate provides detection producers that feed the evaluator:
//! - Range checks against fixed bounds
//! - Persistence checks for stuck (repeating) values
//! - Residual threshold exceedance for model-based detectors
//! - Linear interpolation over flagged points
//! - [`RuleSet`] combining the configured checks

pub mod checks;
pub mod correct;
pub mod error;
pub mod ruleset;
pub mod threshold;

pub use checks::{largest_event, persistence, range_check};
pub use correct::interpolate;
pub use error::{Result, RuleError};
pub use ruleset::RuleSet;
pub use threshold::{detection_ratio, residual_exceedance};
