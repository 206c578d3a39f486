use eventmatch_core::config::RulesConfig;
use serde::Serialize;
use tracing::debug;

use crate::checks::{persistence, range_check};
use crate::error::{Result, RuleError};

/// The set of rule checks applied to one sensor series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RuleSet {
    /// Inclusive `(min, max)` bounds of acceptable values.
    pub range: Option<(f64, f64)>,
    /// Minimum repeated-value run flagged as a stuck sensor.
    pub persistence_length: Option<usize>,
}

impl RuleSet {
    /// Build a rule set from configuration, validating parameters.
    ///
    /// A single configured bound leaves the other side unbounded.
    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        let range = match (config.range_min, config.range_max) {
            (None, None) => None,
            (min, max) => Some((min.unwrap_or(f64::NEG_INFINITY), max.unwrap_or(f64::INFINITY))),
        };
        let rules = Self {
            range,
            persistence_length: config.persistence_length,
        };
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((min, max)) = self.range {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(RuleError::InvalidRange { min, max });
            }
        }
        if self.persistence_length == Some(0) {
            return Err(RuleError::InvalidPersistenceLength);
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none() && self.persistence_length.is_none()
    }

    /// Apply every configured check and return the combined detection flags.
    pub fn detect(&self, values: &[f64]) -> Result<Vec<bool>> {
        let mut flags = match self.range {
            Some((min, max)) => range_check(values, min, max)?,
            None => vec![false; values.len()],
        };
        let out_of_range = flags.iter().filter(|&&f| f).count();

        if let Some(length) = self.persistence_length {
            flags = persistence(values, &flags, length)?;
        }

        debug!(
            points = values.len(),
            out_of_range,
            flagged = flags.iter().filter(|&&f| f).count(),
            "Applied rule set"
        );
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_fills_open_bounds() {
        let config = RulesConfig {
            range_min: None,
            range_max: Some(100.0),
            ..RulesConfig::default()
        };
        let rules = RuleSet::from_config(&config).unwrap();
        assert_eq!(rules.range, Some((f64::NEG_INFINITY, 100.0)));
        assert!(!rules.is_empty());
    }

    #[test]
    fn from_config_rejects_zero_persistence() {
        let config = RulesConfig {
            persistence_length: Some(0),
            ..RulesConfig::default()
        };
        assert_eq!(
            RuleSet::from_config(&config).unwrap_err(),
            RuleError::InvalidPersistenceLength
        );
    }

    #[test]
    fn empty_rule_set_flags_nothing() {
        let rules = RuleSet::default();
        assert!(rules.is_empty());
        assert_eq!(rules.detect(&[1.0, 1.0, 1.0]).unwrap(), vec![false; 3]);
    }

    #[test]
    fn combines_range_and_persistence() {
        let rules = RuleSet {
            range: Some((0.0, 10.0)),
            persistence_length: Some(3),
        };
        let values = [1.0, 12.0, 3.0, 4.0, 4.0, 4.0, 5.0];
        assert_eq!(
            rules.detect(&values).unwrap(),
            vec![false, true, false, true, true, true, false]
        );
    }
}
