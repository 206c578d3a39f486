//! Boolean flag series sharing an index with an underlying time series.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Timestamp key used by callers that index series by wall-clock time.
pub type Timestamp = DateTime<Utc>;

/// Ordered boolean flags, one per index key.
///
/// `true` marks a point as anomalous. The index is unique; construction
/// rejects repeated keys so that alignment is well defined. Deserialization
/// goes through the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "RawFlagSeries<K>",
    bound(deserialize = "K: Deserialize<'de> + Ord + Clone")
)]
pub struct FlagSeries<K = usize> {
    index: Vec<K>,
    flags: Vec<bool>,
}

/// Unchecked wire form of [`FlagSeries`].
#[derive(Deserialize)]
struct RawFlagSeries<K> {
    index: Vec<K>,
    flags: Vec<bool>,
}

impl<K: Ord + Clone> TryFrom<RawFlagSeries<K>> for FlagSeries<K> {
    type Error = EvalError;

    fn try_from(raw: RawFlagSeries<K>) -> Result<Self> {
        Self::new("series", raw.index, raw.flags)
    }
}

impl<K: Ord + Clone> FlagSeries<K> {
    /// Build a series from a parallel index and flag vector.
    ///
    /// `name` only labels the error returned for a duplicate key.
    pub fn new(name: &'static str, index: Vec<K>, flags: Vec<bool>) -> Result<Self> {
        if index.len() != flags.len() {
            return Err(EvalError::LengthMismatch {
                index: index.len(),
                flags: flags.len(),
            });
        }
        let mut seen = BTreeSet::new();
        if !index.iter().all(|k| seen.insert(k)) {
            return Err(EvalError::DuplicateIndex { series: name });
        }
        Ok(Self { index, flags })
    }

    /// Build from `(key, flag)` pairs, keeping their order.
    pub fn from_pairs(
        name: &'static str,
        pairs: impl IntoIterator<Item = (K, bool)>,
    ) -> Result<Self> {
        let (index, flags): (Vec<K>, Vec<bool>) = pairs.into_iter().unzip();
        Self::new(name, index, flags)
    }
}

impl FlagSeries<usize> {
    /// Series indexed by position `0..flags.len()`.
    pub fn positional(flags: Vec<bool>) -> Self {
        Self {
            index: (0..flags.len()).collect(),
            flags,
        }
    }
}

impl<K> FlagSeries<K> {
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn index(&self) -> &[K] {
        &self.index
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    /// Number of flagged points.
    pub fn flagged_count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, bool)> + '_ {
        self.index.iter().zip(self.flags.iter().copied())
    }
}
