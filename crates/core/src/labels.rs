//! Label derivation from data-quality qualifiers.

/// Derive anomaly labels from a data-quality qualifier column.
///
/// A point is anomalous when a technician attached a qualifier to it. A
/// missing or blank qualifier means the point was accepted as normal.
pub fn labels_from_qualifiers<S: AsRef<str>>(qualifiers: &[Option<S>]) -> Vec<bool> {
    qualifiers
        .iter()
        .map(|q| q.as_ref().is_some_and(|s| !s.as_ref().trim().is_empty()))
        .collect()
}
