//! Labeled statistics for one dataset

use std::collections::btree_map::{self, BTreeMap};

/// Mapping from a statistic's label to its value, e.g. `"mean" -> 2.0`.
///
/// Labels iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBundle {
    values: BTreeMap<String, f64>,
}

impl ResultBundle {
    /// Create an empty bundle
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, label: impl Into<String>, value: f64) -> Self {
        self.insert(label, value);
        self
    }

    /// Insert a value, returning the previous one under that label
    pub fn insert(&mut self, label: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(label.into(), value)
    }

    /// Look up a value by label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.values.get(label).copied()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the bundle has no labels
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate `(label, value)` pairs in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ResultBundle {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for ResultBundle {
    type Item = (String, f64);
    type IntoIter = btree_map::IntoIter<String, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
