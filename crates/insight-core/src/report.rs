//! The typed report tree.
//!
//! Metric modules produce insertion-ordered mappings of named sub-metrics;
//! export collaborators pattern-match on [`MetricValue`] instead of
//! inspecting dynamic JSON. Leaves are scalars only — no nulls, no NaN —
//! so any serialization target can represent the full tree.

use serde::ser::{Serialize, SerializeMap, Serializer};

// ── MetricValue ───────────────────────────────────────────────────────────────

/// A single leaf or subtree of a report.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Mapping(MetricMap),
}

impl MetricValue {
    /// Integer payload, if this is an [`MetricValue::Integer`].
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            MetricValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Float payload, if this is a [`MetricValue::Float`].
    pub fn as_float(&self) -> Option<f64> {
        match self {
            MetricValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Nested mapping, if this is a [`MetricValue::Mapping`].
    pub fn as_mapping(&self) -> Option<&MetricMap> {
        match self {
            MetricValue::Mapping(m) => Some(m),
            _ => None,
        }
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Integer(v)
    }
}

impl From<u64> for MetricValue {
    fn from(v: u64) -> Self {
        MetricValue::Integer(v as i64)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Integer(v as i64)
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl From<&str> for MetricValue {
    fn from(v: &str) -> Self {
        MetricValue::Text(v.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(v: String) -> Self {
        MetricValue::Text(v)
    }
}

impl From<MetricMap> for MetricValue {
    fn from(v: MetricMap) -> Self {
        MetricValue::Mapping(v)
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Integer(v) => serializer.serialize_i64(*v),
            MetricValue::Float(v) => serializer.serialize_f64(*v),
            MetricValue::Text(v) => serializer.serialize_str(v),
            MetricValue::Mapping(m) => m.serialize(serializer),
        }
    }
}

// ── MetricMap ─────────────────────────────────────────────────────────────────

/// An insertion-ordered string-keyed mapping of metric values.
///
/// The metric modules encode their required orderings (ascending hours,
/// Monday-first weekdays, descending counts) directly in insertion order,
/// so the map must never reorder entries on its own. Serializes as a JSON
/// object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricMap {
    entries: Vec<(String, MetricValue)>,
}

impl MetricMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any existing entry with the same key in
    /// place (its position is kept).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Build a mapping of integer counts, preserving the given order.
    pub fn from_counts(pairs: impl IntoIterator<Item = (String, u64)>) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k, MetricValue::from(v)))
            .collect()
    }

    /// Build a mapping of float values, preserving the given order.
    pub fn from_floats(pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        pairs
            .into_iter()
            .map(|(k, v)| (k, MetricValue::from(v)))
            .collect()
    }
}

impl FromIterator<(String, MetricValue)> for MetricMap {
    fn from_iter<I: IntoIterator<Item = (String, MetricValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for MetricMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ── ReportDocument ────────────────────────────────────────────────────────────

/// The full analysis report handed to persistence and export collaborators.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ReportDocument {
    /// Wall-clock date the report was generated, `%Y-%m-%d`.
    pub report_date: String,
    /// Number of user records in the input dataset.
    pub total_users: usize,
    pub usage_patterns: MetricMap,
    pub content_performance: MetricMap,
    pub user_segments: MetricMap,
    pub search_patterns: MetricMap,
    pub retention_metrics: MetricMap,
}
