//! Metadata scan filters.
//!
//! Filters support top-level field equality and key-presence checks with
//! AND semantics. Complex predicates (ranges, nested paths, OR) are out of
//! scope for the scan surface.

use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Metadata filter for scans.
///
/// All conditions must match (AND semantics). The empty filter matches every
/// record; a non-empty filter never matches a record without metadata.
///
/// # Example
///
/// ```
/// use corpus_core::{MetadataFilter, Value};
///
/// let filter = MetadataFilter::new()
///     .eq("label", "animal")
///     .has("source");
/// assert!(filter.matches(Some(&Value::object([
///     ("label", Value::from("animal")),
///     ("source", Value::from("csv")),
/// ]))));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataFilter {
    /// Top-level field equality conditions
    pub equals: BTreeMap<String, Value>,
    /// Top-level key-presence conditions
    pub has: BTreeSet<String>,
}

impl MetadataFilter {
    /// Create an empty filter (matches all records).
    pub fn new() -> Self {
        MetadataFilter::default()
    }

    /// Add an equality condition.
    ///
    /// Equality is strict: no cross-type coercion, IEEE float semantics.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.equals.insert(field.into(), value.into());
        self
    }

    /// Add a key-presence condition (`metadata` must contain `field`).
    pub fn has(mut self, field: impl Into<String>) -> Self {
        self.has.insert(field.into());
        self
    }

    /// Check if filter is empty (matches all).
    pub fn is_empty(&self) -> bool {
        self.equals.is_empty() && self.has.is_empty()
    }

    /// Check if metadata matches this filter.
    pub fn matches(&self, metadata: Option<&Value>) -> bool {
        if self.is_empty() {
            return true;
        }

        let Some(meta) = metadata else {
            return false;
        };
        let Some(obj) = meta.as_object() else {
            return false;
        };

        for field in &self.has {
            if !obj.contains_key(field) {
                return false;
            }
        }

        for (field, expected) in &self.equals {
            match obj.get(field) {
                Some(actual) if actual == expected => {}
                _ => return false,
            }
        }

        true
    }
}
