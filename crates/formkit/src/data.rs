//! Caller-supplied form data
//!
//! [`FormData`] holds the values a caller wants to submit on top of what the
//! form itself contains: replacing field values, removing fields, or
//! injecting fields that only exist after JavaScript runs.

use crate::collect::FieldPair;
use std::collections::BTreeMap;

/// Value given for a field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Submit the name once with this value
    One(String),
    /// Submit the name once per value, in order
    Many(Vec<String>),
    /// Do not submit the name at all
    Absent,
}

impl Value {
    fn values(&self) -> &[String] {
        match self {
            Value::One(value) => std::slice::from_ref(value),
            Value::Many(values) => values,
            Value::Absent => &[],
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::One(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::One(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::One(value.clone())
    }
}

impl<T: Into<String>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::Many(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

/// Ordered field overrides
///
/// Entries keep the order they were added in. [`FormData::insert`] behaves
/// like an insertion-ordered map, [`FormData::append`] like a list of pairs
/// where a name may repeat.
///
/// ```
/// use formkit::{FormData, Value};
///
/// let data = FormData::new()
///     .with("q", "rust")
///     .with("page", Value::Absent);
/// assert_eq!(data.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, Value)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a name, replacing every earlier entry for that name
    ///
    /// The new entry takes the position of the first replaced one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        let position = self.entries.iter().position(|(n, _)| *n == name);
        self.entries.retain(|(n, _)| *n != name);
        let index = position.unwrap_or(self.entries.len());
        self.entries.insert(index, (name, value));
    }

    /// Add an entry, keeping earlier entries for the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Mark a name as absent so the form's own values for it are dropped
    pub fn remove(&mut self, name: impl Into<String>) {
        self.insert(name, Value::Absent);
    }

    /// Builder-style [`FormData::insert`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder-style [`FormData::append`]
    pub fn and(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.append(name, value);
        self
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Returns true if the name has an entry, including [`Value::Absent`]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Apply these overrides to the pairs collected from a form
    ///
    /// Every name with an entry loses all of its collected pairs. The
    /// entries' values are then appended in entry order. Names without an
    /// entry keep their pairs where they were.
    pub fn merge(&self, fields: Vec<FieldPair>) -> Vec<FieldPair> {
        let mut merged: Vec<FieldPair> = fields
            .into_iter()
            .filter(|(name, _)| !self.contains(name))
            .collect();

        for (name, value) in &self.entries {
            merged.extend(
                value
                    .values()
                    .iter()
                    .map(|v| (name.clone(), v.clone())),
            );
        }

        merged
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = FormData::new();
        data.extend(iter);
        data
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for FormData {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.append(name, value);
        }
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for FormData {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for FormData {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
