//! Nested documents produced from table rows.
//!
//! A [`Document`] is an ordered string-keyed mapping. It implements
//! `serde::Serialize` as a map in insertion order, so any serde encoder
//! (serde_json, toon, ...) can render it without further transformation.

mod builder;

pub use builder::DocumentBuilder;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::table::Value;

/// A value stored under a document key.
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    /// Missing cell, or a `Single` relation without a match
    Null,
    Scalar(Value),
    Object(Document),
    Array(Vec<Document>),
}

impl DocValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DocValue::Null)
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            DocValue::Scalar(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Document> {
        match self {
            DocValue::Object(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            DocValue::Array(docs) => Some(docs),
            _ => None,
        }
    }
}

impl From<Value> for DocValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DocValue::Null,
            other => DocValue::Scalar(other),
        }
    }
}

impl From<Option<Document>> for DocValue {
    fn from(doc: Option<Document>) -> Self {
        doc.map_or(DocValue::Null, DocValue::Object)
    }
}

impl Serialize for DocValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DocValue::Null => serializer.serialize_unit(),
            DocValue::Scalar(v) => v.serialize(serializer),
            DocValue::Object(d) => d.serialize(serializer),
            DocValue::Array(docs) => docs.serialize(serializer),
        }
    }
}

/// Ordered key → value mapping built for one row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    entries: Vec<(String, DocValue)>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Callers are responsible for key uniqueness; see
    /// [`Document::unique_key`].
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DocValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `base` if unused, otherwise `<base>_col<n>` for the first free `n`
    /// starting at `suffix`.
    pub fn unique_key(&self, base: &str, suffix: usize) -> String {
        if !self.contains_key(base) {
            return base.to_string();
        }
        (suffix..)
            .map(|n| format!("{}_col{}", base, n))
            .find(|candidate| !self.contains_key(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
