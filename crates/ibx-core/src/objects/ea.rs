//! Extensible attributes
//!
//! User-defined key/value tags attached to a managed object, e.g. the id and
//! name of the virtual machine a record belongs to. On the wire every value
//! is wrapped in an envelope: `{"VM ID": {"value": "93f9249abc039284"}}`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Value of a single extensible attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EaValue {
    /// Boolean attribute
    Bool(bool),
    /// Integer attribute
    Int(i64),
    /// String attribute (also used for enums, dates and email types)
    Str(String),
    /// Multi-value attribute
    List(Vec<String>),
}

impl fmt::Display for EaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EaValue::Bool(b) => write!(f, "{}", b),
            EaValue::Int(i) => write!(f, "{}", i),
            EaValue::Str(s) => f.write_str(s),
            EaValue::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl From<&str> for EaValue {
    fn from(value: &str) -> Self {
        EaValue::Str(value.to_string())
    }
}

impl From<String> for EaValue {
    fn from(value: String) -> Self {
        EaValue::Str(value)
    }
}

impl From<i64> for EaValue {
    fn from(value: i64) -> Self {
        EaValue::Int(value)
    }
}

impl From<bool> for EaValue {
    fn from(value: bool) -> Self {
        EaValue::Bool(value)
    }
}

impl From<Vec<String>> for EaValue {
    fn from(value: Vec<String>) -> Self {
        EaValue::List(value)
    }
}

#[derive(Deserialize)]
struct EaEnvelope {
    value: EaValue,
}

#[derive(Serialize)]
struct EaEnvelopeRef<'a> {
    value: &'a EaValue,
}

/// Extensible attributes of an object
///
/// Keys are kept in sorted order, so two sets of attributes are equal exactly
/// when they hold the same names with the same values, regardless of the
/// order they were inserted or returned in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ea(BTreeMap<String, EaValue>);

impl Ea {
    /// Create an empty attribute set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an attribute, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<EaValue>) -> Option<EaValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<EaValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up an attribute
    pub fn get(&self, name: &str) -> Option<&EaValue> {
        self.0.get(name)
    }

    /// Remove an attribute
    pub fn remove(&mut self, name: &str) -> Option<EaValue> {
        self.0.remove(name)
    }

    /// Add every attribute of `other`, overwriting names present in both
    pub fn merge(&mut self, other: &Ea) {
        for (name, value) in &other.0 {
            self.0.insert(name.clone(), value.clone());
        }
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate attributes in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &EaValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<EaValue>> FromIterator<(K, V)> for Ea {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Serialize for Ea {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, &EaEnvelopeRef { value })?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ea {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = BTreeMap::<String, EaEnvelope>::deserialize(deserializer)?;
        Ok(Self(
            wire.into_iter()
                .map(|(name, envelope)| (name, envelope.value))
                .collect(),
        ))
    }
}
