//! Input shapes accepted when adding values to an enumeration.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Key supplied alongside a value.
///
/// Positional keys come from list-style input (`["apple", "pear"]`); they are
/// replaced by the value itself when the entry is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Name(String),
    Position(usize),
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKey::Name(name) => f.write_str(name),
            EntryKey::Position(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for EntryKey {
    fn from(name: &str) -> Self {
        EntryKey::Name(name.to_string())
    }
}

impl From<String> for EntryKey {
    fn from(name: String) -> Self {
        EntryKey::Name(name)
    }
}

impl From<usize> for EntryKey {
    fn from(index: usize) -> Self {
        EntryKey::Position(index)
    }
}

/// Ordered batch of key/value pairs to add to an enumeration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewValues {
    entries: Vec<(EntryKey, Value)>,
}

impl NewValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair to the batch.
    #[must_use]
    pub fn with(mut self, key: impl Into<EntryKey>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Append every pair of `other` after the pairs already present.
    pub fn extend(&mut self, other: NewValues) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(EntryKey, Value)> {
        self.entries.iter()
    }
}

impl IntoIterator for NewValues {
    type Item = (EntryKey, Value);
    type IntoIter = std::vec::IntoIter<(EntryKey, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// A single string is stored under its own name.
impl From<&str> for NewValues {
    fn from(value: &str) -> Self {
        NewValues::new().with(value, value)
    }
}

impl From<String> for NewValues {
    fn from(value: String) -> Self {
        NewValues::new().with(value.clone(), value)
    }
}

impl From<Vec<&str>> for NewValues {
    fn from(values: Vec<&str>) -> Self {
        positional(values.into_iter().map(Value::from))
    }
}

impl<const N: usize> From<[&str; N]> for NewValues {
    fn from(values: [&str; N]) -> Self {
        positional(values.into_iter().map(Value::from))
    }
}

impl<K, V> From<Vec<(K, V)>> for NewValues
where
    K: Into<EntryKey>,
    V: Into<Value>,
{
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs
            .into_iter()
            .fold(NewValues::new(), |acc, (key, value)| acc.with(key, value))
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for NewValues
where
    K: Into<EntryKey>,
    V: Into<Value>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs
            .into_iter()
            .fold(NewValues::new(), |acc, (key, value)| acc.with(key, value))
    }
}

impl From<IndexMap<String, Value>> for NewValues {
    fn from(map: IndexMap<String, Value>) -> Self {
        map.into_iter()
            .fold(NewValues::new(), |acc, (key, value)| acc.with(key, value))
    }
}

/// Objects become named entries, arrays positional entries, and a string a
/// single self-named entry. Any other scalar is a lone positional entry.
impl From<Value> for NewValues {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => map
                .into_iter()
                .fold(NewValues::new(), |acc, (key, value)| acc.with(key, value)),
            Value::Array(items) => positional(items),
            Value::String(text) => NewValues::from(text),
            other => NewValues::new().with(0usize, other),
        }
    }
}

fn positional(values: impl IntoIterator<Item = Value>) -> NewValues {
    values
        .into_iter()
        .enumerate()
        .fold(NewValues::new(), |acc, (index, value)| acc.with(index, value))
}

impl Serialize for NewValues {
    /// Written as a JSON object; positional keys use their decimal index.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&key.to_string(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for NewValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(NewValues::from)
    }
}
