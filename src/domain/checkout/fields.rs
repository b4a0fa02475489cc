//! Wire-level field set exchanged with the gateway.
//!
//! Orders and callbacks are modelled as typed records everywhere except at
//! the signing and rendering boundary, where they flatten into
//! [`WireFields`]: an insertion-ordered list of unique field names mapped
//! to scalar values.

use std::fmt;

/// Scalar value carried by a wire field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Integer(value)
    }
}

/// Insertion-ordered map from field name to value.
///
/// Order only matters for rendering; signing sorts by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WireFields {
    entries: Vec<(String, FieldValue)>,
}

impl WireFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a field. A replaced field keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns the field rendered as text, if present.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let pos = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for WireFields
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = WireFields::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}
