//! Record indexes keyed by type name

use serde_json::{Map, Value};

pub mod loader;

pub use loader::{load_index, load_optional_index, IndexError};

/// Key-unique map from a record's type name to the record itself.
///
/// Iteration follows insertion order. Re-inserting an existing key replaces
/// the record in place, so the first occurrence decides the position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeIndex {
    records: Map<String, Value>,
}

impl TypeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, record: Value) -> Option<Value> {
        self.records.insert(key.into(), record)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.records.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.records.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Consume the index, yielding records in index order.
    pub fn into_values(self) -> Vec<Value> {
        self.records.into_iter().map(|(_, v)| v).collect()
    }
}

impl IntoIterator for TypeIndex {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl FromIterator<(String, Value)> for TypeIndex {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut index = TypeIndex::new();
        for (key, record) in iter {
            index.insert(key, record);
        }
        index
    }
}
