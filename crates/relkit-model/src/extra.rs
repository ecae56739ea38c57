//! Free-form ordered properties attached to configuration nodes

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered key/value annotations on a configuration node.
///
/// Merging is additive: incoming keys overwrite in place, new keys are
/// appended, and nothing is ever removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtraProperties {
    entries: IndexMap<String, String>,
}

impl ExtraProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the previous value if the key existed.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `incoming` into this set of properties.
    ///
    /// Keys already present are overwritten without moving; keys seen for
    /// the first time are appended in `incoming` order.
    pub fn merge(&mut self, incoming: &ExtraProperties) {
        for (key, value) in &incoming.entries {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Snapshot used for export, with every key namespaced under `prefix`.
    ///
    /// `foo` becomes `prefixFoo`; keys that already carry the prefix are
    /// left untouched. When a namespaced key would land on a key that is
    /// already taken (`foo` next to a stored `prefixFoo`, or `foo` after
    /// `Foo`), the already-prefixed or earlier key wins and the other one
    /// is exported under its raw key, so the snapshot always has as many
    /// entries as the store.
    pub fn resolved(&self, prefix: &str) -> IndexMap<String, String> {
        let literal: IndexSet<&str> = self
            .entries
            .keys()
            .map(String::as_str)
            .filter(|key| prefix.is_empty() || key.starts_with(prefix))
            .collect();

        let mut resolved = IndexMap::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            let candidate = prefixed_key(prefix, key);
            let taken = candidate != *key
                && (literal.contains(candidate.as_str()) || resolved.contains_key(&candidate));
            let key = if taken { key.clone() } else { candidate };
            resolved.insert(key, value.clone());
        }
        resolved
    }

    /// The resolved snapshot as an ordered JSON object.
    pub fn resolved_value(&self, prefix: &str) -> Value {
        let map: Map<String, Value> = self
            .resolved(prefix)
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect();
        Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ExtraProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn prefixed_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() || key.starts_with(prefix) {
        return key.to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", prefix, first.to_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}
