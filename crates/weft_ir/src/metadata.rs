//! Opaque, string-keyed annotations attached to IR entities.

use serde_json::{Map, Value};

/// An insertion-ordered bag of opaque JSON values keyed by string.
///
/// The IR never interprets metadata; it is carried through load and save
/// unchanged. Module definitions also use this type for their
/// "implementations" blob.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Map<String, Value>,
}

impl Metadata {
    /// Creates an empty metadata bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. A replaced entry keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Inserts every entry of `other`, overwriting keys present in both.
    pub fn extend(&mut self, other: Metadata) {
        self.entries.extend(other.entries);
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Borrows the entries as a JSON object map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Map<String, Value>> for Metadata {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_and_get() {
        let mut md = Metadata::new();
        md.insert("verilog", json!({"prefix": "u_"}));
        assert_eq!(md.get("verilog"), Some(&json!({"prefix": "u_"})));
        assert!(md.get("missing").is_none());
    }

    #[test]
    fn replace_keeps_order() {
        let mut md = Metadata::new();
        md.insert("a", json!(1));
        md.insert("b", json!(2));
        assert_eq!(md.insert("a", json!(3)), Some(json!(1)));
        let keys: Vec<&str> = md.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(md.len(), 2);
    }

    #[test]
    fn extend_overwrites_shared_keys_only() {
        let mut md = Metadata::new();
        md.insert("net", json!("clk"));
        md.insert("width", json!(1));
        let mut other = Metadata::new();
        other.insert("width", json!(4));
        md.extend(other);
        assert_eq!(md.get("net"), Some(&json!("clk")));
        assert_eq!(md.get("width"), Some(&json!(4)));
    }

    #[test]
    fn from_object_map() {
        let Value::Object(map) = json!({"z": 1, "a": 2}) else {
            unreachable!()
        };
        let md = Metadata::from(map);
        let keys: Vec<&str> = md.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(md.as_map().len(), 2);
    }

    #[test]
    fn empty_by_default() {
        assert!(Metadata::default().is_empty());
    }
}
