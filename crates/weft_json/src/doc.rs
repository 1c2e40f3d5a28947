//! Shape checks over raw JSON nodes.
//!
//! Each helper names the node it is inspecting so a structural error says
//! which part of the document was wrong.

use crate::error::CodecError;
use serde_json::{Map, Value};

pub(crate) fn object<'a>(node: &'a Value, what: &str) -> Result<&'a Map<String, Value>, CodecError> {
    node.as_object()
        .ok_or_else(|| CodecError::Structural(format!("{what} must be an object")))
}

pub(crate) fn array<'a>(node: &'a Value, what: &str) -> Result<&'a Vec<Value>, CodecError> {
    node.as_array()
        .ok_or_else(|| CodecError::Structural(format!("{what} must be an array")))
}

pub(crate) fn field<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    what: &str,
) -> Result<&'a Value, CodecError> {
    obj.get(key)
        .ok_or_else(|| CodecError::Structural(format!("{what} is missing \"{key}\"")))
}

/// Returns `obj[key]` unless it is absent or `null`.
pub(crate) fn optional<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|node| !node.is_null())
}

/// Reads `[namespace, name]`.
pub(crate) fn symbol_pair<'a>(node: &'a Value, what: &str) -> Result<(&'a str, &'a str), CodecError> {
    match node.as_array().map(Vec::as_slice) {
        Some([Value::String(ns), Value::String(name)]) => Ok((ns, name)),
        _ => Err(CodecError::Structural(format!(
            "{what} must be [namespace, name]"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_and_array_checks() {
        assert!(object(&json!({}), "x").is_ok());
        let err = object(&json!([]), "module global.foo").unwrap_err();
        assert_eq!(err.to_string(), "module global.foo must be an object");
        assert!(array(&json!([]), "x").is_ok());
        assert!(array(&json!("a"), "x").is_err());
    }

    #[test]
    fn missing_field_names_key() {
        let doc = json!({"namespaces": {}});
        let err = field(doc.as_object().unwrap(), "top", "document").unwrap_err();
        assert_eq!(err.to_string(), "document is missing \"top\"");
    }

    #[test]
    fn optional_skips_null() {
        let doc = json!({"def": null, "metadata": {}});
        let obj = doc.as_object().unwrap();
        assert!(optional(obj, "def").is_none());
        assert!(optional(obj, "metadata").is_some());
        assert!(optional(obj, "absent").is_none());
    }

    #[test]
    fn symbol_pair_shapes() {
        assert_eq!(
            symbol_pair(&json!(["global", "foo"]), "top").unwrap(),
            ("global", "foo")
        );
        assert!(symbol_pair(&json!(["global"]), "top").is_err());
        assert!(symbol_pair(&json!(["global", 3]), "top").is_err());
        assert!(symbol_pair(&json!("global.foo"), "top").is_err());
    }
}
