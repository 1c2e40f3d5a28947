//! Metadata bags to and from JSON objects.

use crate::doc;
use crate::error::CodecError;
use serde_json::Value;
use weft_ir::Metadata;

pub(crate) fn decode_metadata(node: &Value, what: &str) -> Result<Metadata, CodecError> {
    if node.is_null() {
        return Ok(Metadata::new());
    }
    Ok(Metadata::from(doc::object(node, what)?.clone()))
}

pub(crate) fn encode_metadata(metadata: &Metadata) -> Value {
    Value::Object(metadata.as_map().clone())
}
