//! Type nodes.
//!
//! Leaf kinds are bare strings (`"BitIn"`). Arrays are
//! `["Array", length, element]` and records are
//! `["Record", [[field, type], ...]]` with fields in declaration order.

use crate::error::CodecError;
use serde_json::{json, Value};
use weft_ir::{Context, Type, TypeDb, TypeId};

/// Decodes a type node, interning every type it builds into `ctx`.
///
/// Nested nodes are decoded recursively without a depth limit.
pub fn decode_type(ctx: &mut Context, node: &Value) -> Result<TypeId, CodecError> {
    match node {
        Value::String(kind) => TypeDb::leaf_by_name(kind)
            .ok_or_else(|| CodecError::Type(format!("{kind} is not a type!"))),
        Value::Array(items) => {
            let kind = items.first().and_then(Value::as_str).ok_or_else(|| {
                CodecError::Type("compound type node must start with a kind name".to_string())
            })?;
            match kind {
                "Array" => decode_array(ctx, items),
                "Record" => decode_record(ctx, items),
                other => Err(CodecError::Type(format!("{other} is not a type!"))),
            }
        }
        other => Err(CodecError::Type(format!("Error parsing Type: {other}"))),
    }
}

fn decode_array(ctx: &mut Context, items: &[Value]) -> Result<TypeId, CodecError> {
    let [_, len, element] = items else {
        return Err(CodecError::Type(
            "Array type must be [\"Array\", length, element]".to_string(),
        ));
    };
    let len = len
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| CodecError::Type(format!("invalid Array length: {len}")))?;
    let element = decode_type(ctx, element)?;
    Ok(ctx.array(element, len))
}

fn decode_record(ctx: &mut Context, items: &[Value]) -> Result<TypeId, CodecError> {
    let [_, Value::Array(entries)] = items else {
        return Err(CodecError::Type(
            "Record type must be [\"Record\", [[field, type], ...]]".to_string(),
        ));
    };
    let mut fields = Vec::with_capacity(entries.len());
    for entry in entries {
        let Some([Value::String(name), ty]) = entry.as_array().map(Vec::as_slice) else {
            return Err(CodecError::Type(format!(
                "Record field must be [name, type], found {entry}"
            )));
        };
        fields.push((name.as_str(), decode_type(ctx, ty)?));
    }
    Ok(ctx.record(fields)?)
}

/// Encodes a type as a type node.
pub fn encode_type(ctx: &Context, id: TypeId) -> Value {
    match ctx.ty(id) {
        Type::Array { element, len } => json!(["Array", len, encode_type(ctx, *element)]),
        Type::Record { fields } => {
            let fields: Vec<Value> = fields
                .iter()
                .map(|(name, ty)| json!([ctx.name(*name), encode_type(ctx, *ty)]))
                .collect();
            json!(["Record", fields])
        }
        leaf => Value::String(leaf.kind_name().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_kinds() {
        let mut ctx = Context::new();
        assert_eq!(decode_type(&mut ctx, &json!("BitIn")).unwrap(), ctx.bit_in());
        assert_eq!(decode_type(&mut ctx, &json!("BitOut")).unwrap(), ctx.bit_out());
        assert_eq!(decode_type(&mut ctx, &json!("Any")).unwrap(), ctx.any());
        assert_eq!(encode_type(&ctx, ctx.bit_out()), json!("BitOut"));
    }

    #[test]
    fn unknown_leaf_is_type_error() {
        let mut ctx = Context::new();
        let err = decode_type(&mut ctx, &json!("Bit")).unwrap_err();
        assert!(matches!(err, CodecError::Type(_)));
        assert_eq!(err.to_string(), "Bit is not a type!");
    }

    #[test]
    fn deep_array_is_left_inverse() {
        let mut ctx = Context::new();
        let node = json!(["Array", 2, ["Array", 4, ["Array", 8, "BitIn"]]]);
        let id = decode_type(&mut ctx, &node).unwrap();
        assert_eq!(encode_type(&ctx, id), node);
        // Decoding again interns to the same type.
        assert_eq!(decode_type(&mut ctx, &node).unwrap(), id);
    }

    #[test]
    fn nested_record_is_left_inverse() {
        let mut ctx = Context::new();
        let node = json!([
            "Record",
            [
                ["valid", "BitOut"],
                ["data", ["Array", 16, "BitOut"]],
                ["ctl", ["Record", [["ready", "BitIn"], ["any", "Any"]]]]
            ]
        ]);
        let id = decode_type(&mut ctx, &node).unwrap();
        assert_eq!(encode_type(&ctx, id), node);
    }

    #[test]
    fn empty_record_roundtrips() {
        let mut ctx = Context::new();
        let node = json!(["Record", []]);
        let id = decode_type(&mut ctx, &node).unwrap();
        assert_eq!(encode_type(&ctx, id), node);
    }

    #[test]
    fn duplicate_record_field_is_type_error() {
        let mut ctx = Context::new();
        let err = decode_type(
            &mut ctx,
            &json!(["Record", [["a", "BitIn"], ["a", "BitOut"]]]),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Type(_)));
    }

    #[test]
    fn malformed_nodes_are_type_errors() {
        let mut ctx = Context::new();
        for node in [
            json!(["Array", 4]),
            json!(["Array", -1, "BitIn"]),
            json!(["Array", "4", "BitIn"]),
            json!(["Record", [["a"]]]),
            json!(["Record", "a"]),
            json!(["Vector", 4, "BitIn"]),
            json!([]),
            json!(3),
            json!({"kind": "BitIn"}),
        ] {
            let err = decode_type(&mut ctx, &node).unwrap_err();
            assert!(matches!(err, CodecError::Type(_)), "{node} gave {err:?}");
        }
    }
}
