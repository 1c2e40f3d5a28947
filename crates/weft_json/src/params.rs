//! Parameter declarations and bound arguments.

use crate::error::CodecError;
use crate::options::DecodeOptions;
use crate::types::{decode_type, encode_type};
use serde_json::{Map, Value};
use weft_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use weft_ir::{Arg, Args, Context, ParamKind, Params};

/// Decodes `{name: "Int" | "String" | "Type"}`. A `null` node declares nothing.
pub fn decode_params(ctx: &Context, node: &Value) -> Result<Params, CodecError> {
    let mut params = Params::new();
    if node.is_null() {
        return Ok(params);
    }
    let entries = node.as_object().ok_or_else(|| {
        CodecError::Param(format!("parameter declarations must be an object, found {node}"))
    })?;
    for (name, kind) in entries {
        let kind_name = kind
            .as_str()
            .ok_or_else(|| CodecError::Param(format!("parameter '{name}' must name a kind")))?;
        let kind = ParamKind::from_name(kind_name).ok_or_else(|| {
            CodecError::Param(format!("{kind_name} is not a valid param kind ('{name}')"))
        })?;
        params.insert(ctx.intern(name), kind);
    }
    Ok(params)
}

/// Decodes the arguments for `params` from an object node.
///
/// Arguments are read in parameter order. A missing or wrongly shaped value
/// is an error. Keys that `params` does not declare are an error when
/// [`DecodeOptions::reject_unknown_config_keys`] is set and are otherwise
/// skipped with a warning on `sink`. `what` names the binding site.
pub fn decode_args(
    ctx: &mut Context,
    params: &Params,
    node: &Value,
    what: &str,
    options: &DecodeOptions,
    sink: &DiagnosticSink,
) -> Result<Args, CodecError> {
    let entries = match node {
        Value::Null => None,
        Value::Object(entries) => Some(entries),
        other => {
            return Err(CodecError::Arg(format!(
                "arguments of {what} must be an object, found {other}"
            )))
        }
    };
    let mut args = Args::new();
    for (name, kind) in params.iter() {
        let key = ctx.name(name).to_string();
        let value = entries
            .and_then(|entries| entries.get(&key))
            .ok_or_else(|| CodecError::Arg(format!("missing argument '{key}' for {what}")))?;
        let arg = match kind {
            ParamKind::Int => value.as_i64().map(Arg::Int),
            ParamKind::String => value.as_str().map(|s| Arg::String(s.to_string())),
            ParamKind::Type => Some(Arg::Type(decode_type(ctx, value).map_err(|err| {
                CodecError::Arg(format!("argument '{key}' for {what}: {err}"))
            })?)),
        }
        .ok_or_else(|| {
            CodecError::Arg(format!(
                "argument '{key}' for {what} must be {kind}, found {value}"
            ))
        })?;
        args.insert(name, arg);
    }
    let unknown = entries
        .into_iter()
        .flatten()
        .map(|(key, _)| key)
        .filter(|key| ctx.interner().get(key).map_or(true, |ident| !params.contains(ident)));
    for key in unknown {
        if options.reject_unknown_config_keys {
            return Err(CodecError::Arg(format!(
                "unexpected argument '{key}' for {what}"
            )));
        }
        sink.emit(Diagnostic::warning(
            DiagnosticCode::UNKNOWN_CONFIG_KEY,
            format!("ignoring argument '{key}' for {what}: no such parameter"),
        ));
    }
    Ok(args)
}

/// Encodes parameters as `{name: kind}`.
pub fn encode_params(ctx: &Context, params: &Params) -> Value {
    let map: Map<String, Value> = params
        .iter()
        .map(|(name, kind)| (ctx.name(name).to_string(), Value::from(kind.as_str())))
        .collect();
    Value::Object(map)
}

/// Encodes arguments as `{name: value}`, with type values as type nodes.
pub fn encode_args(ctx: &Context, args: &Args) -> Value {
    let map: Map<String, Value> = args
        .iter()
        .map(|(name, arg)| {
            let value = match arg {
                Arg::Int(i) => Value::from(*i),
                Arg::String(s) => Value::from(s.as_str()),
                Arg::Type(ty) => encode_type(ctx, *ty),
            };
            (ctx.name(name).to_string(), value)
        })
        .collect();
    Value::Object(map)
}
