//! Graph → document.
//!
//! Every namespace known to the context is written, not only those reachable
//! from the top module. Keys are emitted in a fixed order and optional keys
//! are left out when empty, so re-encoding a decoded document reproduces it.

use crate::metadata::encode_metadata;
use crate::params::{encode_args, encode_params};
use crate::types::encode_type;
use serde_json::{json, Map, Value};
use weft_ir::{Connection, Context, Generator, Instance, Module, ModuleDef, ModuleId, Namespace, WirePath};

/// Encodes the whole context with `top` recorded as the root module.
pub fn encode_context(ctx: &Context, top: ModuleId) -> Value {
    let top = ctx.module(top);
    let namespaces: Map<String, Value> = ctx
        .namespaces()
        .map(|ns| (ctx.name(ns.name).to_string(), encode_namespace(ctx, ns)))
        .collect();
    json!({
        "top": [ctx.name(ctx.namespace(top.namespace).name), ctx.name(top.name)],
        "namespaces": namespaces,
    })
}

fn encode_namespace(ctx: &Context, ns: &Namespace) -> Value {
    let mut out = Map::new();
    let modules: Map<String, Value> = ns
        .modules()
        .map(|(name, id)| (ctx.name(name).to_string(), encode_module(ctx, ctx.module(id))))
        .collect();
    if !modules.is_empty() {
        out.insert("modules".into(), Value::Object(modules));
    }
    let generators: Map<String, Value> = ns
        .generators()
        .map(|(name, id)| (ctx.name(name).to_string(), encode_generator(ctx, ctx.generator(id))))
        .collect();
    if !generators.is_empty() {
        out.insert("generators".into(), Value::Object(generators));
    }
    Value::Object(out)
}

fn encode_module(ctx: &Context, module: &Module) -> Value {
    let mut out = Map::new();
    out.insert("type".into(), encode_type(ctx, module.ty));
    if !module.config_params.is_empty() {
        out.insert("configparams".into(), encode_params(ctx, &module.config_params));
    }
    if !module.metadata.is_empty() {
        out.insert("metadata".into(), encode_metadata(&module.metadata));
    }
    if let Some(def) = module.def() {
        out.insert("def".into(), encode_def(ctx, def));
    }
    Value::Object(out)
}

fn encode_generator(ctx: &Context, generator: &Generator) -> Value {
    let mut out = Map::new();
    out.insert("genparams".into(), encode_params(ctx, &generator.gen_params));
    if !generator.config_params.is_empty() {
        out.insert("configparams".into(), encode_params(ctx, &generator.config_params));
    }
    if !generator.metadata.is_empty() {
        out.insert("metadata".into(), encode_metadata(&generator.metadata));
    }
    Value::Object(out)
}

fn encode_def(ctx: &Context, def: &ModuleDef) -> Value {
    let mut out = Map::new();
    if def.instance_count() > 0 {
        let instances: Map<String, Value> = def
            .instances()
            .map(|inst| (ctx.name(inst.name).to_string(), encode_instance(ctx, inst)))
            .collect();
        out.insert("instances".into(), Value::Object(instances));
    }
    if !def.connections().is_empty() {
        let connections = def
            .connections()
            .iter()
            .map(|con| encode_connection(ctx, con))
            .collect();
        out.insert("connections".into(), Value::Array(connections));
    }
    if !def.implementations.is_empty() {
        out.insert("implementations".into(), encode_metadata(&def.implementations));
    }
    if !def.metadata.is_empty() {
        out.insert("metadata".into(), encode_metadata(&def.metadata));
    }
    Value::Object(out)
}

fn encode_instance(ctx: &Context, inst: &Instance) -> Value {
    let (ns, name) = ctx.symbol_of(inst.target);
    let mut out = Map::new();
    out.insert("instref".into(), json!([ctx.name(ns), ctx.name(name)]));
    if let Some(genargs) = &inst.genargs {
        out.insert("genargs".into(), encode_args(ctx, genargs));
    }
    if !inst.config.is_empty() {
        out.insert("config".into(), encode_args(ctx, &inst.config));
    }
    if !inst.metadata.is_empty() {
        out.insert("metadata".into(), encode_metadata(&inst.metadata));
    }
    Value::Object(out)
}

fn encode_connection(ctx: &Context, con: &Connection) -> Value {
    let mut out = vec![encode_wire_path(ctx, &con.first), encode_wire_path(ctx, &con.second)];
    if !con.metadata.is_empty() {
        out.push(encode_metadata(&con.metadata));
    }
    Value::Array(out)
}

fn encode_wire_path(ctx: &Context, path: &WirePath) -> Value {
    std::iter::once(path.instance)
        .chain(path.selectors.iter().copied())
        .map(|part| Value::from(ctx.name(part)))
        .collect()
}
