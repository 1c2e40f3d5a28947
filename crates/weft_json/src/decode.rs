//! Document → graph.
//!
//! Loading runs in two passes over one document:
//!
//! 1. **Declare**: every namespace is created (or reused) and every module and
//!    generator in it is declared with its type and parameters. After this
//!    pass the symbol table is complete for the whole document.
//! 2. **Define**: each module with a `"def"` entry gets a [`ModuleDef`] built
//!    from its instances (resolved through the symbol table) and connections.
//!
//! Definitions are attached only once every definition and the top module
//! have been built. On any error the context is restored to the state it had
//! before the call, so a failed load never leaves a partial graph behind.

use crate::doc;
use crate::error::CodecError;
use crate::metadata::decode_metadata;
use crate::options::DecodeOptions;
use crate::params::{decode_args, decode_params};
use crate::types::decode_type;
use serde_json::Value;
use tracing::{debug, trace};
use weft_diagnostics::DiagnosticSink;
use weft_ir::{
    Context, InstantiableRef, Metadata, ModuleDef, ModuleId, NamespaceId, Params, WirePath,
};

/// Decodes `doc` into `ctx` and returns the top module.
///
/// Either every declaration and definition in the document is added to
/// `ctx`, or none is and the first error is returned. Warnings raised while
/// decoding reach `sink` only when the load succeeds.
pub fn decode_document(
    ctx: &mut Context,
    doc: &Value,
    options: &DecodeOptions,
    sink: &DiagnosticSink,
) -> Result<ModuleId, CodecError> {
    let snapshot = ctx.snapshot();
    let pending = DiagnosticSink::new();
    let result = Loader {
        ctx: &mut *ctx,
        options,
        sink: &pending,
    }
    .load(doc);
    match &result {
        Ok(_) => pending.take_all().into_iter().for_each(|diag| sink.emit(diag)),
        Err(err) => {
            debug!(error = %err, "load failed, restoring context");
            ctx.restore(snapshot);
        }
    }
    result
}

struct Loader<'a> {
    ctx: &'a mut Context,
    options: &'a DecodeOptions,
    sink: &'a DiagnosticSink,
}

impl Loader<'_> {
    fn load(mut self, doc: &Value) -> Result<ModuleId, CodecError> {
        let root = doc::object(doc, "document")?;
        let (top_ns, top_name) = doc::symbol_pair(doc::field(root, "top", "document")?, "\"top\"")?;
        let namespaces = doc::object(doc::field(root, "namespaces", "document")?, "\"namespaces\"")?;

        let mut worklist = Vec::new();
        for (ns_name, jns) in namespaces {
            let ns = self.ctx.get_or_create_namespace(ns_name);
            if jns.is_null() {
                continue;
            }
            let jns = doc::object(jns, &format!("namespace {ns_name}"))?;
            if let Some(jmods) = doc::optional(jns, "modules") {
                for (name, jmod) in doc::object(jmods, &format!("modules of {ns_name}"))? {
                    let id = self.declare_module(ns, ns_name, name, jmod)?;
                    worklist.push((id, jmod));
                }
            }
            if let Some(jgens) = doc::optional(jns, "generators") {
                for (name, jgen) in doc::object(jgens, &format!("generators of {ns_name}"))? {
                    self.declare_generator(ns, ns_name, name, jgen)?;
                }
            }
        }
        debug!(
            namespaces = namespaces.len(),
            modules = worklist.len(),
            "declaration pass complete"
        );

        let mut defs = Vec::new();
        for (id, jmod) in worklist {
            if let Some(jdef) = jmod.get("def").filter(|node| !node.is_null()) {
                defs.push(self.build_definition(id, jdef)?);
            }
        }
        debug!(definitions = defs.len(), "definition pass complete");

        let top = self.ctx.resolve_module(top_ns, top_name)?;
        for def in defs {
            self.ctx.attach_def(def)?;
        }
        Ok(top)
    }

    fn declare_module(
        &mut self,
        ns: NamespaceId,
        ns_name: &str,
        name: &str,
        jmod: &Value,
    ) -> Result<ModuleId, CodecError> {
        let what = format!("module {ns_name}.{name}");
        let jmod = doc::object(jmod, &what)?;
        let ty = decode_type(self.ctx, doc::field(jmod, "type", &what)?)?;
        let config_params = match jmod.get("configparams") {
            Some(node) => decode_params(self.ctx, node)?,
            None => Params::new(),
        };
        let id = self.ctx.new_module_decl(ns, name, ty, config_params)?;
        if let Some(node) = jmod.get("metadata") {
            self.ctx.module_mut(id).metadata = decode_metadata(node, &what)?;
        }
        trace!(module = %what, "declared");
        Ok(id)
    }

    /// Declares a generator so instances can resolve it. Its type generator
    /// is not loaded.
    fn declare_generator(
        &mut self,
        ns: NamespaceId,
        ns_name: &str,
        name: &str,
        jgen: &Value,
    ) -> Result<(), CodecError> {
        let what = format!("generator {ns_name}.{name}");
        let jgen = doc::object(jgen, &what)?;
        let gen_params = match jgen.get("genparams") {
            Some(node) => decode_params(self.ctx, node)?,
            None => Params::new(),
        };
        let config_params = match jgen.get("configparams") {
            Some(node) => decode_params(self.ctx, node)?,
            None => Params::new(),
        };
        let id = self
            .ctx
            .new_generator_decl(ns, name, gen_params, config_params)?;
        if let Some(node) = jgen.get("metadata") {
            self.ctx.generator_mut(id).metadata = decode_metadata(node, &what)?;
        }
        trace!(generator = %what, "declared");
        Ok(())
    }

    fn build_definition(&mut self, module: ModuleId, jdef: &Value) -> Result<ModuleDef, CodecError> {
        let owner = self.ctx.qualified_name(InstantiableRef::Module(module));
        let jdef = doc::object(jdef, &format!("definition of {owner}"))?;
        let mut def = ModuleDef::new(module);

        if let Some(jinsts) = doc::optional(jdef, "instances") {
            for (name, jinst) in doc::object(jinsts, &format!("instances of {owner}"))? {
                self.add_instance(&mut def, &owner, name, jinst)?;
            }
        }
        if let Some(jcons) = doc::optional(jdef, "connections") {
            for jcon in doc::array(jcons, &format!("connections of {owner}"))? {
                self.add_connection(&mut def, &owner, jcon)?;
            }
        }
        if let Some(node) = jdef.get("implementations") {
            def.implementations = decode_metadata(node, &format!("implementations of {owner}"))?;
        }
        if let Some(node) = jdef.get("metadata") {
            def.metadata = decode_metadata(node, &format!("definition of {owner}"))?;
        }
        trace!(module = %owner, instances = def.instance_count(), "defined");
        Ok(def)
    }

    fn add_instance(
        &mut self,
        def: &mut ModuleDef,
        owner: &str,
        name: &str,
        jinst: &Value,
    ) -> Result<(), CodecError> {
        let what = format!("instance {name} in {owner}");
        let jinst = doc::object(jinst, &what)?;
        let (ref_ns, ref_name) =
            doc::symbol_pair(doc::field(jinst, "instref", &what)?, &format!("instref of {what}"))?;
        let target = self.ctx.resolve_symbol(ref_ns, ref_name)?;

        let config_params = match target {
            InstantiableRef::Module(id) => self.ctx.module(id).config_params.clone(),
            InstantiableRef::Generator(id) => self.ctx.generator(id).config_params.clone(),
        };
        let config = decode_args(
            self.ctx,
            &config_params,
            jinst.get("config").unwrap_or(&Value::Null),
            &what,
            self.options,
            self.sink,
        )?;

        let module = match (target, jinst.get("genargs")) {
            (InstantiableRef::Module(id), None) => id,
            (InstantiableRef::Module(_), Some(_)) => {
                return Err(CodecError::Structural(format!(
                    "{what} has genargs but {ref_ns}.{ref_name} is a module"
                )))
            }
            (InstantiableRef::Generator(_), Some(_)) => {
                return Err(CodecError::NotImplemented(format!(
                    "generator instances ({what} instantiates {ref_ns}.{ref_name})"
                )))
            }
            (InstantiableRef::Generator(_), None) => {
                return Err(CodecError::Structural(format!(
                    "{what} instantiates generator {ref_ns}.{ref_name} without genargs"
                )))
            }
        };

        let instance = def.add_instance(self.ctx, name, module, config)?;
        if let Some(node) = jinst.get("metadata") {
            instance.metadata = decode_metadata(node, &what)?;
        }
        Ok(())
    }

    fn add_connection(&mut self, def: &mut ModuleDef, owner: &str, jcon: &Value) -> Result<(), CodecError> {
        let what = format!("connection in {owner}");
        let parts = doc::array(jcon, &what)?;
        let (first, second, metadata) = match parts.as_slice() {
            [first, second] => (first, second, None),
            [first, second, metadata] => (first, second, Some(metadata)),
            _ => {
                return Err(CodecError::Structural(format!(
                    "{what} must be [path, path] or [path, path, metadata]"
                )))
            }
        };
        let first = self.wire_path(first, &what)?;
        let second = self.wire_path(second, &what)?;
        let metadata = match metadata {
            Some(node) => decode_metadata(node, &what)?,
            None => Metadata::new(),
        };
        def.connect_with_metadata(self.ctx, first, second, metadata)?;
        Ok(())
    }

    /// Reads `[instance, selector...]`.
    fn wire_path(&self, node: &Value, what: &str) -> Result<WirePath, CodecError> {
        let malformed =
            || CodecError::Structural(format!("wire path in {what} must be a non-empty array of strings, found {node}"));
        let parts = node.as_array().ok_or_else(malformed)?;
        let mut names = Vec::with_capacity(parts.len());
        for part in parts {
            names.push(self.ctx.intern(part.as_str().ok_or_else(malformed)?));
        }
        if names.is_empty() {
            return Err(malformed());
        }
        let instance = names.remove(0);
        Ok(WirePath::new(instance, names))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use weft_ir::{Arg, TypeDb};

    fn load(ctx: &mut Context, doc: Value) -> Result<ModuleId, CodecError> {
        decode_document(ctx, &doc, &DecodeOptions::default(), &DiagnosticSink::new())
    }

    #[test]
    fn external_module_declaration() {
        let mut ctx = Context::new();
        let top = load(
            &mut ctx,
            json!({"top": ["global", "foo"], "namespaces": {"global": {"modules": {"foo": {"type": "BitIn"}}}}}),
        )
        .unwrap();
        let module = ctx.module(top);
        assert_eq!(ctx.name(module.name), "foo");
        assert_eq!(module.ty, TypeDb::BIT_IN);
        assert!(!module.has_def());
    }

    #[test]
    fn instances_and_connection() {
        let mut ctx = Context::new();
        let top = load(
            &mut ctx,
            json!({
                "top": ["global", "top"],
                "namespaces": {"global": {"modules": {
                    "top": {"type": "Any", "def": {
                        "instances": {
                            "a": {"instref": ["global", "src"]},
                            "b": {"instref": ["global", "dst"]}
                        },
                        "connections": [[["a"], ["b"]]]
                    }},
                    "src": {"type": "BitOut"},
                    "dst": {"type": "BitIn"}
                }}}
            }),
        )
        .unwrap();
        let def = ctx.module(top).def().unwrap();
        assert_eq!(def.instance_count(), 2);
        assert_eq!(def.connections().len(), 1);
        let con = &def.connections()[0];
        assert_eq!(ctx.name(con.first.instance), "a");
        assert!(con.first.selectors.is_empty());
        assert_eq!(ctx.name(con.second.instance), "b");
    }

    #[test]
    fn config_args_bind_against_declared_params() {
        let mut ctx = Context::new();
        let top = load(
            &mut ctx,
            json!({
                "top": ["global", "top"],
                "namespaces": {"global": {"modules": {
                    "reg": {"type": "BitIn", "configparams": {"width": "Int", "init": "Type"}},
                    "top": {"type": "Any", "def": {"instances": {
                        "r0": {"instref": ["global", "reg"], "config": {"width": 8, "init": "BitOut"}}
                    }}}
                }}}
            }),
        )
        .unwrap();
        let def = ctx.module(top).def().unwrap();
        let r0 = def.instance(ctx.intern("r0")).unwrap();
        assert_eq!(r0.config.get(ctx.intern("width")), Some(&Arg::Int(8)));
        assert_eq!(r0.config.get(ctx.intern("init")), Some(&Arg::Type(TypeDb::BIT_OUT)));
    }

    #[test]
    fn self_connections_and_selectors() {
        let mut ctx = Context::new();
        let top = load(
            &mut ctx,
            json!({
                "top": ["global", "wrap"],
                "namespaces": {"global": {"modules": {
                    "wrap": {"type": ["Record", [["in", "BitIn"]]], "def": {
                        "instances": {"d": {"instref": ["global", "dst"]}},
                        "connections": [[["self", "in"], ["d", "bits", "3"]]]
                    }},
                    "dst": {"type": ["Record", [["bits", ["Array", 4, "BitIn"]]]]}
                }}}
            }),
        )
        .unwrap();
        let con = &ctx.module(top).def().unwrap().connections()[0];
        assert_eq!(con.first.instance, ctx.self_ident());
        let selectors: Vec<&str> = con.second.selectors.iter().map(|s| ctx.name(*s)).collect();
        assert_eq!(selectors, vec!["bits", "3"]);
    }

    #[test]
    fn root_must_be_a_module() {
        let mut ctx = Context::new();
        let err = load(
            &mut ctx,
            json!({"top": ["stdlib", "add"], "namespaces": {"stdlib": {"generators": {"add": {"genparams": {"width": "Int"}}}}}}),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Structural(_)));
        assert!(!ctx.has_namespace("stdlib"));
    }

    #[test]
    fn missing_top_symbol() {
        let mut ctx = Context::new();
        let err = load(
            &mut ctx,
            json!({"top": ["global", "nope"], "namespaces": {"global": {}}}),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Missing Symbol: global.nope");
    }

    #[test]
    fn genargs_on_module_reference_is_structural() {
        let mut ctx = Context::new();
        let err = load(
            &mut ctx,
            json!({
                "top": ["global", "top"],
                "namespaces": {"global": {"modules": {
                    "leaf": {"type": "BitIn"},
                    "top": {"type": "Any", "def": {"instances": {
                        "l": {"instref": ["global", "leaf"], "genargs": {"width": 4}}
                    }}}
                }}}
            }),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Structural(_)));
    }

    #[test]
    fn generator_instance_is_not_implemented() {
        let mut ctx = Context::new();
        let err = load(
            &mut ctx,
            json!({
                "top": ["global", "top"],
                "namespaces": {
                    "stdlib": {"generators": {"add": {"genparams": {"width": "Int"}}}},
                    "global": {"modules": {"top": {"type": "Any", "def": {"instances": {
                        "a": {"instref": ["stdlib", "add"], "genargs": {"width": 16}}
                    }}}}}
                }
            }),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::NotImplemented(_)));
        assert_eq!(ctx.namespaces().count(), 0);
    }

    #[test]
    fn generator_config_checked_before_genargs() {
        let mut ctx = Context::new();
        let err = load(
            &mut ctx,
            json!({
                "top": ["global", "top"],
                "namespaces": {
                    "stdlib": {"generators": {"reg": {
                        "genparams": {"width": "Int"},
                        "configparams": {"init": "Int"}
                    }}},
                    "global": {"modules": {"top": {"type": "Any", "def": {"instances": {
                        "r": {"instref": ["stdlib", "reg"], "genargs": {"width": 16}, "config": {}}
                    }}}}}
                }
            }),
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Arg(_)), "{err:?}");
        assert_eq!(err.to_string(), "missing argument 'init' for instance r in global.top");
        assert_eq!(ctx.namespaces().count(), 0);
    }

    #[test]
    fn warnings_dropped_when_load_fails() {
        let doc = |top: &str| {
            json!({
                "top": ["global", top],
                "namespaces": {"global": {"modules": {
                    "leaf": {"type": "BitIn", "configparams": {"width": "Int"}},
                    "top": {"type": "Any", "def": {"instances": {
                        "a": {"instref": ["global", "leaf"], "config": {"width": 1, "depth": 2}}
                    }}}
                }}}
            })
        };
        let sink = DiagnosticSink::new();
        let mut ctx = Context::new();
        decode_document(&mut ctx, &doc("missing"), &DecodeOptions::default(), &sink).unwrap_err();
        assert_eq!(sink.warning_count(), 0);

        decode_document(&mut ctx, &doc("top"), &DecodeOptions::default(), &sink).unwrap();
        assert_eq!(sink.warning_count(), 1);
        assert!(!sink.has_errors());
    }

    #[test]
    fn malformed_wire_paths_are_structural() {
        for path in [json!([]), json!("a"), json!(["a", 0])] {
            let mut ctx = Context::new();
            let err = load(
                &mut ctx,
                json!({
                    "top": ["global", "top"],
                    "namespaces": {"global": {"modules": {
                        "leaf": {"type": "BitIn"},
                        "top": {"type": "Any", "def": {
                            "instances": {"a": {"instref": ["global", "leaf"]}},
                            "connections": [[["a"], path]]
                        }}
                    }}}
                }),
            )
            .unwrap_err();
            assert!(matches!(err, CodecError::Structural(_)), "{err:?}");
        }
    }

    #[test]
    fn null_def_means_declaration_only() {
        let mut ctx = Context::new();
        let top = load(
            &mut ctx,
            json!({"top": ["global", "foo"], "namespaces": {"global": {"modules": {"foo": {"type": "Any", "def": null}}}}}),
        )
        .unwrap();
        assert!(!ctx.module(top).has_def());
    }

    #[test]
    fn malformed_document_shapes() {
        for doc in [
            json!([]),
            json!({"namespaces": {}}),
            json!({"top": ["global", "foo"]}),
            json!({"top": "global.foo", "namespaces": {}}),
            json!({"top": ["global", "foo"], "namespaces": []}),
        ] {
            let mut ctx = Context::new();
            let err = load(&mut ctx, doc).unwrap_err();
            assert!(matches!(err, CodecError::Structural(_)), "{err:?}");
        }
    }
}
