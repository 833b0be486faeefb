//! JSON-LD output.
//!
//! Statements accumulate per subject into a node object; closed nodes are
//! queued on the writer's graph list and written as `@graph` entries by
//! deferred chunks. Two decisions are made late, at drain time:
//!
//! - **Context hoisting**: the first datatype seen for a term becomes its
//!   `@type` in the shared `@context`, so later values of that type are
//!   written bare. Conflicting values use the expanded form.
//! - **Single node**: a document with exactly one node, no sub-writers and
//!   no early drain is written as one flat object without `@graph`.

mod context;
mod encode;


use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value, json};
use tessel_core::constants::{RDF_TYPE, XSD_BOOLEAN, XSD_DOUBLE, XSD_INTEGER, XSD_STRING};

pub use context::{JsonLdContext, ValueType};
pub use encode::encode;

use super::Backend;
use crate::error::{WriterError, WriterResult};
use crate::writer::{IriRef, Role, State, Transition, TransitionTable, WriterCore};

pub const MIME_TYPE: &str = "application/ld+json";

/// Nodes closed by one writer but not yet written.
#[derive(Debug)]
struct NodeList {
    /// `None` once the single node has been written flat.
    graph: Option<Vec<Value>>,
    /// One-way latch: set on sub-writer creation or any early drain.
    disable_graph_opt: bool,
}

impl Default for NodeList {
    fn default() -> Self {
        Self {
            graph: Some(Vec::new()),
            disable_graph_opt: false,
        }
    }
}

/// Writes JSON-LD.
#[derive(Debug, Default)]
pub struct JsonLdBackend {
    context: Rc<RefCell<JsonLdContext>>,
    nodes: Rc<RefCell<NodeList>>,
    /// The node being built, `@id` first.
    predicates: Map<String, Value>,
    /// Values of the current predicate.
    values: Vec<Value>,
}

impl JsonLdBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a compact IRI for `r`, adding its prefix to the context.
    fn compactify(&self, core: &WriterCore, r: &IriRef) -> WriterResult<String> {
        let r = core.expand_shorthand(r.clone());

        let Some(local) = r.local() else {
            return Ok(r.base.clone());
        };

        if r.is_blank() {
            return Ok(format!("_:{local}"));
        }

        let Some(iri) = core.prefixes().get(&r.base).map(str::to_string) else {
            return Err(WriterError::UnknownPrefix(r.base.clone()));
        };

        // the empty prefix can not be declared in a context
        if r.base.is_empty() || !self.context.borrow_mut().register_prefix(&r.base, &iri) {
            return Ok(format!("{iri}{local}"));
        }

        Ok(format!("{}:{local}", r.base))
    }

    /// The key for the current predicate: `rdf:type` as a full IRI, a context
    /// term named after the local name where possible, else a compact IRI.
    fn current_term(&self, core: &WriterCore) -> WriterResult<String> {
        let predicate = core.require_predicate()?;

        if core.to_iri(&predicate)? == RDF_TYPE {
            return Ok(RDF_TYPE.to_string());
        }

        let predicate = core.expand_shorthand(predicate);
        let Some(local) = predicate.local() else {
            return Ok(predicate.base.clone());
        };

        // prefixes take priority over terms
        if predicate.is_blank() || core.prefixes().contains(local) {
            return self.compactify(core, &predicate);
        }

        let compact = self.compactify(core, &predicate)?;
        if self.context.borrow_mut().register_term(local, &compact) {
            Ok(local.to_string())
        } else {
            Ok(compact)
        }
    }

    /// Queues a value for the current predicate, bare if the context allows
    /// it and expanded otherwise. `expanded` defaults to `{"@value": simple}`.
    fn add_typed_value(
        &mut self,
        core: &WriterCore,
        value_type: &ValueType,
        simple: Value,
        expanded: Option<Value>,
        force_expand: bool,
    ) -> WriterResult<()> {
        if !force_expand {
            let term = self.current_term(core)?;

            if self.context.borrow_mut().accepts(&term, value_type) {
                self.values.push(simple);
                return Ok(());
            }
        }

        self.values
            .push(expanded.unwrap_or_else(|| json!({ "@value": simple })));
        Ok(())
    }

    fn finish_predicate(&mut self, core: &WriterCore) -> WriterResult<()> {
        let mut name = self.current_term(core)?;
        let mut values = std::mem::take(&mut self.values);

        if name == RDF_TYPE {
            name = "@type".to_string();
            values = values
                .into_iter()
                .map(|mut value| match value.get_mut("@id") {
                    Some(id) => id.take(),
                    None => value,
                })
                .collect();
        }

        if let Some(was) = self.predicates.get_mut(&name) {
            let mut merged = match was.take() {
                Value::Array(items) => items,
                other => vec![other],
            };
            merged.append(&mut values);
            values = merged;
        }

        let value = if values.len() > 1 {
            Value::Array(values)
        } else {
            values
                .pop()
                .ok_or(WriterError::InvariantViolation("predicate finished without a value"))?
        };

        self.predicates.insert(name, value);
        Ok(())
    }

    fn finish_subject(&mut self, core: &WriterCore) -> WriterResult<()> {
        self.finish_predicate(core)?;

        let node = Value::Object(std::mem::take(&mut self.predicates));
        if let Some(graph) = self.nodes.borrow_mut().graph.as_mut() {
            graph.push(node);
        }
        Ok(())
    }

    fn finish_document(&mut self, core: &mut WriterCore) -> WriterResult<()> {
        self.finish_subject(core)?;

        let nodes = Rc::clone(&self.nodes);
        let context = Rc::clone(&self.context);
        core.defer(move || flush_graph(&nodes, &context));
        Ok(())
    }

    fn begin_json(&self, core: &mut WriterCore) {
        if core.role() != Role::Document {
            return;
        }

        core.write("{\n");

        // draining before finish() means more nodes may follow
        let nodes = Rc::clone(&self.nodes);
        core.defer(move || {
            nodes.borrow_mut().disable_graph_opt = true;
            Ok(String::new())
        });
    }

    fn finish_json(&self, core: &mut WriterCore) -> WriterResult<()> {
        if core.role() != Role::Document {
            return Ok(());
        }

        let single = {
            let mut nodes = self.nodes.borrow_mut();
            let count = nodes.graph.as_ref().map_or(0, Vec::len);

            if !nodes.disable_graph_opt && count == 1 {
                nodes.graph.take().and_then(|mut graph| graph.pop())
            } else {
                nodes.disable_graph_opt = true;
                None
            }
        };

        if let Some(node) = &single {
            tracing::trace!("Writing single JSON-LD node without @graph");
            core.write(encode(node, 0)?);
        }

        let wrote_node = single.is_some();
        let context = Rc::clone(&self.context);
        core.defer(move || {
            let context = context.borrow();
            let mut out = String::new();

            if !wrote_node {
                out.push_str(if context.graph_opened() {
                    "\n    ]"
                } else {
                    "    \"@graph\": []"
                });
            }

            if !context.is_empty() {
                let mut wrapper = Map::new();
                wrapper.insert("@context".to_string(), Value::Object(context.terms().clone()));

                out.push_str(",\n");
                out.push_str(&encode(&Value::Object(wrapper), 0)?);
            }

            out.push_str("\n}");
            Ok(out)
        });

        Ok(())
    }
}

/// Writes the nodes queued so far as `@graph` entries, opening the array if
/// no writer in the tree has yet.
fn flush_graph(
    nodes: &RefCell<NodeList>,
    context: &RefCell<JsonLdContext>,
) -> WriterResult<String> {
    let mut nodes = nodes.borrow_mut();

    let batch = match nodes.graph.as_mut() {
        Some(graph) if !graph.is_empty() => std::mem::take(graph),
        // nothing yet, the single node may still be written flat
        _ => return Ok(String::new()),
    };
    nodes.disable_graph_opt = true;

    let mut context = context.borrow_mut();
    let mut out = String::new();

    if context.graph_opened() {
        out.push_str(",\n");
    } else {
        out.push_str("    \"@graph\": [\n");
        context.open_graph();
    }

    out.push_str(&encode(&Value::Array(batch), 1)?);
    Ok(out)
}

impl Backend for JsonLdBackend {
    fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    fn transitions(&self) -> TransitionTable {
        use State::{Document, Finish, Object, Predicate, Start, Subject};

        TransitionTable::default()
            .with(Start, Document, Transition::Hook)
            .with(Document, Finish, Transition::Hook)
            .with(Object, Predicate, Transition::Hook)
            .with(Object, Subject, Transition::Hook)
            .with(Object, Document, Transition::Hook)
    }

    fn new_sub(&mut self) -> Box<dyn Backend> {
        // a sub-writer may add nodes after ours
        self.nodes.borrow_mut().disable_graph_opt = true;

        Box::new(Self {
            context: Rc::clone(&self.context),
            ..Self::default()
        })
    }

    fn on_transition(&mut self, core: &mut WriterCore, from: State, to: State) -> WriterResult<()> {
        match (from, to) {
            (State::Start, State::Document) => self.begin_json(core),
            (State::Document, State::Finish) => self.finish_json(core)?,
            (State::Object, State::Predicate) => self.finish_predicate(core)?,
            (State::Object, State::Subject) => self.finish_subject(core)?,
            (State::Object, State::Document) => self.finish_document(core)?,
            _ => {}
        }
        Ok(())
    }

    fn write_subject(&mut self, core: &mut WriterCore, subject: &IriRef) -> WriterResult<()> {
        let id = self.compactify(core, subject)?;

        self.predicates = Map::new();
        self.predicates.insert("@id".to_string(), Value::String(id));
        Ok(())
    }

    fn write_predicate(&mut self, _core: &mut WriterCore, _predicate: &IriRef) -> WriterResult<()> {
        Ok(())
    }

    fn write_resource(&mut self, core: &mut WriterCore, resource: &IriRef) -> WriterResult<()> {
        let term = self.current_term(core)?;
        let id = self.compactify(core, resource)?;

        self.add_typed_value(
            core,
            &ValueType::Typed("@id".to_string()),
            Value::String(id.clone()),
            Some(json!({ "@id": id })),
            term == RDF_TYPE,
        )
    }

    fn write_text(
        &mut self,
        core: &mut WriterCore,
        text: &str,
        language: Option<&str>,
    ) -> WriterResult<()> {
        match language {
            Some(language) => {
                let expanded = json!({ "@language": language, "@value": text });
                self.add_typed_value(core, &ValueType::Default, expanded.clone(), Some(expanded), false)
            }
            None => self.add_typed_value(core, &ValueType::Default, Value::from(text), None, false),
        }
    }

    fn write_value(
        &mut self,
        core: &mut WriterCore,
        literal: &str,
        datatype: Option<&IriRef>,
    ) -> WriterResult<()> {
        let Some(datatype) = datatype else {
            return self.add_typed_value(core, &ValueType::Default, Value::from(literal), None, false);
        };

        // datatypes with a native JSON form
        let native = match core.to_iri(datatype)?.as_str() {
            XSD_STRING => Some(Value::from(literal)),
            XSD_INTEGER => literal.parse::<i64>().ok().map(Value::from),
            XSD_BOOLEAN => match literal {
                "true" | "1" => Some(Value::Bool(true)),
                "false" | "0" => Some(Value::Bool(false)),
                _ => None,
            },
            XSD_DOUBLE => literal
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && v.fract().abs() > 0.0)
                .map(Value::from),
            _ => None,
        };

        if let Some(native) = native {
            return self.add_typed_value(core, &ValueType::Default, native, None, false);
        }

        let datatype = self.compactify(core, datatype)?;
        let expanded = json!({ "@type": datatype, "@value": literal });

        self.add_typed_value(
            core,
            &ValueType::Typed(datatype),
            Value::from(literal),
            Some(expanded),
            false,
        )
    }
}
