//! The `@context` shared by a JSON-LD writer and its sub-writers.

use std::collections::HashSet;

use serde_json::{Map, Value, json};

/// The datatype a value would need in the context to be written bare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// Plain JSON coercion: strings, numbers, booleans, language maps.
    Default,
    /// A compact datatype IRI, or `@id` for resources.
    Typed(String),
}

/// Context terms plus the bookkeeping needed to hoist datatypes into it.
#[derive(Debug, Default)]
pub struct JsonLdContext {
    terms: Map<String, Value>,
    /// Terms that already have bare values relying on default coercion, and
    /// so must never get a `@type`.
    defaulted: HashSet<String>,
    graph_opened: bool,
}

impl JsonLdContext {
    #[must_use]
    pub fn terms(&self) -> &Map<String, Value> {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `"@graph": [` has been written.
    #[must_use]
    pub fn graph_opened(&self) -> bool {
        self.graph_opened
    }

    pub fn open_graph(&mut self) {
        self.graph_opened = true;
    }

    /// Maps `prefix` to `iri` unless the name is taken. Returns whether the
    /// prefix can be used in compact IRIs.
    pub fn register_prefix(&mut self, prefix: &str, iri: &str) -> bool {
        self.terms
            .entry(prefix)
            .or_insert_with(|| Value::String(iri.to_string()))
            .as_str()
            == Some(iri)
    }

    /// Maps `term` to `{"@id": id}` unless the name is taken. Returns whether
    /// the term stands for `id`.
    pub fn register_term(&mut self, term: &str, id: &str) -> bool {
        self.terms
            .entry(term)
            .or_insert_with(|| json!({ "@id": id }))
            .get("@id")
            .and_then(Value::as_str)
            == Some(id)
    }

    /// Decides whether a value of `value_type` for `term` can be written bare,
    /// registering the type as the term's default on first use.
    pub fn accepts(&mut self, term: &str, value_type: &ValueType) -> bool {
        match value_type {
            ValueType::Default => {
                let typed = self
                    .terms
                    .get(term)
                    .and_then(|entry| entry.get("@type"))
                    .is_some();

                if !typed {
                    self.defaulted.insert(term.to_string());
                }
                self.defaulted.contains(term)
            }
            ValueType::Typed(datatype) => {
                if self.defaulted.contains(term) {
                    return false;
                }

                let entry = self
                    .terms
                    .entry(term)
                    .or_insert_with(|| Value::Object(Map::new()));

                let Some(entry) = entry.as_object_mut() else {
                    return false;
                };

                entry
                    .entry("@type")
                    .or_insert_with(|| Value::String(datatype.clone()))
                    .as_str()
                    == Some(datatype.as_str())
            }
        }
    }
}
