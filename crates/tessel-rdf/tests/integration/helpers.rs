//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Writing one shared dataset with any writer
//! - Reading N-Triples, RDF/XML and JSON-LD output back into comparable triples

use std::collections::{BTreeSet, HashMap};

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use serde_json::{Map, Value};
use tessel_rdf::{IriRef, RdfWriter, RdfWriterFactory, WriterResult};

pub const EX: &str = "http://ex.test/";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// A triple with every term in N-Triples syntax.
pub type Triple = (String, String, String);

/// Creates a writer for `format` with the `ex` prefix registered.
///
/// ## Panics
/// Panics if the format is unknown.
#[must_use]
pub fn new_writer(format: &str) -> RdfWriter {
    let mut writer = RdfWriterFactory::new()
        .new_writer(format)
        .expect("Failed to create writer");
    writer
        .prefix("ex", EX)
        .expect("Failed to register prefix");
    writer
}

/// Writes the people dataset, using a sub-writer for the second subject.
///
/// ## Errors
/// Returns any writer error.
pub fn write_people(writer: &mut RdfWriter) -> WriterResult<()> {
    writer.start()?;

    let friend = writer.blank(None);

    writer
        .about(("ex", "alice"))?
        .a(("ex", "Person"))?
        .say(("ex", "name"))?
        .text("Alice", Some("en"))?
        .say(("ex", "age"))?
        .value(42)?
        .say(("ex", "height"))?
        .value(1.75)?
        .say(("ex", "active"))?
        .value(true)?
        .say(("ex", "born"))?
        .typed_value("1990-01-01", ("xsd", "date"))?
        .say(("ex", "knows"))?
        .is(("ex", "bob"))?
        .is(IriRef::blank(friend.clone()))?;

    let sub = writer.sub();
    sub.borrow_mut()
        .about(IriRef::blank(friend))?
        .say(("ex", "nick"))?
        .text("Al", None)?;

    writer
        .about(("ex", "bob"))?
        .say(("ex", "name"))?
        .text("Bob", None)?;

    writer.finish()
}

/// The triples of [`write_people`].
#[must_use]
pub fn people_triples() -> BTreeSet<Triple> {
    let alice = format!("<{EX}alice>");
    let iri = |local: &str| format!("<{EX}{local}>");
    let typed = |lexical: &str, datatype: &str| format!("\"{lexical}\"^^<{XSD}{datatype}>");

    [
        (alice.clone(), format!("<{RDF_TYPE}>"), iri("Person")),
        (alice.clone(), iri("name"), "\"Alice\"@en".to_string()),
        (alice.clone(), iri("age"), typed("42", "integer")),
        (alice.clone(), iri("height"), typed("1.75", "double")),
        (alice.clone(), iri("active"), typed("true", "boolean")),
        (alice.clone(), iri("born"), typed("1990-01-01", "date")),
        (alice.clone(), iri("knows"), iri("bob")),
        (alice, iri("knows"), "_:genid1".to_string()),
        ("_:genid1".to_string(), iri("nick"), "\"Al\"".to_string()),
        (iri("bob"), iri("name"), "\"Bob\"".to_string()),
    ]
    .into_iter()
    .collect()
}

/// Reads N-Triples as written by the N-Triples writer.
///
/// ## Panics
/// Panics on a line that is not a statement.
#[must_use]
pub fn ntriples_triples(doc: &str) -> BTreeSet<Triple> {
    doc.lines()
        .map(|line| {
            let line = line.strip_suffix(" .").expect("Statement without terminator");
            let mut parts = line.splitn(3, ' ');
            let s = parts.next().expect("Missing subject");
            let p = parts.next().expect("Missing predicate");
            let o = parts.next().expect("Missing object");
            (s.to_string(), p.to_string(), o.to_string())
        })
        .collect()
}

/// A property element whose text content is still being read.
struct OpenProperty {
    predicate: String,
    language: Option<String>,
    datatype: Option<String>,
}

/// Reads RDF/XML as written by the RDF/XML writer, resolving element names
/// against the `xmlns` declarations on `rdf:RDF`.
///
/// ## Panics
/// Panics on malformed XML or structures the writer never produces.
#[must_use]
pub fn rdfxml_triples(doc: &str) -> BTreeSet<Triple> {
    let mut reader = Reader::from_str(doc);

    let mut namespaces: HashMap<String, String> = HashMap::new();
    let mut subject: Option<String> = None;
    let mut property: Option<OpenProperty> = None;
    let mut text = String::new();
    let mut triples = BTreeSet::new();

    loop {
        match reader.read_event().expect("Malformed RDF/XML") {
            Event::Start(ref e) => {
                let name = xml_name(e);
                let attrs = xml_attributes(e);

                match name.as_str() {
                    "rdf:RDF" => {
                        for (key, value) in attrs {
                            if let Some(prefix) = key.strip_prefix("xmlns:") {
                                namespaces.insert(prefix.to_string(), value);
                            }
                        }
                    }
                    "rdf:Description" => {
                        subject = Some(node_object(&attrs, "rdf:about").expect("Subject without id"));
                    }
                    _ => {
                        property = Some(OpenProperty {
                            predicate: format!("<{}>", expand_xml_name(&namespaces, &name)),
                            language: attrs.get("xml:lang").cloned(),
                            datatype: attrs.get("rdf:datatype").cloned(),
                        });
                        text.clear();
                    }
                }
            }
            Event::Empty(ref e) => {
                let name = xml_name(e);
                let attrs = xml_attributes(e);
                let subject = subject.clone().expect("Property outside rdf:Description");
                let object = node_object(&attrs, "rdf:resource").expect("Empty property without object");

                triples.insert((
                    subject,
                    format!("<{}>", expand_xml_name(&namespaces, &name)),
                    object,
                ));
            }
            Event::Text(ref e) => {
                if property.is_some() {
                    text.push_str(&e.decode().expect("Text is not UTF-8"));
                }
            }
            Event::GeneralRef(ref e) => {
                if property.is_some() {
                    match e.resolve_char_ref().expect("Malformed character reference") {
                        Some(c) => text.push(c),
                        None => {
                            let entity = e.decode().expect("Entity name is not UTF-8");
                            text.push_str(
                                resolve_predefined_entity(&entity).expect("Unknown entity"),
                            );
                        }
                    }
                }
            }
            Event::End(ref e) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .expect("Element name is not UTF-8")
                    .to_string();

                if name == "rdf:Description" {
                    subject = None;
                } else if let Some(open) = property.take() {
                    let subject = subject.clone().expect("Property outside rdf:Description");
                    let object = match (open.language, open.datatype) {
                        (Some(language), _) => format!("\"{text}\"@{language}"),
                        (None, Some(datatype)) => format!("\"{text}\"^^<{datatype}>"),
                        (None, None) => format!("\"{text}\""),
                    };
                    triples.insert((subject, open.predicate, object));
                } else {
                    // closing rdf:RDF
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    triples
}

fn xml_name(element: &BytesStart<'_>) -> String {
    std::str::from_utf8(element.name().as_ref())
        .expect("Element name is not UTF-8")
        .to_string()
}

fn xml_attributes(element: &BytesStart<'_>) -> HashMap<String, String> {
    element
        .attributes()
        .map(|attr| {
            let attr = attr.expect("Malformed attribute");
            let key = std::str::from_utf8(attr.key.as_ref())
                .expect("Attribute name is not UTF-8")
                .to_string();
            let value = attr
                .unescape_value()
                .expect("Malformed attribute value")
                .into_owned();
            (key, value)
        })
        .collect()
}

/// The node named by `iri_attribute` or `rdf:nodeID`.
fn node_object(attrs: &HashMap<String, String>, iri_attribute: &str) -> Option<String> {
    attrs
        .get(iri_attribute)
        .map(|iri| format!("<{iri}>"))
        .or_else(|| attrs.get("rdf:nodeID").map(|id| format!("_:{id}")))
}

fn expand_xml_name(namespaces: &HashMap<String, String>, name: &str) -> String {
    let (prefix, local) = name.split_once(':').expect("Unqualified element name");
    let namespace = namespaces.get(prefix).expect("Undeclared namespace prefix");
    format!("{namespace}{local}")
}

/// Reads a JSON-LD document as written by the JSON-LD writer, resolving
/// terms and compact IRIs against its `@context`.
///
/// ## Panics
/// Panics on structures the writer never produces.
#[must_use]
pub fn jsonld_triples(doc: &Value) -> BTreeSet<Triple> {
    let empty = Map::new();
    let context = doc
        .get("@context")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let nodes: Vec<&Value> = match doc.get("@graph") {
        Some(Value::Array(nodes)) => nodes.iter().collect(),
        _ => vec![doc],
    };

    let mut triples = BTreeSet::new();

    for node in nodes {
        let node = node.as_object().expect("Node is not an object");
        let subject = node_term(context, node["@id"].as_str().expect("Node without @id"));

        for (key, value) in node {
            if key == "@context" || key == "@id" || key == "@graph" {
                continue;
            }

            let values: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                other => vec![other],
            };

            if key == "@type" {
                for value in values {
                    let class = node_term(context, value.as_str().expect("Type is not a string"));
                    triples.insert((subject.clone(), format!("<{RDF_TYPE}>"), class));
                }
                continue;
            }

            let definition = context.get(key).and_then(Value::as_object);
            let predicate = definition
                .and_then(|d| d.get("@id"))
                .and_then(Value::as_str)
                .unwrap_or(key);
            let predicate = node_term(context, predicate);
            let default_type = definition
                .and_then(|d| d.get("@type"))
                .and_then(Value::as_str);

            for value in values {
                let object = object_term(context, value, default_type);
                triples.insert((subject.clone(), predicate.clone(), object));
            }
        }
    }

    triples
}

fn expand(context: &Map<String, Value>, compact: &str) -> String {
    if let Some((prefix, local)) = compact.split_once(':') {
        if let Some(Value::String(base)) = context.get(prefix) {
            return format!("{base}{local}");
        }
    }
    compact.to_string()
}

fn node_term(context: &Map<String, Value>, id: &str) -> String {
    if id.starts_with("_:") {
        id.to_string()
    } else {
        format!("<{}>", expand(context, id))
    }
}

fn object_term(context: &Map<String, Value>, value: &Value, default_type: Option<&str>) -> String {
    match value {
        Value::String(s) => match default_type {
            Some("@id") => node_term(context, s),
            Some(datatype) => format!("\"{s}\"^^<{}>", expand(context, datatype)),
            None => format!("\"{s}\""),
        },
        Value::Bool(b) => format!("\"{b}\"^^<{XSD}boolean>"),
        Value::Number(n) if n.is_i64() => format!("\"{n}\"^^<{XSD}integer>"),
        Value::Number(n) => format!("\"{n}\"^^<{XSD}double>"),
        Value::Object(map) => {
            if let Some(id) = map.get("@id").and_then(Value::as_str) {
                return node_term(context, id);
            }
            let lexical = map["@value"].as_str().expect("@value is not a string");
            if let Some(language) = map.get("@language").and_then(Value::as_str) {
                return format!("\"{lexical}\"@{language}");
            }
            match map.get("@type").and_then(Value::as_str) {
                Some(datatype) => format!("\"{lexical}\"^^<{}>", expand(context, datatype)),
                None => format!("\"{lexical}\""),
            }
        }
        other => panic!("Unexpected JSON-LD value: {other}"),
    }
}
