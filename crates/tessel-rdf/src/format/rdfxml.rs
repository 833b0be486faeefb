//! RDF/XML output.
//!
//! Every subject becomes an `rdf:Description` element and every statement
//! its own predicate element. Tags are built with `quick-xml`, which also
//! escapes text and attribute values.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::Backend;
use crate::error::{WriterError, WriterResult};
use crate::writer::{IriRef, Role, State, Transition, TransitionTable, WriterCore};

pub const MIME_TYPE: &str = "application/rdf+xml";

/// Writes RDF/XML.
#[derive(Debug, Clone, Default)]
pub struct RdfXmlBackend;

impl RdfXmlBackend {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Backend for RdfXmlBackend {
    fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    fn transitions(&self) -> TransitionTable {
        use State::{Document, Finish, Object, Start, Subject};

        TransitionTable::default()
            .with(Start, Document, Transition::Hook)
            .with(Document, Finish, Transition::Hook)
            .with(Object, Document, Transition::Hook)
            .with(Object, Subject, Transition::Hook)
    }

    fn new_sub(&mut self) -> Box<dyn Backend> {
        Box::new(Self)
    }

    fn on_transition(&mut self, core: &mut WriterCore, from: State, to: State) -> WriterResult<()> {
        match (from, to) {
            (State::Start, State::Document) if core.role() == Role::Document => {
                core.write("<?xml version=\"1.0\"?>\n");

                // namespaces are read from the shared table when drained
                let prefixes = core.shared_prefixes();
                core.defer(move || {
                    let namespaces: Vec<(String, String)> = prefixes
                        .borrow()
                        .iter()
                        .map(|(prefix, iri)| {
                            let name = if prefix.is_empty() {
                                "xmlns".to_string()
                            } else {
                                format!("xmlns:{prefix}")
                            };
                            (name, iri.to_string())
                        })
                        .collect();

                    let attributes: Vec<(&str, &str)> = namespaces
                        .iter()
                        .map(|(name, iri)| (name.as_str(), iri.as_str()))
                        .collect();

                    start_tag("rdf:RDF", &attributes, false).map_err(WriterError::from)
                });
            }
            (State::Document, State::Finish) if core.role() == Role::Document => {
                core.write("\n</rdf:RDF>\n");
            }
            (State::Object, State::Document | State::Subject) => {
                core.write("\n\t</rdf:Description>");
            }
            _ => {}
        }
        Ok(())
    }

    fn expand_subject(&self, core: &WriterCore, subject: IriRef) -> WriterResult<IriRef> {
        core.expand_qname(subject)
    }

    /// Predicates must become element names, so they are kept as qnames. A
    /// full IRI is split against the registered prefixes.
    fn expand_predicate(&self, core: &WriterCore, predicate: IriRef) -> WriterResult<IriRef> {
        let predicate = core.expand_shorthand(predicate);

        let qname = match predicate.local() {
            Some(_) if predicate.is_blank() => None,
            Some(local) => {
                core.check_prefix(&predicate)?;
                is_xml_local_name(local).then(|| predicate.clone())
            }
            None => core
                .prefixes()
                .split(&predicate.base)
                .filter(|(_, local)| is_xml_local_name(local))
                .map(|(prefix, local)| IriRef::qname(prefix, local)),
        };

        qname.ok_or_else(|| WriterError::UnqualifiedPredicate(predicate.to_string()))
    }

    fn expand_resource(&self, core: &WriterCore, resource: IriRef) -> WriterResult<IriRef> {
        core.expand_qname(resource)
    }

    fn expand_type(&self, core: &WriterCore, datatype: IriRef) -> WriterResult<IriRef> {
        core.expand_qname(datatype)
    }

    fn write_subject(&mut self, core: &mut WriterCore, subject: &IriRef) -> WriterResult<()> {
        let tag = start_tag("rdf:Description", &[node_attribute(subject, "rdf:about")], false)?;

        core.write("\n\t");
        core.write(tag);
        Ok(())
    }

    fn write_predicate(&mut self, _core: &mut WriterCore, _predicate: &IriRef) -> WriterResult<()> {
        Ok(())
    }

    fn write_resource(&mut self, core: &mut WriterCore, resource: &IriRef) -> WriterResult<()> {
        let name = element_name(&core.require_predicate()?);
        let tag = start_tag(&name, &[node_attribute(resource, "rdf:resource")], true)?;

        core.write("\n\t\t");
        core.write(tag);
        Ok(())
    }

    fn write_text(
        &mut self,
        core: &mut WriterCore,
        text: &str,
        language: Option<&str>,
    ) -> WriterResult<()> {
        let name = element_name(&core.require_predicate()?);
        let attributes: Vec<(&str, &str)> =
            language.map(|lang| ("xml:lang", lang)).into_iter().collect();

        let element = text_element(&name, &attributes, text)?;

        core.write("\n\t\t");
        core.write(element);
        Ok(())
    }

    fn write_value(
        &mut self,
        core: &mut WriterCore,
        literal: &str,
        datatype: Option<&IriRef>,
    ) -> WriterResult<()> {
        let name = element_name(&core.require_predicate()?);
        let datatype = datatype.map(ToString::to_string);
        let attributes: Vec<(&str, &str)> = datatype
            .as_deref()
            .map(|iri| ("rdf:datatype", iri))
            .into_iter()
            .collect();

        let element = text_element(&name, &attributes, literal)?;

        core.write("\n\t\t");
        core.write(element);
        Ok(())
    }
}

/// `rdf:nodeID` for blank nodes, `iri_attribute` otherwise.
fn node_attribute<'a>(node: &'a IriRef, iri_attribute: &'a str) -> (&'a str, &'a str) {
    match node.local() {
        Some(label) if node.is_blank() => ("rdf:nodeID", label),
        _ => (iri_attribute, node.base.as_str()),
    }
}

fn element_name(predicate: &IriRef) -> String {
    match predicate.local() {
        Some(local) if predicate.base.is_empty() => local.to_string(),
        Some(local) => format!("{}:{local}", predicate.base),
        None => predicate.base.clone(),
    }
}

/// Whether `name` is usable as the local part of an XML element name.
fn is_xml_local_name(name: &str) -> bool {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn start_tag(name: &str, attributes: &[(&str, &str)], empty: bool) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    let mut elem = BytesStart::new(name);
    for attribute in attributes {
        elem.push_attribute(*attribute);
    }

    if empty {
        writer.write_event(Event::Empty(elem))?;
    } else {
        writer.write_event(Event::Start(elem))?;
    }

    into_string(writer)
}

fn text_element(
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new(Vec::new());

    let mut elem = BytesStart::new(name);
    for attribute in attributes {
        elem.push_attribute(*attribute);
    }

    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;

    into_string(writer)
}

fn into_string(writer: Writer<Vec<u8>>) -> Result<String, quick_xml::Error> {
    String::from_utf8(writer.into_inner()).map_err(|e| {
        tracing::error!("Generated invalid UTF-8 in RDF/XML: {}", e);
        quick_xml::Error::Io(std::sync::Arc::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Invalid UTF-8 in XML output",
        )))
    })
}
