//! Output format backends.
//!
//! Each backend implements [`Backend`]: the `write_*` hooks produce the
//! format's syntax, the `expand_*` hooks (no-ops by default) turn shorthands
//! and qnames into whatever form the format needs, and the transition table
//! plus [`Backend::on_transition`] produce structural output.
//!
//! - [`turtle`] - Turtle, also used for N3
//! - [`ntriples`] - N-Triples, one fully expanded statement per line
//! - [`rdfxml`] - RDF/XML
//! - [`jsonld`] - JSON-LD with context hoisting

mod n3;

pub mod jsonld;
pub mod ntriples;
pub mod rdfxml;
pub mod turtle;

use tessel_core::config::OutputConfig;

use crate::error::WriterResult;
use crate::factory::RdfFormat;
use crate::writer::{IriRef, State, TransitionTable, WriterCore};

pub use jsonld::JsonLdBackend;
pub use ntriples::NTriplesBackend;
pub use rdfxml::RdfXmlBackend;
pub use turtle::TurtleBackend;

/// Construction-time options for the backends.
#[derive(Debug, Clone)]
pub struct WriterOptions {
    /// Write IRIs in Turtle without escaping.
    pub trust_iris: bool,
    /// Escape all non-ASCII characters in Turtle. Always on for N-Triples.
    pub escape_unicode: bool,
    pub blank_node_prefix: String,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for WriterOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            trust_iris: config.trust_iris,
            escape_unicode: config.escape_unicode,
            blank_node_prefix: config.blank_node_prefix.clone(),
        }
    }
}

/// The per-format half of a writer.
///
/// All hooks receive the [`WriterCore`], which holds the buffer, the prefix
/// table and the current subject and predicate.
pub trait Backend {
    /// The canonical MIME type.
    fn mime_type(&self) -> &'static str;

    fn transitions(&self) -> TransitionTable {
        TransitionTable::default()
    }

    /// Creates the backend for a sub-writer, sharing whatever state the
    /// format keeps across the writer tree.
    fn new_sub(&mut self) -> Box<dyn Backend>;

    /// Called for transitions marked [`crate::writer::Transition::Hook`].
    ///
    /// ## Errors
    /// Returns any error raised while writing structural output.
    fn on_transition(&mut self, _core: &mut WriterCore, _from: State, _to: State) -> WriterResult<()> {
        Ok(())
    }

    /// ## Errors
    /// Returns a resolution fault if the identifier can not be expanded.
    fn expand_subject(&self, _core: &WriterCore, subject: IriRef) -> WriterResult<IriRef> {
        Ok(subject)
    }

    /// ## Errors
    /// Returns a resolution fault if the identifier can not be expanded.
    fn expand_predicate(&self, _core: &WriterCore, predicate: IriRef) -> WriterResult<IriRef> {
        Ok(predicate)
    }

    /// ## Errors
    /// Returns a resolution fault if the identifier can not be expanded.
    fn expand_resource(&self, _core: &WriterCore, resource: IriRef) -> WriterResult<IriRef> {
        Ok(resource)
    }

    /// ## Errors
    /// Returns a resolution fault if the identifier can not be expanded.
    fn expand_type(&self, _core: &WriterCore, datatype: IriRef) -> WriterResult<IriRef> {
        Ok(datatype)
    }

    /// ## Errors
    /// Returns an error if the subject can not be written.
    fn write_subject(&mut self, core: &mut WriterCore, subject: &IriRef) -> WriterResult<()>;

    /// ## Errors
    /// Returns an error if the predicate can not be written.
    fn write_predicate(&mut self, core: &mut WriterCore, predicate: &IriRef) -> WriterResult<()>;

    /// ## Errors
    /// Returns an error if the resource can not be written.
    fn write_resource(&mut self, core: &mut WriterCore, resource: &IriRef) -> WriterResult<()>;

    /// `language` has already been validated.
    ///
    /// ## Errors
    /// Returns an error if the text can not be written.
    fn write_text(
        &mut self,
        core: &mut WriterCore,
        text: &str,
        language: Option<&str>,
    ) -> WriterResult<()>;

    /// ## Errors
    /// Returns an error if the value can not be written.
    fn write_value(
        &mut self,
        core: &mut WriterCore,
        literal: &str,
        datatype: Option<&IriRef>,
    ) -> WriterResult<()>;
}

/// Creates the backend that writes `format`.
#[must_use]
pub fn backend_for(format: RdfFormat, options: &WriterOptions) -> Box<dyn Backend> {
    match format {
        RdfFormat::N3 | RdfFormat::Turtle => Box::new(TurtleBackend::new(options)),
        RdfFormat::NTriples => Box::new(NTriplesBackend::new()),
        RdfFormat::RdfXml => Box::new(RdfXmlBackend::new()),
        RdfFormat::JsonLd => Box::new(JsonLdBackend::new()),
    }
}
