//! The streaming writer and its state machine.
//!
//! An [`RdfWriter`] pairs a format-independent [`WriterCore`] with a format
//! [`Backend`]. Every public operation moves the writer through the states
//! in [`State`]; the backend's [`TransitionTable`] decides which moves are
//! legal and what structural output they produce.
//!
//! ## Usage
//!
//! ```rust
//! use tessel_rdf::RdfWriterFactory;
//!
//! let factory = RdfWriterFactory::new();
//! let mut writer = factory.new_writer("nt").unwrap();
//!
//! writer.prefix("ex", "http://ex.test/").unwrap();
//! writer.start().unwrap();
//! writer
//!     .about(("ex", "A")).unwrap()
//!     .say(("ex", "name")).unwrap()
//!     .text("Alice", Some("en")).unwrap();
//! writer.finish().unwrap();
//!
//! assert_eq!(
//!     writer.drain().unwrap(),
//!     "<http://ex.test/A> <http://ex.test/name> \"Alice\"@en .\n"
//! );
//! ```

mod base;
mod prefix;
mod state;
mod term;


use std::cell::{Ref, RefCell};
use std::rc::Rc;

pub use base::{Chunk, Deferred, Role, WriterCore};
pub use prefix::PrefixTable;
pub use state::{State, Transition, TransitionTable};
pub use term::{BLANK_BASE, IriRef, Literal, is_valid_language_code};

use tessel_core::constants::XSD_PREFIX;

use crate::error::{WriterError, WriterResult};
use crate::format::Backend;
use crate::labeler::BlankNodeLabeler;

/// A sub-writer handle. The parent keeps a clone until its `finish()`.
pub type SharedWriter = Rc<RefCell<RdfWriter>>;

/// A streaming RDF writer for one output format.
pub struct RdfWriter {
    core: WriterCore,
    backend: Box<dyn Backend>,
    transitions: TransitionTable,
    subs: Vec<SharedWriter>,
}

impl std::fmt::Debug for RdfWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdfWriter")
            .field("mime_type", &self.backend.mime_type())
            .field("state", &self.core.state)
            .field("role", &self.core.role())
            .field("subs", &self.subs.len())
            .finish_non_exhaustive()
    }
}

impl RdfWriter {
    /// Creates a document writer for `backend`.
    #[must_use]
    pub fn new(backend: Box<dyn Backend>, labeler: Rc<BlankNodeLabeler>) -> Self {
        Self {
            core: WriterCore::new(labeler),
            transitions: backend.transitions(),
            backend,
            subs: Vec::new(),
        }
    }

    /// Registers a prefix.
    ///
    /// ## Errors
    /// Returns `WriterError::PrefixesLocked` after `start()`.
    pub fn prefix(&mut self, prefix: &str, iri: &str) -> WriterResult<&mut Self> {
        self.core.prefixes_mut().insert(prefix, iri)?;
        Ok(self)
    }

    /// Begins the document and freezes the prefix table.
    ///
    /// ## Errors
    /// Returns `WriterError::BadTransition` if called mid-statement or after
    /// `finish()`.
    pub fn start(&mut self) -> WriterResult<&mut Self> {
        self.transition(State::Document)?;
        self.core.prefixes_mut().lock();

        tracing::debug!(mime_type = self.backend.mime_type(), "Writer started");
        Ok(self)
    }

    /// Closes any open statement, splices in all sub-writers and writes the
    /// document footer. Calling it again has no effect.
    ///
    /// ## Errors
    /// Returns `WriterError::BadTransition` if a statement is left without an
    /// object, or any error raised while closing open structures.
    pub fn finish(&mut self) -> WriterResult<()> {
        if self.core.state == State::Finish {
            return Ok(());
        }

        // close all unclosed states
        self.transition(State::Document)?;

        // sub-writer output goes before the footer
        self.drain_subs();

        self.transition(State::Finish)?;

        self.subs.clear();

        tracing::debug!(mime_type = self.backend.mime_type(), "Writer finished");
        Ok(())
    }

    /// Flattens everything buffered so far into a string and empties the
    /// buffer. May be called before or after `finish()`.
    ///
    /// ## Errors
    /// Returns the first error raised by a deferred chunk or nested
    /// sub-writer, or `WriterError::BadTransition` when called mid-statement
    /// on a writer that can not close it.
    pub fn drain(&mut self) -> WriterResult<String> {
        // finish is sticky
        if self.core.state != State::Finish {
            self.transition(State::Document)?;
        }

        self.drain_subs();
        self.flatten()
    }

    /// Begins statements about `subject`. Repeating the current subject right
    /// after an object is a no-op, so its statements stay in one block.
    ///
    /// ## Errors
    /// Returns a sequencing or resolution fault.
    pub fn about(&mut self, subject: impl Into<IriRef>) -> WriterResult<&mut Self> {
        let subject = self.backend.expand_subject(&self.core, subject.into())?;

        if self.core.state == State::Object && self.core.current_subject.as_ref() == Some(&subject) {
            return Ok(self);
        }

        self.transition(State::Subject)?;

        self.core.current_subject = Some(subject.clone());
        self.core.current_predicate = None;

        self.backend.write_subject(&mut self.core, &subject)?;
        Ok(self)
    }

    /// Begins a predicate of the current subject. Repeating the current
    /// predicate right after an object is a no-op, giving an object list.
    ///
    /// ## Errors
    /// Returns a sequencing or resolution fault.
    pub fn say(&mut self, predicate: impl Into<IriRef>) -> WriterResult<&mut Self> {
        let predicate = self.backend.expand_predicate(&self.core, predicate.into())?;

        if self.core.state == State::Object
            && self.core.current_predicate.as_ref() == Some(&predicate)
        {
            return Ok(self);
        }

        self.transition(State::Predicate)?;

        self.core.current_predicate = Some(predicate.clone());

        self.backend.write_predicate(&mut self.core, &predicate)?;
        Ok(self)
    }

    /// Writes a resource as the object of the current statement.
    ///
    /// ## Errors
    /// Returns a sequencing or resolution fault.
    pub fn is(&mut self, resource: impl Into<IriRef>) -> WriterResult<&mut Self> {
        self.transition(State::Object)?;

        let resource = self.backend.expand_resource(&self.core, resource.into())?;
        self.backend.write_resource(&mut self.core, &resource)?;
        Ok(self)
    }

    /// Writes a plain or language-tagged string as the object. A language tag
    /// that does not match `^[0-9a-zA-Z-]{2,}$` is dropped.
    ///
    /// ## Errors
    /// Returns a sequencing fault.
    pub fn text(&mut self, text: &str, language: Option<&str>) -> WriterResult<&mut Self> {
        self.transition(State::Object)?;

        let language = language.filter(|lang| {
            let valid = is_valid_language_code(lang);
            if !valid {
                tracing::warn!(language = %lang, "Ignoring invalid language code");
            }
            valid
        });

        self.backend.write_text(&mut self.core, text, language)?;
        Ok(self)
    }

    /// Writes a literal as the object. Integers, floats and booleans get
    /// `xsd:integer`, `xsd:double` and `xsd:boolean`; strings stay untyped.
    ///
    /// ## Errors
    /// Returns a sequencing fault.
    pub fn value(&mut self, literal: impl Into<Literal>) -> WriterResult<&mut Self> {
        let literal = literal.into();
        let datatype = literal
            .inferred_type()
            .map(|local| IriRef::qname(XSD_PREFIX, local));

        self.write_literal(&literal.lexical(), datatype)
    }

    /// Writes a literal with an explicit datatype as the object.
    ///
    /// ## Errors
    /// Returns a sequencing or resolution fault.
    pub fn typed_value(
        &mut self,
        literal: impl Into<Literal>,
        datatype: impl Into<IriRef>,
    ) -> WriterResult<&mut Self> {
        self.write_literal(&literal.into().lexical(), Some(datatype.into()))
    }

    fn write_literal(&mut self, lexical: &str, datatype: Option<IriRef>) -> WriterResult<&mut Self> {
        self.transition(State::Object)?;

        let datatype = datatype
            .map(|t| self.backend.expand_type(&self.core, t))
            .transpose()?;

        self.backend
            .write_value(&mut self.core, lexical, datatype.as_ref())?;
        Ok(self)
    }

    /// Shorthand for `say("a")` followed by `is(type)`.
    ///
    /// ## Errors
    /// Returns a sequencing or resolution fault.
    pub fn a(&mut self, rdf_type: impl Into<IriRef>) -> WriterResult<&mut Self> {
        self.say("a")?.is(rdf_type)
    }

    /// Returns `label`, or a fresh label from the shared labeler.
    #[must_use]
    pub fn blank(&self, label: Option<&str>) -> String {
        self.core.blank(label)
    }

    /// Creates a sub-writer sharing prefixes and blank node labels with this
    /// writer. Its output is spliced in after this writer's own content.
    pub fn sub(&mut self) -> SharedWriter {
        let backend = self.backend.new_sub();

        let writer = Rc::new(RefCell::new(Self {
            core: self.core.sub(),
            transitions: backend.transitions(),
            backend,
            subs: Vec::new(),
        }));

        self.subs.push(Rc::clone(&writer));
        tracing::trace!(subs = self.subs.len(), "Sub-writer created");

        writer
    }

    /// The canonical MIME type of the output.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        self.backend.mime_type()
    }

    /// The MIME type with a charset parameter, for HTTP headers.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("{}; charset=UTF-8", self.backend.mime_type())
    }

    #[must_use]
    pub fn prefixes(&self) -> Ref<'_, PrefixTable> {
        self.core.prefixes()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.core.role()
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.core.state
    }

    /// Moves to `to`, running whatever the transition table says.
    fn transition(&mut self, to: State) -> WriterResult<()> {
        let from = self.core.state;

        let Some(action) = self.transitions.get(from, to) else {
            tracing::error!(%from, %to, "Bad writer transition");
            return Err(WriterError::BadTransition { from, to });
        };

        tracing::trace!(%from, %to, "Writer transition");

        match action {
            Transition::Pass => {}
            Transition::Emit(text) => self.core.write(text),
            Transition::Hook => self.backend.on_transition(&mut self.core, from, to)?,
        }

        self.core.state = to;
        Ok(())
    }

    /// Queues every sub-writer for splicing. Sub-writers stay usable.
    fn drain_subs(&mut self) {
        for sub in &self.subs {
            self.core.nest(Rc::clone(sub));
        }
    }

    fn flatten(&mut self) -> WriterResult<String> {
        let chunks = self.core.take_buffer();
        tracing::trace!(chunks = chunks.len(), "Flattening writer buffer");

        let mut output = String::new();

        for chunk in chunks {
            match chunk {
                Chunk::Text(text) => output.push_str(&text),
                Chunk::Deferred(f) => output.push_str(&f()?),
                Chunk::Nested(writer) => {
                    let mut writer = writer.try_borrow_mut().map_err(|e| {
                        tracing::error!(error = %e, "Sub-writer borrowed while draining parent");
                        WriterError::InvariantViolation("sub-writer is borrowed while draining")
                    })?;
                    output.push_str(&writer.drain()?);
                }
            }
        }

        Ok(output)
    }
}
