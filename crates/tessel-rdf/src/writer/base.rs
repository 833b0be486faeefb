//! State shared by every format backend: buffer, prefixes, current statement.

use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tessel_core::constants::RDF_PREFIX;

use super::{PrefixTable, SharedWriter, State};
use crate::error::{WriterError, WriterResult};
use crate::labeler::BlankNodeLabeler;
use crate::writer::term::{BLANK_BASE, IriRef};

/// A computation run once when the buffer is flattened.
pub type Deferred = Box<dyn FnOnce() -> WriterResult<String>>;

/// One entry of the output buffer.
pub enum Chunk {
    Text(String),
    Deferred(Deferred),
    /// A sub-writer whose drained output is spliced in place.
    Nested(SharedWriter),
}

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Deferred(_) => f.write_str("Deferred(<fn>)"),
            Self::Nested(_) => f.write_str("Nested(<writer>)"),
        }
    }
}

/// Whether a writer produces a whole document or a fragment spliced into
/// its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Document,
    SubDocument,
}

/// Format-independent writer state handed to the backend hooks.
#[derive(Debug)]
pub struct WriterCore {
    buffer: Vec<Chunk>,
    pub(super) state: State,
    role: Role,
    prefixes: Rc<RefCell<PrefixTable>>,
    shorthands: Rc<HashMap<String, (String, String)>>,
    pub(super) current_subject: Option<IriRef>,
    pub(super) current_predicate: Option<IriRef>,
    labeler: Rc<BlankNodeLabeler>,
}

impl WriterCore {
    pub(super) fn new(labeler: Rc<BlankNodeLabeler>) -> Self {
        let mut shorthands = HashMap::new();
        shorthands.insert(
            "a".to_string(),
            (RDF_PREFIX.to_string(), "type".to_string()),
        );

        Self {
            buffer: Vec::new(),
            state: State::Start,
            role: Role::Document,
            prefixes: Rc::new(RefCell::new(PrefixTable::default())),
            shorthands: Rc::new(shorthands),
            current_subject: None,
            current_predicate: None,
            labeler,
        }
    }

    /// A core for a sub-writer: shares prefixes, shorthands and labeler, and
    /// starts out in the document state.
    pub(super) fn sub(&self) -> Self {
        Self {
            buffer: Vec::new(),
            state: State::Document,
            role: Role::SubDocument,
            prefixes: Rc::clone(&self.prefixes),
            shorthands: Rc::clone(&self.shorthands),
            current_subject: None,
            current_predicate: None,
            labeler: Rc::clone(&self.labeler),
        }
    }

    /// Appends a string to the output buffer.
    pub fn write(&mut self, text: impl Into<String>) {
        self.buffer.push(Chunk::Text(text.into()));
    }

    /// Appends a computation that runs when the buffer is drained.
    pub fn defer(&mut self, f: impl FnOnce() -> WriterResult<String> + 'static) {
        self.buffer.push(Chunk::Deferred(Box::new(f)));
    }

    pub(super) fn nest(&mut self, writer: SharedWriter) {
        self.buffer.push(Chunk::Nested(writer));
    }

    pub(super) fn take_buffer(&mut self) -> Vec<Chunk> {
        std::mem::take(&mut self.buffer)
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// ## Errors
    /// Returns `WriterError::InvariantViolation` outside a statement.
    pub fn require_subject(&self) -> WriterResult<IriRef> {
        self.current_subject
            .clone()
            .ok_or(WriterError::InvariantViolation("no current subject"))
    }

    /// ## Errors
    /// Returns `WriterError::InvariantViolation` outside a statement.
    pub fn require_predicate(&self) -> WriterResult<IriRef> {
        self.current_predicate
            .clone()
            .ok_or(WriterError::InvariantViolation("no current predicate"))
    }

    #[must_use]
    pub fn prefixes(&self) -> Ref<'_, PrefixTable> {
        self.prefixes.borrow()
    }

    pub(super) fn prefixes_mut(&self) -> std::cell::RefMut<'_, PrefixTable> {
        self.prefixes.borrow_mut()
    }

    /// The prefix table handle, for deferred chunks that read it at drain time.
    #[must_use]
    pub fn shared_prefixes(&self) -> Rc<RefCell<PrefixTable>> {
        Rc::clone(&self.prefixes)
    }

    #[must_use]
    pub fn is_shorthand(&self, name: &str) -> bool {
        self.shorthands.contains_key(name)
    }

    #[must_use]
    pub fn blank(&self, label: Option<&str>) -> String {
        self.labeler.label(label)
    }

    /// Replaces a shorthand such as `a` with the qname it stands for.
    #[must_use]
    pub fn expand_shorthand(&self, r: IriRef) -> IriRef {
        if r.local.is_none() {
            if let Some((prefix, local)) = self.shorthands.get(&r.base) {
                return IriRef::qname(prefix.as_str(), local.as_str());
            }
        }
        r
    }

    /// Expands a qname into a full IRI. Blank nodes and IRIs pass through.
    ///
    /// ## Errors
    /// Returns `WriterError::UnknownPrefix` if the prefix is not registered.
    pub fn expand_qname(&self, r: IriRef) -> WriterResult<IriRef> {
        let Some(local) = r.local.as_deref() else {
            return Ok(r);
        };

        if r.base == BLANK_BASE {
            return Ok(r);
        }

        match self.prefixes.borrow().get(&r.base) {
            Some(iri) => Ok(IriRef::iri(format!("{iri}{local}"))),
            None => Err(WriterError::UnknownPrefix(r.base.clone())),
        }
    }

    /// Checks that a qname uses a registered prefix without expanding it.
    ///
    /// ## Errors
    /// Returns `WriterError::UnknownPrefix` if the prefix is not registered.
    pub fn check_prefix(&self, r: &IriRef) -> WriterResult<()> {
        if r.local.is_some() && r.base != BLANK_BASE && !self.prefixes.borrow().contains(&r.base) {
            return Err(WriterError::UnknownPrefix(r.base.clone()));
        }
        Ok(())
    }

    /// Resolves shorthands and qnames to an absolute IRI (`_:label` for
    /// blank nodes).
    ///
    /// ## Errors
    /// Returns `WriterError::UnknownPrefix` if the prefix is not registered.
    pub fn to_iri(&self, r: &IriRef) -> WriterResult<String> {
        let expanded = self.expand_qname(self.expand_shorthand(r.clone()))?;
        Ok(expanded.to_string())
    }
}
