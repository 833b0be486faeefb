//! N-Triples output: one fully expanded, ASCII-only statement per line.

use std::rc::Rc;

use super::n3::N3Syntax;
use super::Backend;
use crate::error::WriterResult;
use crate::quote::N3Quoter;
use crate::writer::{IriRef, State, Transition, TransitionTable, WriterCore};

pub const MIME_TYPE: &str = "application/n-triples";

/// Writes N-Triples. Every object repeats its subject and predicate, and all
/// non-ASCII characters are escaped.
#[derive(Debug, Clone)]
pub struct NTriplesBackend {
    syntax: N3Syntax,
}

impl Default for NTriplesBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NTriplesBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntax: N3Syntax::new(Rc::new(N3Quoter::new(true)), false),
        }
    }
}

impl Backend for NTriplesBackend {
    fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    fn transitions(&self) -> TransitionTable {
        use State::{Document, Object, Predicate, Subject};

        TransitionTable::default()
            .with(Object, Document, Transition::Emit(" .\n"))
            .with(Object, Subject, Transition::Emit(" .\n"))
            .with(Object, Predicate, Transition::Emit(" .\n"))
            .with(Object, Object, Transition::Emit(" .\n"))
    }

    fn new_sub(&mut self) -> Box<dyn Backend> {
        Box::new(self.clone())
    }

    fn expand_subject(&self, core: &WriterCore, subject: IriRef) -> WriterResult<IriRef> {
        core.expand_qname(subject)
    }

    fn expand_predicate(&self, core: &WriterCore, predicate: IriRef) -> WriterResult<IriRef> {
        core.expand_qname(core.expand_shorthand(predicate))
    }

    fn expand_resource(&self, core: &WriterCore, resource: IriRef) -> WriterResult<IriRef> {
        core.expand_qname(resource)
    }

    fn expand_type(&self, core: &WriterCore, datatype: IriRef) -> WriterResult<IriRef> {
        core.expand_qname(datatype)
    }

    fn write_subject(&mut self, _core: &mut WriterCore, _subject: &IriRef) -> WriterResult<()> {
        Ok(())
    }

    fn write_predicate(&mut self, _core: &mut WriterCore, _predicate: &IriRef) -> WriterResult<()> {
        Ok(())
    }

    fn write_resource(&mut self, core: &mut WriterCore, resource: &IriRef) -> WriterResult<()> {
        self.write_subject_and_predicate(core)?;
        self.syntax.write_ref(core, resource)
    }

    fn write_text(
        &mut self,
        core: &mut WriterCore,
        text: &str,
        language: Option<&str>,
    ) -> WriterResult<()> {
        self.write_subject_and_predicate(core)?;
        self.syntax.write_text(core, text, language);
        Ok(())
    }

    fn write_value(
        &mut self,
        core: &mut WriterCore,
        literal: &str,
        datatype: Option<&IriRef>,
    ) -> WriterResult<()> {
        self.write_subject_and_predicate(core)?;
        self.syntax.write_value(core, literal, datatype)
    }
}

impl NTriplesBackend {
    fn write_subject_and_predicate(&self, core: &mut WriterCore) -> WriterResult<()> {
        let subject = core.require_subject()?;
        let predicate = core.require_predicate()?;

        self.syntax.write_ref(core, &subject)?;
        core.write(" ");
        self.syntax.write_ref(core, &predicate)?;
        core.write(" ");
        Ok(())
    }
}
