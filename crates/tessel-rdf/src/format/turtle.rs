//! Turtle output, abbreviating repeated subjects and predicates.

use std::rc::Rc;

use super::n3::N3Syntax;
use super::{Backend, WriterOptions};
use crate::error::WriterResult;
use crate::quote::N3Quoter;
use crate::writer::{IriRef, Role, State, Transition, TransitionTable, WriterCore};

pub const MIME_TYPE: &str = "text/turtle";

/// Writes Turtle. `;` joins predicates of one subject and `,` joins objects
/// of one predicate.
#[derive(Debug, Clone)]
pub struct TurtleBackend {
    syntax: N3Syntax,
}

impl TurtleBackend {
    #[must_use]
    pub fn new(options: &WriterOptions) -> Self {
        let quoter = Rc::new(N3Quoter::new(options.escape_unicode));

        Self {
            syntax: N3Syntax::new(quoter, options.trust_iris),
        }
    }

    fn write_header(&self, core: &mut WriterCore) {
        let lines: Vec<String> = core
            .prefixes()
            .iter()
            .map(|(prefix, iri)| {
                format!("@prefix {prefix}: <{}> .\n", self.syntax.quoter().escape_iri(iri))
            })
            .collect();

        for line in lines {
            core.write(line);
        }
    }
}

impl Backend for TurtleBackend {
    fn mime_type(&self) -> &'static str {
        MIME_TYPE
    }

    fn transitions(&self) -> TransitionTable {
        use State::{Document, Object, Predicate, Start, Subject};

        TransitionTable::default()
            .with(Start, Document, Transition::Hook)
            .with(Document, Subject, Transition::Emit("\n"))
            .with(Subject, Predicate, Transition::Emit(" "))
            .with(Predicate, Object, Transition::Emit(" "))
            .with(Object, Object, Transition::Emit(",\n\t\t"))
            .with(Object, Predicate, Transition::Emit(" ;\n\t"))
            .with(Object, Subject, Transition::Emit(" .\n\n"))
            .with(Object, Document, Transition::Emit(" .\n"))
    }

    fn new_sub(&mut self) -> Box<dyn Backend> {
        Box::new(self.clone())
    }

    fn on_transition(&mut self, core: &mut WriterCore, from: State, to: State) -> WriterResult<()> {
        if from == State::Start && to == State::Document && core.role() == Role::Document {
            self.write_header(core);
        }
        Ok(())
    }

    fn expand_subject(&self, core: &WriterCore, subject: IriRef) -> WriterResult<IriRef> {
        core.check_prefix(&subject)?;
        Ok(subject)
    }

    fn expand_predicate(&self, core: &WriterCore, predicate: IriRef) -> WriterResult<IriRef> {
        core.check_prefix(&predicate)?;
        Ok(predicate)
    }

    fn expand_resource(&self, core: &WriterCore, resource: IriRef) -> WriterResult<IriRef> {
        core.check_prefix(&resource)?;
        Ok(resource)
    }

    fn expand_type(&self, core: &WriterCore, datatype: IriRef) -> WriterResult<IriRef> {
        core.check_prefix(&datatype)?;
        Ok(datatype)
    }

    fn write_subject(&mut self, core: &mut WriterCore, subject: &IriRef) -> WriterResult<()> {
        self.syntax.write_ref(core, subject)
    }

    fn write_predicate(&mut self, core: &mut WriterCore, predicate: &IriRef) -> WriterResult<()> {
        self.syntax.write_ref(core, predicate)
    }

    fn write_resource(&mut self, core: &mut WriterCore, resource: &IriRef) -> WriterResult<()> {
        self.syntax.write_ref(core, resource)
    }

    fn write_text(
        &mut self,
        core: &mut WriterCore,
        text: &str,
        language: Option<&str>,
    ) -> WriterResult<()> {
        self.syntax.write_text(core, text, language);
        Ok(())
    }

    fn write_value(
        &mut self,
        core: &mut WriterCore,
        literal: &str,
        datatype: Option<&IriRef>,
    ) -> WriterResult<()> {
        self.syntax.write_value(core, literal, datatype)
    }
}
