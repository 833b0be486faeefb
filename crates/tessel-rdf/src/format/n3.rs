//! Output shared by the Turtle and N-Triples backends.

use std::rc::Rc;

use crate::error::{WriterError, WriterResult};
use crate::quote::N3Quoter;
use crate::writer::{IriRef, WriterCore};

/// Reference, text and value syntax of the N3 family.
#[derive(Debug, Clone)]
pub(super) struct N3Syntax {
    quoter: Rc<N3Quoter>,
    trust_iris: bool,
}

impl N3Syntax {
    pub(super) fn new(quoter: Rc<N3Quoter>, trust_iris: bool) -> Self {
        Self { quoter, trust_iris }
    }

    pub(super) fn quoter(&self) -> &N3Quoter {
        &self.quoter
    }

    /// Writes `<iri>`, `prefix:local`, `_:label` or a bare shorthand.
    pub(super) fn write_ref(&self, core: &mut WriterCore, r: &IriRef) -> WriterResult<()> {
        let Some(local) = r.local() else {
            if core.is_shorthand(&r.base) {
                core.write(r.base.clone());
            } else {
                self.write_iri(core, &r.base);
            }
            return Ok(());
        };

        if r.is_blank() {
            core.write(format!("_:{local}"));
            return Ok(());
        }

        if let Some(escaped) = self.quoter.escape_local_name(local) {
            core.write(format!("{}:{escaped}", r.base));
            return Ok(());
        }

        // Not expressible as a local name; fall back to the full IRI
        let iri = match core.prefixes().get(&r.base) {
            Some(base) => format!("{base}{local}"),
            None => return Err(WriterError::UnknownPrefix(r.base.clone())),
        };
        self.write_iri(core, &iri);
        Ok(())
    }

    pub(super) fn write_iri(&self, core: &mut WriterCore, iri: &str) {
        if self.trust_iris {
            core.write(format!("<{iri}>"));
        } else {
            core.write(format!("<{}>", self.quoter.escape_iri(iri)));
        }
    }

    pub(super) fn write_text(&self, core: &mut WriterCore, text: &str, language: Option<&str>) {
        core.write(format!("\"{}\"", self.quoter.escape_literal(text)));

        if let Some(language) = language {
            core.write(format!("@{language}"));
        }
    }

    pub(super) fn write_value(
        &self,
        core: &mut WriterCore,
        literal: &str,
        datatype: Option<&IriRef>,
    ) -> WriterResult<()> {
        core.write(format!("\"{}\"", self.quoter.escape_literal(literal)));

        if let Some(datatype) = datatype {
            core.write("^^");
            self.write_ref(core, datatype)?;
        }

        Ok(())
    }
}
