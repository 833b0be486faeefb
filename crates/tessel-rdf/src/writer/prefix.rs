//! Prefix table shared by a writer and its sub-writers.

use tessel_core::constants::{RDF_NS, RDF_PREFIX, XSD_NS, XSD_PREFIX};

use crate::error::{WriterError, WriterResult};

/// Insertion-ordered mapping from prefix to base IRI.
///
/// The table is frozen by the owning writer's `start()`; after that any
/// registration is a sequencing fault.
#[derive(Debug, Clone)]
pub struct PrefixTable {
    entries: Vec<(String, String)>,
    locked: bool,
}

impl Default for PrefixTable {
    fn default() -> Self {
        Self {
            entries: vec![
                (RDF_PREFIX.to_string(), RDF_NS.to_string()),
                (XSD_PREFIX.to_string(), XSD_NS.to_string()),
            ],
            locked: false,
        }
    }
}

impl PrefixTable {
    /// A table without the built-in `rdf` and `xsd` entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            locked: false,
        }
    }

    /// Registers `prefix`, replacing its IRI if already present.
    ///
    /// ## Errors
    /// Returns `WriterError::PrefixesLocked` once the table has been frozen.
    pub fn insert(&mut self, prefix: &str, iri: &str) -> WriterResult<()> {
        if self.locked {
            return Err(WriterError::PrefixesLocked);
        }

        if let Some(entry) = self.entries.iter_mut().find(|(p, _)| p == prefix) {
            entry.1 = iri.to_string();
        } else {
            self.entries.push((prefix.to_string(), iri.to_string()));
        }

        Ok(())
    }

    #[must_use]
    pub fn get(&self, prefix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, iri)| iri.as_str())
    }

    #[must_use]
    pub fn contains(&self, prefix: &str) -> bool {
        self.get(prefix).is_some()
    }

    /// Finds the longest registered base IRI that `iri` starts with and
    /// returns `(prefix, remainder)`.
    #[must_use]
    pub fn split<'a>(&self, iri: &'a str) -> Option<(&str, &'a str)> {
        self.entries
            .iter()
            .filter(|(_, base)| !base.is_empty() && iri.starts_with(base.as_str()))
            .max_by_key(|(_, base)| base.len())
            .map(|(prefix, base)| (prefix.as_str(), &iri[base.len()..]))
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, iri)| (p.as_str(), iri.as_str()))
    }
}
