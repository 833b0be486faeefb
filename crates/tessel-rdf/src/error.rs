use thiserror::Error;

use crate::writer::State;

/// Writer sequencing and resolution faults
#[derive(Error, Debug)]
pub enum WriterError {
    #[error("Bad transition: {from} -> {to}")]
    BadTransition { from: State, to: State },

    #[error("Prefixes can not be added after start()")]
    PrefixesLocked,

    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Predicate can not be written as an XML element: {0}")]
    UnqualifiedPredicate(String),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML encoding error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error(transparent)]
    Core(#[from] tessel_core::error::CoreError),
}

pub type WriterResult<T> = std::result::Result<T, WriterError>;
