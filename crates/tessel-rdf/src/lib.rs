//! Streaming RDF writers for Turtle, N3, N-Triples, RDF/XML and JSON-LD.
//!
//! Statements are written through a small fluent API
//! (`about().say().is()`), buffered, and flattened into text on `drain()`.
//! See [`writer`] for the state machine and [`format`] for the backends.

pub mod error;
pub mod factory;
pub mod format;
pub mod labeler;
pub mod quote;
pub mod writer;

pub use error::{WriterError, WriterResult};
pub use factory::{RdfFormat, RdfWriterFactory};
pub use format::WriterOptions;
pub use labeler::BlankNodeLabeler;
pub use writer::{IriRef, Literal, RdfWriter, SharedWriter};
