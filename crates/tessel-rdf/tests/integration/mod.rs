//! Integration tests for the RDF writers.
//!
//! ## Running Tests
//!
//! ```sh
//! RUST_LOG=trace cargo test -p tessel-rdf --test writer_integration
//! ```

mod equivalence;
mod examples;
mod faults;
mod helpers;
mod labeler;
