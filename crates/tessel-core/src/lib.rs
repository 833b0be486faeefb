//! Shared settings, errors and vocabulary for the tessel RDF writers.

pub mod config;
pub mod constants;
pub mod error;
