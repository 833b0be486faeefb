//! Escaping for the N3 family of formats (Turtle, N3, N-Triples).
//!
//! - [`UnicodeEscaper`]: canonical `\uXXXX` / `\UXXXXXXXX` escapes with a
//!   per-character cache
//! - [`N3Quoter`]: IRI, local name and string literal escaping

mod escaper;
mod n3;

pub use escaper::UnicodeEscaper;
pub use n3::N3Quoter;
