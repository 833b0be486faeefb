//! Identifier references and literal values accepted by the writer.

use std::fmt;

/// The base used for blank node references.
pub const BLANK_BASE: &str = "_";

/// An identifier as passed to `about()`, `say()`, `is()` or as a datatype.
///
/// With `local == None`, `base` is a full IRI or a registered shorthand such
/// as `a`. Otherwise `(base, local)` is a qname to be expanded against the
/// prefix table, or a blank node when `base` is `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IriRef {
    pub base: String,
    pub local: Option<String>,
}

impl IriRef {
    /// A full IRI or shorthand.
    #[must_use]
    pub fn iri(iri: impl Into<String>) -> Self {
        Self {
            base: iri.into(),
            local: None,
        }
    }

    /// A `prefix:local` qname.
    #[must_use]
    pub fn qname(prefix: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            base: prefix.into(),
            local: Some(local.into()),
        }
    }

    /// A blank node with the given label.
    #[must_use]
    pub fn blank(label: impl Into<String>) -> Self {
        Self::qname(BLANK_BASE, label)
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.base == BLANK_BASE && self.local.is_some()
    }

    #[must_use]
    pub fn local(&self) -> Option<&str> {
        self.local.as_deref()
    }
}

impl fmt::Display for IriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.local {
            Some(local) => write!(f, "{}:{local}", self.base),
            None => f.write_str(&self.base),
        }
    }
}

impl From<&str> for IriRef {
    fn from(iri: &str) -> Self {
        Self::iri(iri)
    }
}

impl From<String> for IriRef {
    fn from(iri: String) -> Self {
        Self::iri(iri)
    }
}

impl From<(&str, &str)> for IriRef {
    fn from((prefix, local): (&str, &str)) -> Self {
        Self::qname(prefix, local)
    }
}

impl From<(String, String)> for IriRef {
    fn from((prefix, local): (String, String)) -> Self {
        Self::qname(prefix, local)
    }
}

impl From<(&str, String)> for IriRef {
    fn from((prefix, local): (&str, String)) -> Self {
        Self::qname(prefix, local)
    }
}

impl From<&IriRef> for IriRef {
    fn from(r: &IriRef) -> Self {
        r.clone()
    }
}

/// A literal handed to `value()`.
///
/// Native numbers and booleans get an inferred XSD datatype when no explicit
/// type is given; strings stay untyped.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Integer(i64),
    Double(f64),
    Boolean(bool),
}

impl Literal {
    /// The canonical lexical form.
    #[must_use]
    pub fn lexical(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Boolean(b) => if *b { "true" } else { "false" }.to_string(),
            Self::Double(d) if d.is_nan() => "NaN".to_string(),
            Self::Double(d) if d.is_infinite() => {
                if d.is_sign_positive() { "INF" } else { "-INF" }.to_string()
            }
            Self::Double(d) if d.abs() > 0.0 && !(1e-6..1e15).contains(&d.abs()) => {
                format!("{d:E}")
            }
            Self::Double(d) => d.to_string(),
        }
    }

    /// The XSD local name of the inferred datatype, if any.
    #[must_use]
    pub fn inferred_type(&self) -> Option<&'static str> {
        match self {
            Self::Str(_) => None,
            Self::Integer(_) => Some("integer"),
            Self::Double(_) => Some("double"),
            Self::Boolean(_) => Some("boolean"),
        }
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&String> for Literal {
    fn from(s: &String) -> Self {
        Self::Str(s.clone())
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<u32> for Literal {
    fn from(n: u32) -> Self {
        Self::Integer(i64::from(n))
    }
}

impl From<f64> for Literal {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<f32> for Literal {
    fn from(d: f32) -> Self {
        Self::Double(f64::from(d))
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

/// Checks a language tag against `^[0-9a-zA-Z-]{2,}$`.
#[must_use]
pub fn is_valid_language_code(language: &str) -> bool {
    language.len() >= 2 && language.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
