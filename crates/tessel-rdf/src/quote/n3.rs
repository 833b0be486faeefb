//! IRI and literal quoting for Turtle, N3 and N-Triples.

use super::UnicodeEscaper;

/// Characters that may appear in a Turtle local name only when
/// backslash-escaped.
const LOCAL_NAME_ESCAPES: &[char] = &[
    '~', '!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=', '/', '?', '#', '@', '%',
];

/// Escapes IRIs and string literals for the N3 family of formats.
///
/// When constructed with `escape_unicode`, every non-ASCII character is routed
/// through a [`UnicodeEscaper`] so the output is pure ASCII.
#[derive(Debug, Default)]
pub struct N3Quoter {
    escaper: Option<UnicodeEscaper>,
}

impl N3Quoter {
    #[must_use]
    pub fn new(escape_unicode: bool) -> Self {
        Self {
            escaper: escape_unicode.then(UnicodeEscaper::new),
        }
    }

    /// Escapes an IRI for use between angle brackets.
    ///
    /// Characters forbidden in an `IRIREF` are percent-encoded.
    #[must_use]
    pub fn escape_iri(&self, iri: &str) -> String {
        let mut result = String::with_capacity(iri.len());

        for c in iri.chars() {
            match c {
                ' ' => result.push_str("%20"),
                '"' => result.push_str("%22"),
                '<' => result.push_str("%3C"),
                '>' => result.push_str("%3E"),
                '\\' => result.push_str("%5C"),
                '`' => result.push_str("%60"),
                '^' => result.push_str("%5E"),
                '|' => result.push_str("%7C"),
                '{' => result.push_str("%7B"),
                '}' => result.push_str("%7D"),
                _ if c.is_ascii_control() => {
                    result.push_str(&format!("%{:02X}", u32::from(c)));
                }
                _ => self.push_char(c, &mut result),
            }
        }

        result
    }

    /// Escapes the body of a double-quoted string literal.
    #[must_use]
    pub fn escape_literal(&self, s: &str) -> String {
        let mut result = String::with_capacity(s.len() + 8);

        for c in s.chars() {
            match c {
                '\u{08}' => result.push_str("\\b"),
                '\t' => result.push_str("\\t"),
                '\n' => result.push_str("\\n"),
                '\u{0C}' => result.push_str("\\f"),
                '\r' => result.push_str("\\r"),
                '"' => result.push_str("\\\""),
                '\\' => result.push_str("\\\\"),
                '\u{00}'..='\u{1F}' => {
                    result.push_str(&format!("\\u{:04X}", u32::from(c)));
                }
                _ => self.push_char(c, &mut result),
            }
        }

        result
    }

    /// Escapes a Turtle local name (the part after `prefix:`).
    ///
    /// Returns `None` if the name can not be expressed as a local name at all,
    /// in which case the caller must fall back to a full IRI.
    #[must_use]
    pub fn escape_local_name(&self, local: &str) -> Option<String> {
        let mut result = String::with_capacity(local.len() + 4);
        let last = local.chars().count().saturating_sub(1);

        for (i, c) in local.chars().enumerate() {
            let edge_dot = c == '.' && (i == 0 || i == last);
            let leading_dash = c == '-' && i == 0;

            if edge_dot || leading_dash || LOCAL_NAME_ESCAPES.contains(&c) {
                result.push('\\');
                result.push(c);
            } else if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':') {
                result.push(c);
            } else if !c.is_ascii()
                && self.escaper.is_none()
                && (is_pn_chars_base(c) || (i > 0 && is_pn_chars_extra(c)))
            {
                result.push(c);
            } else {
                return None;
            }
        }

        Some(result)
    }

    fn push_char(&self, c: char, out: &mut String) {
        match &self.escaper {
            Some(escaper) if !c.is_ascii() => escaper.escape_into(c, out),
            _ => out.push(c),
        }
    }
}

/// Non-ASCII `PN_CHARS_BASE` ranges of the Turtle grammar.
fn is_pn_chars_base(c: char) -> bool {
    matches!(c,
        '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

/// Non-ASCII characters `PN_CHARS` adds to `PN_CHARS_BASE`; never first in a
/// local name.
fn is_pn_chars_extra(c: char) -> bool {
    matches!(c, '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}
