//! Unicode escaping per the N-Triples string grammar.

use std::cell::RefCell;
use std::collections::HashMap;

/// Maps characters to their canonical N-Triples escape sequence.
///
/// Results are cached per character, so escaping the same character twice
/// returns the identical sequence without recomputing it.
#[derive(Debug, Default)]
pub struct UnicodeEscaper {
    cache: RefCell<HashMap<char, String>>,
}

impl UnicodeEscaper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Escapes every character of `s` that is not printable ASCII.
    #[must_use]
    pub fn escape_str(&self, s: &str) -> String {
        let mut result = String::with_capacity(s.len());
        for c in s.chars() {
            self.escape_into(c, &mut result);
        }
        result
    }

    /// Returns the escape sequence for `c` (or `c` itself if it needs none).
    #[must_use]
    pub fn escape_char(&self, c: char) -> String {
        let mut result = String::new();
        self.escape_into(c, &mut result);
        result
    }

    /// Appends the escape sequence for `c` to `out`.
    pub fn escape_into(&self, c: char, out: &mut String) {
        let mut cache = self.cache.borrow_mut();
        let escaped = cache.entry(c).or_insert_with(|| escape_uncached(c));
        out.push_str(escaped);
    }

    /// Number of distinct characters escaped so far.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }
}

fn escape_uncached(c: char) -> String {
    let no = u32::from(c);

    match no {
        0x09 => "\\t".to_string(),
        0x0A => "\\n".to_string(),
        0x0D => "\\r".to_string(),
        0x22 => "\\\"".to_string(),
        0x5C => "\\\\".to_string(),
        0x20..=0x7E => c.to_string(),
        0x0000..=0xFFFF => format!("\\u{no:04X}"),
        _ => format!("\\U{no:08X}"),
    }
}
