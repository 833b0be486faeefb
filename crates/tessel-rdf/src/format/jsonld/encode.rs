//! Pretty JSON fragments for splicing into a streamed document.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{WriterError, WriterResult};

const INDENT: &str = "    ";

/// Encodes `value` as pretty JSON without its outermost braces or brackets,
/// indenting every line by `indent` extra levels.
///
/// ## Errors
/// Returns `WriterError::Json` if serialization fails.
pub fn encode(value: &Value, indent: usize) -> WriterResult<String> {
    let mut out = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(INDENT.as_bytes()));
    value.serialize(&mut serializer)?;

    let text = String::from_utf8(out).map_err(|e| {
        tracing::error!("Generated invalid UTF-8 in JSON-LD: {}", e);
        WriterError::InvariantViolation("serde_json produced invalid UTF-8")
    })?;

    let inner = strip_outer(&text);
    if indent == 0 {
        return Ok(inner.to_string());
    }

    let pad = INDENT.repeat(indent);
    Ok(inner
        .lines()
        .map(|line| format!("{pad}{line}"))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn strip_outer(text: &str) -> &str {
    let text = text
        .strip_prefix(|c: char| matches!(c, '{' | '['))
        .map_or(text, |rest| rest.strip_prefix('\n').unwrap_or(rest));

    text.strip_suffix(|c: char| matches!(c, '}' | ']'))
        .map_or(text, |rest| rest.strip_suffix('\n').unwrap_or(rest))
}
