//! Blank node label generation.

use std::cell::Cell;

use tessel_core::constants::DEFAULT_BLANK_NODE_PREFIX;

/// Hands out blank node labels of the form `{prefix}{n}`.
///
/// The counter lives in a [`Cell`] so one labeler can be shared (through an
/// `Rc`) by a writer, its sub-writers and any other writer that must not
/// produce colliding labels.
#[derive(Debug)]
pub struct BlankNodeLabeler {
    prefix: String,
    counter: Cell<u64>,
}

impl Default for BlankNodeLabeler {
    fn default() -> Self {
        Self::new(DEFAULT_BLANK_NODE_PREFIX)
    }
}

impl BlankNodeLabeler {
    /// Creates a labeler whose first label is `{prefix}1`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    /// Creates a labeler whose first label is `{prefix}{start}`.
    ///
    /// A `start` of zero is bumped to one.
    #[must_use]
    pub fn starting_at(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Cell::new(start.max(1)),
        }
    }

    /// Returns `label` unchanged if given, otherwise the next generated label.
    #[must_use]
    pub fn label(&self, label: Option<&str>) -> String {
        if let Some(label) = label {
            return label.to_string();
        }

        let n = self.counter.get();
        self.counter.set(n + 1);
        format!("{}{n}", self.prefix)
    }
}
