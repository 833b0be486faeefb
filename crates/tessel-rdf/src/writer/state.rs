//! Writer states and per-format transition tables.

use std::fmt;

/// Writer states. They roughly follow the states of a naive parser for the
/// N3 family of syntaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Start,
    Document,
    Subject,
    Predicate,
    Object,
    Finish,
}

impl State {
    const COUNT: usize = 6;

    const fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Document => 1,
            Self::Subject => 2,
            Self::Predicate => 3,
            Self::Object => 4,
            Self::Finish => 5,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Document => "document",
            Self::Subject => "subject",
            Self::Predicate => "predicate",
            Self::Object => "object",
            Self::Finish => "finish",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happens when the writer moves between two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Allowed, no output.
    Pass,
    /// Allowed, appends a fixed string.
    Emit(&'static str),
    /// Allowed, calls the backend's transition hook.
    Hook,
}

/// A grid from current state to allowed next states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    grid: [[Option<Transition>; State::COUNT]; State::COUNT],
}

impl Default for TransitionTable {
    fn default() -> Self {
        use State::{Document, Finish, Object, Predicate, Start, Subject};

        Self {
            grid: [[None; State::COUNT]; State::COUNT],
        }
        .with(Start, Document, Transition::Pass)
        .with(Document, Document, Transition::Pass)
        .with(Document, Subject, Transition::Pass)
        .with(Document, Finish, Transition::Pass)
        .with(Subject, Predicate, Transition::Pass)
        .with(Predicate, Object, Transition::Pass)
        .with(Object, Document, Transition::Pass)
        .with(Object, Subject, Transition::Pass)
        .with(Object, Predicate, Transition::Pass)
        .with(Object, Object, Transition::Pass)
    }
}

impl TransitionTable {
    /// Sets the action for `from -> to`, allowing the transition.
    #[must_use]
    pub fn with(mut self, from: State, to: State, transition: Transition) -> Self {
        self.grid[from.index()][to.index()] = Some(transition);
        self
    }

    /// The action for `from -> to`, or `None` if the transition is illegal.
    #[must_use]
    pub fn get(&self, from: State, to: State) -> Option<Transition> {
        self.grid[from.index()][to.index()]
    }
}
