//! Action handlers: the two execution shapes a command can have
//!
//! Handlers are plain function pointers bound into a descriptor at
//! registry-build time; the engine owns the orchestration contract for
//! each shape.

use crate::command::CommandDescriptor;
use crate::host::{CaretId, EditorSurface};
use crate::selection::VimSelection;

/// The caret-to-selection mapping captured for one invocation
///
/// Entries keep host caret order. Every snapshot is taken before any
/// caret's handler runs, so mutation during execution cannot leak into a
/// later caret's captured state.
#[derive(Debug, Clone, Default)]
pub struct CaretSelections {
    entries: Vec<(CaretId, Option<VimSelection>)>,
}

impl CaretSelections {
    pub fn new(entries: Vec<(CaretId, Option<VimSelection>)>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any caret captured a selection
    pub fn any_selection(&self) -> bool {
        self.entries.iter().any(|(_, s)| s.is_some())
    }

    /// Iterate `(caret, snapshot)` pairs in host order
    pub fn iter(&self) -> impl Iterator<Item = (CaretId, Option<&VimSelection>)> + '_ {
        self.entries.iter().map(|(id, s)| (*id, s.as_ref()))
    }

    /// Caret ids in host order
    pub fn carets(&self) -> impl Iterator<Item = CaretId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    /// The representative selection for aggregate (single-execution)
    /// commands: the topmost captured selection, by buffer position.
    /// A fixed policy, not host iteration order.
    pub fn representative(&self) -> Option<&VimSelection> {
        self.entries
            .iter()
            .filter_map(|(_, s)| s.as_ref())
            .min_by_key(|s| (s.start(), s.end()))
    }
}

/// Single-execution handler: called exactly once per logical command with
/// the whole caret-to-selection mapping; the return value is the result of
/// the entire invocation
pub type SingleExecuteFn =
    fn(&mut dyn EditorSurface, &CommandDescriptor, &CaretSelections) -> bool;

/// Per-caret handler: called once for each caret with its captured
/// snapshot; one caret failing does not stop its siblings
pub type PerCaretExecuteFn =
    fn(&mut dyn EditorSurface, CaretId, Option<&VimSelection>, &CommandDescriptor) -> bool;

/// The execution shape of a command, as a closed variant
#[derive(Clone, Copy)]
pub enum ActionHandler {
    Single(SingleExecuteFn),
    PerCaret(PerCaretExecuteFn),
}

impl std::fmt::Debug for ActionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionHandler::Single(_) => write!(f, "ActionHandler::Single"),
            ActionHandler::PerCaret(_) => write!(f, "ActionHandler::PerCaret"),
        }
    }
}
