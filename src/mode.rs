//! Editing modes and the per-surface mode state machine
//!
//! The current [`Mode`] scopes every key lookup; it is only ever written by
//! the execution engine's post-condition step, so all transitions funnel
//! through one place.

use std::fmt;

/// Shape of a visual or select mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionShape {
    /// Caret-to-caret span
    Character,
    /// Whole lines
    Line,
    /// Rectangle defined by line range and column range
    Block,
}

/// The current interpretation context for key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Normal,
    Insert,
    Replace,
    Visual(SelectionShape),
    Select(SelectionShape),
    /// An operator was entered and awaits its motion
    OpPending,
}

impl Mode {
    /// Whether this is any visual sub-mode
    pub fn is_visual(&self) -> bool {
        matches!(self, Mode::Visual(_))
    }

    /// Whether this is any select sub-mode
    pub fn is_select(&self) -> bool {
        matches!(self, Mode::Select(_))
    }

    /// Whether a selection is being drawn (visual or select)
    pub fn has_selection(&self) -> bool {
        self.is_visual() || self.is_select()
    }

    /// The active selection shape, if any
    pub fn selection_shape(&self) -> Option<SelectionShape> {
        match self {
            Mode::Visual(shape) | Mode::Select(shape) => Some(*shape),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Normal => "NORMAL",
            Mode::Insert => "INSERT",
            Mode::Replace => "REPLACE",
            Mode::Visual(SelectionShape::Character) => "VISUAL",
            Mode::Visual(SelectionShape::Line) => "VISUAL LINE",
            Mode::Visual(SelectionShape::Block) => "VISUAL BLOCK",
            Mode::Select(SelectionShape::Character) => "SELECT",
            Mode::Select(SelectionShape::Line) => "SELECT LINE",
            Mode::Select(SelectionShape::Block) => "SELECT BLOCK",
            Mode::OpPending => "OP PENDING",
        };
        write!(f, "{}", name)
    }
}

/// The set of modes a command is legal in, as a bitfield
///
/// Sub-shapes share one bit: a command registered for visual mode is legal
/// in all three visual shapes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModeSet(u8);

impl ModeSet {
    pub const NONE: ModeSet = ModeSet(0);
    pub const NORMAL: ModeSet = ModeSet(0b00_0001);
    pub const INSERT: ModeSet = ModeSet(0b00_0010);
    pub const REPLACE: ModeSet = ModeSet(0b00_0100);
    pub const VISUAL: ModeSet = ModeSet(0b00_1000);
    pub const SELECT: ModeSet = ModeSet(0b01_0000);
    pub const OP_PENDING: ModeSet = ModeSet(0b10_0000);

    // Composites, named after the mapping-mode shorthand
    /// Visual and select
    pub const V: ModeSet = ModeSet(Self::VISUAL.0 | Self::SELECT.0);
    /// Normal, visual and select
    pub const NV: ModeSet = ModeSet(Self::NORMAL.0 | Self::V.0);
    /// Normal, operator-pending
    pub const NO: ModeSet = ModeSet(Self::NORMAL.0 | Self::OP_PENDING.0);
    /// Everything except insert and replace
    pub const NVO: ModeSet = ModeSet(Self::NV.0 | Self::OP_PENDING.0);
    pub const ALL: ModeSet = ModeSet(0b11_1111);

    /// Combine two mode sets
    #[inline]
    pub const fn union(self, other: ModeSet) -> ModeSet {
        ModeSet(self.0 | other.0)
    }

    /// Check whether the set is empty
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Check whether a concrete mode belongs to this set
    pub fn contains(self, mode: Mode) -> bool {
        let bit = match mode {
            Mode::Normal => Self::NORMAL,
            Mode::Insert => Self::INSERT,
            Mode::Replace => Self::REPLACE,
            Mode::Visual(_) => Self::VISUAL,
            Mode::Select(_) => Self::SELECT,
            Mode::OpPending => Self::OP_PENDING,
        };
        self.0 & bit.0 != 0
    }
}

impl std::ops::BitOr for ModeSet {
    type Output = ModeSet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Session-scoped mode state, one per editing surface
///
/// Reads are open; writes are restricted to the engine crate-internally so
/// the post-condition step stays the single writer.
#[derive(Debug, Clone)]
pub struct ModeState {
    mode: Mode,
}

impl ModeState {
    /// Start in normal mode, the rest state
    pub fn new() -> Self {
        Self { mode: Mode::Normal }
    }

    /// The current mode (read-only view for the UI/status line)
    pub fn current(&self) -> Mode {
        self.mode
    }

    /// Replace the current mode. Engine-internal: all transitions are
    /// applied by the execution engine's post-condition step.
    pub(crate) fn set(&mut self, mode: Mode) {
        if self.mode != mode {
            tracing::debug!(from = %self.mode, to = %mode, "mode transition");
            self.mode = mode;
        }
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_normal() {
        assert_eq!(ModeState::new().current(), Mode::Normal);
    }

    #[test]
    fn test_mode_predicates() {
        assert!(Mode::Visual(SelectionShape::Block).is_visual());
        assert!(!Mode::Visual(SelectionShape::Block).is_select());
        assert!(Mode::Select(SelectionShape::Line).has_selection());
        assert!(!Mode::Normal.has_selection());
        assert_eq!(
            Mode::Visual(SelectionShape::Line).selection_shape(),
            Some(SelectionShape::Line)
        );
        assert_eq!(Mode::Insert.selection_shape(), None);
    }

    #[test]
    fn test_mode_set_contains_all_shapes() {
        let v = ModeSet::V;
        assert!(v.contains(Mode::Visual(SelectionShape::Character)));
        assert!(v.contains(Mode::Visual(SelectionShape::Block)));
        assert!(v.contains(Mode::Select(SelectionShape::Line)));
        assert!(!v.contains(Mode::Normal));
        assert!(!v.contains(Mode::Insert));
    }

    #[test]
    fn test_mode_set_composites() {
        assert!(ModeSet::NV.contains(Mode::Normal));
        assert!(ModeSet::NV.contains(Mode::Visual(SelectionShape::Character)));
        assert!(!ModeSet::NV.contains(Mode::OpPending));
        assert!(ModeSet::NVO.contains(Mode::OpPending));
        assert!(ModeSet::ALL.contains(Mode::Replace));
    }

    #[test]
    fn test_mode_set_union() {
        let set = ModeSet::NORMAL | ModeSet::INSERT;
        assert!(set.contains(Mode::Normal));
        assert!(set.contains(Mode::Insert));
        assert!(!set.contains(Mode::OpPending));
    }
}
