//! Commands that transition into insert mode
//!
//! The visual append/insert pair is the interesting one: a single-execution
//! aggregate command whose block-wise and character-wise paths are entirely
//! separate. The block path delegates to the host's block edit with the
//! captured column bounds; every other shape falls back to plain per-line
//! caret placement.

use std::sync::Arc;

use crate::command::{CommandDescriptor, CommandFlags, CommandKind, EnterMode};
use crate::engine::handler::{ActionHandler, CaretSelections};
use crate::host::{CaretId, EditorSurface};
use crate::keymap::Keystroke;
use crate::mode::{ModeSet, SelectionShape};
use crate::selection::{Position, VimSelection};

/// `A` in visual modes: append after the selection
///
/// Block-wise, the host sets up an insertion point after the block's right
/// edge on every line the block reaches (append mode, so a zero-width
/// block still yields one). Any other shape appends after line end for
/// every caret.
fn visual_append(
    surface: &mut dyn EditorSurface,
    _cmd: &CommandDescriptor,
    selections: &CaretSelections,
) -> bool {
    if surface.is_one_line() {
        return false;
    }
    let Some(range) = selections.representative() else {
        return false;
    };
    if range.shape() == SelectionShape::Block {
        surface.block_insert(range, true)
    } else {
        let mut ok = true;
        for id in selections.carets() {
            ok &= surface.insert_after_line_end(id);
        }
        ok
    }
}

/// `I` in visual modes: insert before the selection
fn visual_insert(
    surface: &mut dyn EditorSurface,
    _cmd: &CommandDescriptor,
    selections: &CaretSelections,
) -> bool {
    if surface.is_one_line() {
        return false;
    }
    let Some(range) = selections.representative() else {
        return false;
    };
    if range.shape() == SelectionShape::Block {
        surface.block_insert(range, false)
    } else {
        let mut ok = true;
        for id in selections.carets() {
            ok &= surface.insert_at_line_start(id);
        }
        ok
    }
}

/// `i`: insert before the caret; placement is already right
fn insert_before_cursor(
    _surface: &mut dyn EditorSurface,
    _id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    true
}

/// `a`: step past the current character, clamped to line end
fn insert_after_cursor(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    let Some(caret) = surface.carets().into_iter().find(|c| c.id == id) else {
        return false;
    };
    let line = caret.position.line;
    let column = (caret.position.column + 1).min(surface.line_length(line));
    surface.move_caret(id, Position::new(line, column));
    true
}

fn insert_after_line_end(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    surface.insert_after_line_end(id)
}

fn insert_line_start(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    surface.insert_at_line_start(id)
}

fn no_op_single(
    _surface: &mut dyn EditorSurface,
    _cmd: &CommandDescriptor,
    _selections: &CaretSelections,
) -> bool {
    true
}

/// Flags shared by all insert transitions: one undo step for the whole
/// insert session, repeatable as a sequence
const INSERT_FLAGS: CommandFlags = CommandFlags {
    multikey_undo: true,
    exit_visual: false,
    repeatable: true,
    enter: Some(EnterMode::Insert),
};

pub(super) fn commands() -> Vec<Arc<CommandDescriptor>> {
    vec![
        CommandDescriptor::new(
            "VisualBlockAppend",
            CommandKind::Insert,
            ModeSet::V,
            CommandFlags {
                exit_visual: true,
                ..INSERT_FLAGS
            },
            vec![vec![Keystroke::char('A')]],
            ActionHandler::Single(visual_append),
        ),
        CommandDescriptor::new(
            "VisualBlockInsert",
            CommandKind::Insert,
            ModeSet::V,
            CommandFlags {
                exit_visual: true,
                ..INSERT_FLAGS
            },
            vec![vec![Keystroke::char('I')]],
            ActionHandler::Single(visual_insert),
        ),
        CommandDescriptor::new(
            "InsertBeforeCursor",
            CommandKind::Insert,
            ModeSet::NORMAL,
            INSERT_FLAGS,
            vec![vec![Keystroke::char('i')], vec![Keystroke::key(crate::keymap::KeyCode::Insert)]],
            ActionHandler::PerCaret(insert_before_cursor),
        ),
        CommandDescriptor::new(
            "InsertAfterCursor",
            CommandKind::Insert,
            ModeSet::NORMAL,
            INSERT_FLAGS,
            vec![vec![Keystroke::char('a')]],
            ActionHandler::PerCaret(insert_after_cursor),
        ),
        CommandDescriptor::new(
            "InsertAfterLineEnd",
            CommandKind::Insert,
            ModeSet::NORMAL,
            INSERT_FLAGS,
            vec![vec![Keystroke::char('A')]],
            ActionHandler::PerCaret(insert_after_line_end),
        ),
        CommandDescriptor::new(
            "InsertLineStart",
            CommandKind::Insert,
            ModeSet::NORMAL,
            INSERT_FLAGS,
            vec![vec![Keystroke::char('I')]],
            ActionHandler::PerCaret(insert_line_start),
        ),
        CommandDescriptor::new(
            "EnterReplace",
            CommandKind::Insert,
            ModeSet::NORMAL,
            CommandFlags {
                enter: Some(EnterMode::Replace),
                ..INSERT_FLAGS
            },
            vec![vec![Keystroke::char('R')]],
            ActionHandler::Single(no_op_single),
        ),
    ]
}
