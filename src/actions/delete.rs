//! Delete commands

use std::sync::Arc;

use crate::command::{CommandDescriptor, CommandFlags, CommandKind, EnterMode};
use crate::engine::handler::{ActionHandler, CaretSelections};
use crate::host::{CaretId, EditorSurface};
use crate::keymap::Keystroke;
use crate::mode::ModeSet;
use crate::selection::{Position, VimSelection};

/// `dd`: delete the caret's whole line
fn delete_line(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    let Some(caret) = surface.carets().into_iter().find(|c| c.id == id) else {
        return false;
    };
    let line = caret.position.line;
    if line >= surface.line_count() {
        return false;
    }
    surface.delete(Position::new(line, 0), Position::new(line + 1, 0));
    let rest = line.min(surface.line_count().saturating_sub(1));
    surface.move_caret(id, Position::new(rest, 0));
    true
}

/// `d`/`x` in visual modes: delete each caret's captured range
///
/// Character and line shapes delete one contiguous range; a block deletes
/// its column span per line, skipping lines too short to reach the block.
fn delete_selection(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    let Some(selection) = snapshot else {
        return false;
    };
    match selection {
        VimSelection::Character { .. } | VimSelection::Line { .. } => {
            let (start, end) = selection.to_range(false);
            surface.delete(start, end);
        }
        VimSelection::Block { .. } => {
            for columns in selection.line_columns(surface) {
                surface.delete(
                    Position::new(columns.line, columns.start_col),
                    Position::new(columns.line, columns.end_col),
                );
            }
        }
    }
    let start = selection.start();
    let line = start.line.min(surface.line_count().saturating_sub(1));
    surface.move_caret(id, Position::new(line, start.column.min(surface.line_length(line))));
    true
}

fn enter_op_pending(
    _surface: &mut dyn EditorSurface,
    _cmd: &CommandDescriptor,
    _selections: &CaretSelections,
) -> bool {
    true
}

pub(super) fn commands() -> Vec<Arc<CommandDescriptor>> {
    vec![
        CommandDescriptor::new(
            "DeleteOperator",
            CommandKind::ModeSwitch,
            ModeSet::NORMAL,
            CommandFlags {
                enter: Some(EnterMode::OpPending),
                ..Default::default()
            },
            vec![vec![Keystroke::char('d')]],
            ActionHandler::Single(enter_op_pending),
        ),
        CommandDescriptor::new(
            "DeleteLine",
            CommandKind::Delete,
            ModeSet::NORMAL,
            CommandFlags {
                repeatable: true,
                // Completing the operator lands back in normal mode
                enter: Some(EnterMode::Normal),
                ..Default::default()
            },
            vec![vec![Keystroke::char('d'), Keystroke::char('d')]],
            ActionHandler::PerCaret(delete_line),
        ),
        CommandDescriptor::new(
            "DeleteVisual",
            CommandKind::Delete,
            ModeSet::V,
            CommandFlags {
                exit_visual: true,
                repeatable: true,
                ..Default::default()
            },
            vec![vec![Keystroke::char('d')], vec![Keystroke::char('x')]],
            ActionHandler::PerCaret(delete_selection),
        ),
    ]
}
