//! Caret motions

use std::sync::Arc;

use crate::command::{CommandDescriptor, CommandFlags, CommandKind};
use crate::engine::handler::ActionHandler;
use crate::host::{CaretId, EditorSurface};
use crate::keymap::{KeyCode, Keystroke};
use crate::mode::ModeSet;
use crate::selection::{Position, VimSelection};

fn line_start(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    let Some(caret) = surface.carets().into_iter().find(|c| c.id == id) else {
        return false;
    };
    surface.move_caret(id, Position::new(caret.position.line, 0));
    true
}

/// `$`: last character of the line, or column 0 on an empty line
fn line_end(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    let Some(caret) = surface.carets().into_iter().find(|c| c.id == id) else {
        return false;
    };
    let line = caret.position.line;
    let column = surface.line_length(line).saturating_sub(1);
    surface.move_caret(id, Position::new(line, column));
    true
}

pub(super) fn commands() -> Vec<Arc<CommandDescriptor>> {
    vec![
        CommandDescriptor::new(
            "MotionFirstColumn",
            CommandKind::Motion,
            ModeSet::NORMAL,
            CommandFlags::default(),
            vec![vec![Keystroke::char('0')], vec![Keystroke::key(KeyCode::Home)]],
            ActionHandler::PerCaret(line_start),
        ),
        CommandDescriptor::new(
            "MotionLastColumn",
            CommandKind::Motion,
            ModeSet::NORMAL,
            CommandFlags::default(),
            vec![vec![Keystroke::char('$')], vec![Keystroke::key(KeyCode::End)]],
            ActionHandler::PerCaret(line_end),
        ),
    ]
}
