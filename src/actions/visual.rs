//! Visual mode entry, exit, and in-mode commands

use std::sync::Arc;

use crate::command::{CommandDescriptor, CommandFlags, CommandKind, EnterMode};
use crate::engine::handler::ActionHandler;
use crate::host::{CaretId, EditorSurface, LiveSelection};
use crate::keymap::{KeyCode, Keystroke, Modifiers};
use crate::mode::{ModeSet, SelectionShape};
use crate::selection::VimSelection;

/// `v` / `V` / `<C-v>`: seed an empty selection at each caret; the mode
/// change itself is the descriptor's toggle directive
fn seed_selection(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    cmd: &CommandDescriptor,
) -> bool {
    let Some(caret) = surface.carets().into_iter().find(|c| c.id == id) else {
        return false;
    };
    let shape = match cmd.flags.enter {
        Some(EnterMode::ToggleVisual(shape)) => shape,
        _ => SelectionShape::Character,
    };
    if caret.selection.is_none() {
        surface.set_selection(
            id,
            Some(LiveSelection {
                shape,
                anchor: caret.position,
                head: caret.position,
            }),
        );
    }
    true
}

/// `o` in visual modes: swap the fixed and moving ends of each caret's
/// selection and jump the caret to the old anchor
fn swap_ends(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    let Some(caret) = surface.carets().into_iter().find(|c| c.id == id) else {
        return false;
    };
    let Some(live) = caret.selection else {
        return false;
    };
    surface.set_selection(
        id,
        Some(LiveSelection {
            shape: live.shape,
            anchor: live.head,
            head: live.anchor,
        }),
    );
    surface.move_caret(id, live.anchor);
    true
}

/// The cancel key: drop any selection; the descriptor's enter directive
/// lands back in normal mode from wherever we were
fn clear_selection(
    surface: &mut dyn EditorSurface,
    id: CaretId,
    _snapshot: Option<&VimSelection>,
    _cmd: &CommandDescriptor,
) -> bool {
    surface.set_selection(id, None);
    true
}

fn toggle(name: &'static str, shape: SelectionShape, key: Keystroke) -> Arc<CommandDescriptor> {
    CommandDescriptor::new(
        name,
        CommandKind::ModeSwitch,
        ModeSet::NV,
        CommandFlags {
            enter: Some(EnterMode::ToggleVisual(shape)),
            ..Default::default()
        },
        vec![vec![key]],
        ActionHandler::PerCaret(seed_selection),
    )
}

pub(super) fn commands() -> Vec<Arc<CommandDescriptor>> {
    vec![
        toggle(
            "VisualToggleCharacterMode",
            SelectionShape::Character,
            Keystroke::char('v'),
        ),
        toggle(
            "VisualToggleLineMode",
            SelectionShape::Line,
            Keystroke::char('V'),
        ),
        toggle(
            "VisualToggleBlockMode",
            SelectionShape::Block,
            Keystroke::char_with_mods('v', Modifiers::CTRL),
        ),
        CommandDescriptor::new(
            "VisualSwapEnds",
            CommandKind::OtherReadonly,
            ModeSet::V,
            CommandFlags::default(),
            vec![vec![Keystroke::char('o')]],
            ActionHandler::PerCaret(swap_ends),
        ),
        CommandDescriptor::new(
            "ExitToNormal",
            CommandKind::ModeSwitch,
            ModeSet::ALL,
            CommandFlags {
                enter: Some(EnterMode::Normal),
                ..Default::default()
            },
            vec![vec![Keystroke::key(KeyCode::Escape)]],
            ActionHandler::PerCaret(clear_selection),
        ),
    ]
}
