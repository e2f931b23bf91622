//! The built-in command set
//!
//! Each submodule contributes descriptors for one command family; the
//! default registry wires them all under their default key sequences.
//! Handlers only ever touch the host through collaborator primitives;
//! the buffer itself lives on the other side of [`EditorSurface`].
//!
//! [`EditorSurface`]: crate::host::EditorSurface

mod delete;
mod insert;
mod motion;
mod visual;

use std::sync::Arc;

use crate::command::CommandDescriptor;
use crate::keymap::{KeyRegistry, Keystroke};
use crate::mode::ModeSet;

/// Every built-in command, in registration order
pub fn builtin_commands() -> Vec<Arc<CommandDescriptor>> {
    let mut commands = Vec::new();
    commands.extend(insert::commands());
    commands.extend(visual::commands());
    commands.extend(delete::commands());
    commands.extend(motion::commands());
    commands
}

/// Registry over the built-in command set with default bindings
pub fn default_registry() -> KeyRegistry {
    let mut registry = KeyRegistry::new();
    for descriptor in builtin_commands() {
        registry.register(descriptor);
    }
    // The line delete also completes the pending delete operator
    if let Some(delete_line) = registry.command("DeleteLine") {
        registry.bind(ModeSet::OP_PENDING, &[Keystroke::char('d')], delete_line);
    }
    tracing::debug!(
        commands = registry.commands().count(),
        "built default registry"
    );
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::parse_keys;
    use crate::mode::{Mode, SelectionShape};

    #[test]
    fn test_builtin_names_are_unique() {
        let commands = builtin_commands();
        for (i, a) in commands.iter().enumerate() {
            for b in &commands[i + 1..] {
                assert_ne!(a.name, b.name, "duplicate command name");
            }
        }
    }

    #[test]
    fn test_default_registry_resolves_core_bindings() {
        let registry = default_registry();
        let visual = Mode::Visual(SelectionShape::Block);

        let a = parse_keys("A").unwrap();
        assert!(registry.resolve(visual, &a).is_matched());
        assert!(registry.resolve(Mode::Normal, &a).is_matched());

        let esc = parse_keys("<Esc>").unwrap();
        assert!(registry.resolve(Mode::Insert, &esc).is_matched());
        assert!(registry.resolve(Mode::OpPending, &esc).is_matched());
    }

    #[test]
    fn test_visual_append_modes_and_flags() {
        let registry = default_registry();
        let append = registry.command("VisualBlockAppend").unwrap();
        assert!(append.modes.contains(Mode::Visual(SelectionShape::Block)));
        assert!(append.modes.contains(Mode::Select(SelectionShape::Character)));
        assert!(!append.modes.contains(Mode::Insert));
        assert!(append.flags.exit_visual);
        assert!(append.flags.multikey_undo);
    }

    #[test]
    fn test_operator_pending_completes_delete() {
        let registry = default_registry();
        let d = parse_keys("d").unwrap();
        match registry.resolve(Mode::OpPending, &d) {
            crate::keymap::Resolution::Matched(c) => assert_eq!(c.name, "DeleteLine"),
            other => panic!("expected DeleteLine, got {:?}", other),
        }
    }
}
