//! Command descriptors: what a resolved key sequence means
//!
//! A [`CommandDescriptor`] is built once at registry-build time and shared
//! by reference for every invocation after that. It carries the behavioral
//! category, the post-condition directives, the modes the command is legal
//! in, its default key sequences, and the handler that executes it.

use std::fmt;
use std::sync::Arc;

use crate::engine::handler::ActionHandler;
use crate::keymap::Keystroke;
use crate::mode::{ModeSet, SelectionShape};

/// Closed behavioral category of a command
///
/// The category drives result aggregation for per-caret execution: writing
/// categories require every caret to succeed, read-only ones any caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Motion,
    Insert,
    Delete,
    Change,
    Copy,
    Paste,
    ModeSwitch,
    OtherReadonly,
    OtherWritable,
}

impl CommandKind {
    /// Whether commands of this kind mutate the buffer
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            CommandKind::Insert
                | CommandKind::Delete
                | CommandKind::Change
                | CommandKind::Paste
                | CommandKind::OtherWritable
        )
    }
}

/// Mode a command transitions into, applied by the post-condition step
/// after any visual exit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterMode {
    Normal,
    Insert,
    Replace,
    OpPending,
    Visual(SelectionShape),
    Select(SelectionShape),
    /// Visual-mode toggling: entering the shape already active drops back
    /// to normal, any other state switches to the shape
    ToggleVisual(SelectionShape),
}

/// Post-condition directives attached to a command
///
/// Interpreted by the engine's single post-condition step, never by
/// handlers. All directives only fire on a successful invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandFlags {
    /// Open an undo group so the edits that follow (e.g. insert-mode
    /// typing) collapse into one undo step
    pub multikey_undo: bool,
    /// Leave visual/select mode before entering the commanded mode
    pub exit_visual: bool,
    /// Record the full key sequence for dot-repeat
    pub repeatable: bool,
    /// Mode to enter, after `exit_visual` has been applied
    pub enter: Option<EnterMode>,
}

/// An immutable description of one recognized command
pub struct CommandDescriptor {
    /// Stable identifier; also the name the remapping config refers to
    pub name: &'static str,
    pub kind: CommandKind,
    pub flags: CommandFlags,
    /// Modes in which the command is legal
    pub modes: ModeSet,
    /// Default key sequences that invoke it
    pub keys: Vec<Vec<Keystroke>>,
    pub handler: ActionHandler,
}

impl CommandDescriptor {
    /// Build a descriptor and wrap it for shared registration
    pub fn new(
        name: &'static str,
        kind: CommandKind,
        modes: ModeSet,
        flags: CommandFlags,
        keys: Vec<Vec<Keystroke>>,
        handler: ActionHandler,
    ) -> Arc<Self> {
        Arc::new(Self {
            name,
            kind,
            flags,
            modes,
            keys,
            handler,
        })
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("flags", &self.flags)
            .field("modes", &self.modes)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_write_split() {
        assert!(CommandKind::Insert.is_write());
        assert!(CommandKind::Delete.is_write());
        assert!(!CommandKind::Motion.is_write());
        assert!(!CommandKind::ModeSwitch.is_write());
        assert!(!CommandKind::OtherReadonly.is_write());
    }

    #[test]
    fn test_flags_default_is_inert() {
        let flags = CommandFlags::default();
        assert!(!flags.multikey_undo);
        assert!(!flags.exit_visual);
        assert!(!flags.repeatable);
        assert_eq!(flags.enter, None);
    }
}
