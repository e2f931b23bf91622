//! The execution engine: keystrokes in, one coherent outcome out
//!
//! `CommandEngine` feeds each keystroke through the registry scoped by the
//! current mode, and on a match runs the invocation cycle: snapshot every
//! caret's selection, invoke the handler in its execution shape, then apply
//! the command's post-condition directives. The cycle runs to completion
//! before the next keystroke is looked at; a failed handler leaves every
//! piece of state untouched.

use std::sync::Arc;

use crate::command::{CommandDescriptor, EnterMode};
use crate::engine::handler::{ActionHandler, CaretSelections};
use crate::host::EditorSurface;
use crate::keymap::{KeyRegistry, Keystroke, Resolution};
use crate::mode::{Mode, ModeState};
use crate::selection::VimSelection;

/// What one keystroke amounted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A command resolved and ran; `success` tells whether its
    /// post-conditions fired
    Executed { name: &'static str, success: bool },
    /// Keystroke is part of a longer sequence, await more input
    AwaitMore,
    /// No binding matches; the pending input was discarded
    NoMatch,
}

/// A successfully executed repeatable command, kept for dot-repeat
#[derive(Debug, Clone)]
struct RepeatRecord {
    descriptor: Arc<CommandDescriptor>,
    keys: Vec<Keystroke>,
}

/// The modal dispatch and multi-caret execution engine for one surface
#[derive(Debug)]
pub struct CommandEngine {
    registry: KeyRegistry,
    mode: ModeState,
    pending: Vec<Keystroke>,
    repeat: Option<RepeatRecord>,
}

impl CommandEngine {
    pub fn new(registry: KeyRegistry) -> Self {
        Self {
            registry,
            mode: ModeState::new(),
            pending: Vec::new(),
            repeat: None,
        }
    }

    /// Engine over the built-in command set
    pub fn with_defaults() -> Self {
        Self::new(crate::actions::default_registry())
    }

    /// Current mode, read-only (for the UI/status collaborator)
    pub fn mode(&self) -> Mode {
        self.mode.current()
    }

    /// Keystrokes held while a sequence is ambiguous
    pub fn pending_keys(&self) -> &[Keystroke] {
        &self.pending
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }

    /// Mutable registry access for the settings/remapping subsystem
    pub fn registry_mut(&mut self) -> &mut KeyRegistry {
        &mut self.registry
    }

    /// The key sequence recorded for dot-repeat, if any
    pub fn repeat_keys(&self) -> Option<&[Keystroke]> {
        self.repeat.as_ref().map(|r| r.keys.as_slice())
    }

    /// Feed one keystroke
    pub fn handle_key(&mut self, surface: &mut dyn EditorSurface, key: Keystroke) -> Dispatch {
        self.pending.push(key);
        match self.registry.resolve(self.mode.current(), &self.pending) {
            Resolution::NoMatch => {
                tracing::trace!(
                    keys = %crate::keymap::display_keys(&self.pending),
                    mode = %self.mode.current(),
                    "no binding, input discarded"
                );
                self.pending.clear();
                Dispatch::NoMatch
            }
            Resolution::Ambiguous => Dispatch::AwaitMore,
            Resolution::Matched(descriptor) => {
                let keys = std::mem::take(&mut self.pending);
                self.run(surface, descriptor, keys)
            }
        }
    }

    /// Resolve pending input after the host's ambiguity timeout: a pending
    /// complete match fires, anything else is discarded
    pub fn flush_pending(&mut self, surface: &mut dyn EditorSurface) -> Dispatch {
        let keys = std::mem::take(&mut self.pending);
        if keys.is_empty() {
            return Dispatch::NoMatch;
        }
        match self.registry.resolve_exact(self.mode.current(), &keys) {
            Some(descriptor) => self.run(surface, descriptor, keys),
            None => Dispatch::NoMatch,
        }
    }

    /// Re-run the last recorded repeatable command (dot-repeat); carets
    /// and selections are captured fresh
    pub fn repeat_last(&mut self, surface: &mut dyn EditorSurface) -> Option<Dispatch> {
        let record = self.repeat.clone()?;
        Some(self.run(surface, record.descriptor, record.keys))
    }

    fn run(
        &mut self,
        surface: &mut dyn EditorSurface,
        descriptor: Arc<CommandDescriptor>,
        keys: Vec<Keystroke>,
    ) -> Dispatch {
        let success = self.execute(surface, &descriptor);
        if success && descriptor.flags.repeatable {
            self.repeat = Some(RepeatRecord {
                descriptor: Arc::clone(&descriptor),
                keys,
            });
        }
        Dispatch::Executed {
            name: descriptor.name,
            success,
        }
    }

    /// One invocation cycle: capture, invoke, post-conditions
    fn execute(&mut self, surface: &mut dyn EditorSurface, descriptor: &CommandDescriptor) -> bool {
        let mode = self.mode.current();
        tracing::debug!(command = descriptor.name, %mode, "executing");

        // Capture phase: snapshot every caret before any handler runs, so
        // mutation for one caret cannot shift a sibling's captured state
        let selections = CaretSelections::new(
            surface
                .carets()
                .into_iter()
                .map(|caret| {
                    let snapshot = caret
                        .selection
                        .map(|live| VimSelection::capture(live.shape, live.anchor, live.head));
                    (caret.id, snapshot)
                })
                .collect(),
        );

        // A selection-mode dispatch with nothing selected anywhere cannot
        // mean anything; treat as handler failure
        if mode.has_selection() && !selections.any_selection() {
            tracing::debug!(command = descriptor.name, "no selection captured");
            return false;
        }

        let success = match descriptor.handler {
            ActionHandler::Single(execute) => execute(surface, descriptor, &selections),
            ActionHandler::PerCaret(execute) => {
                let results: Vec<bool> = selections
                    .iter()
                    .map(|(id, snapshot)| execute(surface, id, snapshot, descriptor))
                    .collect();
                if results.is_empty() {
                    false
                } else if descriptor.kind.is_write() {
                    results.iter().all(|ok| *ok)
                } else {
                    results.iter().any(|ok| *ok)
                }
            }
        };

        if success {
            self.apply_post_conditions(surface, descriptor);
        } else {
            tracing::debug!(command = descriptor.name, "handler failed, post-conditions skipped");
        }
        success
    }

    /// The single mode-state writer. Directives compose in a fixed order:
    /// undo grouping, then visual exit, then the commanded mode; the final
    /// mode is applied in one step so no transient state is observable.
    fn apply_post_conditions(&mut self, surface: &mut dyn EditorSurface, descriptor: &CommandDescriptor) {
        let flags = descriptor.flags;
        if flags.multikey_undo {
            surface.begin_undo_group();
        }

        let mut mode = self.mode.current();
        if flags.exit_visual && mode.has_selection() {
            mode = Mode::Normal;
        }
        if let Some(enter) = flags.enter {
            mode = match enter {
                EnterMode::Normal => Mode::Normal,
                EnterMode::Insert => Mode::Insert,
                EnterMode::Replace => Mode::Replace,
                EnterMode::OpPending => Mode::OpPending,
                EnterMode::Visual(shape) => Mode::Visual(shape),
                EnterMode::Select(shape) => Mode::Select(shape),
                EnterMode::ToggleVisual(shape) => {
                    if mode == Mode::Visual(shape) {
                        Mode::Normal
                    } else {
                        Mode::Visual(shape)
                    }
                }
            };
        }
        self.mode.set(mode);
    }
}
