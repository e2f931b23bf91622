//! vimode - modal Vim-style command engine for multi-caret editors
//!
//! This crate supplies the meaning of key sequences on top of a host
//! editing surface it does not own: how keystrokes become commands under
//! the current mode, how selections normalize into shape-tagged
//! snapshots, and how one logical command applies across every caret
//! with a single coherent outcome.
//!
//! The host implements [`host::EditorSurface`]; the engine drives it:
//!
//! ```text
//! key event → KeyRegistry (scoped by Mode) → CommandDescriptor
//!     → CommandEngine (selection snapshot per caret) → ActionHandler
//!     → post-conditions (mode transition, undo grouping)
//! ```

pub mod actions;
pub mod command;
pub mod engine;
pub mod host;
pub mod keymap;
pub mod mode;
pub mod selection;

// Re-export commonly used types
pub use command::{CommandDescriptor, CommandFlags, CommandKind, EnterMode};
pub use engine::{ActionHandler, CaretSelections, CommandEngine, Dispatch};
pub use host::{CaretId, CaretInfo, EditorSurface, LiveSelection};
pub use keymap::{KeyCode, KeyRegistry, Keystroke, Modifiers, Resolution};
pub use mode::{Mode, ModeSet, ModeState, SelectionShape};
pub use selection::{LineColumns, Position, VimSelection};
