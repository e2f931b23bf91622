//! Mode-scoped key sequence mapping
//!
//! This module turns ordered keystroke sequences into command descriptors:
//! - Keystrokes and Vim notation ([`types`], [`notation`])
//! - The registry with ambiguous-prefix resolution ([`registry`])
//! - User remapping via YAML config ([`config`])
//!
//! # Architecture
//!
//! ```text
//! host key event → Keystroke → KeyRegistry::resolve(mode, pending)
//!     → NoMatch | Ambiguous | Matched(CommandDescriptor)
//! ```

pub mod config;
pub mod notation;
pub mod registry;
pub mod types;

pub use config::{
    apply_remaps, load_remap_file, parse_remap_yaml, user_remap_path, KeymapError, RemapConfig,
    RemapEntry,
};
pub use notation::{display_keys, parse_keys, NotationError};
pub use registry::{KeyRegistry, Resolution};
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
