//! YAML remapping configuration
//!
//! The built-in command table is code; what users change is which key
//! sequences reach it. A remap file binds notation sequences to command
//! names, or unbinds defaults with the reserved name `Unbound`:
//!
//! ```yaml
//! remaps:
//!   - keys: "gA"
//!     command: VisualBlockAppend
//!     modes: [visual]
//!   - keys: "<C-v>"
//!     command: Unbound
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::notation::{parse_keys, NotationError};
use super::registry::KeyRegistry;
use crate::mode::ModeSet;

/// Reserved command name that removes a binding instead of adding one
pub const UNBOUND: &str = "Unbound";

/// Root structure of a remap YAML file
#[derive(Debug, Deserialize)]
pub struct RemapConfig {
    pub remaps: Vec<RemapEntry>,
}

/// A single remap entry
#[derive(Debug, Deserialize)]
pub struct RemapEntry {
    /// Key sequence in Vim notation
    pub keys: String,
    /// Name of a built-in command, or `Unbound`
    pub command: String,
    /// Modes to touch; defaults to the command's own legal modes
    /// (all modes for `Unbound`)
    #[serde(default)]
    pub modes: Option<Vec<String>>,
}

/// Error raised while loading or applying a remap config
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKeys(NotationError),
    UnknownCommand(String),
    UnknownMode(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKeys(e) => write!(f, "Invalid keys: {}", e),
            KeymapError::UnknownCommand(c) => write!(f, "Unknown command: {}", c),
            KeymapError::UnknownMode(m) => write!(f, "Unknown mode: {}", m),
        }
    }
}

impl std::error::Error for KeymapError {}

impl From<NotationError> for KeymapError {
    fn from(err: NotationError) -> Self {
        KeymapError::InvalidKeys(err)
    }
}

/// Parse a remap config from YAML
pub fn parse_remap_yaml(yaml: &str) -> Result<RemapConfig, KeymapError> {
    serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))
}

/// Apply a parsed remap config to a registry
///
/// A remap of an already-bound sequence replaces the default binding in
/// the touched modes; `Unbound` entries remove bindings.
pub fn apply_remaps(registry: &mut KeyRegistry, config: &RemapConfig) -> Result<(), KeymapError> {
    for entry in &config.remaps {
        let keys = parse_keys(&entry.keys)?;

        if entry.command == UNBOUND {
            let modes = match &entry.modes {
                Some(names) => parse_mode_set(names)?,
                None => ModeSet::ALL,
            };
            if registry.unbind(modes, &keys) {
                tracing::info!(keys = %entry.keys, "unbound default binding");
            } else {
                tracing::warn!(keys = %entry.keys, "unbind matched no binding");
            }
            continue;
        }

        let descriptor = registry
            .command(&entry.command)
            .ok_or_else(|| KeymapError::UnknownCommand(entry.command.clone()))?;
        let modes = match &entry.modes {
            Some(names) => parse_mode_set(names)?,
            None => descriptor.modes,
        };
        registry.unbind(modes, &keys);
        registry.bind(modes, &keys, descriptor);
        tracing::info!(keys = %entry.keys, command = %entry.command, "applied remap");
    }
    Ok(())
}

/// Load a remap file and apply it to a registry
pub fn load_remap_file(registry: &mut KeyRegistry, path: &Path) -> Result<(), KeymapError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;
    let config = parse_remap_yaml(&content)?;
    apply_remaps(registry, &config)
}

/// The user's remap configuration path
///
/// `~/.config/vimode/remaps.yaml` on Unix, the platform config dir
/// elsewhere
pub fn user_remap_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join("vimode").join("remaps.yaml"))
}

fn parse_mode_set(names: &[String]) -> Result<ModeSet, KeymapError> {
    let mut set = ModeSet::NONE;
    for name in names {
        let bit = match name.as_str() {
            "normal" => ModeSet::NORMAL,
            "insert" => ModeSet::INSERT,
            "replace" => ModeSet::REPLACE,
            "visual" => ModeSet::VISUAL,
            "select" => ModeSet::SELECT,
            "op-pending" | "operator-pending" => ModeSet::OP_PENDING,
            _ => return Err(KeymapError::UnknownMode(name.clone())),
        };
        set = set | bit;
    }
    Ok(set)
}
