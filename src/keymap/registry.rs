//! Mode-scoped key-sequence registry
//!
//! Maps ordered keystroke sequences, under each editing mode, to command
//! descriptors and resolves partial input: a sequence either matches
//! nothing, is a prefix that needs more input, or resolves to exactly one
//! command.

use std::collections::HashMap;
use std::sync::Arc;

use super::types::Keystroke;
use crate::command::CommandDescriptor;
use crate::mode::{Mode, ModeSet};

/// Result of resolving an input sequence in a mode
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Neither the sequence nor any extension of it can match; discard it
    NoMatch,
    /// Proper prefix of at least one binding; await more input
    Ambiguous,
    /// Exact, complete match
    Matched(Arc<CommandDescriptor>),
}

impl Resolution {
    pub fn is_matched(&self) -> bool {
        matches!(self, Resolution::Matched(_))
    }
}

/// Bindings of one mapping-mode bucket
#[derive(Debug, Default)]
struct ModeBindings {
    /// Complete sequences to their command
    exact: HashMap<Vec<Keystroke>, Arc<CommandDescriptor>>,
    /// Proper prefixes of registered sequences, with a count so unbinding
    /// can release shared prefixes
    prefixes: HashMap<Vec<Keystroke>, usize>,
}

impl ModeBindings {
    fn add(&mut self, seq: &[Keystroke], descriptor: Arc<CommandDescriptor>) -> bool {
        if self.exact.contains_key(seq) {
            return false;
        }
        self.exact.insert(seq.to_vec(), descriptor);
        for len in 1..seq.len() {
            *self.prefixes.entry(seq[..len].to_vec()).or_insert(0) += 1;
        }
        true
    }

    fn remove(&mut self, seq: &[Keystroke]) -> bool {
        if self.exact.remove(seq).is_none() {
            return false;
        }
        for len in 1..seq.len() {
            if let Some(count) = self.prefixes.get_mut(&seq[..len]) {
                *count -= 1;
                if *count == 0 {
                    self.prefixes.remove(&seq[..len]);
                }
            }
        }
        true
    }
}

/// The registry: one binding table per mapping-mode bucket
///
/// Visual sub-shapes share the visual bucket, select sub-shapes the select
/// bucket, mirroring how commands declare their legal modes.
#[derive(Debug, Default)]
pub struct KeyRegistry {
    buckets: [ModeBindings; MODE_BUCKETS],
    commands: Vec<Arc<CommandDescriptor>>,
    /// Tie-break policy for sequences that are both a complete match and a
    /// strict prefix of a longer binding. Off (the default) such input
    /// resolves [`Resolution::Ambiguous`] and waits; on, it fires the
    /// complete match immediately. One registry-wide policy, never
    /// per-command.
    fast_resolve: bool,
}

const MODE_BUCKETS: usize = 6;

fn bucket_index(mode: Mode) -> usize {
    match mode {
        Mode::Normal => 0,
        Mode::Insert => 1,
        Mode::Replace => 2,
        Mode::Visual(_) => 3,
        Mode::Select(_) => 4,
        Mode::OpPending => 5,
    }
}

/// One concrete mode per bucket, for iterating a [`ModeSet`]
const BUCKET_MODES: [Mode; MODE_BUCKETS] = [
    Mode::Normal,
    Mode::Insert,
    Mode::Replace,
    Mode::Visual(crate::mode::SelectionShape::Character),
    Mode::Select(crate::mode::SelectionShape::Character),
    Mode::OpPending,
];

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fast-resolve tie-break policy (see the field docs)
    pub fn set_fast_resolve(&mut self, fast_resolve: bool) {
        self.fast_resolve = fast_resolve;
    }

    pub fn fast_resolve(&self) -> bool {
        self.fast_resolve
    }

    /// Register a command under its default key sequences in every mode it
    /// declares. A sequence already taken in a mode is a registration
    /// conflict: the first registration wins and the conflict is logged.
    pub fn register(&mut self, descriptor: Arc<CommandDescriptor>) {
        for seq in descriptor.keys.clone() {
            self.bind(descriptor.modes, &seq, Arc::clone(&descriptor));
        }
        self.commands.push(descriptor);
    }

    /// Bind one sequence to a command in the given modes
    pub fn bind(&mut self, modes: ModeSet, seq: &[Keystroke], descriptor: Arc<CommandDescriptor>) {
        if seq.is_empty() {
            return;
        }
        for mode in BUCKET_MODES {
            if !modes.contains(mode) {
                continue;
            }
            let bucket = &mut self.buckets[bucket_index(mode)];
            if !bucket.add(seq, Arc::clone(&descriptor)) {
                tracing::warn!(
                    command = descriptor.name,
                    keys = %super::notation::display_keys(seq),
                    %mode,
                    "duplicate binding ignored"
                );
            }
        }
    }

    /// Remove a binding from the given modes; returns whether anything was
    /// removed
    pub fn unbind(&mut self, modes: ModeSet, seq: &[Keystroke]) -> bool {
        let mut removed = false;
        for mode in BUCKET_MODES {
            if modes.contains(mode) {
                removed |= self.buckets[bucket_index(mode)].remove(seq);
            }
        }
        removed
    }

    /// Resolve an input sequence under a mode
    pub fn resolve(&self, mode: Mode, seq: &[Keystroke]) -> Resolution {
        let bucket = &self.buckets[bucket_index(mode)];
        let exact = bucket.exact.get(seq);
        let extends = bucket.prefixes.contains_key(seq);

        match exact {
            // Complete match that is also a strict prefix of a longer
            // binding: wait, unless fast-resolve fires it now
            Some(descriptor) if !extends || self.fast_resolve => {
                Resolution::Matched(Arc::clone(descriptor))
            }
            Some(_) => Resolution::Ambiguous,
            None if extends => Resolution::Ambiguous,
            None => Resolution::NoMatch,
        }
    }

    /// Resolve only an exact, complete match, ignoring longer bindings.
    /// This is the timeout path: when the host's ambiguity timer expires,
    /// pending input fires if it is a complete sequence.
    pub fn resolve_exact(&self, mode: Mode, seq: &[Keystroke]) -> Option<Arc<CommandDescriptor>> {
        self.buckets[bucket_index(mode)].exact.get(seq).cloned()
    }

    /// Look up a registered command by name
    pub fn command(&self, name: &str) -> Option<Arc<CommandDescriptor>> {
        self.commands.iter().find(|c| c.name == name).cloned()
    }

    /// All registered commands, in registration order
    pub fn commands(&self) -> impl Iterator<Item = &Arc<CommandDescriptor>> {
        self.commands.iter()
    }

    /// The sequences bound in a mode, for the settings/remapping surface
    pub fn bindings(&self, mode: Mode) -> Vec<(Vec<Keystroke>, Arc<CommandDescriptor>)> {
        self.buckets[bucket_index(mode)]
            .exact
            .iter()
            .map(|(seq, descriptor)| (seq.clone(), Arc::clone(descriptor)))
            .collect()
    }
}
