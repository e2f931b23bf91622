//! Host editing surface collaborators
//!
//! The engine never owns text. The host supplies a buffer, an ordered caret
//! collection and a handful of primitive edit operations through
//! [`EditorSurface`]; everything here is the boundary the engine drives.

use crate::mode::SelectionShape;
use crate::selection::{Position, VimSelection};

/// Identifies one caret in the host's ordered caret collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaretId(pub usize);

/// A live selection as the host draws it: anchor fixed, head moving
///
/// This is the raw, direction-carrying form; dispatch normalizes it into a
/// [`VimSelection`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSelection {
    pub shape: SelectionShape,
    pub anchor: Position,
    pub head: Position,
}

/// One caret's state as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaretInfo {
    pub id: CaretId,
    pub position: Position,
    pub selection: Option<LiveSelection>,
}

/// The host editing surface the engine operates on
///
/// Buffer reads use `(line, column)` positions with exclusive range ends.
/// `carets` returns the collection in host order; that order is the
/// iteration order for per-caret command execution. The three trailing
/// operations are the collaborator edits command handlers delegate to;
/// their success result is the handler's result.
pub trait EditorSurface {
    /// Host property disabling multi-line (and thus block) operations
    fn is_one_line(&self) -> bool;

    fn line_count(&self) -> usize;

    /// Length of a line in columns, excluding any line terminator
    fn line_length(&self, line: usize) -> usize;

    /// Read the text in `start..end` (end exclusive)
    fn text_range(&self, start: Position, end: Position) -> String;

    /// Insert text at a position; text must not span lines
    fn insert(&mut self, at: Position, text: &str);

    /// Delete `start..end` (end exclusive); may span lines
    fn delete(&mut self, start: Position, end: Position);

    /// The ordered caret collection
    fn carets(&self) -> Vec<CaretInfo>;

    fn move_caret(&mut self, id: CaretId, to: Position);

    /// Replace or clear a caret's live selection
    fn set_selection(&mut self, id: CaretId, selection: Option<LiveSelection>);

    /// Open an undo group so subsequent edits collapse into one undo step
    fn begin_undo_group(&mut self);

    /// Place the caret for appending after the end of its line
    fn insert_after_line_end(&mut self, id: CaretId) -> bool;

    /// Place the caret for inserting at the first non-blank of its line
    fn insert_at_line_start(&mut self, id: CaretId) -> bool;

    /// Multi-line block edit: set up an insertion point on every line the
    /// block spans. With `append` the insertion column is the block's right
    /// edge and a zero-width block still produces an insertion point.
    fn block_insert(&mut self, selection: &VimSelection, append: bool) -> bool;
}

/// Scripted in-memory host for tests and benches
pub mod testing {
    use super::*;

    /// Collaborator calls recorded by [`ScriptedSurface`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum SurfaceCall {
        BlockInsert {
            selection: VimSelection,
            append: bool,
        },
        InsertAfterLineEnd {
            caret: CaretId,
        },
        InsertAtLineStart {
            caret: CaretId,
        },
    }

    /// A minimal host: a `Vec<String>` buffer, carets, and a call log.
    /// Collaborator edit results are scripted through the `fail_*` knobs.
    #[derive(Debug, Default)]
    pub struct ScriptedSurface {
        pub lines: Vec<String>,
        pub carets: Vec<CaretInfo>,
        pub one_line: bool,
        pub fail_block_insert: bool,
        pub fail_line_inserts: bool,
        pub undo_groups: usize,
        pub calls: Vec<SurfaceCall>,
    }

    impl ScriptedSurface {
        pub fn with_lines(lines: &[&str]) -> Self {
            Self {
                lines: lines.iter().map(|s| s.to_string()).collect(),
                ..Self::default()
            }
        }

        /// Add a caret, returning its id
        pub fn add_caret(
            &mut self,
            position: Position,
            selection: Option<LiveSelection>,
        ) -> CaretId {
            let id = CaretId(self.carets.len());
            self.carets.push(CaretInfo {
                id,
                position,
                selection,
            });
            id
        }

        pub fn caret(&self, id: CaretId) -> &CaretInfo {
            self.carets.iter().find(|c| c.id == id).expect("caret id")
        }

        pub fn text(&self) -> String {
            self.lines.join("\n")
        }

        fn clamp(&self, pos: Position) -> Position {
            let line = pos.line.min(self.lines.len().saturating_sub(1));
            Position::new(line, pos.column.min(self.lines[line].len()))
        }
    }

    impl EditorSurface for ScriptedSurface {
        fn is_one_line(&self) -> bool {
            self.one_line
        }

        fn line_count(&self) -> usize {
            self.lines.len()
        }

        fn line_length(&self, line: usize) -> usize {
            self.lines.get(line).map_or(0, |l| l.chars().count())
        }

        fn text_range(&self, start: Position, end: Position) -> String {
            if start.line == end.line {
                let line = &self.lines[start.line];
                return line[start.column..end.column.min(line.len())].to_string();
            }
            let mut out = self.lines[start.line][start.column..].to_string();
            for line in &self.lines[start.line + 1..end.line] {
                out.push('\n');
                out.push_str(line);
            }
            if end.line < self.lines.len() {
                out.push('\n');
                out.push_str(&self.lines[end.line][..end.column]);
            }
            out
        }

        fn insert(&mut self, at: Position, text: &str) {
            let at = self.clamp(at);
            self.lines[at.line].insert_str(at.column, text);
        }

        fn delete(&mut self, start: Position, end: Position) {
            if start.line == end.line {
                let line = &mut self.lines[start.line];
                let upper = end.column.min(line.len());
                line.replace_range(start.column..upper, "");
                return;
            }
            // Whole trailing lines drop; a partial last line merges up
            if end.line >= self.lines.len() || end.column == 0 {
                self.lines.drain(start.line + 1..end.line.min(self.lines.len()));
                self.lines[start.line].truncate(start.column);
                if start.column == 0 {
                    self.lines.remove(start.line);
                    if self.lines.is_empty() {
                        self.lines.push(String::new());
                    }
                }
            } else {
                let tail = self.lines[end.line][end.column..].to_string();
                self.lines[start.line].truncate(start.column);
                self.lines[start.line].push_str(&tail);
                self.lines.drain(start.line + 1..=end.line);
            }
        }

        fn carets(&self) -> Vec<CaretInfo> {
            self.carets.clone()
        }

        fn move_caret(&mut self, id: CaretId, to: Position) {
            if let Some(caret) = self.carets.iter_mut().find(|c| c.id == id) {
                caret.position = to;
            }
        }

        fn set_selection(&mut self, id: CaretId, selection: Option<LiveSelection>) {
            if let Some(caret) = self.carets.iter_mut().find(|c| c.id == id) {
                caret.selection = selection;
            }
        }

        fn begin_undo_group(&mut self) {
            self.undo_groups += 1;
        }

        fn insert_after_line_end(&mut self, id: CaretId) -> bool {
            self.calls.push(SurfaceCall::InsertAfterLineEnd { caret: id });
            if self.fail_line_inserts {
                return false;
            }
            let line = self.caret(id).position.line;
            let column = self.line_length(line);
            self.move_caret(id, Position::new(line, column));
            true
        }

        fn insert_at_line_start(&mut self, id: CaretId) -> bool {
            self.calls.push(SurfaceCall::InsertAtLineStart { caret: id });
            if self.fail_line_inserts {
                return false;
            }
            let line = self.caret(id).position.line;
            let column = self.lines[line]
                .chars()
                .position(|c| !c.is_whitespace())
                .unwrap_or(0);
            self.move_caret(id, Position::new(line, column));
            true
        }

        fn block_insert(&mut self, selection: &VimSelection, append: bool) -> bool {
            self.calls.push(SurfaceCall::BlockInsert {
                selection: *selection,
                append,
            });
            !self.fail_block_insert
        }
    }
}
