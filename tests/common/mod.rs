//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use vimode::host::testing::ScriptedSurface;
use vimode::host::LiveSelection;
use vimode::keymap::parse_keys;
use vimode::{CommandEngine, Dispatch, Position, SelectionShape};

/// Engine over the built-in command set
pub fn engine() -> CommandEngine {
    CommandEngine::with_defaults()
}

pub fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

pub fn live(shape: SelectionShape, anchor: Position, head: Position) -> LiveSelection {
    LiveSelection {
        shape,
        anchor,
        head,
    }
}

/// Feed a notation sequence key by key, returning the last dispatch
pub fn feed(
    engine: &mut CommandEngine,
    surface: &mut ScriptedSurface,
    notation: &str,
) -> Dispatch {
    let keys = parse_keys(notation).expect("test notation");
    let mut last = Dispatch::NoMatch;
    for key in keys {
        last = engine.handle_key(surface, key);
    }
    last
}

/// Assert the dispatch executed the named command with the given result
pub fn assert_executed(dispatch: &Dispatch, name: &str, success: bool) {
    match dispatch {
        Dispatch::Executed {
            name: executed,
            success: ok,
        } => {
            assert_eq!(*executed, name);
            assert_eq!(*ok, success, "unexpected result for {}", name);
        }
        other => panic!("expected Executed({}), got {:?}", name, other),
    }
}
