//! Integration tests for the keymap system

use super::*;
use crate::actions::default_registry;
use crate::mode::{Mode, SelectionShape};

fn visual() -> Mode {
    Mode::Visual(SelectionShape::Character)
}

#[test]
fn test_default_registry_has_essential_commands() {
    let registry = default_registry();

    for name in [
        "VisualBlockAppend",
        "VisualBlockInsert",
        "VisualSwapEnds",
        "InsertBeforeCursor",
        "DeleteLine",
        "ExitToNormal",
    ] {
        assert!(registry.command(name).is_some(), "missing {}", name);
    }
}

#[test]
fn test_default_bindings_resolve_per_mode() {
    let registry = default_registry();

    let a = parse_keys("A").unwrap();
    match registry.resolve(visual(), &a) {
        Resolution::Matched(c) => assert_eq!(c.name, "VisualBlockAppend"),
        other => panic!("expected VisualBlockAppend, got {:?}", other),
    }
    match registry.resolve(Mode::Normal, &a) {
        Resolution::Matched(c) => assert_eq!(c.name, "InsertAfterLineEnd"),
        other => panic!("expected InsertAfterLineEnd, got {:?}", other),
    }
}

#[test]
fn test_insert_mode_passes_typing_through() {
    let registry = default_registry();
    // Printable keys are unbound in insert mode so the host can type them
    let a = parse_keys("a").unwrap();
    assert!(matches!(
        registry.resolve(Mode::Insert, &a),
        Resolution::NoMatch
    ));
    // But the cancel key resolves
    let esc = parse_keys("<Esc>").unwrap();
    assert!(registry.resolve(Mode::Insert, &esc).is_matched());
}

#[test]
fn test_prefix_of_longer_binding_waits() {
    let registry = default_registry();
    let d = parse_keys("d").unwrap();
    assert!(matches!(
        registry.resolve(Mode::Normal, &d),
        Resolution::Ambiguous
    ));
}

#[test]
fn test_fast_resolve_policy_is_registry_wide() {
    let mut registry = default_registry();
    registry.set_fast_resolve(true);
    let d = parse_keys("d").unwrap();
    match registry.resolve(Mode::Normal, &d) {
        Resolution::Matched(c) => assert_eq!(c.name, "DeleteOperator"),
        other => panic!("expected DeleteOperator, got {:?}", other),
    }
}

#[test]
fn test_remap_overrides_default_binding() {
    let mut registry = default_registry();
    let config = parse_remap_yaml(
        r#"
remaps:
  - keys: "A"
    command: VisualSwapEnds
    modes: [visual]
"#,
    )
    .unwrap();
    apply_remaps(&mut registry, &config).unwrap();

    let a = parse_keys("A").unwrap();
    match registry.resolve(visual(), &a) {
        Resolution::Matched(c) => assert_eq!(c.name, "VisualSwapEnds"),
        other => panic!("expected remapped command, got {:?}", other),
    }
    // Untouched modes keep their defaults
    match registry.resolve(Mode::Normal, &a) {
        Resolution::Matched(c) => assert_eq!(c.name, "InsertAfterLineEnd"),
        other => panic!("expected default, got {:?}", other),
    }
}

#[test]
fn test_remap_adds_multikey_alias() {
    let mut registry = default_registry();
    let config = parse_remap_yaml(
        r#"
remaps:
  - keys: "gA"
    command: VisualBlockAppend
    modes: [visual]
"#,
    )
    .unwrap();
    apply_remaps(&mut registry, &config).unwrap();

    let g = parse_keys("g").unwrap();
    assert!(matches!(
        registry.resolve(visual(), &g),
        Resolution::Ambiguous
    ));
    let ga = parse_keys("gA").unwrap();
    match registry.resolve(visual(), &ga) {
        Resolution::Matched(c) => assert_eq!(c.name, "VisualBlockAppend"),
        other => panic!("expected alias, got {:?}", other),
    }
}

#[test]
fn test_unbound_removes_default() {
    let mut registry = default_registry();
    let config = parse_remap_yaml(
        r#"
remaps:
  - keys: "<C-v>"
    command: Unbound
"#,
    )
    .unwrap();
    apply_remaps(&mut registry, &config).unwrap();

    let cv = parse_keys("<C-v>").unwrap();
    assert!(matches!(
        registry.resolve(Mode::Normal, &cv),
        Resolution::NoMatch
    ));
}

#[test]
fn test_unknown_command_is_an_error() {
    let mut registry = default_registry();
    let config = parse_remap_yaml(
        r#"
remaps:
  - keys: "Q"
    command: NoSuchCommand
"#,
    )
    .unwrap();
    assert!(matches!(
        apply_remaps(&mut registry, &config),
        Err(KeymapError::UnknownCommand(_))
    ));
}

#[test]
fn test_load_remap_file_round_trip() {
    use std::io::Write as _;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "remaps:\n  - keys: \"gA\"\n    command: VisualBlockAppend\n    modes: [visual]"
    )
    .unwrap();

    let mut registry = default_registry();
    load_remap_file(&mut registry, file.path()).unwrap();
    let ga = parse_keys("gA").unwrap();
    assert!(registry.resolve(visual(), &ga).is_matched());
}

#[test]
fn test_load_remap_file_missing_is_io_error() {
    let mut registry = default_registry();
    let err = load_remap_file(&mut registry, std::path::Path::new("/no/such/remaps.yaml"))
        .unwrap_err();
    assert!(matches!(err, KeymapError::IoError(_)));
}

#[test]
fn test_registered_sequences_are_exposed() {
    let registry = default_registry();
    let bindings = registry.bindings(visual());
    assert!(bindings
        .iter()
        .any(|(seq, c)| c.name == "VisualBlockAppend" && display_keys(seq) == "A"));
}
