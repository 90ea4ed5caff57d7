//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use token_template::catalog::{builtin_definitions, builtin_groups};
use token_template::editable::SurfaceMsg;
use token_template::input::map_key;
use token_template::messages::Msg;
use token_template::replay::parse_chord;
use token_template::update::update;
use token_template::{Cmd, EditorOptions, TokenEditor, TokenName, TokenRegistry};

/// Registry with the built-in prompt catalog
pub fn builtin_registry() -> TokenRegistry {
    TokenRegistry::new(builtin_definitions(), builtin_groups())
}

/// Focused editor holding `template`, caret at the end
pub fn test_editor(template: &str) -> TokenEditor {
    test_editor_on(&builtin_registry(), template)
}

pub fn test_editor_on(registry: &TokenRegistry, template: &str) -> TokenEditor {
    let options = EditorOptions::new("test").with_backing(template);
    let mut editor = TokenEditor::mount(options, registry).expect("mount point given");
    update(&mut editor, Msg::Focus);
    editor
}

/// Focused editor with the caret at `offset`
pub fn test_editor_at(template: &str, offset: usize) -> TokenEditor {
    let mut editor = test_editor(template);
    update(&mut editor, Msg::Surface(SurfaceMsg::SetCursor(offset)));
    editor
}

pub fn name(s: &str) -> TokenName {
    TokenName::new(s).unwrap()
}

/// Press a key chord like `Shift+ArrowLeft`
pub fn press(editor: &mut TokenEditor, chord: &str) -> Option<Cmd> {
    let (key, mods) = parse_chord(chord).unwrap_or_else(|| panic!("bad chord {chord}"));
    let msg = map_key(key, mods).unwrap_or_else(|| panic!("unmapped chord {chord}"));
    update(editor, msg)
}

/// Type each character of `text`
pub fn type_text(editor: &mut TokenEditor, text: &str) {
    for ch in text.chars() {
        update(editor, Msg::Surface(SurfaceMsg::InsertChar(ch)));
    }
}

pub fn surface(editor: &mut TokenEditor, msg: SurfaceMsg) -> Option<Cmd> {
    update(editor, Msg::Surface(msg))
}

pub fn caret(editor: &TokenEditor) -> usize {
    editor.surface().cursor().offset
}
