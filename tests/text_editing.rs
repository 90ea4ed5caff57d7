//! Editing behaviour of a mounted editor: typing, paste, token insertion,
//! undo/redo and the commands each action returns.

mod common;

use common::{caret, name, press, surface, test_editor, test_editor_at, type_text};
use token_template::editable::SurfaceMsg;
use token_template::messages::{Msg, ToolbarMsg};
use token_template::update::update;
use token_template::{Cmd, Segment};

// ========================================================================
// Typing
// ========================================================================

#[test]
fn test_typing_emits_input_with_value() {
    let mut editor = test_editor("");
    let cmd = surface(&mut editor, SurfaceMsg::InsertChar('H')).unwrap();
    assert!(cmd.emits_input());
    assert_eq!(cmd.backing_value(), Some("H"));
    assert_eq!(editor.backing_value(), Some("H"));
    assert!(cmd.flatten().contains(&Cmd::RenderSurface));
}

#[test]
fn test_enter_inserts_line_break() {
    let mut editor = test_editor("Dear {student_role},");
    press(&mut editor, "Enter");
    type_text(&mut editor, "Thanks");
    assert_eq!(editor.get_value(), "Dear {student_role},\nThanks");
}

#[test]
fn test_typed_braces_are_escaped() {
    let mut editor = test_editor("");
    type_text(&mut editor, "{x}");
    assert_eq!(editor.get_value(), "{{x}}");
    assert_eq!(editor.document().token_count(), 0);
}

#[test]
fn test_caret_moves_do_not_emit_input() {
    let mut editor = test_editor("ab");
    let cmd = press(&mut editor, "ArrowLeft").unwrap();
    assert_eq!(cmd, Cmd::RenderSurface);
    assert_eq!(caret(&editor), 1);
}

// ========================================================================
// Paste
// ========================================================================

#[test]
fn test_paste_is_literal_text() {
    let mut editor = test_editor("Price: ");
    surface(
        &mut editor,
        SurfaceMsg::Paste("{student_target_price}\r\nper unit".into()),
    );
    assert_eq!(
        editor.get_value(),
        "Price: {{student_target_price}}\nper unit"
    );
    assert!(editor.referenced_tokens().is_empty());
}

#[test]
fn test_paste_replaces_text_selection() {
    let mut editor = test_editor("hello world");
    surface(&mut editor, SurfaceMsg::Select { anchor: 0, head: 5 });
    surface(&mut editor, SurfaceMsg::Paste("goodbye".into()));
    assert_eq!(editor.get_value(), "goodbye world");
    assert_eq!(caret(&editor), 7);
}

#[test]
fn test_paste_over_chip_selection_keeps_chip() {
    let mut editor = test_editor("a{ai_role}b");
    surface(&mut editor, SurfaceMsg::SelectAll);
    surface(&mut editor, SurfaceMsg::Paste("X".into()));
    assert_eq!(editor.get_value(), "a{ai_role}bX");
}

// ========================================================================
// Token insertion
// ========================================================================

#[test]
fn test_insert_token_between_text() {
    let mut editor = test_editor_at("Hello !", 6);
    let cmd = update(
        &mut editor,
        Msg::Toolbar(ToolbarMsg::InsertToken(name("student_name"))),
    )
    .unwrap();

    assert_eq!(editor.get_value(), "Hello {student_name}!");
    assert_eq!(editor.get_value().matches("{student_name}").count(), 1);
    assert_eq!(
        editor.document().segments(),
        &[
            Segment::text("Hello "),
            Segment::Token(name("student_name")),
            Segment::text("!"),
        ]
    );
    assert_eq!(caret(&editor), 7);
    assert!(cmd.emits_input());
    assert!(cmd.flatten().contains(&Cmd::Focus));
}

#[test]
fn test_insert_token_unfocused_appends() {
    let mut editor = test_editor_at("ab", 0);
    update(&mut editor, Msg::Blur);
    update(&mut editor, Msg::Toolbar(ToolbarMsg::InsertToken(name("timeline"))));
    assert_eq!(editor.get_value(), "ab{timeline}");
    assert!(editor.is_focused());
}

#[test]
fn test_insert_unknown_token_is_allowed() {
    let mut editor = test_editor("");
    update(&mut editor, Msg::Toolbar(ToolbarMsg::InsertToken(name("not_in_catalog"))));
    assert_eq!(editor.get_value(), "{not_in_catalog}");
}

// ========================================================================
// Undo / Redo
// ========================================================================

#[test]
fn test_undo_restores_value_and_caret() {
    let mut editor = test_editor_at("Hello world", 5);
    type_text(&mut editor, ",");
    update(&mut editor, Msg::Toolbar(ToolbarMsg::InsertToken(name("ai_role"))));
    assert_eq!(editor.get_value(), "Hello,{ai_role} world");

    press(&mut editor, "Ctrl+z");
    assert_eq!(editor.get_value(), "Hello, world");
    assert_eq!(caret(&editor), 6);

    press(&mut editor, "Ctrl+z");
    assert_eq!(editor.get_value(), "Hello world");
    assert_eq!(caret(&editor), 5);

    press(&mut editor, "Ctrl+Shift+z");
    press(&mut editor, "Ctrl+y");
    assert_eq!(editor.get_value(), "Hello,{ai_role} world");
    assert_eq!(caret(&editor), 7);
}

#[test]
fn test_undo_with_empty_history_does_nothing() {
    let mut editor = test_editor("text");
    assert_eq!(press(&mut editor, "Ctrl+z"), None);
}

#[test]
fn test_new_edit_clears_redo() {
    let mut editor = test_editor("");
    type_text(&mut editor, "ab");
    press(&mut editor, "Ctrl+z");
    type_text(&mut editor, "c");
    assert_eq!(press(&mut editor, "Ctrl+y"), None);
    assert_eq!(editor.get_value(), "ac");
}

// ========================================================================
// Misc
// ========================================================================

#[test]
fn test_drop_is_ignored() {
    let mut editor = test_editor("abc");
    assert_eq!(update(&mut editor, Msg::Drop), None);
    assert_eq!(editor.get_value(), "abc");
}

#[test]
fn test_whitespace_only_is_empty() {
    let mut editor = test_editor("");
    type_text(&mut editor, " \n\u{200b}");
    assert!(editor.is_empty());
    update(&mut editor, Msg::Toolbar(ToolbarMsg::InsertToken(name("ai_role"))));
    assert!(!editor.is_empty());
}
