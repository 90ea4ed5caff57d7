//! Custom token registration through the toolbar form, and the broadcast of
//! new tokens to every editor sharing the registry.

mod common;

use std::collections::BTreeMap;

use common::{builtin_registry, name, test_editor_on};
use token_template::fields::{FieldId, FieldMount, PromptFields};
use token_template::messages::{Msg, ToolbarMsg};
use token_template::toolbar::{FeedbackTone, CUSTOM_GROUP_LABEL};
use token_template::update::update;
use token_template::{Cmd, TokenEditor};

fn submit(editor: &mut TokenEditor, raw_name: &str, label: &str) -> Option<Cmd> {
    update(editor, Msg::Toolbar(ToolbarMsg::EditCustomName(raw_name.into())));
    update(editor, Msg::Toolbar(ToolbarMsg::EditCustomLabel(label.into())));
    update(editor, Msg::Toolbar(ToolbarMsg::SubmitCustomToken))
}

fn all_fields() -> BTreeMap<FieldId, FieldMount> {
    FieldId::ALL
        .into_iter()
        .map(|id| (id, FieldMount::standard(id, "")))
        .collect()
}

// ========================================================================
// Form submission
// ========================================================================

#[test]
fn test_register_inserts_and_lists_token() {
    let registry = builtin_registry();
    let mut editor = test_editor_on(&registry, "Budget: ");

    let cmd = submit(&mut editor, "  max budget ", "Max budget").unwrap();
    let cmds = cmd.flatten();
    assert!(cmds.contains(&Cmd::RenderToolbar));
    assert!(cmds.contains(&Cmd::Focus));

    assert_eq!(editor.get_value(), "Budget: {max_budget}");
    assert!(registry.is_custom(&name("max_budget")));

    let toolbar = editor.toolbar();
    let custom = toolbar.custom_group().unwrap();
    assert_eq!(custom.label, CUSTOM_GROUP_LABEL);
    assert_eq!(custom.buttons[0].name, name("max_budget"));
    assert_eq!(custom.buttons[0].label, "Max budget");

    let form = editor.form();
    assert!(form.name_input.is_empty());
    assert!(form.label_input.is_empty());
    assert_eq!(form.feedback.as_ref().unwrap().tone, FeedbackTone::Success);
}

#[test]
fn test_register_without_label_uses_name() {
    let registry = builtin_registry();
    let mut editor = test_editor_on(&registry, "");
    submit(&mut editor, "deadline", "");

    let definition = registry.definition(&name("deadline")).unwrap();
    assert_eq!(definition.label, "deadline");
}

#[test]
fn test_existing_token_is_not_inserted() {
    let registry = builtin_registry();
    let mut editor = test_editor_on(&registry, "x");
    let before = registry.definitions().len();

    submit(&mut editor, "ai_role", "");
    assert_eq!(editor.get_value(), "x");
    assert_eq!(registry.definitions().len(), before);
    assert!(!registry.is_custom(&name("ai_role")));
    let feedback = editor.form().feedback.clone().unwrap();
    assert!(feedback.message.contains("already exists"));
}

#[test]
fn test_invalid_names_report_errors() {
    let registry = builtin_registry();
    let mut editor = test_editor_on(&registry, "");

    let too_long = "x".repeat(50);
    for raw in ["   ", "9lives", "a", "bad-name", too_long.as_str()] {
        let cmd = submit(&mut editor, raw, "Label");
        assert_eq!(cmd, Some(Cmd::RenderToolbar), "input {raw:?}");
        let form = editor.form();
        assert_eq!(form.feedback.as_ref().unwrap().tone, FeedbackTone::Error);
        // Inputs are kept so the user can correct them
        assert_eq!(form.name_input, raw);
    }

    assert_eq!(editor.get_value(), "");
    assert!(registry.custom_tokens().is_empty());
}

#[test]
fn test_empty_name_message() {
    let registry = builtin_registry();
    let mut editor = test_editor_on(&registry, "");
    submit(&mut editor, "", "");
    assert_eq!(
        editor.form().feedback.as_ref().unwrap().message,
        "Enter a token name."
    );
}

// ========================================================================
// Broadcast to sibling editors
// ========================================================================

#[test]
fn test_new_token_reaches_every_field() {
    let registry = builtin_registry();
    let mut fields = PromptFields::mount(&registry, all_fields());

    let msgs = [
        ToolbarMsg::EditCustomName("walk_away_price".into()),
        ToolbarMsg::EditCustomLabel("Walk-away price".into()),
        ToolbarMsg::SubmitCustomToken,
    ];
    let mut cmds = Vec::new();
    for msg in msgs {
        cmds.extend(fields.dispatch(FieldId::Conversation, Msg::Toolbar(msg)));
    }

    // Every other field gets exactly one toolbar refresh
    for id in [FieldId::Environment, FieldId::Evaluation, FieldId::AssignmentScenario] {
        let refreshes = cmds
            .iter()
            .filter(|(field, cmd)| *field == id && *cmd == Cmd::RenderToolbar)
            .count();
        assert_eq!(refreshes, 1, "field {id}");
        let editor = fields.editor(id).unwrap();
        assert!(editor.toolbar().button(&name("walk_away_price")).is_some());
        assert_eq!(editor.get_value(), "");
    }

    let values = fields.values();
    assert_eq!(values[&FieldId::Conversation], "{walk_away_price}");
}

#[test]
fn test_no_refresh_without_registry_change() {
    let registry = builtin_registry();
    let mut fields = PromptFields::mount(&registry, all_fields());
    let cmds = fields.dispatch(
        FieldId::Evaluation,
        Msg::Toolbar(ToolbarMsg::InsertToken(name("timeline"))),
    );
    assert_eq!(cmds.len(), 1);
    assert_eq!(cmds[0].0, FieldId::Evaluation);
}

#[test]
fn test_registration_outside_form_refreshes_toolbars() {
    let registry = builtin_registry();
    let mut editor = test_editor_on(&registry, "");
    assert_eq!(editor.take_toolbar_refresh(), None);

    registry.register("quota", Some("Quota")).unwrap();
    assert_eq!(editor.take_toolbar_refresh(), Some(Cmd::RenderToolbar));
    assert_eq!(editor.take_toolbar_refresh(), None);
}

#[test]
fn test_dropped_editor_unsubscribes() {
    let registry = builtin_registry();
    let editor = test_editor_on(&registry, "");
    assert_eq!(registry.subscriber_count(), 1);
    drop(editor);
    assert_eq!(registry.subscriber_count(), 0);
    registry.register("after_drop", None).unwrap();
}
