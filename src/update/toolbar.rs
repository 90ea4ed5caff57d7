//! Toolbar and custom token form update handler.

use crate::commands::Cmd;
use crate::document::TokenName;
use crate::editor::TokenEditor;
use crate::messages::ToolbarMsg;

pub fn update_toolbar(editor: &mut TokenEditor, msg: ToolbarMsg) -> Option<Cmd> {
    match msg {
        ToolbarMsg::InsertToken(name) => insert_token(editor, name),
        ToolbarMsg::EditCustomName(value) => {
            editor.form.name_input = value;
            None
        }
        ToolbarMsg::EditCustomLabel(value) => {
            editor.form.label_input = value;
            None
        }
        ToolbarMsg::SubmitCustomToken => {
            let registry = editor.registry().clone();
            let registered = editor.form.submit(&registry);
            // Feedback changed either way; drop the pending refresh flag too
            let _ = editor.take_toolbar_refresh();
            match registered {
                Some(name) => Cmd::merge([Some(Cmd::RenderToolbar), insert_token(editor, name)]),
                None => Some(Cmd::RenderToolbar),
            }
        }
    }
}

/// Insert a chip at the caret, or at the end when the surface is unfocused.
/// Focuses the surface.
pub fn insert_token(editor: &mut TokenEditor, name: TokenName) -> Option<Cmd> {
    if !editor.focused {
        let end = editor.surface.len_atoms();
        editor.surface.set_cursor(end);
    }
    let focus = editor.focus();

    if !editor.surface.insert_token(name) {
        return Some(focus);
    }
    Some(Cmd::batch(vec![editor.changed(false), focus]))
}
