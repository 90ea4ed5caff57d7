//! Surface editing update handler.

use crate::commands::Cmd;
use crate::editable::{SurfaceMsg, SurfaceState};
use crate::editor::TokenEditor;

/// Handle a surface message for an editor.
pub fn update_surface(editor: &mut TokenEditor, msg: SurfaceMsg) -> Option<Cmd> {
    // Keyboard and pointer input only reach a focused surface
    editor.focused = true;

    if !apply_surface_msg(&mut editor.surface, &msg) {
        return None;
    }
    if msg.is_editing() {
        Some(editor.changed(false))
    } else {
        Some(Cmd::RenderSurface)
    }
}

/// Remove a chip through its remove control
pub fn remove_chip(editor: &mut TokenEditor, ordinal: usize) -> Option<Cmd> {
    match editor.surface.remove_token(ordinal) {
        Some(name) => {
            tracing::debug!(token = %name, ordinal, "chip removed");
            Some(editor.changed(false))
        }
        None => {
            tracing::warn!(ordinal, "remove requested for missing chip");
            None
        }
    }
}

/// Apply a surface message to a state.
///
/// For editing messages the result is true only if the document changed;
/// for caret and selection messages it is always true.
pub fn apply_surface_msg(state: &mut SurfaceState, msg: &SurfaceMsg) -> bool {
    match msg {
        // === Movement ===
        SurfaceMsg::Move(target) => {
            state.apply_move(*target, false);
            true
        }
        SurfaceMsg::MoveWithSelection(target) => {
            state.apply_move(*target, true);
            true
        }
        SurfaceMsg::SetCursor(offset) => {
            state.set_cursor(*offset);
            true
        }
        SurfaceMsg::Select { anchor, head } => {
            state.select(*anchor, *head);
            true
        }
        SurfaceMsg::SelectAll => {
            state.select_all();
            true
        }
        SurfaceMsg::CollapseSelection => {
            state.collapse_selection();
            true
        }

        // === Insertion ===
        SurfaceMsg::InsertChar(ch) => state.insert_char(*ch),
        SurfaceMsg::InsertText(text) | SurfaceMsg::Paste(text) => state.insert_text(text),
        SurfaceMsg::InsertNewline => state.insert_newline(),

        // === Deletion ===
        SurfaceMsg::DeleteBackward => state.delete_backward(),
        SurfaceMsg::DeleteForward => state.delete_forward(),

        // === Undo/Redo ===
        SurfaceMsg::Undo => state.undo(),
        SurfaceMsg::Redo => state.redo(),
    }
}
