//! Update functions for the Elm-style architecture
//!
//! All state transformations of a [`TokenEditor`] flow through these functions.

mod surface;
mod toolbar;

use crate::commands::Cmd;
use crate::editor::TokenEditor;
use crate::messages::{ChipMsg, Msg};

#[cfg(debug_assertions)]
use crate::tracing::SurfaceSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use surface::{apply_surface_msg, update_surface};
pub use toolbar::{insert_token, update_toolbar};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(editor: &mut TokenEditor, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(editor, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(editor, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(editor: &mut TokenEditor, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Surface(m) => surface::update_surface(editor, m),
        Msg::Toolbar(m) => toolbar::update_toolbar(editor, m),
        Msg::Chip(ChipMsg::Remove(ordinal)) => surface::remove_chip(editor, ordinal),
        Msg::Focus => {
            editor.focused = true;
            None
        }
        Msg::Blur => {
            editor.focused = false;
            None
        }
        Msg::Drop => {
            tracing::debug!("drop onto surface ignored");
            None
        }
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after caret state and logs diffs for debugging.
#[cfg(debug_assertions)]
fn update_traced(editor: &mut TokenEditor, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", mount = %editor.mount_id(), msg = %msg_name).entered();

    let before = SurfaceSnapshot::from_surface(editor.surface());
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(editor, msg);

    let after = SurfaceSnapshot::from_surface(editor.surface());
    if let Some(diff) = before.diff(&after) {
        debug!(target: "cursor", %diff, "state changed");
    }
    after.assert_invariants(&msg_name);

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Surface::Move(Left)`
/// - `Toolbar::InsertToken(TokenName("ai_role"))`
/// - `Chip::Remove(0)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Surface(m) => format!("Surface::{:?}", m),
        Msg::Toolbar(m) => format!("Toolbar::{:?}", m),
        Msg::Chip(m) => format!("Chip::{:?}", m),
        Msg::Focus => "Focus".to_string(),
        Msg::Blur => "Blur".to_string(),
        Msg::Drop => "Drop".to_string(),
    }
}
