//! Message types for the Elm-style architecture
//!
//! All state changes of a [`TokenEditor`](crate::editor::TokenEditor) flow
//! through these message types.

use crate::document::TokenName;
use crate::editable::SurfaceMsg;

/// Toolbar and custom token form messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarMsg {
    /// A token button was clicked
    InsertToken(TokenName),
    /// Name input changed
    EditCustomName(String),
    /// Label input changed
    EditCustomLabel(String),
    /// The "add token" form was submitted
    SubmitCustomToken,
}

/// Messages from a chip's own controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipMsg {
    /// Remove control activated on the chip with this ordinal
    Remove(usize),
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Caret, selection and editing on the surface
    Surface(SurfaceMsg),
    Toolbar(ToolbarMsg),
    Chip(ChipMsg),
    /// The surface gained focus
    Focus,
    /// The surface lost focus
    Blur,
    /// Something was dropped onto the surface; always ignored
    Drop,
}

impl From<SurfaceMsg> for Msg {
    fn from(msg: SurfaceMsg) -> Self {
        Msg::Surface(msg)
    }
}

impl From<ToolbarMsg> for Msg {
    fn from(msg: ToolbarMsg) -> Self {
        Msg::Toolbar(msg)
    }
}

impl From<ChipMsg> for Msg {
    fn from(msg: ChipMsg) -> Self {
        Msg::Chip(msg)
    }
}
