//! Message types for the editing surface.

/// Target for caret movement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// One atom left (a chip is crossed in one step)
    Left,
    /// One atom right
    Right,
    /// Move one word left
    WordLeft,
    /// Move one word right
    WordRight,
    /// Start of the current logical line
    LineStart,
    /// End of the current logical line
    LineEnd,
    DocumentStart,
    DocumentEnd,
}

/// Direction a deletion key acts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDirection {
    /// Backspace
    Backward,
    /// Delete
    Forward,
}

/// Message type for all surface editing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceMsg {
    // === Movement ===
    /// Move caret without affecting selection
    Move(MoveTarget),
    /// Move caret and extend selection
    MoveWithSelection(MoveTarget),
    /// Place the caret (pointer click); clamped to the document
    SetCursor(usize),
    /// Select an explicit atom range (pointer drag)
    Select { anchor: usize, head: usize },
    SelectAll,
    CollapseSelection,

    // === Insertion ===
    InsertChar(char),
    /// Insert literal text (e.g. from an IME composition)
    InsertText(String),
    /// Enter key; inserts `\n` rather than a block element
    InsertNewline,
    /// Plain-text clipboard content
    Paste(String),

    // === Deletion ===
    /// Backspace
    DeleteBackward,
    /// Delete
    DeleteForward,

    // === Undo/Redo ===
    Undo,
    Redo,
}

impl SurfaceMsg {
    /// Check if this message may modify the document
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            SurfaceMsg::InsertChar(_)
                | SurfaceMsg::InsertText(_)
                | SurfaceMsg::InsertNewline
                | SurfaceMsg::Paste(_)
                | SurfaceMsg::DeleteBackward
                | SurfaceMsg::DeleteForward
                | SurfaceMsg::Undo
                | SurfaceMsg::Redo
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_editing() {
        assert!(SurfaceMsg::InsertChar('a').is_editing());
        assert!(SurfaceMsg::DeleteBackward.is_editing());
        assert!(SurfaceMsg::Paste("x".into()).is_editing());
        assert!(SurfaceMsg::Undo.is_editing());
        assert!(!SurfaceMsg::Move(MoveTarget::Left).is_editing());
        assert!(!SurfaceMsg::SelectAll.is_editing());
    }
}
