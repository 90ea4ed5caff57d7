//! Edit history (undo/redo) for the editing surface.

use std::collections::VecDeque;

use crate::document::Segment;

use super::cursor::Cursor;

/// A single edit operation that can be undone/redone.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOperation {
    /// Atom offset where the edit occurred
    pub offset: usize,
    /// Segments that were removed (empty for pure inserts)
    pub deleted: Vec<Segment>,
    /// Segments that were inserted (empty for pure deletes)
    pub inserted: Vec<Segment>,
    pub cursor_before: Cursor,
    pub cursor_after: Cursor,
}

impl EditOperation {
    pub fn replace(
        offset: usize,
        deleted: Vec<Segment>,
        inserted: Vec<Segment>,
        cursor_before: Cursor,
        cursor_after: Cursor,
    ) -> Self {
        Self {
            offset,
            deleted,
            inserted,
            cursor_before,
            cursor_after,
        }
    }

    /// Number of atoms this operation inserted
    pub fn inserted_len(&self) -> usize {
        self.inserted.iter().map(Segment::atom_len).sum()
    }

    /// The operation that undoes this one
    pub fn inverse(&self) -> Self {
        Self::replace(
            self.offset,
            self.inserted.clone(),
            self.deleted.clone(),
            self.cursor_after,
            self.cursor_before,
        )
    }
}

/// Oldest entries are dropped once the undo stack exceeds this
const HISTORY_LIMIT: usize = 500;

/// Undo and redo stacks. The redo stack holds inverses, so applying either
/// kind of entry is the same revert.
#[derive(Debug, Clone)]
pub struct EditHistory {
    undo: VecDeque<EditOperation>,
    redo: Vec<EditOperation>,
    limit: usize,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl EditHistory {
    pub fn new() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record a new edit; any redo entries become unreachable
    pub fn push(&mut self, op: EditOperation) {
        self.redo.clear();
        if self.undo.len() == self.limit {
            self.undo.pop_front();
        }
        self.undo.push_back(op);
    }

    /// Take the latest edit to revert; its inverse becomes redoable
    pub fn pop_undo(&mut self) -> Option<EditOperation> {
        let op = self.undo.pop_back()?;
        self.redo.push(op.inverse());
        Some(op)
    }

    /// Take the latest inverse to revert; the edit becomes undoable again
    pub fn pop_redo(&mut self) -> Option<EditOperation> {
        let op = self.redo.pop()?;
        self.undo.push_back(op.inverse());
        Some(op)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn len(&self) -> usize {
        self.undo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo.is_empty()
    }
}
