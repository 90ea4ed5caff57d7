//! SurfaceState - the document together with caret, selection and history.
//!
//! Chips are atomic: the caret moves across them in one step, and caret
//! deletion never removes one. The only way to delete a chip is
//! [`SurfaceState::remove_token`], which backs the chip's remove control.

use std::ops::Range;

use crate::document::{Atom, Document, Segment, TokenName};
use crate::util::{atom_class, AtomClass, CharType};

use super::constraints::EditConstraints;
use super::cursor::Cursor;
use super::history::{EditHistory, EditOperation};
use super::messages::{DeleteDirection, MoveTarget};
use super::selection::Selection;

const WHITESPACE: AtomClass = AtomClass::Char(CharType::Whitespace);

/// Editable document with caret, selection and undo history.
#[derive(Debug, Clone)]
pub struct SurfaceState {
    document: Document,
    cursor: Cursor,
    /// Always has `head == cursor.offset`
    selection: Selection,
    /// Constraints for this surface
    pub constraints: EditConstraints,
    history: EditHistory,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self::new(EditConstraints::surface())
    }
}

impl SurfaceState {
    pub fn new(constraints: EditConstraints) -> Self {
        Self::with_document(Document::new(), constraints)
    }

    /// Create a surface holding `document`, caret at the end
    pub fn with_document(document: Document, constraints: EditConstraints) -> Self {
        let end = document.len_atoms();
        Self {
            document,
            cursor: Cursor::new(end),
            selection: Selection::collapsed(end),
            constraints,
            history: EditHistory::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Segments covered by the selection (empty if collapsed)
    pub fn selected_segments(&self) -> Vec<Segment> {
        if self.selection.is_empty() {
            return Vec::new();
        }
        self.document.slice(self.selection.range())
    }

    pub fn len_atoms(&self) -> usize {
        self.document.len_atoms()
    }

    /// Empty state for placeholder display
    pub fn is_blank(&self) -> bool {
        self.document.is_blank()
    }

    pub fn can_undo(&self) -> bool {
        self.constraints.enable_undo && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.constraints.enable_undo && self.history.can_redo()
    }

    /// Replace the whole document. Caret goes to the end and history is reset.
    pub fn set_document(&mut self, document: Document) {
        self.document = document;
        self.history.clear();
        self.place_cursor(self.document.len_atoms());
    }

    /// Collapse selection to caret position
    pub fn collapse_selection(&mut self) {
        self.selection = Selection::collapsed(self.cursor.offset);
    }

    /// Move the caret and drop any selection
    fn place_cursor(&mut self, offset: usize) {
        self.cursor = Cursor::new(offset).clamped(self.document.len_atoms());
        self.collapse_selection();
    }

    /// Move the caret, either extending the selection or collapsing it
    fn move_head(&mut self, offset: usize, extend_selection: bool) {
        if !extend_selection {
            self.place_cursor(offset);
            return;
        }
        self.cursor = Cursor::new(offset).clamped(self.document.len_atoms());
        self.selection.extend_to(self.cursor.offset);
    }
}

// =============================================================================
// Movement Operations
// =============================================================================

impl SurfaceState {
    pub fn apply_move(&mut self, target: MoveTarget, extend_selection: bool) {
        match target {
            MoveTarget::Left => self.move_left(extend_selection),
            MoveTarget::Right => self.move_right(extend_selection),
            MoveTarget::WordLeft => self.move_word_left(extend_selection),
            MoveTarget::WordRight => self.move_word_right(extend_selection),
            MoveTarget::LineStart => {
                let start = self.document.line_start(self.cursor.offset);
                self.move_head(start, extend_selection);
            }
            MoveTarget::LineEnd => {
                let end = self.document.line_end(self.cursor.offset);
                self.move_head(end, extend_selection);
            }
            MoveTarget::DocumentStart => self.move_head(0, extend_selection),
            MoveTarget::DocumentEnd => self.move_head(self.len_atoms(), extend_selection),
        }
    }

    /// Move caret left by one atom
    pub fn move_left(&mut self, extend_selection: bool) {
        if !extend_selection && self.has_selection() {
            self.place_cursor(self.selection.start());
            return;
        }
        self.move_head(self.cursor.offset.saturating_sub(1), extend_selection);
    }

    /// Move caret right by one atom
    pub fn move_right(&mut self, extend_selection: bool) {
        if !extend_selection && self.has_selection() {
            self.place_cursor(self.selection.end());
            return;
        }
        self.move_head(self.cursor.offset + 1, extend_selection);
    }

    /// Move caret to the start of the previous word (a chip is one word)
    pub fn move_word_left(&mut self, extend_selection: bool) {
        if !extend_selection && self.has_selection() {
            self.place_cursor(self.selection.start());
            return;
        }

        let classes = self.atom_classes();
        let mut pos = self.cursor.offset.min(classes.len());

        while pos > 0 && classes[pos - 1] == WHITESPACE {
            pos -= 1;
        }
        if pos > 0 {
            let class = classes[pos - 1];
            if class == AtomClass::Token {
                pos -= 1;
            } else {
                while pos > 0 && classes[pos - 1] == class {
                    pos -= 1;
                }
            }
        }

        self.move_head(pos, extend_selection);
    }

    /// Move caret past the current word and any following whitespace
    pub fn move_word_right(&mut self, extend_selection: bool) {
        if !extend_selection && self.has_selection() {
            self.place_cursor(self.selection.end());
            return;
        }

        let classes = self.atom_classes();
        let len = classes.len();
        let mut pos = self.cursor.offset.min(len);

        if pos < len {
            let class = classes[pos];
            if class == AtomClass::Token {
                pos += 1;
            } else {
                while pos < len && classes[pos] == class {
                    pos += 1;
                }
            }
        }
        while pos < len && classes[pos] == WHITESPACE {
            pos += 1;
        }

        self.move_head(pos, extend_selection);
    }

    /// Place the caret at an atom offset (clamped)
    pub fn set_cursor(&mut self, offset: usize) {
        self.place_cursor(offset);
    }

    /// Select an explicit range (both ends clamped)
    pub fn select(&mut self, anchor: usize, head: usize) {
        let len = self.len_atoms();
        self.selection = Selection::new(anchor.min(len), head.min(len));
        self.cursor = Cursor::new(self.selection.head);
    }

    pub fn select_all(&mut self) {
        self.select(0, self.len_atoms());
    }

    fn atom_classes(&self) -> Vec<AtomClass> {
        self.document.atoms().map(atom_class).collect()
    }
}

// =============================================================================
// Chip boundary detection
// =============================================================================

impl SurfaceState {
    /// Whether a deletion key in `direction` would act on a chip.
    ///
    /// A non-collapsed selection touches a token when any chip lies inside it.
    /// A collapsed caret touches one when the chip is the adjacent atom on the
    /// side the key acts on.
    pub fn touches_token(&self, direction: DeleteDirection) -> bool {
        if self.has_selection() {
            return self.document.range_contains_token(self.selection.range());
        }
        let offset = self.cursor.offset;
        let adjacent = match direction {
            DeleteDirection::Backward if offset > 0 => self.document.atom_at(offset - 1),
            DeleteDirection::Backward => None,
            DeleteDirection::Forward => self.document.atom_at(offset),
        };
        adjacent.is_some_and(|atom| atom.is_token())
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl SurfaceState {
    /// Insert a character at the caret.
    /// Returns false if rejected by constraints.
    pub fn insert_char(&mut self, ch: char) -> bool {
        if !self.constraints.is_char_allowed(ch) {
            return false;
        }
        self.insert_segments(vec![Segment::Text(ch.to_string())])
    }

    /// Enter key: a literal line break
    pub fn insert_newline(&mut self) -> bool {
        self.insert_char('\n')
    }

    /// Insert literal text at the caret. Braces stay literal.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let text = text.replace("\r\n", "\n");
        if text.chars().any(|ch| !self.constraints.is_char_allowed(ch)) {
            return false;
        }
        self.insert_segments(vec![Segment::Text(text)])
    }

    /// Insert a chip at the caret; the caret ends up right after it
    pub fn insert_token(&mut self, name: TokenName) -> bool {
        self.insert_segments(vec![Segment::Token(name)])
    }

    /// Backspace. Suppressed (returns false) when it would touch a chip.
    pub fn delete_backward(&mut self) -> bool {
        if self.touches_token(DeleteDirection::Backward) {
            tracing::debug!(offset = self.cursor.offset, "backspace next to chip suppressed");
            return false;
        }
        if self.has_selection() {
            return self.delete_selection();
        }
        let offset = self.cursor.offset;
        if offset == 0 {
            return false;
        }
        self.splice(offset - 1..offset, Vec::new(), offset - 1);
        true
    }

    /// Delete key. Suppressed (returns false) when it would touch a chip.
    pub fn delete_forward(&mut self) -> bool {
        if self.touches_token(DeleteDirection::Forward) {
            tracing::debug!(offset = self.cursor.offset, "delete next to chip suppressed");
            return false;
        }
        if self.has_selection() {
            return self.delete_selection();
        }
        let offset = self.cursor.offset;
        if offset >= self.len_atoms() {
            return false;
        }
        self.splice(offset..offset + 1, Vec::new(), offset);
        true
    }

    /// Remove the chip with the given ordinal (0 = first chip in the document)
    pub fn remove_token(&mut self, ordinal: usize) -> Option<TokenName> {
        let offset = self.document.token_offset(ordinal)?;
        let name = match self.document.atom_at(offset) {
            Some(Atom::Token(name)) => name.clone(),
            _ => return None,
        };
        let after = if self.cursor.offset > offset {
            self.cursor.offset - 1
        } else {
            self.cursor.offset
        };
        self.splice(offset..offset + 1, Vec::new(), after);
        Some(name)
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        if !self.constraints.enable_undo {
            return false;
        }
        match self.history.pop_undo() {
            Some(op) => {
                self.revert(&op);
                true
            }
            None => false,
        }
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        if !self.constraints.enable_undo {
            return false;
        }
        // The redo stack holds inverses, so reverting one re-applies the edit
        match self.history.pop_redo() {
            Some(op) => {
                self.revert(&op);
                true
            }
            None => false,
        }
    }

    fn revert(&mut self, op: &EditOperation) {
        let end = op.offset + op.inserted_len();
        self.document.replace(op.offset..end, &op.deleted);
        self.place_cursor(op.cursor_before.offset);
    }

    fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let range = self.selection.range();
        let start = range.start;
        self.splice(range, Vec::new(), start);
        true
    }

    fn insert_segments(&mut self, segments: Vec<Segment>) -> bool {
        let inserted_len: usize = segments.iter().map(Segment::atom_len).sum();
        if inserted_len == 0 {
            return false;
        }
        let range = self.insertion_range();
        let remaining = self.len_atoms() - range.len();
        if self
            .constraints
            .would_exceed_max_length(remaining, inserted_len)
        {
            return false;
        }
        let after = range.start + inserted_len;
        self.splice(range, segments, after);
        true
    }

    /// Range that an insertion replaces. A selection overlapping a chip is
    /// collapsed to its end instead of being replaced.
    fn insertion_range(&mut self) -> Range<usize> {
        if self.selection.is_empty() {
            return self.cursor.offset..self.cursor.offset;
        }
        let range = self.selection.range();
        if self.document.range_contains_token(range.clone()) {
            tracing::debug!(?range, "selection overlaps a chip, inserting after it");
            self.place_cursor(range.end);
            return range.end..range.end;
        }
        range
    }

    /// Replace `range` with `inserted`, move the caret, record history
    fn splice(&mut self, range: Range<usize>, inserted: Vec<Segment>, cursor_after: usize) {
        let cursor_before = self.cursor;
        let offset = range.start;
        let deleted = self.document.replace(range, &inserted);
        self.place_cursor(cursor_after);

        if self.constraints.enable_undo {
            self.history.push(EditOperation::replace(
                offset,
                deleted,
                inserted,
                cursor_before,
                self.cursor,
            ));
        }
    }
}
